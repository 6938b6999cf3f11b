mod api;
mod core;
#[cfg(test)]
mod test_support;
mod tui;

use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "tarefas", about = "Terminal client for the tarefas REST API")]
struct Args {
    /// Base URL of the tarefas backend
    #[arg(short, long)]
    base_url: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to tarefas.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("tarefas.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = match core::config::load_config() {
        Ok(config) => config,
        Err(e) => {
            log::warn!("Falling back to default config: {e}");
            core::config::TarefasConfig::default()
        }
    };
    let config = core::config::resolve(&file_config, args.base_url.as_deref());

    log::info!("Tarefas starting up against {}", config.base_url);

    tui::run(config)
}
