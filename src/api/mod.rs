pub mod client;
pub mod types;

pub use client::{ApiError, TarefaClient};
pub use types::{Tarefa, TarefaPayload};
