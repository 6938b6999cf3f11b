//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use chrono::{NaiveDate, TimeZone, Utc};

use crate::api::{Tarefa, TarefaPayload};
use crate::core::state::App;

/// Creates an App in its initial state.
pub fn test_app() -> App {
    App::new()
}

/// Tarefa fixture. The due date carries a time-of-day on purpose so
/// date-formatting tests exercise the drop-the-time behavior.
pub fn tarefa(id: i64, nome: &str, custo: f64, ordem: i64) -> Tarefa {
    Tarefa {
        id,
        nome: nome.to_string(),
        custo,
        data_limite: Utc.with_ymd_and_hms(2024, 3, 5, 14, 30, 0).unwrap(),
        ordem,
    }
}

/// Payload fixture for create/update submissions.
pub fn payload(nome: &str, custo: f64) -> TarefaPayload {
    TarefaPayload {
        nome: nome.to_string(),
        custo,
        data_limite: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
    }
}
