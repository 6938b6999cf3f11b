//! Wire types for the tarefas REST API.
//!
//! Field names follow the backend's JSON (Portuguese, camelCase), so the
//! structs carry serde renames where Rust naming differs.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A task record as returned by the server.
///
/// `id` and `ordem` are server-assigned; the client never generates either.
/// `ordem` exists purely for display ordering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tarefa {
    pub id: i64,
    pub nome: String,
    pub custo: f64,
    #[serde(rename = "dataLimite", deserialize_with = "deserialize_data_limite")]
    pub data_limite: DateTime<Utc>,
    pub ordem: i64,
}

/// The create/update request body: everything the user edits, nothing the
/// server assigns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TarefaPayload {
    pub nome: String,
    pub custo: f64,
    #[serde(rename = "dataLimite")]
    pub data_limite: NaiveDate,
}

/// Accepts the date formats the backend is known to emit: RFC 3339, a naive
/// datetime, or a bare `YYYY-MM-DD` date (normalized to midnight UTC).
fn deserialize_data_limite<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;

    if let Ok(dt) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S") {
        return Ok(dt.and_utc());
    }
    NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
        .map_err(|e| serde::de::Error::custom(format!("invalid dataLimite {raw:?}: {e}")))
}
