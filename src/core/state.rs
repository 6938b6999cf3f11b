//! # Application State
//!
//! Core business state for the tarefas client. This module contains domain
//! state only - no TUI-specific types. Presentation state (input buffers,
//! list selection) lives in the `tui` module.
//!
//! ```text
//! App
//! ├── tarefas: Vec<Tarefa>          // the task collection (source of truth)
//! ├── fetch_error: Option<String>   // initial-fetch failure, shown inline
//! ├── form_visible: bool            // inline create form toggle
//! ├── modal: Modal                  // at most one overlay at a time
//! └── status_message: String        // status bar text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! This keeps things predictable, so no surprise mutations.

use crate::api::Tarefa;

/// Which overlay is open, if any. A tagged enum instead of independent
/// booleans so two modals can never be open at once.
#[derive(Debug, Clone, PartialEq)]
pub enum Modal {
    None,
    /// Edit dialog, holding the task being edited.
    Editing(Tarefa),
    /// Delete confirmation, holding the id targeted for deletion.
    ConfirmingDelete(i64),
}

pub struct App {
    /// The task collection. Between fetches this is the single source of
    /// truth, mutated only by reconciling server responses.
    pub tarefas: Vec<Tarefa>,
    pub fetch_error: Option<String>,
    pub form_visible: bool,
    pub modal: Modal,
    pub status_message: String,
}

impl App {
    pub fn new() -> Self {
        Self {
            tarefas: Vec::new(),
            fetch_error: None,
            form_visible: false,
            modal: Modal::None,
            status_message: String::from("Carregando tarefas..."),
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_app;

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert!(app.tarefas.is_empty());
        assert!(app.fetch_error.is_none());
        assert!(!app.form_visible);
        assert_eq!(app.modal, Modal::None);
        assert_eq!(app.status_message, "Carregando tarefas...");
    }
}
