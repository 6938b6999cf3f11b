//! # Actions
//!
//! Everything that can happen in the tarefas client becomes an `Action`.
//! User confirms a delete? That's `Action::ConfirmDelete`.
//! The backend answers a create? That's `Action::Created(tarefa)`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state, and returns an `Effect` describing the I/O the caller must
//! perform (if any). No I/O here. Network calls happen elsewhere.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! This makes the list/modal/form choreography testable without a backend:
//! feed actions in, assert on the resulting state.

use log::error;

use crate::api::{Tarefa, TarefaPayload};
use crate::core::state::{App, Modal};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Initial fetch succeeded.
    TarefasFetched(Vec<Tarefa>),
    /// Initial fetch failed; the message is the underlying error, logged only.
    FetchFailed(String),

    /// Show/hide the inline create form.
    ToggleForm,
    /// The create form submitted a valid payload.
    SubmitCreate(TarefaPayload),
    /// The backend created this record.
    Created(Tarefa),

    /// An edit control was activated for this task.
    OpenEdit(Tarefa),
    /// The edit dialog was dismissed without saving.
    CloseEdit,
    /// The edit form submitted a valid payload for this id.
    SubmitUpdate { id: i64, payload: TarefaPayload },
    /// The backend saved this updated record.
    Updated(Tarefa),

    /// The backend answered 409 on create/update. The list is untouched;
    /// the form that submitted shows the duplicate message.
    SaveConflict,
    /// Any other create/update failure. Logged, not surfaced.
    SaveFailed(String),

    /// A delete control was activated for this id.
    RequestDelete(i64),
    /// The confirmation dialog's confirm action.
    ConfirmDelete,
    /// The confirmation dialog's cancel action.
    CancelDelete,
    /// The backend deleted this id.
    Deleted(i64),
    /// Delete failed. Logged; the dialog stays open.
    DeleteFailed(String),

    Quit,
}

/// I/O the event loop must perform after an `update()`.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Create(TarefaPayload),
    Update { id: i64, payload: TarefaPayload },
    Delete(i64),
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::TarefasFetched(tarefas) => {
            app.status_message = format!("{} tarefas", tarefas.len());
            app.tarefas = tarefas;
            Effect::None
        }
        Action::FetchFailed(err) => {
            error!("Erro ao buscar tarefas: {err}");
            app.fetch_error = Some("Erro ao buscar tarefas".to_string());
            app.status_message.clear();
            Effect::None
        }

        Action::ToggleForm => {
            app.form_visible = !app.form_visible;
            Effect::None
        }
        Action::SubmitCreate(payload) => Effect::Create(payload),
        Action::Created(tarefa) => {
            app.tarefas.push(tarefa);
            app.form_visible = false;
            app.status_message = String::from("Tarefa criada");
            Effect::None
        }

        Action::OpenEdit(tarefa) => {
            app.modal = Modal::Editing(tarefa);
            Effect::None
        }
        Action::CloseEdit => {
            if let Modal::Editing(_) = app.modal {
                app.modal = Modal::None;
            }
            Effect::None
        }
        Action::SubmitUpdate { id, payload } => Effect::Update { id, payload },
        Action::Updated(tarefa) => {
            if let Some(existing) = app.tarefas.iter_mut().find(|t| t.id == tarefa.id) {
                *existing = tarefa;
            }
            app.modal = Modal::None;
            app.status_message = String::from("Tarefa atualizada");
            Effect::None
        }

        Action::SaveConflict => Effect::None,
        Action::SaveFailed(err) => {
            error!("Erro ao salvar tarefa: {err}");
            Effect::None
        }

        Action::RequestDelete(id) => {
            app.modal = Modal::ConfirmingDelete(id);
            Effect::None
        }
        Action::ConfirmDelete => {
            // The dialog stays open until the backend confirms; on failure
            // it is still open with the target id intact.
            match app.modal {
                Modal::ConfirmingDelete(id) => Effect::Delete(id),
                _ => Effect::None,
            }
        }
        Action::CancelDelete => {
            if let Modal::ConfirmingDelete(_) = app.modal {
                app.modal = Modal::None;
            }
            Effect::None
        }
        Action::Deleted(id) => {
            app.tarefas.retain(|t| t.id != id);
            app.modal = Modal::None;
            app.status_message = String::from("Tarefa excluída");
            Effect::None
        }
        Action::DeleteFailed(err) => {
            error!("Erro ao excluir a tarefa: {err}");
            Effect::None
        }

        Action::Quit => Effect::Quit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{tarefa, test_app};

    #[test]
    fn test_fetched_replaces_list() {
        let mut app = test_app();
        let effect = update(
            &mut app,
            Action::TarefasFetched(vec![tarefa(1, "a", 10.0, 1), tarefa(2, "b", 20.0, 2)]),
        );
        assert_eq!(effect, Effect::None);
        assert_eq!(app.tarefas.len(), 2);
        assert_eq!(app.status_message, "2 tarefas");
    }

    #[test]
    fn test_fetch_failed_sets_inline_message_and_keeps_list_empty() {
        let mut app = test_app();
        update(&mut app, Action::FetchFailed("connection refused".to_string()));
        assert_eq!(app.fetch_error.as_deref(), Some("Erro ao buscar tarefas"));
        assert!(app.tarefas.is_empty());
    }

    #[test]
    fn test_toggle_form() {
        let mut app = test_app();
        update(&mut app, Action::ToggleForm);
        assert!(app.form_visible);
        update(&mut app, Action::ToggleForm);
        assert!(!app.form_visible);
    }

    #[test]
    fn test_submit_create_emits_create_effect_without_touching_list() {
        let mut app = test_app();
        app.tarefas.push(tarefa(1, "a", 10.0, 1));
        let payload = crate::test_support::payload("b", 20.0);
        let effect = update(&mut app, Action::SubmitCreate(payload.clone()));
        assert_eq!(effect, Effect::Create(payload));
        assert_eq!(app.tarefas.len(), 1);
    }

    #[test]
    fn test_created_appends_exactly_one_and_hides_form() {
        let mut app = test_app();
        app.tarefas.push(tarefa(1, "a", 10.0, 1));
        app.form_visible = true;

        update(&mut app, Action::Created(tarefa(2, "b", 20.0, 2)));

        assert_eq!(app.tarefas.len(), 2);
        assert_eq!(app.tarefas[1].id, 2);
        assert!(!app.form_visible);
    }

    #[test]
    fn test_save_conflict_leaves_list_unchanged() {
        let mut app = test_app();
        app.tarefas.push(tarefa(1, "a", 10.0, 1));
        let before = app.tarefas.clone();

        let effect = update(&mut app, Action::SaveConflict);

        assert_eq!(effect, Effect::None);
        assert_eq!(app.tarefas, before);
    }

    #[test]
    fn test_open_and_close_edit() {
        let mut app = test_app();
        let alvo = tarefa(3, "c", 30.0, 3);

        update(&mut app, Action::OpenEdit(alvo.clone()));
        assert_eq!(app.modal, Modal::Editing(alvo));

        // Closing discards the in-progress edit without touching the list.
        update(&mut app, Action::CloseEdit);
        assert_eq!(app.modal, Modal::None);
        assert!(app.tarefas.is_empty());
    }

    #[test]
    fn test_updated_replaces_only_matching_id() {
        let mut app = test_app();
        app.tarefas = vec![
            tarefa(1, "a", 10.0, 3),
            tarefa(2, "b", 20.0, 1),
            tarefa(3, "c", 30.0, 2),
        ];
        app.modal = Modal::Editing(app.tarefas[1].clone());

        update(&mut app, Action::Updated(tarefa(2, "b editado", 999.0, 1)));

        assert_eq!(app.tarefas.len(), 3);
        assert_eq!(app.tarefas[0], tarefa(1, "a", 10.0, 3));
        assert_eq!(app.tarefas[1].nome, "b editado");
        assert_eq!(app.tarefas[1].custo, 999.0);
        assert_eq!(app.tarefas[2], tarefa(3, "c", 30.0, 2));
        // Pre-sort order untouched: still 1, 2, 3 by position.
        assert_eq!(app.tarefas[1].id, 2);
        assert_eq!(app.modal, Modal::None);
    }

    #[test]
    fn test_confirm_delete_emits_delete_effect_and_keeps_dialog_open() {
        let mut app = test_app();
        app.modal = Modal::ConfirmingDelete(7);

        let effect = update(&mut app, Action::ConfirmDelete);

        assert_eq!(effect, Effect::Delete(7));
        assert_eq!(app.modal, Modal::ConfirmingDelete(7));
    }

    #[test]
    fn test_deleted_removes_exactly_matching_id_and_closes_dialog() {
        let mut app = test_app();
        app.tarefas = vec![tarefa(1, "a", 10.0, 1), tarefa(2, "b", 20.0, 2)];
        app.modal = Modal::ConfirmingDelete(1);

        update(&mut app, Action::Deleted(1));

        assert_eq!(app.tarefas.len(), 1);
        assert_eq!(app.tarefas[0].id, 2);
        assert_eq!(app.modal, Modal::None);
    }

    #[test]
    fn test_cancel_delete_removes_nothing_and_closes_dialog() {
        let mut app = test_app();
        app.tarefas = vec![tarefa(1, "a", 10.0, 1)];
        app.modal = Modal::ConfirmingDelete(1);

        update(&mut app, Action::CancelDelete);

        assert_eq!(app.tarefas.len(), 1);
        assert_eq!(app.modal, Modal::None);
    }

    #[test]
    fn test_delete_failed_leaves_dialog_open_and_list_unchanged() {
        let mut app = test_app();
        app.tarefas = vec![tarefa(1, "a", 10.0, 1)];
        app.modal = Modal::ConfirmingDelete(1);

        update(&mut app, Action::DeleteFailed("HTTP 500".to_string()));

        assert_eq!(app.tarefas.len(), 1);
        assert_eq!(app.modal, Modal::ConfirmingDelete(1));
    }

    #[test]
    fn test_save_failed_changes_nothing_visible() {
        let mut app = test_app();
        app.form_visible = true;
        update(&mut app, Action::SaveFailed("HTTP 500".to_string()));
        assert!(app.form_visible);
        assert!(app.fetch_error.is_none());
    }

    #[test]
    fn test_quit_effect() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
    }
}
