//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event flow
//!
//! Keyboard events are routed by what currently has focus: the delete
//! confirmation, the edit dialog, the inline create form, or the list.
//! `update()` mutates core state and returns an `Effect`; network effects
//! run on spawned tokio tasks that send exactly one result `Action` back
//! over an mpsc channel, drained once per loop iteration. Each state
//! update therefore happens only after its network call completed.

mod component;
pub mod components;
mod event;
mod ui;

pub use component::{Component, EventHandler};

use log::{debug, info, warn};
use std::sync::{Arc, mpsc};

use crate::api::TarefaClient;
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::{App, Modal};
use crate::tui::components::confirm_dialog::{self, ConfirmEvent};
use crate::tui::components::tarefa_list::sorted_by_ordem;
use crate::tui::components::{FormEvent, TarefaForm, TarefaListState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub list: TarefaListState,
    pub create_form: TarefaForm,
    /// Built when the edit dialog opens, dropped when it closes.
    pub edit_form: Option<TarefaForm>,
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            list: TarefaListState::new(),
            create_form: TarefaForm::new(),
            edit_form: None,
        }
    }
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let client = Arc::new(TarefaClient::new(config.base_url.clone()));
    let mut app = App::new();
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    // One-shot initial fetch; on failure the list stays empty, no retry.
    spawn_fetch(client.clone(), tx.clone());

    let mut needs_redraw = true; // Force first frame
    let mut should_quit = false;

    loop {
        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        let first_event = poll_event_timeout(std::time::Duration::from_millis(250));
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            // Ctrl+C always quits regardless of focus
            if matches!(event, TuiEvent::ForceQuit) {
                apply(&mut app, Action::Quit, &client, &tx, &mut should_quit);
                continue;
            }

            // Route by what has focus: confirmation > edit dialog > create form > list
            match app.modal {
                Modal::ConfirmingDelete(_) => {
                    if let Some(confirm) = confirm_dialog::handle_confirm_event(&event) {
                        let action = match confirm {
                            ConfirmEvent::Confirm => Action::ConfirmDelete,
                            ConfirmEvent::Cancel => Action::CancelDelete,
                        };
                        apply(&mut app, action, &client, &tx, &mut should_quit);
                    }
                    continue;
                }
                Modal::Editing(_) => {
                    if matches!(event, TuiEvent::Escape) {
                        // Discard the in-progress edit; no backend call.
                        apply(&mut app, Action::CloseEdit, &client, &tx, &mut should_quit);
                        tui.edit_form = None;
                        continue;
                    }
                    if let Some(form) = tui.edit_form.as_mut()
                        && let Some(FormEvent::Submit(payload)) = form.handle_event(&event)
                        && let Some(id) = form.editing_id()
                    {
                        apply(
                            &mut app,
                            Action::SubmitUpdate { id, payload },
                            &client,
                            &tx,
                            &mut should_quit,
                        );
                    }
                    continue;
                }
                Modal::None => {}
            }

            if app.form_visible {
                if matches!(event, TuiEvent::Escape) {
                    apply(&mut app, Action::ToggleForm, &client, &tx, &mut should_quit);
                    // Hiding discards any in-progress input; reopening
                    // starts blank.
                    tui.create_form.clear();
                } else if let Some(FormEvent::Submit(payload)) =
                    tui.create_form.handle_event(&event)
                {
                    apply(
                        &mut app,
                        Action::SubmitCreate(payload),
                        &client,
                        &tx,
                        &mut should_quit,
                    );
                }
                continue;
            }

            // List mode
            match event {
                TuiEvent::InputChar('q') | TuiEvent::Escape => {
                    apply(&mut app, Action::Quit, &client, &tx, &mut should_quit);
                }
                TuiEvent::InputChar('i') => {
                    apply(&mut app, Action::ToggleForm, &client, &tx, &mut should_quit);
                    tui.create_form.clear();
                }
                TuiEvent::CursorUp => tui.list.select_prev(app.tarefas.len()),
                TuiEvent::CursorDown => tui.list.select_next(app.tarefas.len()),
                TuiEvent::InputChar('e') | TuiEvent::Submit => {
                    let alvo = sorted_by_ordem(&app.tarefas)
                        .get(tui.list.selected)
                        .map(|t| (*t).clone());
                    if let Some(alvo) = alvo {
                        apply(
                            &mut app,
                            Action::OpenEdit(alvo.clone()),
                            &client,
                            &tx,
                            &mut should_quit,
                        );
                        tui.edit_form = Some(TarefaForm::for_edit(&alvo));
                    }
                }
                TuiEvent::InputChar('d') => {
                    let id = sorted_by_ordem(&app.tarefas)
                        .get(tui.list.selected)
                        .map(|t| t.id);
                    if let Some(id) = id {
                        apply(
                            &mut app,
                            Action::RequestDelete(id),
                            &client,
                            &tx,
                            &mut should_quit,
                        );
                    }
                }
                _ => {}
            }
        }

        if should_quit {
            break;
        }

        // Handle background task results (fetch/save/delete responses)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);

            // Presentation side of the action, before core consumes it
            match &action {
                Action::SaveConflict => match app.modal {
                    // The message lands on whichever form submitted.
                    Modal::Editing(_) => {
                        if let Some(form) = tui.edit_form.as_mut() {
                            form.set_conflict();
                        }
                    }
                    _ => tui.create_form.set_conflict(),
                },
                // A successful save blanks the submitting form's fields,
                // in edit mode too (the dialog closes right after).
                Action::Created(_) => tui.create_form.clear(),
                Action::Updated(_) => {
                    if let Some(form) = tui.edit_form.as_mut() {
                        form.clear();
                    }
                }
                _ => {}
            }

            apply(&mut app, action, &client, &tx, &mut should_quit);

            if !matches!(app.modal, Modal::Editing(_)) {
                tui.edit_form = None;
            }
        }

        if should_quit {
            break;
        }
    }

    ratatui::restore();
    Ok(())
}

/// Runs an action through the reducer and executes the resulting effect.
fn apply(
    app: &mut App,
    action: Action,
    client: &Arc<TarefaClient>,
    tx: &mpsc::Sender<Action>,
    should_quit: &mut bool,
) {
    match update(app, action) {
        Effect::None => {}
        Effect::Quit => *should_quit = true,
        Effect::Create(payload) => spawn_create(client.clone(), payload, tx.clone()),
        Effect::Update { id, payload } => spawn_update(client.clone(), id, payload, tx.clone()),
        Effect::Delete(id) => spawn_delete(client.clone(), id, tx.clone()),
    }
}

fn send(tx: &mpsc::Sender<Action>, action: Action) {
    if tx.send(action).is_err() {
        warn!("Failed to send action: receiver dropped");
    }
}

fn spawn_fetch(client: Arc<TarefaClient>, tx: mpsc::Sender<Action>) {
    info!("Spawning initial fetch");
    tokio::spawn(async move {
        let action = match client.list().await {
            Ok(tarefas) => Action::TarefasFetched(tarefas),
            Err(e) => Action::FetchFailed(e.to_string()),
        };
        send(&tx, action);
    });
}

fn spawn_create(client: Arc<TarefaClient>, payload: crate::api::TarefaPayload, tx: mpsc::Sender<Action>) {
    info!("Spawning create request");
    tokio::spawn(async move {
        let action = match client.create(&payload).await {
            Ok(tarefa) => Action::Created(tarefa),
            Err(crate::api::ApiError::Conflict) => Action::SaveConflict,
            Err(e) => Action::SaveFailed(e.to_string()),
        };
        send(&tx, action);
    });
}

fn spawn_update(
    client: Arc<TarefaClient>,
    id: i64,
    payload: crate::api::TarefaPayload,
    tx: mpsc::Sender<Action>,
) {
    info!("Spawning update request for id={id}");
    tokio::spawn(async move {
        let action = match client.update(id, &payload).await {
            Ok(tarefa) => Action::Updated(tarefa),
            Err(crate::api::ApiError::Conflict) => Action::SaveConflict,
            Err(e) => Action::SaveFailed(e.to_string()),
        };
        send(&tx, action);
    });
}

fn spawn_delete(client: Arc<TarefaClient>, id: i64, tx: mpsc::Sender<Action>) {
    info!("Spawning delete request for id={id}");
    tokio::spawn(async move {
        let action = match client.delete(id).await {
            Ok(()) => Action::Deleted(id),
            Err(e) => Action::DeleteFailed(e.to_string()),
        };
        send(&tx, action);
    });
}
