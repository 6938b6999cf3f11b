//! # TUI Components
//!
//! All UI components for the terminal interface.
//!
//! Two patterns, mirroring the rest of the architecture:
//!
//! - **Stateful, event-driven**: `TarefaForm` owns its field buffers and
//!   focus and emits `FormEvent`s; `TarefaListState` owns the selection.
//! - **Transient render wrappers**: `TarefaList` and `ConfirmDialog` are
//!   built each frame from borrowed state and props.
//!
//! Each component file contains everything related to that component:
//! state types, event types, rendering, event handling, and tests.

pub mod confirm_dialog;
pub mod tarefa_form;
pub mod tarefa_list;

pub use confirm_dialog::{ConfirmDialog, ConfirmEvent};
pub use tarefa_form::{FormEvent, TarefaForm};
pub use tarefa_list::{TarefaList, TarefaListState};
