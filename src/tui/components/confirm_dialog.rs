//! # Delete Confirmation Dialog
//!
//! Centered overlay gating the delete action. Confirm issues the DELETE,
//! cancel closes without touching the backend. While a delete is in flight
//! the dialog stays on screen; it only closes on success or cancel.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};

use crate::tui::event::TuiEvent;

/// Events emitted by the confirmation dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmEvent {
    Confirm,
    Cancel,
}

/// Key mapping for the dialog: Enter/`s` confirms, Esc/`n` cancels.
pub fn handle_confirm_event(event: &TuiEvent) -> Option<ConfirmEvent> {
    match event {
        TuiEvent::Submit | TuiEvent::InputChar('s') | TuiEvent::InputChar('S') => {
            Some(ConfirmEvent::Confirm)
        }
        TuiEvent::Escape | TuiEvent::InputChar('n') | TuiEvent::InputChar('N') => {
            Some(ConfirmEvent::Cancel)
        }
        _ => None,
    }
}

/// Transient render wrapper for the confirmation overlay.
pub struct ConfirmDialog<'a> {
    /// Name of the targeted task, when it is still present in the list.
    pub nome: Option<&'a str>,
}

impl<'a> ConfirmDialog<'a> {
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(50, 30, area);
        frame.render_widget(Clear, overlay);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red))
            .title(" Excluir tarefa ")
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(" Enter/s Confirmar  Esc/n Cancelar ").centered())
            .padding(Padding::uniform(1));

        let message = match self.nome {
            Some(nome) => format!("Tem certeza que deseja excluir \"{nome}\"?"),
            None => "Tem certeza que deseja excluir esta tarefa?".to_string(),
        };

        let body = Paragraph::new(message)
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(body, overlay);
    }
}

/// Compute a centered rect using percentage of the outer rect.
pub fn centered_rect(percent_x: u16, percent_y: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}
