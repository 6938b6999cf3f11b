//! # TarefaForm Component
//!
//! Collects the three editable fields of a task (nome, custo, data limite)
//! and emits a validated payload on submit. Used in two places: inline for
//! creation, and inside the edit dialog pre-populated with an existing task.
//!
//! ## State Management
//!
//! The field buffers and focus are internal state. Whether the form is in
//! create or edit mode is fixed at construction: `new()` starts empty,
//! `for_edit()` copies the task's values and remembers its id.
//!
//! Validation is input-level only: the custo field accepts digits and `.`,
//! the date field digits and `-`, and submit requires all fields filled and
//! parseable. The form performs no I/O; the event loop turns the emitted
//! payload into the actual create/update request.

use chrono::NaiveDate;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::api::{Tarefa, TarefaPayload};
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Inline message shown when the backend reports a duplicate (HTTP 409).
pub const CONFLICT_MESSAGE: &str = "Tarefa já existe na lista";

/// Rows the form needs: three bordered fields plus a message line.
pub const FORM_HEIGHT: u16 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Nome,
    Custo,
    DataLimite,
}

impl Field {
    fn next(self) -> Field {
        match self {
            Field::Nome => Field::Custo,
            Field::Custo => Field::DataLimite,
            Field::DataLimite => Field::Nome,
        }
    }

    fn prev(self) -> Field {
        match self {
            Field::Nome => Field::DataLimite,
            Field::Custo => Field::Nome,
            Field::DataLimite => Field::Custo,
        }
    }

    fn title(self) -> &'static str {
        match self {
            Field::Nome => " Nome ",
            Field::Custo => " Custo ",
            Field::DataLimite => " Data limite (AAAA-MM-DD) ",
        }
    }
}

/// High-level events emitted by the form.
#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
    /// All fields valid; the caller decides create vs. update.
    Submit(TarefaPayload),
}

pub struct TarefaForm {
    pub nome: String,
    pub custo: String,
    pub data_limite: String,
    pub focus: Field,
    pub error_message: Option<String>,
    /// `Some(id)` in edit mode, `None` in create mode.
    editing: Option<i64>,
}

impl TarefaForm {
    /// Create mode: all fields start empty.
    pub fn new() -> Self {
        Self {
            nome: String::new(),
            custo: String::new(),
            data_limite: String::new(),
            focus: Field::Nome,
            error_message: None,
            editing: None,
        }
    }

    /// Edit mode: fields pre-populated from the task's current values.
    pub fn for_edit(tarefa: &Tarefa) -> Self {
        Self {
            nome: tarefa.nome.clone(),
            custo: format!("{}", tarefa.custo),
            data_limite: tarefa.data_limite.format("%Y-%m-%d").to_string(),
            focus: Field::Nome,
            error_message: None,
            editing: Some(tarefa.id),
        }
    }

    pub fn editing_id(&self) -> Option<i64> {
        self.editing
    }

    /// Blank all three fields. Called after every successful save,
    /// in edit mode too.
    pub fn clear(&mut self) {
        self.nome.clear();
        self.custo.clear();
        self.data_limite.clear();
        self.focus = Field::Nome;
        self.error_message = None;
    }

    pub fn set_conflict(&mut self) {
        self.error_message = Some(CONFLICT_MESSAGE.to_string());
    }

    fn focused_buffer(&mut self) -> &mut String {
        match self.focus {
            Field::Nome => &mut self.nome,
            Field::Custo => &mut self.custo,
            Field::DataLimite => &mut self.data_limite,
        }
    }

    /// Input-level character constraints; parse checks happen on submit.
    fn accepts(&self, c: char) -> bool {
        match self.focus {
            Field::Nome => !c.is_control(),
            Field::Custo => c.is_ascii_digit() || c == '.',
            Field::DataLimite => c.is_ascii_digit() || c == '-',
        }
    }

    /// The required-field and parse checks run on submit.
    fn build_payload(&self) -> Result<TarefaPayload, String> {
        let nome = self.nome.trim();
        let custo = self.custo.trim();
        let data_limite = self.data_limite.trim();

        if nome.is_empty() || custo.is_empty() || data_limite.is_empty() {
            return Err("Preencha todos os campos".to_string());
        }

        let custo: f64 = custo
            .parse()
            .map_err(|_| "Custo inválido".to_string())?;
        if !custo.is_finite() || custo < 0.0 {
            return Err("Custo inválido".to_string());
        }

        let data_limite = NaiveDate::parse_from_str(data_limite, "%Y-%m-%d")
            .map_err(|_| "Data inválida (use AAAA-MM-DD)".to_string())?;

        Ok(TarefaPayload {
            nome: nome.to_string(),
            custo,
            data_limite,
        })
    }

    fn render_field(&self, frame: &mut Frame, area: Rect, field: Field, value: &str) {
        let focused = self.focus == field;
        let border_style = if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let input = Paragraph::new(value).block(
            Block::bordered()
                .title(field.title())
                .border_style(border_style),
        );
        frame.render_widget(input, area);

        if focused {
            let cursor_x = area.x + 1 + value.width() as u16;
            frame.set_cursor_position((cursor_x.min(area.right().saturating_sub(2)), area.y + 1));
        }
    }
}

impl Default for TarefaForm {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for TarefaForm {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        use Constraint::Length;
        let [nome_area, custo_area, data_area, message_area] =
            Layout::vertical([Length(3), Length(3), Length(3), Length(1)]).areas(area);

        let nome = self.nome.clone();
        let custo = self.custo.clone();
        let data_limite = self.data_limite.clone();
        self.render_field(frame, nome_area, Field::Nome, &nome);
        self.render_field(frame, custo_area, Field::Custo, &custo);
        self.render_field(frame, data_area, Field::DataLimite, &data_limite);

        let message = match &self.error_message {
            Some(msg) => Paragraph::new(msg.as_str()).style(Style::default().fg(Color::Red)),
            None => Paragraph::new(" Enter Salvar  Tab Campo  Esc Fechar")
                .style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM)),
        };
        frame.render_widget(message, message_area);
    }
}

impl EventHandler for TarefaForm {
    type Event = FormEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                if self.accepts(*c) {
                    self.focused_buffer().push(*c);
                }
                None
            }
            TuiEvent::Paste(text) => {
                let accepted: String = text.chars().filter(|c| self.accepts(*c)).collect();
                self.focused_buffer().push_str(&accepted);
                None
            }
            TuiEvent::Backspace => {
                self.focused_buffer().pop();
                None
            }
            TuiEvent::NextField | TuiEvent::CursorDown => {
                self.focus = self.focus.next();
                None
            }
            TuiEvent::PrevField | TuiEvent::CursorUp => {
                self.focus = self.focus.prev();
                None
            }
            TuiEvent::Submit => {
                // Clear any prior error before attempting the submit.
                self.error_message = None;
                match self.build_payload() {
                    Ok(payload) => Some(FormEvent::Submit(payload)),
                    Err(message) => {
                        self.error_message = Some(message);
                        None
                    }
                }
            }
            _ => None,
        }
    }
}
