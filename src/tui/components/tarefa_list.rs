//! # TarefaList Component
//!
//! Renders the task collection sorted by `ordem` and tracks which row is
//! selected. The collection itself lives in core state; this component only
//! holds presentation state and formatting.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `TarefaListState` lives in `TuiState`
//! - `TarefaList` is created each frame with borrowed state

use chrono::{DateTime, Utc};
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::api::Tarefa;

/// Rows with a custo at or above this get the highlight style. Single tier.
pub const HIGH_COST_THRESHOLD: f64 = 1000.0;

/// Display order: ascending by `ordem`, recomputed on every call rather than
/// maintained incrementally. Fetch order is left untouched in core state.
pub fn sorted_by_ordem(tarefas: &[Tarefa]) -> Vec<&Tarefa> {
    let mut view: Vec<&Tarefa> = tarefas.iter().collect();
    view.sort_by_key(|t| t.ordem);
    view
}

/// `1234.5` → `"R$ 1234,50"`: two decimals, comma as the decimal separator.
pub fn format_custo(custo: f64) -> String {
    format!("R$ {custo:.2}").replace('.', ",")
}

/// ISO-8601 date, dropping any time-of-day the server included.
pub fn format_data(data_limite: &DateTime<Utc>) -> String {
    data_limite.format("%Y-%m-%d").to_string()
}

pub fn is_high_cost(custo: f64) -> bool {
    custo >= HIGH_COST_THRESHOLD
}

/// Persistent selection state for the list.
pub struct TarefaListState {
    pub selected: usize,
    pub list_state: ListState,
}

impl TarefaListState {
    pub fn new() -> Self {
        Self {
            selected: 0,
            list_state: ListState::default(),
        }
    }

    pub fn select_prev(&mut self, len: usize) {
        if len > 0 {
            self.selected = self.selected.saturating_sub(1);
        }
    }

    pub fn select_next(&mut self, len: usize) {
        if len > 0 {
            self.selected = (self.selected + 1).min(len - 1);
        }
    }

    /// Keep the selection in bounds after the list shrinks.
    pub fn clamp(&mut self, len: usize) {
        if len == 0 {
            self.selected = 0;
            self.list_state.select(None);
        } else {
            self.selected = self.selected.min(len - 1);
            self.list_state.select(Some(self.selected));
        }
    }
}

impl Default for TarefaListState {
    fn default() -> Self {
        Self::new()
    }
}

/// Transient render wrapper over the sorted view.
pub struct TarefaList<'a> {
    tarefas: &'a [&'a Tarefa],
    state: &'a mut TarefaListState,
}

impl<'a> TarefaList<'a> {
    pub fn new(tarefas: &'a [&'a Tarefa], state: &'a mut TarefaListState) -> Self {
        Self { tarefas, state }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Tarefas ")
            .title_alignment(Alignment::Left)
            .padding(Padding::horizontal(1));

        if self.tarefas.is_empty() {
            let empty = Paragraph::new("Nenhuma tarefa.")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let items: Vec<ListItem> = self
            .tarefas
            .iter()
            .enumerate()
            .map(|(i, tarefa)| {
                let custo = format_custo(tarefa.custo);
                let data = format_data(&tarefa.data_limite);

                // Layout: "  <nome>   R$ 1234,50  2024-03-05  "
                let inner_width = area.width.saturating_sub(4) as usize; // borders + padding
                let fixed_width = custo.width() + 2 + data.width() + 2;
                let nome_width = inner_width.saturating_sub(fixed_width);
                let nome = truncate_str(&tarefa.nome, nome_width);
                let padded_nome = format!("{:<width$}", nome, width = nome_width);

                let base = if is_high_cost(tarefa.custo) {
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Gray)
                };
                let style = if i == self.state.selected {
                    base.add_modifier(Modifier::REVERSED)
                } else {
                    base
                };

                let line = Line::from(vec![
                    Span::styled(padded_nome, style),
                    Span::styled("  ", style),
                    Span::styled(custo, style),
                    Span::styled("  ", style),
                    Span::styled(data, style),
                ]);

                ListItem::new(line)
            })
            .collect();

        let list = List::new(items).block(block);
        frame.render_stateful_widget(list, area, &mut self.state.list_state);
    }
}

/// Truncate a string to fit within `max_width` columns, adding "..." if needed.
fn truncate_str(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }
    let mut out = String::new();
    for c in s.chars() {
        if out.width() + 3 >= max_width {
            break;
        }
        out.push(c);
    }
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::tarefa;
    use chrono::TimeZone;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_sorted_by_ordem_ignores_fetch_order() {
        let tarefas = vec![
            tarefa(10, "terceira", 1.0, 3),
            tarefa(11, "primeira", 1.0, 1),
            tarefa(12, "segunda", 1.0, 2),
        ];
        let sorted = sorted_by_ordem(&tarefas);
        let ordens: Vec<i64> = sorted.iter().map(|t| t.ordem).collect();
        assert_eq!(ordens, vec![1, 2, 3]);
        assert_eq!(sorted[0].nome, "primeira");
        // The underlying collection keeps fetch order.
        assert_eq!(tarefas[0].ordem, 3);
    }

    #[test]
    fn test_format_custo_two_decimals_comma_separator() {
        assert_eq!(format_custo(1500.0), "R$ 1500,00");
        assert_eq!(format_custo(999.9), "R$ 999,90");
        assert_eq!(format_custo(1234.5), "R$ 1234,50");
        assert_eq!(format_custo(0.0), "R$ 0,00");
    }

    #[test]
    fn test_high_cost_threshold_single_tier() {
        assert!(is_high_cost(1500.0));
        assert!(is_high_cost(1000.0));
        assert!(!is_high_cost(999.9));
    }

    #[test]
    fn test_format_data_drops_time_of_day() {
        let dt = Utc.with_ymd_and_hms(2024, 3, 5, 23, 15, 42).unwrap();
        assert_eq!(format_data(&dt), "2024-03-05");
    }

    #[test]
    fn test_selection_moves_and_clamps() {
        let mut state = TarefaListState::new();
        state.select_next(3);
        state.select_next(3);
        state.select_next(3);
        assert_eq!(state.selected, 2);

        // List shrank to one element; selection follows.
        state.clamp(1);
        assert_eq!(state.selected, 0);

        state.select_prev(1);
        assert_eq!(state.selected, 0);

        state.clamp(0);
        assert_eq!(state.list_state.selected(), None);
    }

    #[test]
    fn test_truncate_str_is_char_safe() {
        assert_eq!(truncate_str("curta", 10), "curta");
        let truncated = truncate_str("Tarefa já existe na lista", 10);
        assert!(truncated.ends_with("..."));
        assert!(truncated.width() <= 10);
    }

    #[test]
    fn test_render_formats_rows() {
        let tarefas = vec![tarefa(1, "Trocar telhas", 1500.0, 1)];
        let sorted = sorted_by_ordem(&tarefas);
        let mut state = TarefaListState::new();
        state.clamp(sorted.len());

        let backend = TestBackend::new(60, 6);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                TarefaList::new(&sorted, &mut state).render(f, area);
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let text = buffer.content().iter().map(|c| c.symbol()).collect::<String>();
        assert!(text.contains("Trocar telhas"));
        assert!(text.contains("R$ 1500,00"));
        assert!(text.contains("2024-03-05"));
    }

    #[test]
    fn test_render_empty_list_message() {
        let sorted: Vec<&Tarefa> = Vec::new();
        let mut state = TarefaListState::new();

        let backend = TestBackend::new(40, 5);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                TarefaList::new(&sorted, &mut state).render(f, area);
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let text = buffer.content().iter().map(|c| c.symbol()).collect::<String>();
        assert!(text.contains("Nenhuma tarefa."));
    }
}
