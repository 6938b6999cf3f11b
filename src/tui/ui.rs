use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::core::state::{App, Modal};
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::confirm_dialog::{ConfirmDialog, centered_rect};
use crate::tui::components::tarefa_form::FORM_HEIGHT;
use crate::tui::components::tarefa_list::{TarefaList, sorted_by_ordem};

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(0), Length(1)]);
    let [title_area, main_area, help_area] = layout.areas(frame.area());

    // Title bar
    let title_text = if app.status_message.is_empty() {
        "Tarefas".to_string()
    } else {
        format!("Tarefas | {}", app.status_message)
    };
    frame.render_widget(Span::raw(title_text), title_area);

    // Main area: list on top, inline create form below when visible
    // One extra row for the panel's top border.
    let (list_outer, form_area) = if app.form_visible {
        let [list_outer, form_area] =
            Layout::vertical([Min(0), Length(FORM_HEIGHT + 1)]).areas(main_area);
        (list_outer, Some(form_area))
    } else {
        (main_area, None)
    };

    // Fetch failure stays visible above the (empty) list. No retry.
    let list_area = if let Some(error_msg) = &app.fetch_error {
        let [error_area, list_area] = Layout::vertical([Length(1), Min(0)]).areas(list_outer);
        let error = Paragraph::new(error_msg.as_str()).style(Style::default().fg(Color::Red));
        frame.render_widget(error, error_area);
        list_area
    } else {
        list_outer
    };

    let sorted = sorted_by_ordem(&app.tarefas);
    tui.list.clamp(sorted.len());
    TarefaList::new(&sorted, &mut tui.list).render(frame, list_area);

    if let Some(form_area) = form_area {
        let block = Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Nova tarefa ");
        let inner = block.inner(form_area);
        frame.render_widget(block, form_area);
        tui.create_form.render(frame, inner);
    }

    frame.render_widget(
        Span::styled(help_text(app), Style::default().fg(Color::DarkGray)),
        help_area,
    );

    // Overlays last, on top of everything else
    match &app.modal {
        Modal::None => {}
        Modal::Editing(_) => draw_edit_modal(frame, tui),
        Modal::ConfirmingDelete(id) => {
            let nome = app
                .tarefas
                .iter()
                .find(|t| t.id == *id)
                .map(|t| t.nome.as_str());
            ConfirmDialog { nome }.render(frame, frame.area());
        }
    }
}

fn draw_edit_modal(frame: &mut Frame, tui: &mut TuiState) {
    let overlay = centered_rect(60, 60, frame.area());
    frame.render_widget(Clear, overlay);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Editar Tarefa ");
    let inner = block.inner(overlay);
    frame.render_widget(block, overlay);

    if let Some(form) = tui.edit_form.as_mut() {
        form.render(frame, inner);
    }
}

fn help_text(app: &App) -> &'static str {
    match app.modal {
        Modal::Editing(_) => " Tab Campo  Enter Salvar  Esc Fechar",
        Modal::ConfirmingDelete(_) => " Enter/s Confirmar  Esc/n Cancelar",
        Modal::None if app.form_visible => " Enter Salvar  Tab Campo  Esc Cancelar",
        Modal::None => " i Incluir  e/Enter Editar  d Excluir  ↑↓ Navegar  q Sair",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{tarefa, test_app};
    use crate::tui::components::TarefaForm;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render_to_text(app: &App, tui: &mut TuiState) -> String {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw_ui(f, app, tui)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_draw_ui_smoke() {
        let app = test_app();
        let mut tui = TuiState::new();
        let text = render_to_text(&app, &mut tui);
        assert!(text.contains("Tarefas"));
        assert!(text.contains("Nenhuma tarefa."));
    }

    #[test]
    fn test_draw_ui_shows_fetch_error() {
        let mut app = test_app();
        app.fetch_error = Some("Erro ao buscar tarefas".to_string());
        let mut tui = TuiState::new();
        let text = render_to_text(&app, &mut tui);
        assert!(text.contains("Erro ao buscar tarefas"));
    }

    #[test]
    fn test_draw_ui_renders_rows_in_ordem_order() {
        let mut app = test_app();
        app.tarefas = vec![
            tarefa(1, "terceira", 10.0, 3),
            tarefa(2, "primeira", 10.0, 1),
            tarefa(3, "segunda", 10.0, 2),
        ];
        let mut tui = TuiState::new();
        let text = render_to_text(&app, &mut tui);
        let first = text.find("primeira").unwrap();
        let second = text.find("segunda").unwrap();
        let third = text.find("terceira").unwrap();
        assert!(first < second && second < third);
    }

    #[test]
    fn test_draw_ui_with_create_form_visible() {
        let mut app = test_app();
        app.form_visible = true;
        let mut tui = TuiState::new();
        let text = render_to_text(&app, &mut tui);
        assert!(text.contains("Nova tarefa"));
        assert!(text.contains("Nome"));
        assert!(text.contains("Custo"));
    }

    #[test]
    fn test_draw_ui_with_delete_modal() {
        let mut app = test_app();
        app.tarefas = vec![tarefa(5, "Pintar muro", 10.0, 1)];
        app.modal = crate::core::state::Modal::ConfirmingDelete(5);
        let mut tui = TuiState::new();
        let text = render_to_text(&app, &mut tui);
        assert!(text.contains("Excluir tarefa"));
        assert!(text.contains("Pintar muro"));
    }

    #[test]
    fn test_draw_ui_with_edit_modal() {
        let mut app = test_app();
        let alvo = tarefa(5, "Pintar muro", 10.0, 1);
        app.tarefas = vec![alvo.clone()];
        app.modal = crate::core::state::Modal::Editing(alvo.clone());
        let mut tui = TuiState::new();
        tui.edit_form = Some(TarefaForm::for_edit(&alvo));
        let text = render_to_text(&app, &mut tui);
        assert!(text.contains("Editar Tarefa"));
    }
}
