use crate::app::state::{AppState, FormFocus, TextBuffer};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, state: &AppState) {
    let Some(form) = &state.form else {
        return;
    };

    let area = popup_area(f.area(), 60, 12);
    f.render_widget(Clear, area);

    let title = if form.editing.is_some() {
        " Edit task "
    } else {
        " New task "
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(state.theme.column_border_focused))
        .title(title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // name
            Constraint::Length(1), // status
            Constraint::Length(1), // priority
            Constraint::Length(1), // due
            Constraint::Length(1), // description
            Constraint::Length(1), // image
            Constraint::Length(1), // error
            Constraint::Min(0),
            Constraint::Length(1), // hint
        ])
        .split(inner);

    render_text_row(f, state, rows[0], "name", &form.name, form.focus == FormFocus::Name);
    render_choice_row(
        f,
        state,
        rows[1],
        "status",
        form.status.label(),
        form.focus == FormFocus::Status,
    );
    render_choice_row(
        f,
        state,
        rows[2],
        "priority",
        form.priority.label(),
        form.focus == FormFocus::Priority,
    );
    render_text_row(f, state, rows[3], "due", &form.due, form.focus == FormFocus::Due);
    render_text_row(
        f,
        state,
        rows[4],
        "description",
        &form.description,
        form.focus == FormFocus::Description,
    );
    render_text_row(f, state, rows[5], "image", &form.image, form.focus == FormFocus::Image);

    if let Some(error) = &form.error {
        let line = Paragraph::new(Line::from(Span::styled(
            format!(" {error}"),
            Style::default().fg(state.theme.form_error),
        )));
        f.render_widget(line, rows[6]);
    }

    let hint = Paragraph::new(Line::from(Span::styled(
        " tab fields · space cycles · enter save · esc cancel",
        Style::default().fg(state.theme.column_border),
    )));
    f.render_widget(hint, rows[8]);
}

fn render_text_row(
    f: &mut Frame,
    state: &AppState,
    area: Rect,
    label: &str,
    buffer: &TextBuffer,
    focused: bool,
) {
    let (before, after) = buffer.split_at_cursor();
    let value = if focused {
        format!("{before}\u{2502}{after}")
    } else {
        buffer.input.clone()
    };
    render_row(f, state, area, label, &value, focused);
}

fn render_choice_row(
    f: &mut Frame,
    state: &AppState,
    area: Rect,
    label: &str,
    value: &str,
    focused: bool,
) {
    let value = if focused {
        format!("\u{25c2} {value} \u{25b8}")
    } else {
        value.to_string()
    };
    render_row(f, state, area, label, &value, focused);
}

fn render_row(
    f: &mut Frame,
    state: &AppState,
    area: Rect,
    label: &str,
    value: &str,
    focused: bool,
) {
    let marker = if focused { "\u{25b8} " } else { "  " };
    let label_style = if focused {
        Style::default()
            .fg(state.theme.column_border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(state.theme.foreground)
    };

    let line = Line::from(vec![
        Span::styled(marker, label_style),
        Span::styled(format!("{label:<12}"), label_style),
        Span::styled(value.to_string(), Style::default().fg(state.theme.foreground)),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

/// Centered popup: `percent_x` of the width, fixed height in rows.
fn popup_area(area: Rect, percent_x: u16, height: u16) -> Rect {
    let width = (area.width * percent_x) / 100;
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height.min(area.height))
}
