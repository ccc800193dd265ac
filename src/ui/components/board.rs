use crate::app::AppState;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};
use taskdeck::board::GroupBy;
use taskdeck::task::{Status, Task};
use unicode_width::UnicodeWidthStr;

pub fn render(f: &mut Frame, state: &AppState, area: Rect) {
    let col_areas = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    let columns = state.columns();
    for (index, key) in columns.iter().enumerate() {
        render_column(f, state, col_areas[index], index, key.label());
    }
}

fn render_column(f: &mut Frame, state: &AppState, area: Rect, index: usize, label: &str) {
    let is_focused = state.selected_column == index;
    let total = state.column_total(index);
    let cards = state.column_page(index);

    let border_color = if is_focused {
        state.theme.column_border_focused
    } else {
        state.theme.column_border
    };
    let focused_mod = if is_focused {
        Modifier::BOLD
    } else {
        Modifier::empty()
    };

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border_color).add_modifier(focused_mod))
        .title(Line::from(Span::styled(
            format!(" {label} ({total}) "),
            Style::default()
                .fg(state.theme.foreground)
                .add_modifier(Modifier::BOLD),
        )));

    let pages = total.div_ceil(state.page_size).max(1);
    if pages > 1 || state.page > 1 {
        block = block.title_bottom(Line::from(format!(" page {}/{} ", state.page, pages)));
    }

    let inner = block.inner(area);
    f.render_widget(block, area);

    if inner.height == 0 || inner.width == 0 {
        return;
    }

    // Card: two content lines framed by its own border.
    let card_height: u16 = 4;
    let max_visible = (inner.height / card_height) as usize;

    for (row, task) in cards.iter().take(max_visible).enumerate() {
        let y = inner.y + (row as u16 * card_height);
        let card_area = Rect::new(inner.x, y, inner.width, card_height);
        let is_selected = is_focused && state.selected_row == row;
        render_card(f, state, card_area, task, is_selected);
    }
}

fn render_card(f: &mut Frame, state: &AppState, area: Rect, task: &Task, is_selected: bool) {
    if area.width < 4 || area.height < 3 {
        return;
    }

    let selected_mod = if is_selected {
        Modifier::BOLD
    } else {
        Modifier::empty()
    };
    let border_color = if is_selected {
        state.theme.card_border_selected
    } else {
        state.theme.card_border
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color).add_modifier(selected_mod))
        .border_type(if is_selected {
            BorderType::Thick
        } else {
            BorderType::Rounded
        });

    let inner = block.inner(area);
    f.render_widget(block, area);

    if inner.height == 0 || inner.width < 2 {
        return;
    }

    let name_color = if task.status == Status::Done {
        state.theme.done
    } else {
        state.theme.foreground
    };
    let name = truncate(&task.name, inner.width as usize);
    let name_line = Line::from(Span::styled(
        name,
        Style::default().fg(name_color).add_modifier(selected_mod),
    ));
    f.render_widget(
        Paragraph::new(name_line),
        Rect::new(inner.x, inner.y, inner.width, 1),
    );

    if inner.height < 2 {
        return;
    }

    // The slot taken over by the grouping field shows the status instead.
    let (left_text, left_style) = if state.group_by == GroupBy::Priority {
        (
            task.status.label().to_string(),
            Style::default().fg(state.theme.foreground),
        )
    } else {
        (
            task.priority.label().to_string(),
            Style::default().fg(state.theme.priority_color(task.priority)),
        )
    };

    let (right_text, right_style) = if state.group_by == GroupBy::Date {
        (
            task.status.label().to_string(),
            Style::default().fg(state.theme.foreground),
        )
    } else {
        let overdue = task.due_date < state.today && task.status != Status::Done;
        let color = if overdue {
            state.theme.past_due
        } else {
            state.theme.foreground
        };
        (task.due_date.to_string(), Style::default().fg(color))
    };

    let image_marker = if task.image.is_some() { "⊡ " } else { "" };
    let left_width = left_text.width() + image_marker.width();
    let padding = (inner.width as usize).saturating_sub(left_width + right_text.width());

    let meta_line = Line::from(vec![
        Span::styled(image_marker, Style::default().fg(state.theme.foreground)),
        Span::styled(left_text, left_style.add_modifier(selected_mod)),
        Span::raw(" ".repeat(padding)),
        Span::styled(right_text, right_style.add_modifier(selected_mod)),
    ]);
    f.render_widget(
        Paragraph::new(meta_line),
        Rect::new(inner.x, inner.y + 1, inner.width, 1),
    );
}

/// Truncate to a display width, appending an ellipsis when cut.
fn truncate(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    let avail = max_width.saturating_sub(1);
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.to_string().width();
        if used + w > avail {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push('…');
    out
}
