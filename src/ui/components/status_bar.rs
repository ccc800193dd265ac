use crate::app::mode::Mode;
use crate::app::AppState;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn render(f: &mut Frame, state: &AppState, area: Rect) {
    if state.mode == Mode::ConfirmDelete {
        render_confirm_delete(f, state, area);
        return;
    }

    if state.mode == Mode::Search {
        render_search_input(f, state, area);
        return;
    }

    if let Some((message, time)) = &state.status_message
        && time.elapsed().as_secs() <= 3
    {
        render_status_message(f, state, message, area);
        return;
    }

    let counts = state.counts();
    let filter_indicator = describe_filter(state);
    let left_content = format!(
        " {} | group: {} | todo: {}  in_progress: {}  done: {}{}",
        state.mode,
        state.group_by,
        counts.todo,
        counts.in_progress,
        counts.done,
        filter_indicator
    );

    let nav_hint = "q quit";
    let user_text = match state.session.user() {
        Some(user) => user.display_name.clone(),
        None => "guest".to_string(),
    };
    let version_text = format!("v{VERSION}");

    // Format: "{left} {hint} {padding} {user} {version} "
    let padding = area.width.saturating_sub(
        left_content.len() as u16
            + nav_hint.len() as u16
            + user_text.len() as u16
            + version_text.len() as u16
            + 5,
    );

    let base_style = Style::default()
        .fg(state.theme.status_bar_fg)
        .bg(state.theme.status_bar_bg);

    let status_line = format!(
        "{} {} {:>padding$} {} {} ",
        left_content,
        nav_hint,
        "",
        user_text,
        version_text,
        padding = padding as usize
    );

    let status = Paragraph::new(Line::from(vec![Span::styled(status_line, base_style)]));
    f.render_widget(status, area);
}

fn describe_filter(state: &AppState) -> String {
    if !state.filter.is_active() {
        return String::new();
    }
    let mut parts = Vec::new();
    if let Some(search) = &state.filter.search {
        parts.push(format!("\"{search}\""));
    }
    if let Some(status) = state.filter.status {
        parts.push(status.label().to_string());
    }
    if let Some(priority) = state.filter.priority {
        parts.push(priority.label().to_string());
    }
    if let Some(due) = state.filter.due {
        parts.push(due.to_string());
    }
    format!(" | filter: {}", parts.join(" "))
}

fn render_confirm_delete(f: &mut Frame, state: &AppState, area: Rect) {
    let name = state
        .pending_delete
        .and_then(|id| state.store.find(id))
        .map(|task| task.name.clone())
        .unwrap_or_default();
    let prompt = format!(" Delete \"{name}\"? (Y/n) ");

    let style = Style::default()
        .fg(ratatui::style::Color::White)
        .bg(ratatui::style::Color::Rgb(180, 100, 0))
        .add_modifier(Modifier::BOLD);

    let padding = area.width.saturating_sub(prompt.len() as u16);
    let status_line = format!("{}{:padding$}", prompt, "", padding = padding as usize);

    let status = Paragraph::new(Line::from(vec![Span::styled(status_line, style)]));
    f.render_widget(status, area);
}

fn render_search_input(f: &mut Frame, state: &AppState, area: Rect) {
    let (before, after) = state.search_input.split_at_cursor();
    let line = format!(" /{}\u{2502}{}", before, after);
    let padding = area.width.saturating_sub(line.len() as u16);
    let status_line = format!("{}{:padding$}", line, "", padding = padding as usize);

    let style = Style::default()
        .fg(state.theme.status_bar_fg)
        .bg(state.theme.status_bar_bg)
        .add_modifier(Modifier::BOLD);
    f.render_widget(
        Paragraph::new(Line::from(vec![Span::styled(status_line, style)])),
        area,
    );
}

fn render_status_message(f: &mut Frame, state: &AppState, message: &str, area: Rect) {
    let line = format!(" {message}");
    let padding = area.width.saturating_sub(line.len() as u16);
    let status_line = format!("{}{:padding$}", line, "", padding = padding as usize);

    let style = Style::default()
        .fg(state.theme.status_bar_fg)
        .bg(state.theme.status_bar_bg);
    f.render_widget(
        Paragraph::new(Line::from(vec![Span::styled(status_line, style)])),
        area,
    );
}
