pub mod board;
pub mod form;
pub mod status_bar;

use crate::app::{AppState, Mode};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::Paragraph,
    Frame,
};

pub fn render(f: &mut Frame, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(f.area());

    if state.store.is_loading() {
        render_loading(f, state, chunks[0]);
    } else {
        board::render(f, state, chunks[0]);
    }
    status_bar::render(f, state, chunks[1]);

    if matches!(state.mode, Mode::AddTask | Mode::EditTask) {
        form::render(f, state);
    }
}

fn render_loading(f: &mut Frame, state: &AppState, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Length(1),
            Constraint::Percentage(45),
        ])
        .split(area);

    let message = Paragraph::new("Loading tasks…")
        .alignment(Alignment::Center)
        .style(Style::default().fg(state.theme.foreground));
    f.render_widget(message, rows[1]);
}
