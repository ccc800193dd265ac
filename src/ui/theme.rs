use ratatui::style::Color;
use taskdeck::config::Config;

#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub foreground: Color,
    pub column_border: Color,
    pub column_border_focused: Color,
    pub card_border: Color,
    pub card_border_selected: Color,
    pub past_due: Color,
    pub done: Color,
    pub status_bar_bg: Color,
    pub status_bar_fg: Color,
    pub form_error: Color,
    pub priority_low: Color,
    pub priority_medium: Color,
    pub priority_high: Color,
}

impl Theme {
    pub fn default_theme() -> Self {
        Self {
            background: Color::Reset,
            foreground: Color::White,
            column_border: Color::DarkGray,
            column_border_focused: Color::Cyan,
            card_border: Color::Gray,
            card_border_selected: Color::Cyan,
            past_due: Color::Red,
            done: Color::Green,
            status_bar_bg: Color::Rgb(40, 40, 40),
            status_bar_fg: Color::White,
            form_error: Color::Red,
            priority_low: Color::Rgb(100, 150, 255),  // Blue for low
            priority_medium: Color::Rgb(255, 200, 100), // Yellow/orange for medium
            priority_high: Color::Rgb(255, 100, 100), // Red for high
        }
    }

    pub fn dark() -> Self {
        Self {
            background: Color::Black,
            ..Self::default_theme()
        }
    }

    pub fn light() -> Self {
        Self {
            background: Color::White,
            foreground: Color::Black,
            column_border: Color::Gray,
            column_border_focused: Color::Blue,
            card_border: Color::DarkGray,
            card_border_selected: Color::Blue,
            past_due: Color::Rgb(200, 50, 50),
            done: Color::Rgb(0, 130, 0),
            status_bar_bg: Color::LightBlue,
            status_bar_fg: Color::Black,
            form_error: Color::Rgb(200, 50, 50),
            priority_low: Color::Rgb(50, 100, 200),
            priority_medium: Color::Rgb(180, 130, 0),
            priority_high: Color::Rgb(200, 50, 50),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        match config.theme.as_str() {
            "dark" => Self::dark(),
            "light" => Self::light(),
            _ => Self::default_theme(),
        }
    }

    pub fn priority_color(&self, priority: taskdeck::task::Priority) -> Color {
        match priority {
            taskdeck::task::Priority::Low => self.priority_low,
            taskdeck::task::Priority::Medium => self.priority_medium,
            taskdeck::task::Priority::High => self.priority_high,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::default_theme()
    }
}
