use obtain_core::Theme;
use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub text: Color,
    pub background: Color,
    pub muted: Color,
    pub accent: Color,
    pub error: Color,
    pub success: Color,
    pub working: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                text: Color::Black,
                background: Color::White,
                muted: Color::DarkGray,
                accent: Color::Blue,
                error: Color::Red,
                success: Color::Green,
                working: Color::Rgb(184, 134, 11),
            },
            Theme::Dark => Self {
                text: Color::Gray,
                background: Color::Black,
                muted: Color::DarkGray,
                accent: Color::LightBlue,
                error: Color::LightRed,
                success: Color::LightGreen,
                working: Color::Yellow,
            },
        }
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.text).bg(self.background)
    }

    pub fn muted(&self) -> Style {
        self.base().fg(self.muted)
    }

    pub fn accent(&self) -> Style {
        self.base().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    pub fn error(&self) -> Style {
        self.base().fg(self.error)
    }

    /// Colour for a card's `status-<name>` class.
    pub fn status(&self, status_class: &str) -> Style {
        let color = match status_class {
            "status-completed" => self.success,
            "status-failed" => self.error,
            "status-downloading" | "status-converting" | "status-queued" => self.working,
            _ => self.muted,
        };
        self.base().fg(color).add_modifier(Modifier::BOLD)
    }
}
