/// Preference key holding `"dark"` or `"light"`.
pub const THEME_STORAGE_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Stored value and class name.
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn icon(self) -> ThemeIcon {
        match self {
            Theme::Light => ThemeIcon::Moon,
            Theme::Dark => ThemeIcon::Sun,
        }
    }
}

/// Indicator shown next to the toggle; it names the theme a click switches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeIcon {
    Moon,
    Sun,
}
