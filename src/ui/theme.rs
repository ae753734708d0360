//! Theme and styling configuration.

use ratatui::style::Color;

/// Color theme for the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Primary foreground color.
    pub fg: Color,
    /// Primary background color.
    pub bg: Color,
    /// Highlight color for selected items.
    pub highlight: Color,
    /// Border color of an unfocused field.
    pub border: Color,
    /// Border color of the focused field.
    pub border_focused: Color,
    /// Border color while a field shows its error state.
    pub error: Color,
    /// Color for placeholders and disabled fields.
    pub muted: Color,
    /// Text color on top of a pill.
    pub pill_fg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// The default dark theme.
    pub fn dark() -> Self {
        Self {
            fg: Color::White,
            bg: Color::Black,
            highlight: Color::Cyan,
            border: Color::DarkGray,
            border_focused: Color::Cyan,
            error: Color::Red,
            muted: Color::DarkGray,
            pill_fg: Color::White,
        }
    }

    /// A theme for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            fg: Color::Black,
            bg: Color::White,
            highlight: Color::Blue,
            border: Color::Gray,
            border_focused: Color::Blue,
            error: Color::Red,
            muted: Color::Gray,
            pill_fg: Color::White,
        }
    }

    /// Look up a theme by its settings name. Unknown names fall back to dark.
    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Pill background for a style variant.
    ///
    /// Unknown variants render like `primary`.
    pub fn variant_color(&self, variant: &str) -> Color {
        match variant {
            "secondary" => Color::Gray,
            "success" => Color::Green,
            "danger" => Color::Red,
            "warning" => Color::Yellow,
            "info" => Color::Cyan,
            "dark" => Color::DarkGray,
            _ => Color::Blue,
        }
    }
}
