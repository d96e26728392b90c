use ratatui::style::{Color, Modifier, Style};

// Shared accents
pub const PRIMARY: Color = Color::Rgb(64, 128, 192);
pub const SECONDARY: Color = Color::Rgb(96, 160, 96);
pub const ACCENT: Color = Color::Rgb(192, 160, 64);
pub const ERROR: Color = Color::Rgb(192, 64, 64);
pub const MUTED: Color = Color::Rgb(128, 128, 128);

/// Colors that change with the dark/light option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub fg: Color,
    pub bg: Color,
    pub highlight: Color,
    pub bar: Color,
}

impl Theme {
    pub const DARK: Theme = Theme {
        fg: Color::White,
        bg: Color::Rgb(20, 20, 26),
        highlight: Color::Rgb(48, 48, 64),
        bar: Color::Rgb(32, 32, 40),
    };

    pub const LIGHT: Theme = Theme {
        fg: Color::Rgb(24, 24, 24),
        bg: Color::Rgb(248, 248, 244),
        highlight: Color::Rgb(208, 220, 236),
        bar: Color::Rgb(228, 228, 222),
    };

    pub fn for_mode(dark_mode: bool) -> Theme {
        if dark_mode {
            Self::DARK
        } else {
            Self::LIGHT
        }
    }

    pub fn base_style(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    pub fn title_style(&self) -> Style {
        Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD)
    }

    pub fn cursor_style(&self) -> Style {
        Style::default()
            .fg(self.fg)
            .bg(self.highlight)
            .add_modifier(Modifier::BOLD)
    }

    pub fn item_style(&self) -> Style {
        Style::default().fg(self.fg)
    }

    pub fn checked_style(&self) -> Style {
        Style::default().fg(SECONDARY).add_modifier(Modifier::BOLD)
    }

    pub fn bucket_style(&self) -> Style {
        Style::default()
            .fg(PRIMARY)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    }

    pub fn muted_style(&self) -> Style {
        Style::default().fg(MUTED)
    }

    pub fn highlight_style(&self) -> Style {
        Style::default().fg(ACCENT)
    }

    pub fn success_style(&self) -> Style {
        Style::default().fg(SECONDARY)
    }

    pub fn error_style(&self) -> Style {
        Style::default().fg(ERROR)
    }

    /// Style for one choice in a toggle or picker.
    pub fn choice_style(&self, selected: bool) -> Style {
        if selected {
            Style::default()
                .fg(PRIMARY)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            self.muted_style()
        }
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(MUTED)
    }

    pub fn status_bar_style(&self) -> Style {
        Style::default().bg(self.bar).fg(self.fg)
    }

    pub fn help_key_style(&self) -> Style {
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
    }

    pub fn help_desc_style(&self) -> Style {
        Style::default().fg(self.fg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_mode() {
        assert_eq!(Theme::for_mode(true), Theme::DARK);
        assert_eq!(Theme::for_mode(false), Theme::LIGHT);
        assert_ne!(Theme::DARK.bg, Theme::LIGHT.bg);
    }
}
