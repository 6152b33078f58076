use ratatui::style::{Color, Modifier, Style};

use jogdial::config::ThemeConfig;
use jogdial::dial::color::Rgb;

// ─── Color Palette (from config, transparency-friendly) ─────────────────

/// Background: always Reset (transparent), respects terminal background
pub const BG: Color = Color::Reset;

pub fn rgb(color: Rgb) -> Color {
    Color::Rgb(color.r, color.g, color.b)
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub fg: Color,
    pub fg_dim: Color,
    pub accent: Color,
    pub highlight: Color,
    pub base: Color,
}

impl Theme {
    pub fn from_config(theme: &ThemeConfig) -> Self {
        Self {
            fg: rgb(theme.text),
            fg_dim: rgb(theme.dim),
            accent: rgb(theme.accent),
            highlight: rgb(theme.highlight),
            base: rgb(theme.base),
        }
    }

    // ─── Style Constructors ─────────────────────────────────────────────

    pub fn readout(&self) -> Style {
        Style::default()
            .fg(self.fg)
            .bg(BG)
            .add_modifier(Modifier::BOLD)
    }

    pub fn readout_dimmed(&self) -> Style {
        Style::default().fg(self.fg_dim).bg(BG)
    }

    pub fn status(&self) -> Style {
        Style::default().fg(self.fg_dim).bg(BG)
    }

    pub fn option(&self) -> Style {
        Style::default().fg(self.fg_dim).bg(BG)
    }

    pub fn option_selected(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .bg(BG)
            .add_modifier(Modifier::BOLD)
    }

    pub fn rapid(&self) -> Style {
        Style::default().fg(self.highlight).bg(BG)
    }

    pub fn key_hint(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .bg(BG)
            .add_modifier(Modifier::BOLD)
    }

    pub fn key_desc(&self) -> Style {
        Style::default().fg(self.fg_dim).bg(BG)
    }

    /// Divider between hints, in the unlit tick colour
    pub fn separator(&self) -> Style {
        Style::default().fg(self.base).bg(BG)
    }
}
