//! Colour palette and text styles used across the UI.

use ratatui::style::{Color, Modifier, Style};

use crate::core::scene::{Ink, TextRole};

/// Central theme — change colours here and they propagate everywhere.
pub struct Theme;

impl Theme {
    // ── diagram ────────────────────────────────────────────────
    pub fn ink_color(ink: Ink) -> Color {
        match ink {
            Ink::Nucleus => Color::White,
            Ink::Excitation => Color::Yellow,
            Ink::Fragment => Color::LightRed,
            Ink::Arrow => Color::Cyan,
            Ink::Neutron => Color::LightBlue,
        }
    }

    pub fn text_style(role: TextRole) -> Style {
        match role {
            TextRole::Count => Style::default().fg(Color::Gray),
            TextRole::Title => Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            TextRole::Caption => Style::default().fg(Color::Cyan),
            TextRole::Note => Style::default()
                .fg(Color::LightRed)
                .add_modifier(Modifier::ITALIC),
            TextRole::Footer => Style::default().fg(Color::DarkGray),
        }
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn border_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn title_style() -> Style {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    }

    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }

    pub fn popup_title_style() -> Style {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    }

    pub fn selected_style() -> Style {
        Style::default()
            .fg(Color::White)
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD)
    }

    pub fn dim_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }
}
