//! Theme configuration for the TUI.
//!
//! Supports light and dark themes with automatic terminal detection. The
//! active theme lives on [`App`](crate::App) and is passed to every render
//! function; there is no global theme state.

use std::fmt;
use std::str::FromStr;

use probwatch_core::Status;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;
use serde::{Deserialize, Serialize};

/// Light or dark appearance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
}

impl ThemeMode {
    /// The other mode.
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    /// Detect from the terminal background, falling back to dark.
    pub fn detect() -> Self {
        // Use terminal-light crate to detect background luminance
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => ThemeMode::Light,
            _ => ThemeMode::Dark,
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ThemeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            other => Err(format!("unknown theme '{}', expected light or dark", other)),
        }
    }
}

/// Color and style theme for the TUI.
///
/// Use [`Theme::for_mode()`] with a [`ThemeMode`], or [`Theme::dark()`]/[`Theme::light()`]
/// explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    pub mode: ThemeMode,
    /// Accent color for highlights and active elements.
    pub highlight: Color,
    /// Color for the good band.
    pub good: Color,
    /// Color for the normal band.
    pub normal: Color,
    /// Color for the bad band.
    pub bad: Color,
    /// Color for borders, axes and the plot frame.
    pub border: Color,
    /// Color for the line connecting chart points.
    pub path: Color,
    /// Secondary text (axis labels, hints).
    pub muted: Color,
    /// Style for header rows in tables.
    pub header: Style,
    /// Style for selected/highlighted rows.
    pub selected: Style,
    /// Style for the active tab.
    pub tab_active: Style,
    /// Style for inactive tabs.
    pub tab_inactive: Style,
    /// Border style (rounded, plain, etc.).
    pub border_type: BorderType,
}

impl Theme {
    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Self::light(),
            ThemeMode::Dark => Self::dark(),
        }
    }

    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            mode: ThemeMode::Dark,
            highlight: Color::Cyan,
            good: Color::Green,
            normal: Color::Yellow,
            bad: Color::Red,
            border: Color::Gray,
            path: Color::Gray,
            muted: Color::DarkGray,
            header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::Gray),
            border_type: BorderType::Rounded,
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            mode: ThemeMode::Light,
            highlight: Color::Blue,
            good: Color::Rgb(0x28, 0xa7, 0x45),
            normal: Color::Rgb(0xc7, 0x93, 0x00),
            bad: Color::Rgb(0xdc, 0x35, 0x45),
            border: Color::DarkGray,
            path: Color::Gray,
            muted: Color::Gray,
            header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::LightBlue).add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::DarkGray),
            border_type: BorderType::Rounded,
        }
    }

    /// Color of a status band.
    pub fn status_color(&self, status: Status) -> Color {
        match status {
            Status::Good => self.good,
            Status::Normal => self.normal,
            Status::Bad => self.bad,
        }
    }

    /// Get style for a status band
    pub fn status_style(&self, status: Status) -> Style {
        match status {
            Status::Bad => Style::default().fg(self.bad).add_modifier(Modifier::BOLD),
            other => Style::default().fg(self.status_color(other)),
        }
    }

    /// Style for an uppercase status badge.
    pub fn badge_style(&self, status: Status) -> Style {
        Style::default()
            .fg(Color::Black)
            .bg(self.status_color(status))
            .add_modifier(Modifier::BOLD)
    }
}
