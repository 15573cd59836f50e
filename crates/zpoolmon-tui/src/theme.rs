//! Palette and semantic styling for the status board.

use ratatui::style::{Color, Modifier, Style};
use zpoolmon_kstat::PoolHealth;

// ── Core Palette ──────────────────────────────────────────────────────

pub const NEON_CYAN: Color = Color::Rgb(128, 255, 234); // #80ffea
pub const ELECTRIC_YELLOW: Color = Color::Rgb(241, 250, 140); // #f1fa8c
pub const SUCCESS_GREEN: Color = Color::Rgb(80, 250, 123); // #50fa7b
pub const ERROR_RED: Color = Color::Rgb(255, 99, 99); // #ff6363
pub const DIM_WHITE: Color = Color::Rgb(189, 193, 207); // #bdc1cf
pub const BORDER_GRAY: Color = Color::Rgb(98, 114, 164); // #6272a4

// ── Semantic Styles ───────────────────────────────────────────────────

/// Title text for blocks/panels.
pub fn title_style() -> Style {
    Style::default().fg(NEON_CYAN).add_modifier(Modifier::BOLD)
}

/// Panel border.
pub fn border_default() -> Style {
    Style::default().fg(BORDER_GRAY)
}

/// `[`, `=`, `]` separators around a pool entry.
pub fn separator_style() -> Style {
    Style::default().fg(BORDER_GRAY)
}

/// Pool name inside an entry.
pub fn pool_name_style() -> Style {
    Style::default().fg(NEON_CYAN)
}

/// Footer / hint text.
pub fn footer_style() -> Style {
    Style::default().fg(DIM_WHITE)
}

/// Color for a pool's state text, keyed by its health classification.
pub fn health_color(health: PoolHealth) -> Color {
    match health {
        PoolHealth::Online => SUCCESS_GREEN,
        PoolHealth::Degraded => ELECTRIC_YELLOW,
        PoolHealth::Faulted | PoolHealth::Unavail | PoolHealth::Suspended => ERROR_RED,
        PoolHealth::Offline | PoolHealth::Removed => BORDER_GRAY,
        _ => DIM_WHITE,
    }
}
