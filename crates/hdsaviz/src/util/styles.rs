//! Common styling for the viewer

use ratatui::prelude::*;

/// Tab and selection accent
pub const FOCUS_COLOR: Color = Color::Yellow;

/// Help text and axis labels
pub const HELP_COLOR: Color = Color::DarkGray;

/// Column and row headers
pub const HEADER_COLOR: Color = Color::Cyan;

/// First-order part of a bar
pub const FIRST_ORDER_COLOR: Color = Color::Blue;

/// Interaction part of a stacked bar
pub const INTERACTION_COLOR: Color = Color::LightBlue;

/// Bars of highlighted parameters
pub const HIGHLIGHT_COLOR: Color = Color::Magenta;

/// Toggle indicator: `[x]` when on
pub fn toggle_span(label: &str, on: bool) -> Span<'static> {
    let mark = if on { "x" } else { " " };
    let style = if on {
        Style::default().fg(FOCUS_COLOR)
    } else {
        Style::default().fg(HELP_COLOR)
    };
    Span::styled(format!("[{mark}] {label}"), style)
}
