//! Second-order interaction heatmap.

use crate::components::{Component, EventResult};
use crate::state::AppState;
use crate::util::format::{fit_label, format_index};
use crate::util::styles::{HEADER_COLOR, HELP_COLOR, HIGHLIGHT_COLOR, toggle_span};
use crossterm::event::{KeyCode, KeyEvent};
use hdsaviz_core::{HeatmapGrid, HeatmapView};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::Screen;

/// Yellow-orange-red gradient stops, low to high
const GRADIENT: [(u8, u8, u8); 3] = [(255, 255, 204), (253, 141, 60), (189, 0, 38)];

const CELL_WIDTH: usize = 7;
const MAX_LABEL_WIDTH: usize = 14;

/// Color for `value` on a `0..=max` scale.
pub fn heat_color(value: f64, max: f64) -> Color {
    let t = if max > 0.0 && value.is_finite() {
        (value / max).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let scaled = t * (GRADIENT.len() - 1) as f64;
    let idx = (scaled.floor() as usize).min(GRADIENT.len() - 2);
    let local = scaled - idx as f64;
    let (a, b) = (GRADIENT[idx], GRADIENT[idx + 1]);
    let mix = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * local).round() as u8;
    Color::Rgb(mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
}

/// Dark text on the light end, light text on the dark end.
fn text_color(value: f64, max: f64) -> Color {
    if max > 0.0 && value / max > 0.6 {
        Color::White
    } else {
        Color::Black
    }
}

pub struct HeatmapScreen;

impl HeatmapScreen {
    pub fn new() -> Self {
        Self
    }

    fn grid_lines(grid: &HeatmapGrid, state: &AppState) -> Vec<Line<'static>> {
        let max = grid.max_value().unwrap_or(0.0);
        let label_width = grid
            .parameters()
            .iter()
            .map(|p| p.chars().count())
            .max()
            .unwrap_or(0)
            .min(MAX_LABEL_WIDTH);

        let label_style = |name: &str| {
            if state.is_highlighted(name) || state.is_included(name) {
                Style::default().fg(HIGHLIGHT_COLOR).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(HEADER_COLOR)
            }
        };

        let mut header = vec![Span::raw(" ".repeat(label_width + 1))];
        for name in grid.parameters() {
            header.push(Span::styled(
                format!("{:^width$}", fit_label(name, CELL_WIDTH - 1), width = CELL_WIDTH),
                label_style(name),
            ));
        }
        let mut lines = vec![Line::from(header)];

        for (i, name) in grid.parameters().iter().enumerate() {
            let mut spans = vec![
                Span::styled(fit_label(name, label_width), label_style(name)),
                Span::raw(" "),
            ];
            for j in 0..grid.size() {
                let span = match grid.get(i, j) {
                    Some(value) => Span::styled(
                        format!("{:^width$}", format_index(value), width = CELL_WIDTH),
                        Style::default()
                            .bg(heat_color(value, max))
                            .fg(text_color(value, max)),
                    ),
                    None => Span::styled(
                        format!("{:^width$}", "·", width = CELL_WIDTH),
                        Style::default().fg(HELP_COLOR),
                    ),
                };
                spans.push(span);
            }
            lines.push(Line::from(spans));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("0 ", Style::default().fg(HELP_COLOR)),
            Span::styled("   ", Style::default().bg(heat_color(0.0, 1.0))),
            Span::styled("   ", Style::default().bg(heat_color(0.5, 1.0))),
            Span::styled("   ", Style::default().bg(heat_color(1.0, 1.0))),
            Span::styled(format!(" {}", format_index(max)), Style::default().fg(HELP_COLOR)),
        ]));
        lines
    }
}

impl Default for HeatmapScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for HeatmapScreen {
    fn handle_key(&mut self, key: KeyEvent, state: &mut AppState) -> EventResult {
        match key.code {
            KeyCode::Char(']') => state.adjust_top(1),
            KeyCode::Char('[') => state.adjust_top(-1),
            KeyCode::Char('m') => state.heatmap.mirror = !state.heatmap.mirror,
            _ => return EventResult::NotHandled,
        }
        EventResult::Handled
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let name = state.active_name().unwrap_or("no outputs");
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {}: {} ", name, self.title()));

        let grid = match state.heatmap_view() {
            HeatmapView::Grid(grid) => grid,
            HeatmapView::Absent => {
                let paragraph = Paragraph::new(vec![
                    Line::from(""),
                    Line::from(Span::styled(
                        format!("No second-order indices were computed for {name}."),
                        Style::default().fg(HELP_COLOR),
                    )),
                ])
                .block(block);
                frame.render_widget(paragraph, area);
                return;
            }
        };

        let mut lines = vec![
            Line::from(vec![
                Span::styled(
                    format!(
                        "top {}  include {}  ",
                        state.heatmap.top,
                        state.heatmap.include.len()
                    ),
                    Style::default().fg(HEADER_COLOR),
                ),
                toggle_span("mirror", state.heatmap.mirror),
            ]),
            Line::from(""),
        ];
        if grid.size() == 0 {
            lines.push(Line::from(Span::styled(
                "No parameter pairs to show.",
                Style::default().fg(HELP_COLOR),
            )));
        } else {
            lines.extend(Self::grid_lines(&grid, state));
        }

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}

impl Screen for HeatmapScreen {
    fn title(&self) -> &str {
        "second order"
    }
}
