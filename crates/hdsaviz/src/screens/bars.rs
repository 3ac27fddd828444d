//! First / total-order bar chart.
//!
//! One horizontal bar per parameter. Stacked mode draws S1 with the
//! interaction remainder (ST - S1) on top; otherwise S1 and ST get a line
//! each. Lengths use eighth-cell block characters.

use crate::components::{Component, EventResult};
use crate::state::AppState;
use crate::util::format::{fit_label, format_index, format_optional_index, format_with_conf};
use crate::util::styles::{
    FIRST_ORDER_COLOR, HEADER_COLOR, HELP_COLOR, HIGHLIGHT_COLOR, INTERACTION_COLOR, toggle_span,
};
use crossterm::event::{KeyCode, KeyEvent};
use hdsaviz_core::BarRow;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::Screen;

/// Partial cells, from one eighth to seven eighths
const PARTIAL_CHARS: [&str; 7] = ["▏", "▎", "▍", "▌", "▋", "▊", "▉"];
const FULL_CHAR: &str = "█";

const MAX_LABEL_WIDTH: usize = 16;

/// Maps index values onto `[0, 1]` of the bar width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scale {
    Linear { max: f64 },
    /// Decades from `10^lo` to `10^hi`; values at or below `10^lo` map to zero.
    Log { lo: f64, hi: f64 },
}

impl Scale {
    /// Fit a scale to the bars being drawn.
    ///
    /// The log axis spans at least one decade below the largest value and
    /// reaches down to the smallest positive value shown.
    pub fn fit(rows: &[BarRow], log_axis: bool) -> Self {
        let max = rows
            .iter()
            .map(|r| r.total().max(r.s1))
            .filter(|v| v.is_finite())
            .fold(0.0_f64, f64::max);
        if !log_axis {
            return Scale::Linear {
                max: if max > 0.0 { max } else { 1.0 },
            };
        }

        let smallest = rows
            .iter()
            .flat_map(|r| [r.s1, r.total()])
            .filter(|v| v.is_finite() && *v > 0.0)
            .fold(f64::INFINITY, f64::min);
        if max <= 0.0 || !smallest.is_finite() {
            return Scale::Log { lo: -3.0, hi: 0.0 };
        }
        let hi = max.log10().ceil();
        let lo = smallest.log10().floor().min(hi - 1.0);
        Scale::Log { lo, hi }
    }

    pub fn fraction(&self, value: f64) -> f64 {
        if !value.is_finite() || value <= 0.0 {
            return 0.0;
        }
        let f = match *self {
            Scale::Linear { max } => value / max,
            Scale::Log { lo, hi } => (value.log10() - lo) / (hi - lo),
        };
        f.clamp(0.0, 1.0)
    }

    /// Axis end labels.
    pub fn bounds(&self) -> (f64, f64) {
        match *self {
            Scale::Linear { max } => (0.0, max),
            Scale::Log { lo, hi } => (10f64.powf(lo), 10f64.powf(hi)),
        }
    }
}

/// Length in eighths of a cell for `fraction` of `width` cells.
pub fn eighths(fraction: f64, width: usize) -> usize {
    (fraction.clamp(0.0, 1.0) * (width * 8) as f64).round() as usize
}

/// Text for consecutive segments ending at the given eighth positions.
///
/// Inner boundaries snap to whole cells; only the final segment gets a
/// partial character. Ends are treated as non-decreasing.
pub fn segment_text(ends: &[usize]) -> Vec<String> {
    let mut out = Vec::with_capacity(ends.len());
    let mut cells = 0;
    let mut reach = 0;
    for (i, &end) in ends.iter().enumerate() {
        let end = end.max(reach);
        reach = end;
        let last = i + 1 == ends.len();
        let end_cells = if last { end / 8 } else { (end + 4) / 8 };
        let mut text = FULL_CHAR.repeat(end_cells.saturating_sub(cells));
        cells = cells.max(end_cells);
        if last && end % 8 > 0 && end / 8 >= cells {
            text.push_str(PARTIAL_CHARS[end % 8 - 1]);
        }
        out.push(text);
    }
    out
}

fn bar_spans(ends: &[(usize, Color)]) -> Vec<Span<'static>> {
    let positions: Vec<usize> = ends.iter().map(|(e, _)| *e).collect();
    segment_text(&positions)
        .into_iter()
        .zip(ends)
        .filter(|(text, _)| !text.is_empty())
        .map(|(text, (_, color))| Span::styled(text, Style::default().fg(*color)))
        .collect()
}

fn value_text(row: &BarRow, error_bars: bool) -> String {
    if error_bars {
        format!(
            "S1 {}  ST {}",
            format_with_conf(row.s1, row.s1_conf),
            row.st
                .map(|st| format_with_conf(st, row.st_conf))
                .unwrap_or_else(|| "-".to_string())
        )
    } else {
        format!("S1 {}  ST {}", format_index(row.s1), format_optional_index(row.st))
    }
}

pub struct BarsScreen;

impl BarsScreen {
    pub fn new() -> Self {
        Self
    }

    fn header(state: &AppState, scale: &Scale) -> Line<'static> {
        let (lo, hi) = scale.bounds();
        Line::from(vec![
            Span::styled(
                format!("min > {}  top {}  ", format_index(state.bars.min_value), state.bars.top),
                Style::default().fg(HEADER_COLOR),
            ),
            toggle_span("stacked", state.bars.stacked),
            Span::raw("  "),
            toggle_span("error bars", state.bars.error_bars),
            Span::raw("  "),
            toggle_span("log axis", state.bars.log_axis),
            Span::styled(
                format!("   axis {:.0e} .. {:.0e}", lo, hi),
                Style::default().fg(HELP_COLOR),
            ),
        ])
    }

    fn rows_to_lines(
        rows: &[BarRow],
        state: &AppState,
        scale: &Scale,
        width: usize,
    ) -> Vec<Line<'static>> {
        let label_width = rows
            .iter()
            .map(|r| r.parameter.chars().count())
            .max()
            .unwrap_or(0)
            .min(MAX_LABEL_WIDTH);
        let texts: Vec<String> = rows
            .iter()
            .map(|r| value_text(r, state.bars.error_bars))
            .collect();
        let value_width = texts.iter().map(|t| t.chars().count()).max().unwrap_or(0);
        let bar_width = width.saturating_sub(label_width + value_width + 3).max(1);

        let mut lines = Vec::new();
        for (row, text) in rows.iter().zip(texts) {
            let (first_color, label_style) = if row.highlighted {
                (
                    HIGHLIGHT_COLOR,
                    Style::default().fg(HIGHLIGHT_COLOR).add_modifier(Modifier::BOLD),
                )
            } else {
                (FIRST_ORDER_COLOR, Style::default())
            };
            let s1_end = eighths(scale.fraction(row.s1), bar_width);
            let total_end = eighths(scale.fraction(row.total()), bar_width);

            let segments = if state.bars.stacked {
                vec![(s1_end, first_color), (total_end, INTERACTION_COLOR)]
            } else {
                vec![(s1_end, first_color)]
            };
            let spans = bar_spans(&segments);
            let drawn: usize = spans.iter().map(|s| s.content.chars().count()).sum();

            let mut line = vec![
                Span::styled(fit_label(&row.parameter, label_width), label_style),
                Span::raw(" "),
            ];
            line.extend(spans);
            line.push(Span::raw(" ".repeat(bar_width.saturating_sub(drawn) + 1)));
            line.push(Span::styled(text, Style::default().fg(HELP_COLOR)));
            lines.push(Line::from(line));

            if !state.bars.stacked {
                let mut st_line = vec![Span::raw(" ".repeat(label_width + 1))];
                st_line.extend(bar_spans(&[(total_end, INTERACTION_COLOR)]));
                lines.push(Line::from(st_line));
            }
        }
        lines
    }
}

impl Default for BarsScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for BarsScreen {
    fn handle_key(&mut self, key: KeyEvent, state: &mut AppState) -> EventResult {
        match key.code {
            KeyCode::Char('+') | KeyCode::Char('=') => state.adjust_min_value(1),
            KeyCode::Char('-') => state.adjust_min_value(-1),
            KeyCode::Char(']') => state.adjust_top(1),
            KeyCode::Char('[') => state.adjust_top(-1),
            KeyCode::Char('s') => state.bars.stacked = !state.bars.stacked,
            KeyCode::Char('e') => state.bars.error_bars = !state.bars.error_bars,
            KeyCode::Char('g') => state.bars.log_axis = !state.bars.log_axis,
            _ => return EventResult::NotHandled,
        }
        EventResult::Handled
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let title = format!(
            " {}: {} ",
            state.active_name().unwrap_or("no outputs"),
            self.title()
        );
        let block = Block::default().borders(Borders::ALL).title(title);

        let rows = state.bar_rows();
        if rows.is_empty() {
            let paragraph = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    "No parameters above the minimum value.",
                    Style::default().fg(HELP_COLOR),
                )),
            ])
            .block(block);
            frame.render_widget(paragraph, area);
            return;
        }

        let scale = Scale::fit(&rows, state.bars.log_axis);
        let inner_width = area.width.saturating_sub(2) as usize;
        let mut lines = vec![Self::header(state, &scale), Line::from("")];
        lines.extend(Self::rows_to_lines(&rows, state, &scale, inner_width));

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}

impl Screen for BarsScreen {
    fn title(&self) -> &str {
        "first / total order"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(s1: f64, st: Option<f64>) -> BarRow {
        BarRow {
            parameter: "k1".into(),
            s1,
            s1_conf: None,
            st,
            st_conf: None,
            highlighted: false,
        }
    }

    #[test]
    fn test_linear_scale() {
        let scale = Scale::fit(&[row(0.2, Some(0.5)), row(0.1, Some(0.25))], false);
        assert_eq!(scale, Scale::Linear { max: 0.5 });
        assert_eq!(scale.fraction(0.25), 0.5);
        assert_eq!(scale.fraction(-0.1), 0.0);
        assert_eq!(scale.fraction(2.0), 1.0);
    }

    #[test]
    fn test_log_scale_spans_decades() {
        let scale = Scale::fit(&[row(0.004, Some(0.3)), row(0.0, Some(0.05))], true);
        assert_eq!(scale, Scale::Log { lo: -3.0, hi: 0.0 });
        assert!((scale.fraction(0.01) - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(scale.fraction(0.0), 0.0);
        assert_eq!(scale.fraction(1.0), 1.0);
    }

    #[test]
    fn test_log_scale_single_value_has_a_decade() {
        let scale = Scale::fit(&[row(0.2, Some(0.2))], true);
        assert_eq!(scale, Scale::Log { lo: -1.0, hi: 0.0 });
    }

    #[test]
    fn test_empty_scale_defaults() {
        assert_eq!(Scale::fit(&[], false), Scale::Linear { max: 1.0 });
        assert_eq!(Scale::fit(&[], true), Scale::Log { lo: -3.0, hi: 0.0 });
    }

    #[test]
    fn test_eighths() {
        assert_eq!(eighths(0.5, 10), 40);
        assert_eq!(eighths(1.5, 10), 80);
        assert_eq!(eighths(0.0, 10), 0);
    }

    #[test]
    fn test_single_segment_uses_partial_char() {
        assert_eq!(segment_text(&[19]), vec!["██▍".to_string()]);
        assert_eq!(segment_text(&[0]), vec![String::new()]);
    }

    #[test]
    fn test_stacked_segments_snap_inner_boundary() {
        let text = segment_text(&[13, 35]);
        assert_eq!(text, vec!["██".to_string(), "██▍".to_string()]);

        // Remainder inside the snapped first segment draws nothing
        let text = segment_text(&[14, 15]);
        assert_eq!(text, vec!["██".to_string(), String::new()]);
    }

    #[test]
    fn test_value_text() {
        let mut r = row(0.412, Some(0.55));
        r.s1_conf = Some(0.031);
        assert_eq!(value_text(&r, false), "S1 0.412  ST 0.550");
        assert_eq!(value_text(&r, true), "S1 0.412 ± 0.031  ST 0.550");
        assert_eq!(value_text(&row(0.1, None), true), "S1 0.100  ST -");
    }
}
