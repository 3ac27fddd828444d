use super::{Component, EventResult};
use crate::state::{AppState, ViewMode};
use crate::util::styles::HELP_COLOR;
use crossterm::event::KeyEvent;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

pub struct StatusBar;

impl StatusBar {
    pub fn new() -> Self {
        Self
    }

    fn get_help_text(state: &AppState) -> &'static str {
        match state.view {
            ViewMode::Bars => {
                "h/l: output | v: heatmap | +/-: min | [/]: top | s/e/g: stacked/errors/log | j/k space: highlight | q: quit"
            }
            ViewMode::Heatmap => {
                "h/l: output | v: bars | [/]: top | m: mirror | j/k i: include | q: quit"
            }
        }
    }
}

impl Default for StatusBar {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for StatusBar {
    fn handle_key(&mut self, _key: KeyEvent, _state: &mut AppState) -> EventResult {
        EventResult::NotHandled
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let content = if let Some(message) = &state.status_message {
            Line::from(vec![
                Span::styled("Note: ", Style::default().fg(Color::Red)),
                Span::raw(message.as_str()),
            ])
        } else {
            Line::from(Span::styled(
                Self::get_help_text(state),
                Style::default().fg(HELP_COLOR),
            ))
        };

        let paragraph = Paragraph::new(content).block(Block::default().borders(Borders::TOP));

        frame.render_widget(paragraph, area);
    }
}
