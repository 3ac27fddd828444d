use super::{Component, EventResult};
use crate::state::AppState;
use crate::util::styles::{FOCUS_COLOR, HELP_COLOR};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Tabs},
};

/// One tab per output measure.
pub struct TabBar;

impl TabBar {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TabBar {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for TabBar {
    fn handle_key(&mut self, key: KeyEvent, state: &mut AppState) -> EventResult {
        match key.code {
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => {
                state.next_output();
                EventResult::Handled
            }
            KeyCode::Left | KeyCode::Char('h') | KeyCode::BackTab => {
                state.prev_output();
                EventResult::Handled
            }
            KeyCode::Char(c @ '1'..='9') => {
                state.select_output(c as usize - '1' as usize);
                EventResult::Handled
            }
            _ => EventResult::NotHandled,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let titles: Vec<Line> = state
            .outputs
            .iter()
            .enumerate()
            .map(|(idx, name)| {
                let content = if idx < 9 {
                    format!("[{}] {}", idx + 1, name)
                } else {
                    name.clone()
                };

                if idx == state.active_output {
                    Line::from(Span::styled(
                        content,
                        Style::default().fg(FOCUS_COLOR).add_modifier(Modifier::BOLD),
                    ))
                } else {
                    Line::from(Span::styled(content, Style::default().fg(HELP_COLOR)))
                }
            })
            .collect();

        let tabs = Tabs::new(titles)
            .block(
                Block::default()
                    .borders(Borders::BOTTOM)
                    .title(format!(" hdsaviz | {} ", state.view.name())),
            )
            .select(state.active_output)
            .highlight_style(Style::default().fg(FOCUS_COLOR).add_modifier(Modifier::BOLD));

        frame.render_widget(tabs, area);
    }
}
