//! Parameter picker shared by both views.
//!
//! The cursor walks every parameter seen in any output; `space` toggles the
//! bar-chart highlight and `i` the heatmap include for the parameter under it.

use super::{Component, EventResult};
use crate::state::AppState;
use crate::util::styles::{FOCUS_COLOR, HEADER_COLOR, HIGHLIGHT_COLOR};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
};

pub struct ParameterList {
    list_state: ListState,
}

impl ParameterList {
    pub fn new() -> Self {
        Self {
            list_state: ListState::default(),
        }
    }
}

impl Default for ParameterList {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for ParameterList {
    fn handle_key(&mut self, key: KeyEvent, state: &mut AppState) -> EventResult {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => state.move_cursor(1),
            KeyCode::Char('k') | KeyCode::Up => state.move_cursor(-1),
            KeyCode::PageDown => state.move_cursor(10),
            KeyCode::PageUp => state.move_cursor(-10),
            KeyCode::Char(' ') => state.toggle_highlight(),
            KeyCode::Char('i') => state.toggle_include(),
            _ => return EventResult::NotHandled,
        }
        EventResult::Handled
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let items: Vec<ListItem> = state
            .parameters
            .iter()
            .map(|name| {
                let highlight = if state.is_highlighted(name) { "*" } else { " " };
                let include = if state.is_included(name) { "+" } else { " " };
                let style = if state.is_highlighted(name) {
                    Style::default().fg(HIGHLIGHT_COLOR)
                } else {
                    Style::default()
                };
                ListItem::new(Line::from(vec![
                    Span::raw(format!("{highlight}{include} ")),
                    Span::styled(name.as_str(), style),
                ]))
            })
            .collect();

        self.list_state.select(if state.parameters.is_empty() {
            None
        } else {
            Some(state.cursor)
        });

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(Span::styled(" Parameters ", Style::default().fg(HEADER_COLOR))),
            )
            .highlight_style(Style::default().fg(FOCUS_COLOR).add_modifier(Modifier::BOLD))
            .highlight_symbol("> ");

        frame.render_stateful_widget(list, area, &mut self.list_state);
    }
}
