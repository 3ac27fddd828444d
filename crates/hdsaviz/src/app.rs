use std::io;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Direction, Layout, Rect},
};

use crate::components::{
    Component, EventResult, parameter_list::ParameterList, status_bar::StatusBar, tab_bar::TabBar,
};
use crate::screens::{bars::BarsScreen, heatmap::HeatmapScreen};
use crate::state::{AppState, ViewMode};

/// Width of the parameter picker column
const PICKER_WIDTH: u16 = 28;

pub struct App {
    state: AppState,
    tab_bar: TabBar,
    status_bar: StatusBar,
    parameter_list: ParameterList,
    bars_screen: BarsScreen,
    heatmap_screen: HeatmapScreen,
}

impl App {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            tab_bar: TabBar::new(),
            status_bar: StatusBar::new(),
            parameter_list: ParameterList::new(),
            bars_screen: BarsScreen::new(),
            heatmap_screen: HeatmapScreen::new(),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }
}

impl App {
    /// runs the application's main loop until the user quits
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        tracing::info!(outputs = self.state.outputs.len(), "Viewer started");
        while !self.state.exit {
            terminal.draw(|frame| self.draw(frame))?;
            self.handle_events()?;
        }
        Ok(())
    }

    fn draw(&mut self, frame: &mut Frame) {
        // Create main layout: tab bar, content, status bar
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Tab bar
                Constraint::Min(0),    // Content
                Constraint::Length(2), // Status bar
            ])
            .split(frame.area());

        self.tab_bar.render(frame, chunks[0], &self.state);

        let content = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(PICKER_WIDTH)])
            .split(chunks[1]);
        self.render_active_screen(frame, content[0]);
        self.parameter_list.render(frame, content[1], &self.state);

        self.status_bar.render(frame, chunks[2], &self.state);
    }

    fn render_active_screen(&mut self, frame: &mut Frame, area: Rect) {
        match self.state.view {
            ViewMode::Bars => self.bars_screen.render(frame, area, &self.state),
            ViewMode::Heatmap => self.heatmap_screen.render(frame, area, &self.state),
        }
    }

    fn handle_events(&mut self) -> io::Result<()> {
        match event::read()? {
            Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                self.handle_key_event(key_event)
            }
            _ => {}
        };
        Ok(())
    }

    pub fn handle_key_event(&mut self, key_event: KeyEvent) {
        // Global key bindings
        match key_event.code {
            KeyCode::Char('q') if key_event.modifiers.is_empty() => {
                self.state.exit = true;
                return;
            }
            KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                self.state.exit = true;
                return;
            }
            KeyCode::Char('v') => {
                self.state.toggle_view();
                tracing::debug!(view = self.state.view.name(), "Switched view");
                return;
            }
            KeyCode::Esc => {
                self.state.clear_status();
                return;
            }
            _ => {}
        }

        // Try tab bar first
        let result = self.tab_bar.handle_key(key_event, &mut self.state);
        if result != EventResult::NotHandled {
            return;
        }

        let result = self.parameter_list.handle_key(key_event, &mut self.state);
        if result != EventResult::NotHandled {
            return;
        }

        // Then try active screen
        match self.state.view {
            ViewMode::Bars => self.bars_screen.handle_key(key_event, &mut self.state),
            ViewMode::Heatmap => self.heatmap_screen.handle_key(key_event, &mut self.state),
        };
    }
}
