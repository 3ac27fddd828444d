//! Viewer state: loaded results plus the current control values.

use hdsaviz_core::{
    BarRow, HeatmapFilter, HeatmapView, SensitivityEntry, SensitivityResultSet, has_pairs,
    select_bars, select_heatmap,
};

use crate::config::{BarSettings, ViewerConfig};

/// Step for the minimum-value control.
pub const MIN_VALUE_STEP: f64 = 0.005;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Bars,
    Heatmap,
}

impl ViewMode {
    pub fn name(&self) -> &'static str {
        match self {
            ViewMode::Bars => "First / total order",
            ViewMode::Heatmap => "Second order",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Bars => ViewMode::Heatmap,
            ViewMode::Heatmap => ViewMode::Bars,
        }
    }
}

pub struct AppState {
    pub results: SensitivityResultSet,
    /// Output-measure names, in tab order.
    pub outputs: Vec<String>,
    pub active_output: usize,
    pub view: ViewMode,
    pub bars: BarSettings,
    pub heatmap: HeatmapFilter,
    /// Every parameter name, for the highlight / include picker.
    pub parameters: Vec<String>,
    pub cursor: usize,
    pub status_message: Option<String>,
    pub exit: bool,
}

impl AppState {
    pub fn new(results: SensitivityResultSet, config: &ViewerConfig) -> Self {
        let outputs = results.names().map(str::to_owned).collect();
        let parameters = results.parameters();
        Self {
            results,
            outputs,
            active_output: 0,
            view: ViewMode::default(),
            bars: config.bars.clone(),
            heatmap: config.heatmap.clone(),
            parameters,
            cursor: 0,
            status_message: None,
            exit: false,
        }
    }

    pub fn active_name(&self) -> Option<&str> {
        self.outputs.get(self.active_output).map(String::as_str)
    }

    pub fn active_entry(&self) -> Option<&SensitivityEntry> {
        self.active_name().and_then(|name| self.results.get(name))
    }

    pub fn next_output(&mut self) {
        if !self.outputs.is_empty() {
            self.active_output = (self.active_output + 1) % self.outputs.len();
        }
    }

    pub fn prev_output(&mut self) {
        if !self.outputs.is_empty() {
            self.active_output =
                (self.active_output + self.outputs.len() - 1) % self.outputs.len();
        }
    }

    pub fn select_output(&mut self, index: usize) {
        if index < self.outputs.len() {
            self.active_output = index;
        }
    }

    pub fn toggle_view(&mut self) {
        self.view = self.view.toggled();
    }

    pub fn adjust_min_value(&mut self, steps: i32) {
        let value = self.bars.min_value + steps as f64 * MIN_VALUE_STEP;
        // Snap to the step grid to avoid drift
        let snapped = (value / MIN_VALUE_STEP).round() * MIN_VALUE_STEP;
        self.bars.min_value = snapped.clamp(0.0, 1.0);
    }

    /// Change the top count of the active view; never below one.
    pub fn adjust_top(&mut self, delta: i32) {
        let top = match self.view {
            ViewMode::Bars => &mut self.bars.top,
            ViewMode::Heatmap => &mut self.heatmap.top,
        };
        *top = top.saturating_add_signed(delta as isize).max(1);
    }

    pub fn move_cursor(&mut self, delta: i32) {
        if self.parameters.is_empty() {
            return;
        }
        let last = self.parameters.len() - 1;
        self.cursor = self.cursor.saturating_add_signed(delta as isize).min(last);
    }

    pub fn cursor_parameter(&self) -> Option<&str> {
        self.parameters.get(self.cursor).map(String::as_str)
    }

    pub fn toggle_highlight(&mut self) {
        if let Some(name) = self.cursor_parameter().map(str::to_owned) {
            toggle_membership(&mut self.bars.highlighted, name);
        }
    }

    /// Toggle the cursor parameter in the heatmap include list. Adding a
    /// parameter that the active output has no pairs for leaves a note.
    pub fn toggle_include(&mut self) {
        let Some(name) = self.cursor_parameter().map(str::to_owned) else {
            return;
        };
        let adding = !self.is_included(&name);
        let unpaired = match self.active_entry().and_then(|e| e.second_order.as_ref()) {
            Some(table) => !has_pairs(table, &name),
            None => false,
        };
        if adding && unpaired {
            let output = self.active_name().unwrap_or_default();
            let note = format!("{name} has no second-order pairs in {output}");
            self.set_status(note);
        } else {
            self.clear_status();
        }
        toggle_membership(&mut self.heatmap.include, name);
    }

    pub fn is_highlighted(&self, name: &str) -> bool {
        self.bars.highlighted.iter().any(|h| h == name)
    }

    pub fn is_included(&self, name: &str) -> bool {
        self.heatmap.include.iter().any(|h| h == name)
    }

    /// Bars for the active output under the current controls.
    pub fn bar_rows(&self) -> Vec<BarRow> {
        self.active_entry()
            .map(|entry| select_bars(&entry.first_order, &self.bars.filter()))
            .unwrap_or_default()
    }

    /// Heatmap for the active output under the current controls.
    pub fn heatmap_view(&self) -> HeatmapView {
        let second = self.active_entry().and_then(|e| e.second_order.as_ref());
        select_heatmap(second, &self.heatmap)
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }
}

fn toggle_membership(list: &mut Vec<String>, name: String) {
    if let Some(pos) = list.iter().position(|n| *n == name) {
        list.remove(pos);
    } else {
        list.push(name);
    }
}
