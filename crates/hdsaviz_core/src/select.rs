//! Shapes index tables into what the charts draw.
//!
//! Bars come from a [`FirstOrderTable`]: ranked, thresholded and truncated.
//! Heatmaps come from an optional [`SecondOrderTable`]: the most interactive
//! parameters plus any the caller always wants to see, laid out as a square
//! grid.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::model::{FirstOrderTable, SecondOrderTable, normalize_parameter_name};

/// Filter for the per-output bar chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BarFilter {
    /// Rows whose ranking value is not above this are hidden.
    pub min_value: f64,
    /// Maximum number of bars.
    pub top: usize,
    /// Parameters drawn with emphasis.
    pub highlighted: Vec<String>,
}

impl Default for BarFilter {
    fn default() -> Self {
        Self {
            min_value: 0.01,
            top: 20,
            highlighted: Vec::new(),
        }
    }
}

/// One bar: first order stacked under the total-order remainder.
#[derive(Debug, Clone, PartialEq)]
pub struct BarRow {
    pub parameter: String,
    pub s1: f64,
    pub s1_conf: Option<f64>,
    pub st: Option<f64>,
    pub st_conf: Option<f64>,
    pub highlighted: bool,
}

impl BarRow {
    /// Total height: ST when present, else S1.
    pub fn total(&self) -> f64 {
        self.st.unwrap_or(self.s1)
    }

    /// Part of the total not explained by first-order effects.
    pub fn interaction(&self) -> f64 {
        (self.total() - self.s1).max(0.0)
    }
}

/// Rank first-order rows by total-order index (S1 when ST is absent),
/// keep those strictly above `min_value`, and take the first `top`.
///
/// Equal values keep their file order. NaN values never pass the threshold.
pub fn select_bars(table: &FirstOrderTable, filter: &BarFilter) -> Vec<BarRow> {
    let mut rows: Vec<_> = table
        .rows()
        .iter()
        .filter(|r| r.rank_value() > filter.min_value)
        .collect();
    rows.sort_by(|a, b| b.rank_value().total_cmp(&a.rank_value()));

    rows.into_iter()
        .take(filter.top)
        .map(|r| BarRow {
            parameter: r.parameter.clone(),
            s1: r.s1,
            s1_conf: r.s1_conf,
            st: r.st,
            st_conf: r.st_conf,
            highlighted: filter.highlighted.iter().any(|h| *h == r.parameter),
        })
        .collect()
}

/// Filter for the second-order heatmap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeatmapFilter {
    /// Number of parameters taken from the strongest interactions.
    pub top: usize,
    /// Parameters shown even when outside the top.
    pub include: Vec<String>,
    /// Fill both `(a, b)` and `(b, a)`.
    pub mirror: bool,
}

impl Default for HeatmapFilter {
    fn default() -> Self {
        Self {
            top: 5,
            include: Vec::new(),
            mirror: true,
        }
    }
}

/// Square grid of second-order indices, stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapGrid {
    parameters: Vec<String>,
    cells: Vec<Option<f64>>,
}

impl HeatmapGrid {
    pub fn parameters(&self) -> &[String] {
        &self.parameters
    }

    pub fn size(&self) -> usize {
        self.parameters.len()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        let n = self.size();
        if row >= n || col >= n {
            return None;
        }
        self.cells[row * n + col]
    }

    /// Largest value in the grid, for color scaling.
    pub fn max_value(&self) -> Option<f64> {
        self.cells
            .iter()
            .flatten()
            .copied()
            .filter(|v| !v.is_nan())
            .reduce(f64::max)
    }
}

/// What the heatmap panel shows for one output.
#[derive(Debug, Clone, PartialEq)]
pub enum HeatmapView {
    /// The analysis computed no second-order indices.
    Absent,
    Grid(HeatmapGrid),
}

/// Build the heatmap for an optional second-order table.
///
/// Pair names are normalized like first-order names (`rxn` becomes `k`),
/// so grid labels and `include` use the same names as the bar chart.
/// Pairs are ranked by `S2`, largest first; distinct parameters are taken
/// from that ranking until `top` are collected, then `include` names are
/// appended. A cell is `None` when the file has no pair for it.
pub fn select_heatmap(
    table: Option<&SecondOrderTable>,
    filter: &HeatmapFilter,
) -> HeatmapView {
    let Some(table) = table else {
        return HeatmapView::Absent;
    };

    let pairs: Vec<(String, String, f64)> = table
        .rows()
        .iter()
        .map(|row| {
            (
                normalize_parameter_name(&row.parameter_1),
                normalize_parameter_name(&row.parameter_2),
                row.s2,
            )
        })
        .collect();

    let mut ranked: Vec<_> = pairs.iter().collect();
    ranked.sort_by(|a, b| b.2.total_cmp(&a.2));

    let mut parameters: Vec<String> = Vec::new();
    'outer: for (a, b, _) in &ranked {
        for name in [a, b] {
            if parameters.len() >= filter.top {
                break 'outer;
            }
            if !parameters.contains(name) {
                parameters.push(name.clone());
            }
        }
    }
    for name in &filter.include {
        if !parameters.contains(name) {
            parameters.push(name.clone());
        }
    }

    let position: FxHashMap<&str, usize> = parameters
        .iter()
        .enumerate()
        .map(|(i, p)| (p.as_str(), i))
        .collect();
    let n = parameters.len();
    let mut cells = vec![None; n * n];
    for (a, b, s2) in &pairs {
        let (Some(&i), Some(&j)) = (position.get(a.as_str()), position.get(b.as_str())) else {
            continue;
        };
        cells[i * n + j] = Some(*s2);
        if filter.mirror {
            cells[j * n + i] = Some(*s2);
        }
    }

    HeatmapView::Grid(HeatmapGrid { parameters, cells })
}

/// Whether `parameter` takes part in any pair, after name normalization.
pub fn has_pairs(table: &SecondOrderTable, parameter: &str) -> bool {
    table.rows().iter().any(|row| {
        normalize_parameter_name(&row.parameter_1) == parameter
            || normalize_parameter_name(&row.parameter_2) == parameter
    })
}
