//! Cross-output view of first- or total-order indices.
//!
//! Lines up every output measure against every parameter so one can see
//! which parameters matter anywhere, and which matter nowhere.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::model::FirstOrderRow;
use crate::sensitivity::SensitivityResultSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Order {
    First,
    #[default]
    Total,
}

impl Order {
    pub fn display_name(&self) -> &'static str {
        match self {
            Order::First => "First order (S1)",
            Order::Total => "Total order (ST)",
        }
    }

    fn value(&self, row: &FirstOrderRow) -> Option<f64> {
        match self {
            Order::First => Some(row.s1),
            Order::Total => row.st,
        }
    }
}

/// Output measures × parameters, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct CombinedIndices {
    pub order: Order,
    outputs: Vec<String>,
    parameters: Vec<String>,
    values: Vec<Option<f64>>,
}

impl CombinedIndices {
    pub fn outputs(&self) -> &[String] {
        &self.outputs
    }

    pub fn parameters(&self) -> &[String] {
        &self.parameters
    }

    pub fn get(&self, output: usize, parameter: usize) -> Option<f64> {
        if output >= self.outputs.len() || parameter >= self.parameters.len() {
            return None;
        }
        self.values[output * self.parameters.len() + parameter]
    }

    /// Values of one parameter across all outputs.
    pub fn column(&self, parameter: usize) -> impl Iterator<Item = Option<f64>> + '_ {
        let width = self.parameters.len();
        (0..self.outputs.len()).map(move |o| self.values[o * width + parameter])
    }

    /// Parameters whose largest reported index is exactly zero, i.e.
    /// candidates to prune from the model.
    ///
    /// `ST` is not clamped, so small negative estimates count as zero
    /// effect. A parameter with no reported value at all is not listed.
    pub fn unused_parameters(&self) -> Vec<&str> {
        self.parameters
            .iter()
            .enumerate()
            .filter(|(p, _)| {
                self.column(*p)
                    .flatten()
                    .fold(f64::NEG_INFINITY, f64::max)
                    == 0.0
            })
            .map(|(_, name)| name.as_str())
            .collect()
    }
}

/// Build the cross-output matrix for one order.
pub fn combine(results: &SensitivityResultSet, order: Order) -> CombinedIndices {
    let parameters = results.parameters();
    let position: FxHashMap<&str, usize> = parameters
        .iter()
        .enumerate()
        .map(|(i, p)| (p.as_str(), i))
        .collect();

    let width = parameters.len();
    let mut outputs = Vec::with_capacity(results.len());
    let mut values = vec![None; results.len() * width];
    for (o, (name, entry)) in results.iter().enumerate() {
        outputs.push(name.to_owned());
        for row in entry.first_order.rows() {
            if let Some(&p) = position.get(row.parameter.as_str()) {
                values[o * width + p] = order.value(row);
            }
        }
    }

    CombinedIndices {
        order,
        outputs,
        parameters,
        values,
    }
}
