//! Typed sensitivity-index tables.
//!
//! Column names follow SALib's text output:
//!
//! ```text
//! Parameter S1 S1_conf ST ST_conf
//! k1 0.31 0.02 0.45 0.03
//!
//! Parameter_1 Parameter_2 S2 S2_conf
//! k1 k2 0.04 0.01
//! ```

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ParseError;
use crate::table::Table;

pub const PARAMETER: &str = "Parameter";
pub const S1: &str = "S1";
pub const S1_CONF: &str = "S1_conf";
pub const ST: &str = "ST";
pub const ST_CONF: &str = "ST_conf";
pub const PARAMETER_1: &str = "Parameter_1";
pub const PARAMETER_2: &str = "Parameter_2";
pub const S2: &str = "S2";
pub const S2_CONF: &str = "S2_conf";

/// One parameter's first-order and (when present) total-order index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FirstOrderRow {
    pub parameter: String,
    pub s1: f64,
    pub s1_conf: Option<f64>,
    pub st: Option<f64>,
    pub st_conf: Option<f64>,
}

impl FirstOrderRow {
    /// Value used for ranking: total order when available, else first order.
    pub fn rank_value(&self) -> f64 {
        self.st.unwrap_or(self.s1)
    }
}

/// First/total-order indices in file order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FirstOrderTable {
    rows: Vec<FirstOrderRow>,
}

impl FirstOrderTable {
    pub fn new(rows: Vec<FirstOrderRow>) -> Self {
        Self { rows }
    }

    /// Build from an untyped table. `Parameter` and `S1` are required.
    pub fn from_table(table: &Table) -> Result<Self, ParseError> {
        let parameters = table.text_column(PARAMETER)?;
        let s1 = table.number_column(S1)?;
        let s1_conf = table.optional_number_column(S1_CONF)?;
        let st = table.optional_number_column(ST)?;
        let st_conf = table.optional_number_column(ST_CONF)?;

        let rows = parameters
            .into_iter()
            .enumerate()
            .map(|(i, parameter)| FirstOrderRow {
                parameter,
                s1: s1[i],
                s1_conf: s1_conf.as_ref().map(|c| c[i]),
                st: st.as_ref().map(|c| c[i]),
                st_conf: st_conf.as_ref().map(|c| c[i]),
            })
            .collect();
        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[FirstOrderRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn parameters(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|r| r.parameter.as_str())
    }

    /// Coerce negative first-order indices to zero.
    ///
    /// Negative estimates come from finite-sample error and carry no
    /// meaning. NaN is left untouched.
    pub fn clamp_negative(&mut self) {
        for row in &mut self.rows {
            if row.s1 < 0.0 {
                row.s1 = 0.0;
            }
        }
    }

    /// Rewrite `rxn` (any case) to `k` in parameter names so they match the
    /// input-parameters file.
    pub fn normalize_parameter_names(&mut self) {
        for row in &mut self.rows {
            row.parameter = normalize_parameter_name(&row.parameter);
        }
    }
}

/// Interaction index for one pair of parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecondOrderRow {
    pub parameter_1: String,
    pub parameter_2: String,
    pub s2: f64,
    pub s2_conf: Option<f64>,
}

/// Second-order indices in file order. May legitimately hold zero rows.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SecondOrderTable {
    rows: Vec<SecondOrderRow>,
}

impl SecondOrderTable {
    pub fn new(rows: Vec<SecondOrderRow>) -> Self {
        Self { rows }
    }

    /// Build from an untyped table. `Parameter_1`, `Parameter_2` and `S2`
    /// are required.
    pub fn from_table(table: &Table) -> Result<Self, ParseError> {
        let first = table.text_column(PARAMETER_1)?;
        let second = table.text_column(PARAMETER_2)?;
        let s2 = table.number_column(S2)?;
        let s2_conf = table.optional_number_column(S2_CONF)?;

        let rows = first
            .into_iter()
            .zip(second)
            .enumerate()
            .map(|(i, (parameter_1, parameter_2))| SecondOrderRow {
                parameter_1,
                parameter_2,
                s2: s2[i],
                s2_conf: s2_conf.as_ref().map(|c| c[i]),
            })
            .collect();
        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[SecondOrderRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn clamp_negative(&mut self) {
        for row in &mut self.rows {
            if row.s2 < 0.0 {
                row.s2 = 0.0;
            }
        }
    }
}

static RXN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)rxn").expect("literal pattern is valid"));

/// Parameter name as it appears in the input-parameters file: every `rxn`
/// (any case) becomes `k`.
pub fn normalize_parameter_name(name: &str) -> String {
    RXN.replace_all(name, "k").into_owned()
}
