//! Sensitivity-analysis results loader
//!
//! This crate reads the text files written by SALib's Sobol analysis and
//! prepares them for display. It supports:
//! - Scanning a results directory for `analysis_<output>.txt` files
//! - Splitting each file into first/total-order and second-order tables
//! - Clamping negative indices to zero and normalizing parameter names
//! - Reading companion CSV tables with optional column exclusion
//! - Ranking parameters for bar charts and interaction heatmaps
//! - Combining indices across output measures
//!
//! # Example
//!
//! ```ignore
//! use hdsaviz_core::{ScanConfig, read_sensitivity_dir};
//!
//! let config = ScanConfig::default()
//!     .with_exclusions(["analysis_light_aromatic-C-C.txt"]);
//! let results = read_sensitivity_dir(Path::new("../HDSAviz_data"), &config)?;
//!
//! let co = results.get("CO").unwrap();
//! for row in co.first_order.rows() {
//!     println!("{} {}", row.parameter, row.s1);
//! }
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod combine;
pub mod error;
pub mod reader;
pub mod select;
pub mod sensitivity;
pub mod table;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod config;
pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use combine::{CombinedIndices, Order, combine};
pub use config::{ScanConfig, TableSource};
pub use error::{ParseError, ReadError, Result};
pub use model::{
    FirstOrderRow, FirstOrderTable, SecondOrderRow, SecondOrderTable, normalize_parameter_name,
};
pub use reader::{ReadOptions, read_table};
pub use select::{
    BarFilter, BarRow, HeatmapFilter, HeatmapGrid, HeatmapView, has_pairs, select_bars,
    select_heatmap,
};
pub use sensitivity::{
    SensitivityEntry, SensitivityResultSet, parse_analysis, read_analysis_file,
    read_sensitivity_dir, split_blocks,
};
pub use table::{Delimiter, Table};
