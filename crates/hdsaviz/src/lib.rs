//! Terminal viewer for Sobol sensitivity-analysis results
//!
//! Browses the `analysis_<output>.txt` files of a dataset directory:
//! - One tab per output measure
//! - First / total-order bar charts with live threshold and top-N controls
//! - Second-order interaction heatmaps
//! - Printing commands for summaries and unused parameters

// ============================================================================
// Application modules
// ============================================================================

pub mod app;
pub mod commands;
pub mod components;
pub mod dataset;
pub mod screens;
pub mod state;

// ============================================================================
// Support modules
// ============================================================================

pub mod config;
pub mod logging;
pub mod util;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use app::App;
pub use config::{BarSettings, ViewerConfig};
pub use dataset::Dataset;
pub use logging::{LogTarget, init_logging};
pub use state::{AppState, ViewMode};
