//! Integration tests for the sensitivity reader
//!
//! Tests are organized by topic:
//! - `directory` - Directory scans, exclusions and failure semantics
//! - `properties` - Clamp and rename invariants over generated tables
//! - `pipeline` - Loading a dataset end to end and shaping it for display

mod directory;
mod properties;
