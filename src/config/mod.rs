//! Run configuration for branch-sweep.
//!
//! Inputs arrive as strings (GitHub Actions `INPUT_*` variables or CLI flags)
//! and are parsed exactly once into the typed [`Config`]. An optional YAML
//! file supplies repository-level defaults; explicit inputs always win.

mod model;
mod operations;
pub mod types;


// Re-export public API
pub use model::{Config, Inputs, Token};
pub use types::{DEFAULT_CONFIG_PATH, FileConfig};
