//! Layered configuration: built-in defaults, then the TOML file, then command-line flags.

pub mod builder;
pub mod defaults;
pub mod file;

pub use builder::{build_distance_config, build_label_config};
