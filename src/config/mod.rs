//! Configuration loading for Tantu.
//!
//! Loads all configuration from a single YAML file. Every field has a
//! default, so a partial (or empty) file is valid.

mod defaults;
mod smoothing;
mod tantu;

pub use smoothing::SmoothingSection;
pub use tantu::TantuConfig;
