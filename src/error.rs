//! Error types for Tantu

use thiserror::Error;

/// Tantu error type
#[derive(Error, Debug)]
pub enum TantuError {
    #[error("Path needs at least 2 waypoints, got {0}")]
    PathTooShort(usize),

    #[error("Invalid grid: {0}")]
    InvalidGrid(String),

    #[error("Invalid pattern table: {0}")]
    InvalidTable(String),

    #[error(
        "Displacement class ({dx_max}, {dy_min}) is outside the pattern table built for width {width}"
    )]
    DisplacementOutOfRange {
        dx_max: usize,
        dy_min: usize,
        width: usize,
    },

    #[error("Non-finite coordinate in segment ({x}, {y})")]
    NonFiniteCoordinate { x: f32, y: f32 },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_yaml::Error> for TantuError {
    fn from(e: serde_yaml::Error) -> Self {
        TantuError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TantuError>;
