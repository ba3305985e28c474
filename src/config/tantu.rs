//! Main TantuConfig and conversion methods.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::grid::WalkableGrid;
use crate::smoothing::SmootherConfig;
use crate::traversal::{PatternTableCache, Traversal};

use super::smoothing::SmoothingSection;

/// Full Tantu configuration loaded from YAML
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TantuConfig {
    /// Path smoothing settings
    #[serde(default)]
    pub smoothing: SmoothingSection,
}

impl TantuConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Load from default config path (configs/config.yaml)
    pub fn load_default() -> Result<Self> {
        let path = Path::new("configs/config.yaml");
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // serde_yaml rejects an empty document; treat it as all defaults
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Serialize to YAML
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Convert to SmootherConfig
    pub fn to_smoother_config(&self) -> SmootherConfig {
        self.smoothing.to_smoother_config()
    }

    /// Resolve the configured traversal strategy for `grid`
    pub fn traversal_for<G: WalkableGrid + ?Sized>(
        &self,
        grid: &G,
        cache: &PatternTableCache,
    ) -> Result<Traversal> {
        Traversal::for_grid(
            self.smoothing.strategy,
            grid,
            cache,
            self.smoothing.cell_retrieval_precision,
        )
    }
}
