//! Tunables for the combine filters.

use clipgraph_core::{GraphError, Result};
use serde::{Deserialize, Serialize};

/// Default values.
pub mod defaults {
    /// Constructed instances an Animate engine keeps alive at once.
    pub const ANIMATE_CACHE_SIZE: usize = 3;

    /// Full animation needs room for both endpoint instances.
    pub const MIN_ANIMATE_CACHE_SIZE: usize = 2;
}

/// Configuration shared by the registered combine filters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombineConfig {
    /// Slots in each Animate engine's stage cache.
    pub animate_cache_size: usize,
}

impl Default for CombineConfig {
    fn default() -> Self {
        Self {
            animate_cache_size: defaults::ANIMATE_CACHE_SIZE,
        }
    }
}

impl CombineConfig {
    /// Parse from JSON; missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.animate_cache_size < defaults::MIN_ANIMATE_CACHE_SIZE {
            return Err(GraphError::Config(format!(
                "animate_cache_size must be at least {}, got {}",
                defaults::MIN_ANIMATE_CACHE_SIZE,
                self.animate_cache_size
            )));
        }
        Ok(())
    }
}
