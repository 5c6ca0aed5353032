use roomnav_core::GridScale;

use crate::distance::Heuristic;
use crate::error::ConfigError;

/// Tuning for a [`Pathfinder`](crate::Pathfinder).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PathfinderConfig {
    /// Heuristic inflation factor. `1.0` gives optimal routes with an
    /// admissible heuristic; larger values expand fewer nodes.
    pub epsilon: f64,
    /// Step cost and remaining-cost estimate.
    pub heuristic: Heuristic,
    /// World↔grid mapping used by the world-space entry points.
    pub scale: GridScale,
}

impl Default for PathfinderConfig {
    fn default() -> Self {
        Self {
            epsilon: 1.0,
            heuristic: Heuristic::Manhattan,
            scale: GridScale::default(),
        }
    }
}

impl PathfinderConfig {
    /// Check the numeric fields.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.epsilon.is_finite() || self.epsilon < 1.0 {
            return Err(ConfigError::InvalidEpsilon(self.epsilon));
        }
        let s = self.scale.tile_size;
        if !s.is_finite() || s <= 0.0 {
            return Err(ConfigError::InvalidTileSize(s));
        }
        Ok(())
    }
}
