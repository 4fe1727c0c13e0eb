use serde::{Deserialize, Serialize};

use crate::constants::LIMIT_RATIO;
use crate::errors::{GistError, GistResult};

/// Tuning knobs for [`pick_split`](crate::split::pick_split).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitConfig {
    min_split_ratio: f64,
}

impl SplitConfig {
    /// Creates a config with a custom minimum split ratio.
    ///
    /// The smaller group of every double sorting split must hold strictly
    /// more than `min_split_ratio` of the entries, so the ratio has to lie in
    /// `(0, 0.5)`.
    pub fn new(min_split_ratio: f64) -> GistResult<Self> {
        let config = SplitConfig { min_split_ratio };
        config.validate()?;
        Ok(config)
    }

    pub fn min_split_ratio(&self) -> f64 {
        self.min_split_ratio
    }

    /// Checks a config that did not come through [`SplitConfig::new`], for
    /// example one read from a host's config file.
    pub fn validate(&self) -> GistResult<()> {
        let r = self.min_split_ratio;
        if r > 0.0 && r < 0.5 {
            Ok(())
        } else {
            Err(GistError::InvalidConfig(format!(
                "min_split_ratio must be in (0, 0.5), got {}",
                r
            )))
        }
    }
}

impl Default for SplitConfig {
    fn default() -> Self {
        SplitConfig {
            min_split_ratio: LIMIT_RATIO,
        }
    }
}
