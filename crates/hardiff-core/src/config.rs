//! Engine configuration
//!
//! Loaded from TOML; every field has a default so an empty document is a
//! valid configuration.
//!
//! ```toml
//! [sequence]
//! max_exact_cells = 4000000
//! band_width = 512
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{ExError, HarDiffError, Result};

/// Tunables of the sequence aligner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SequenceAlignerConfig {
    /// Largest `|A|·|B|` table the exact LCS may build; above this the
    /// banded approximation is used
    #[serde(default = "default_max_exact_cells")]
    pub max_exact_cells: usize,

    /// Half-width of the band around the diagonal evaluated by the banded
    /// LCS (widened to at least the length difference of the inputs)
    #[serde(default = "default_band_width")]
    pub band_width: usize,
}

fn default_max_exact_cells() -> usize {
    4_000_000
}

fn default_band_width() -> usize {
    512
}

impl Default for SequenceAlignerConfig {
    fn default() -> Self {
        Self {
            max_exact_cells: default_max_exact_cells(),
            band_width: default_band_width(),
        }
    }
}

/// Top-level engine configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    #[serde(default)]
    pub sequence: SequenceAlignerConfig,
}

impl EngineConfig {
    /// Parse and validate a TOML document
    ///
    /// # Errors
    /// `InvalidConfig` when the document does not parse or fails validation.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).map_err(|e| {
            ExError::from(HarDiffError::InvalidConfig {
                reason: e.to_string(),
            })
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges
    ///
    /// # Errors
    /// `InvalidConfig` when `band_width` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.sequence.band_width == 0 {
            return Err(HarDiffError::InvalidConfig {
                reason: "sequence.band_width must be at least 1".to_string(),
            }
            .into());
        }
        Ok(())
    }
}
