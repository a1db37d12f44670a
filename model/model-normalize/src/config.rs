//! Normalization configuration.
//!
//! The canonical size, the scale clamp, and the degenerate-input
//! threshold are part of the pipeline's observable contract, so they
//! live here as named constants rather than literals at call sites.

/// Target length for a normalized mesh's largest bounding-box
/// dimension, in display units.
pub const CANONICAL_SIZE: f64 = 3.0;

/// Lower bound on the uniform scale factor actually applied.
pub const SCALE_CLAMP_MIN: f64 = 0.1;

/// Upper bound on the uniform scale factor actually applied.
pub const SCALE_CLAMP_MAX: f64 = 10.0;

/// Largest input dimension (in input units) still considered sane.
/// At or above this, scaling is skipped entirely.
pub const MAX_DIM_LIMIT: f64 = 1000.0;

/// Configuration for [`normalize`](crate::normalize).
///
/// The defaults mirror the named constants; a test harness can assert
/// against either.
///
/// # Example
///
/// ```
/// use model_normalize::{NormalizeConfig, CANONICAL_SIZE};
///
/// let config = NormalizeConfig::default();
/// assert_eq!(config.canonical_size, CANONICAL_SIZE);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizeConfig {
    /// Target length for the largest bounding-box dimension.
    pub canonical_size: f64,
    /// Closed interval the applied scale factor is clamped to.
    pub scale_clamp: (f64, f64),
    /// Input `max_dim` at or above which scaling is skipped.
    pub max_dim_limit: f64,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            canonical_size: CANONICAL_SIZE,
            scale_clamp: (SCALE_CLAMP_MIN, SCALE_CLAMP_MAX),
            max_dim_limit: MAX_DIM_LIMIT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_constants() {
        let config = NormalizeConfig::default();
        assert!((config.canonical_size - 3.0).abs() < f64::EPSILON);
        assert!((config.scale_clamp.0 - 0.1).abs() < f64::EPSILON);
        assert!((config.scale_clamp.1 - 10.0).abs() < f64::EPSILON);
        assert!((config.max_dim_limit - 1000.0).abs() < f64::EPSILON);
    }
}
