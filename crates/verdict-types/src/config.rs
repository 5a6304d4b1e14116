use serde::{Deserialize, Serialize};

/// Inclusive numeric range scores are drawn from.
///
/// A scale is either the matrix-wide default or a per-criterion override.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaleConfig {
    /// Lowest permitted score.
    pub min: i32,
    /// Highest permitted score.
    pub max: i32,
}

impl ScaleConfig {
    /// Create a scale with explicit bounds.
    pub fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    /// Returns `true` if `score` falls within the scale bounds.
    pub fn contains(&self, score: i32) -> bool {
        score >= self.min && score <= self.max
    }
}

impl Default for ScaleConfig {
    /// The conventional 0..=10 scoring scale.
    fn default() -> Self {
        Self { min: 0, max: 10 }
    }
}

/// Matrix-wide scoring configuration.
///
/// Always has a value: a matrix with zero configuration events projects to
/// [`MatrixConfig::default`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixConfig {
    /// Scale applied to criteria without an override.
    pub default_scale: ScaleConfig,
    /// Whether scores below zero are permitted.
    pub allow_negative: bool,
}

impl Default for MatrixConfig {
    fn default() -> Self {
        Self {
            default_scale: ScaleConfig::default(),
            allow_negative: false,
        }
    }
}
