//! Pipeline configuration.
//!
//! Loaded from JSON (every field optional) or assembled with the builder:
//!
//! ```
//! use torsio_core::{BoundaryPolicy, PipelineConfig};
//! let config = PipelineConfig::builder().bins(10).boundary(BoundaryPolicy::Drop).build();
//! assert_eq!(config.buckets(), 9);
//! ```
use crate::error::{FeatureError, Result};
use bon::Builder;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

pub const DEFAULT_BINS: usize = 1000;
pub const DEFAULT_MIN_TRACE_LEN: usize = 4;

/// What to do with a value equal to the range maximum, whose truncated bin
/// index is `bins` (one past the last valid index).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BoundaryPolicy {
    /// Clamp the index to `bins - 1`; every value is counted.
    #[default]
    Clamp,
    /// Keep the raw index; the histogram drops it.
    Drop,
}

/// How the curvature and torsion histograms form one feature vector.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CombineMode {
    /// Element-wise sum. Both distributions share one signature of `bins - 1` counts.
    #[default]
    Sum,
    /// Curvature histogram followed by torsion histogram, `2 * (bins - 1)` counts.
    Concatenate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder)]
#[serde(default)]
pub struct PipelineConfig {
    /// Number of normalization bins; the histogram has `bins - 1` buckets.
    #[builder(default = DEFAULT_BINS)]
    pub bins: usize,
    #[builder(default)]
    pub boundary: BoundaryPolicy,
    #[builder(default)]
    pub combine: CombineMode,
    /// Proteins with shorter CA traces are excluded.
    #[builder(default = DEFAULT_MIN_TRACE_LEN)]
    pub min_trace_len: usize,
    /// Run per-protein work on the rayon pool.
    #[builder(default = true)]
    pub parallel: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig::builder().build()
    }
}

impl PipelineConfig {
    pub fn validate(&self) -> Result<()> {
        if self.bins < 2 {
            return Err(FeatureError::InvalidBinCount(self.bins));
        }
        if self.min_trace_len < DEFAULT_MIN_TRACE_LEN {
            return Err(FeatureError::InvalidTraceLength(self.min_trace_len));
        }
        Ok(())
    }
    /// Histogram buckets per quantity.
    pub fn buckets(&self) -> usize {
        self.bins.saturating_sub(1)
    }
    /// Length every feature vector in a run will have.
    pub fn feature_len(&self) -> usize {
        match self.combine {
            CombineMode::Sum => self.buckets(),
            CombineMode::Concatenate => 2 * self.buckets(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.bins, 1000);
        assert_eq!(config.buckets(), 999);
        assert_eq!(config.feature_len(), 999);
        assert_eq!(config.boundary, BoundaryPolicy::Clamp);
        assert_eq!(config.combine, CombineMode::Sum);
        assert!(config.parallel);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_concatenate_length() {
        let config = PipelineConfig::builder()
            .bins(10)
            .combine(CombineMode::Concatenate)
            .build();
        assert_eq!(config.feature_len(), 18);
    }

    #[test]
    fn test_validate() {
        let config = PipelineConfig::builder().bins(1).build();
        assert_eq!(config.validate(), Err(FeatureError::InvalidBinCount(1)));
        let config = PipelineConfig::builder().min_trace_len(3).build();
        assert_eq!(config.validate(), Err(FeatureError::InvalidTraceLength(3)));
    }

    #[test]
    fn test_json_partial() {
        let config: PipelineConfig =
            serde_json::from_str(r#"{"bins": 50, "boundary": "drop"}"#).unwrap();
        assert_eq!(config.bins, 50);
        assert_eq!(config.boundary, BoundaryPolicy::Drop);
        assert_eq!(config.min_trace_len, 4);
        assert!(config.parallel);
    }

    #[test]
    fn test_enum_names() {
        assert_eq!(CombineMode::from_str("concatenate"), Ok(CombineMode::Concatenate));
        assert_eq!(BoundaryPolicy::Clamp.to_string(), "clamp");
    }
}
