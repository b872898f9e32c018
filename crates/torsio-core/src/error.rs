//! Error taxonomy for the feature pipeline.
//!
//! Geometry errors are per-protein and recoverable: the pipeline records them as
//! exclusions. Corpus errors (`EmptyCorpus`, `DegenerateRange`) abort a run.
use crate::features::Quantity;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FeatureError {
    #[error("trace has {actual} CA points, at least {required} are required")]
    InsufficientGeometry { required: usize, actual: usize },

    #[error("every {quantity} window is degenerate (duplicate coordinates)")]
    DegenerateGeometry { quantity: Quantity },

    #[error("no protein contributes a finite {quantity} value")]
    EmptyCorpus { quantity: Quantity },

    #[error("zero-width {} range at {value}", range_label(.quantity))]
    DegenerateRange {
        quantity: Option<Quantity>,
        value: f64,
    },

    #[error("feature vector for {accession} has length {actual}, corpus length is {expected}")]
    LengthMismatch {
        accession: String,
        expected: usize,
        actual: usize,
    },

    #[error("bin count must be at least 2, got {0}")]
    InvalidBinCount(usize),

    #[error("minimum trace length must be at least 4, got {0}")]
    InvalidTraceLength(usize),

    #[error("cached stage holds {actual} proteins, corpus has {expected}")]
    StaleStage { expected: usize, actual: usize },

    #[error("malformed EC number: {0:?}")]
    InvalidEcNumber(String),
}

impl FeatureError {
    /// Whether the error invalidates the whole corpus rather than one protein.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            FeatureError::InsufficientGeometry { .. } | FeatureError::DegenerateGeometry { .. }
        )
    }
}

fn range_label(quantity: &Option<Quantity>) -> String {
    match quantity {
        Some(quantity) => quantity.to_string(),
        None => "normalization".to_string(),
    }
}

pub type Result<T> = std::result::Result<T, FeatureError>;
