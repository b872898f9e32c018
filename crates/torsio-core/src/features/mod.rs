//! Corpus-wide normalization of curvature/torsion into fixed-length feature vectors.
//!
//! The work is split by a barrier: [`scan`] needs every protein's geometry before
//! any call to [`feature_vector`] can run, and its [`GlobalExtrema`] result is
//! immutable afterwards.
mod binning;
mod extrema;
mod store;

pub use binning::{feature_vector, histogram, normalize_and_bin};
pub use extrema::{scan, scan_geometries, GlobalExtrema, Range};
pub use store::{check_lengths, FeatureStore, FeatureVector};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Quantity {
    Curvature,
    Torsion,
}
