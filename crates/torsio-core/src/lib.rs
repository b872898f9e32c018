//! # torsio-core
//!
//! Geometric fingerprints of protein backbones for enzyme classification.
//!
//! __torsio-core__ provides:
//! * An [`AtomCollection`] built from PDB/mmCIF structures and walked residue by residue
//! * CA trace extraction ([`ca_trace`]) and discrete curvature / torsion ([`compute`])
//! * Corpus-wide min/max ([`scan`]), truncating normalization ([`normalize_and_bin`])
//!   and histogram feature vectors ([`feature_vector`])
//! * A two-phase [`Pipeline`] that ties the above together over a corpus of [`Protein`]s
//! * EC-number indicator vectors ([`EcHierarchy`]) and a [`DesignMatrix`] for a downstream regression
//!
//! ```
//! use torsio_core::{CaTrace, Pipeline, PipelineConfig, Protein};
//!
//! let helix: CaTrace = (0..10)
//!     .map(|i| {
//!         let t = (100.0 * i as f64).to_radians();
//!         [2.3 * t.cos(), 2.3 * t.sin(), 1.5 * i as f64]
//!     })
//!     .collect();
//! let strand: CaTrace = (0..8).map(|i| [3.3 * i as f64, 0.9 * (i % 2) as f64, 0.0]).collect();
//!
//! let mut proteins = vec![
//!     Protein::new("1.1.1.1", "P00001").with_trace(helix),
//!     Protein::new("2.7.11.1", "P00002").with_trace(strand),
//! ];
//! let config = PipelineConfig::builder().bins(50).build();
//! let report = Pipeline::new(config).unwrap().run(&mut proteins).unwrap();
//! assert_eq!(report.featurised, 2);
//! assert_eq!(proteins[0].features().unwrap().len(), 49);
//! ```
mod atomcollection;
mod config;
mod conversions;
mod design;
mod ec;
mod error;
mod features;
mod geometry;
mod info;
mod pipeline;
mod protein;
mod residue;

#[cfg(test)]
mod test_utilities;

pub use self::atomcollection::{AtomCollection, AtomRecord};
pub use self::config::{BoundaryPolicy, CombineMode, PipelineConfig, DEFAULT_BINS};
pub use self::design::DesignMatrix;
pub use self::ec::{EcHierarchy, EcNumber, EC_LEVELS};
pub use self::error::{FeatureError, Result};
pub use self::features::{
    check_lengths, feature_vector, histogram, normalize_and_bin, scan, scan_geometries,
    FeatureStore, FeatureVector, GlobalExtrema, Quantity, Range,
};
pub use self::geometry::{
    ca_trace, compute, compute_checked, curvature_at, torsion_at, CaTrace, Geometry,
    ResidueGeometry,
};
pub use self::pipeline::{Exclusion, GeometryStage, Pipeline, RunReport};
pub use self::protein::Protein;
pub use self::residue::Residue;
