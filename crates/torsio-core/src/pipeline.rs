//! Two-phase feature pipeline.
//!
//! Phase 1 derives curvature/torsion for every protein independently. The
//! global extremum scan is the barrier between the phases; phase 2 bins every
//! protein against the frozen [`GlobalExtrema`] and attaches its vector.
use crate::config::PipelineConfig;
use crate::error::{FeatureError, Result};
use crate::features::{
    feature_vector, scan, FeatureStore, FeatureVector, GlobalExtrema, Quantity,
};
use crate::geometry::{compute_checked, Geometry};
use crate::Protein;
use log::{debug, info, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// A protein left out of the run, and why.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exclusion {
    pub accession: String,
    pub reason: FeatureError,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub featurised: usize,
    pub excluded: Vec<Exclusion>,
    /// accession and number of NaN windows, for proteins that were still featurised
    pub degenerate: Vec<(String, usize)>,
    pub extrema: GlobalExtrema,
    pub feature_len: usize,
}

/// Phase-1 output in a form that can be cached and restored onto the same corpus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryStage {
    geometries: Vec<Option<Geometry>>,
    excluded: Vec<Exclusion>,
}

impl GeometryStage {
    pub fn capture(proteins: &[Protein], excluded: &[Exclusion]) -> Self {
        GeometryStage {
            geometries: proteins.iter().map(|p| p.geometry().cloned()).collect(),
            excluded: excluded.to_vec(),
        }
    }
    /// Put the captured geometry back, protein by protein, in corpus order.
    pub fn restore(self, proteins: &mut [Protein]) -> Result<Vec<Exclusion>> {
        if self.geometries.len() != proteins.len() {
            return Err(FeatureError::StaleStage {
                expected: proteins.len(),
                actual: self.geometries.len(),
            });
        }
        for (protein, geometry) in proteins.iter_mut().zip(self.geometries) {
            protein.set_geometry(geometry);
        }
        Ok(self.excluded)
    }
}

pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Pipeline { config })
    }
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run both phases. Corpus-level errors abort the run and leave no
    /// feature vector attached.
    pub fn run(&self, proteins: &mut [Protein]) -> Result<RunReport> {
        let excluded = self.derive_geometry(proteins);
        self.featurize(proteins, excluded)
    }

    /// Phase 1: attach geometry to every protein with a long enough trace and
    /// at least one finite value per quantity.
    pub fn derive_geometry(&self, proteins: &mut [Protein]) -> Vec<Exclusion> {
        let min_len = self.config.min_trace_len;
        let derive = |protein: &mut Protein| match compute_checked(protein.trace(), min_len)
            .and_then(require_finite)
        {
            Ok(geometry) => {
                protein.set_geometry(Some(geometry));
                None
            }
            Err(reason) => {
                protein.clear_derived();
                Some(Exclusion {
                    accession: protein.accession().to_string(),
                    reason,
                })
            }
        };
        let excluded: Vec<Exclusion> = if self.config.parallel {
            proteins.par_iter_mut().filter_map(derive).collect()
        } else {
            proteins.iter_mut().filter_map(derive).collect()
        };
        info!(
            "geometry derived for {} of {} proteins",
            proteins.len() - excluded.len(),
            proteins.len()
        );
        excluded
    }

    /// Barrier plus phase 2. Expects geometry from [`Pipeline::derive_geometry`]
    /// (or a restored [`GeometryStage`]).
    pub fn featurize(
        &self,
        proteins: &mut [Protein],
        excluded: Vec<Exclusion>,
    ) -> Result<RunReport> {
        for exclusion in &excluded {
            warn!("excluding {}: {}", exclusion.accession, exclusion.reason);
        }
        let degenerate: Vec<(String, usize)> = proteins
            .iter()
            .filter_map(|p| {
                let count = p.geometry()?.degenerate_windows();
                (count > 0).then(|| (p.accession().to_string(), count))
            })
            .collect();
        for (accession, count) in &degenerate {
            warn!("{accession}: {count} degenerate windows (duplicate coordinates) skipped");
        }

        let extrema = scan(proteins)?;
        info!(
            "curvature range [{:.4}, {:.4}], torsion range [{:.4}, {:.4}]",
            extrema.curvature.min, extrema.curvature.max, extrema.torsion.min, extrema.torsion.max
        );

        let featurize_one = |protein: &Protein| -> Result<Option<FeatureVector>> {
            protein
                .geometry()
                .map(|geometry| feature_vector(geometry, &extrema, &self.config))
                .transpose()
        };
        let vectors: Vec<Option<FeatureVector>> = if self.config.parallel {
            proteins.par_iter().map(featurize_one).collect::<Result<_>>()?
        } else {
            proteins.iter().map(featurize_one).collect::<Result<_>>()?
        };

        let mut store = FeatureStore::with_len(self.config.feature_len());
        let mut featurised = 0;
        for (protein, vector) in proteins.iter_mut().zip(vectors) {
            if let Some(vector) = vector {
                debug!("{}: {} binned values", protein.accession(), vector.total());
                store.attach(protein, vector)?;
                featurised += 1;
            }
        }
        info!(
            "attached {featurised} feature vectors of length {}",
            self.config.feature_len()
        );

        Ok(RunReport {
            featurised,
            excluded,
            degenerate,
            extrema,
            feature_len: self.config.feature_len(),
        })
    }
}

/// A geometry whose windows are all NaN for one quantity would bin to an
/// all-zero histogram.
fn require_finite(geometry: Geometry) -> Result<Geometry> {
    let quantities = [
        (Quantity::Curvature, geometry.curvature()),
        (Quantity::Torsion, geometry.torsion()),
    ];
    for (quantity, values) in quantities {
        if !values.iter().any(|v| v.is_finite()) {
            return Err(FeatureError::DegenerateGeometry { quantity });
        }
    }
    Ok(geometry)
}
