//! Hand-off to a regression stage: features as `X`, EC indicators as `Y`.
use crate::ec::{EcHierarchy, EcNumber};
use crate::error::Result;
use crate::features::{check_lengths, FeatureVector};
use crate::Protein;
use ndarray::Array2;

/// Row-aligned regression inputs for every protein that has a feature vector.
#[derive(Debug, Clone, PartialEq)]
pub struct DesignMatrix {
    pub accessions: Vec<String>,
    /// `[n_samples, n_features]`
    pub features: Array2<f64>,
    /// `[n_samples, hierarchy.len()]`
    pub labels: Array2<u8>,
}

impl DesignMatrix {
    pub fn from_proteins(proteins: &[Protein], hierarchy: &EcHierarchy) -> Result<Self> {
        let width = check_lengths(proteins)?.unwrap_or(0);
        let rows: Vec<(&Protein, &FeatureVector)> = proteins
            .iter()
            .filter_map(|p| p.features().map(|f| (p, f)))
            .collect();
        let indicators = rows
            .iter()
            .map(|(p, _)| EcNumber::parse(p.ec_number()).map(|ec| hierarchy.indicator(&ec)))
            .collect::<Result<Vec<_>>>()?;

        let features = Array2::from_shape_fn((rows.len(), width), |(i, j)| rows[i].1.get(j) as f64);
        let labels = Array2::from_shape_fn((rows.len(), hierarchy.len()), |(i, j)| {
            indicators[i][j]
        });
        Ok(DesignMatrix {
            accessions: rows.iter().map(|(p, _)| p.accession().to_string()).collect(),
            features,
            labels,
        })
    }
    pub fn n_samples(&self) -> usize {
        self.features.nrows()
    }
    pub fn n_features(&self) -> usize {
        self.features.ncols()
    }
    pub fn n_labels(&self) -> usize {
        self.labels.ncols()
    }
}
