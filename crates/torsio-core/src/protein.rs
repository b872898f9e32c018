use crate::features::FeatureVector;
use crate::geometry::{CaTrace, Geometry};
use serde::{Deserialize, Serialize};

/// One enzyme record and everything the pipeline derives for it.
///
/// Identity is the `(ec_number, accession)` pair. Derived data is attached in
/// place by each stage; an absent feature vector means the protein was excluded
/// (or has not been processed yet).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Protein {
    ec_number: String,
    accession: String,
    trace: CaTrace,
    geometry: Option<Geometry>,
    features: Option<FeatureVector>,
}

impl Protein {
    pub fn new(ec_number: impl Into<String>, accession: impl Into<String>) -> Self {
        Protein {
            ec_number: ec_number.into(),
            accession: accession.into(),
            trace: CaTrace::default(),
            geometry: None,
            features: None,
        }
    }
    pub fn with_trace(mut self, trace: CaTrace) -> Self {
        self.set_trace(trace);
        self
    }
    pub fn ec_number(&self) -> &str {
        &self.ec_number
    }
    pub fn accession(&self) -> &str {
        &self.accession
    }
    pub fn trace(&self) -> &CaTrace {
        &self.trace
    }
    /// Replacing the trace invalidates everything derived from it.
    pub fn set_trace(&mut self, trace: CaTrace) {
        self.trace = trace;
        self.clear_derived();
    }
    pub fn geometry(&self) -> Option<&Geometry> {
        self.geometry.as_ref()
    }
    /// New geometry makes any attached feature vector stale, so it is dropped.
    pub fn set_geometry(&mut self, geometry: Option<Geometry>) {
        self.geometry = geometry;
        self.features = None;
    }
    pub fn features(&self) -> Option<&FeatureVector> {
        self.features.as_ref()
    }
    /// Overwrites any previously attached vector.
    pub fn attach_features(&mut self, features: FeatureVector) {
        self.features = Some(features);
    }
    pub fn clear_derived(&mut self) {
        self.geometry = None;
        self.features = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utilities::helix_trace;

    #[test]
    fn test_set_trace_clears_derived() {
        let mut protein = Protein::new("1.1.1.1", "P12345");
        protein.set_geometry(Some(Geometry::new(vec![0.1], vec![])));
        protein.attach_features(FeatureVector::new(vec![1, 0]));
        assert!(protein.features().is_some());

        protein.set_trace(helix_trace(5));
        assert_eq!(protein.trace().len(), 5);
        assert!(protein.geometry().is_none());
        assert!(protein.features().is_none());
        assert_eq!(protein.accession(), "P12345");
        assert_eq!(protein.ec_number(), "1.1.1.1");
    }
}
