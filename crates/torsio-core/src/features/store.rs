use crate::error::{FeatureError, Result};
use crate::Protein;
use serde::{Deserialize, Serialize};

/// Histogram counts indexed by bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureVector(Vec<usize>);

impl FeatureVector {
    pub fn new(counts: Vec<usize>) -> Self {
        FeatureVector(counts)
    }
    pub fn counts(&self) -> &[usize] {
        &self.0
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    /// Count in bucket `bin`, zero past the end.
    pub fn get(&self, bin: usize) -> usize {
        self.0.get(bin).copied().unwrap_or(0)
    }
    pub fn total(&self) -> usize {
        self.0.iter().sum()
    }
}

/// Attaches feature vectors to proteins, holding every vector of a corpus to one length.
#[derive(Debug, Default)]
pub struct FeatureStore {
    expected_len: Option<usize>,
}

impl FeatureStore {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn with_len(len: usize) -> Self {
        FeatureStore {
            expected_len: Some(len),
        }
    }
    pub fn expected_len(&self) -> Option<usize> {
        self.expected_len
    }
    /// Set (or overwrite) `protein`'s vector. The first attach fixes the corpus length
    /// unless the store was created with [`FeatureStore::with_len`].
    pub fn attach(&mut self, protein: &mut Protein, vector: FeatureVector) -> Result<()> {
        self.admit(protein.accession(), vector.len())?;
        protein.attach_features(vector);
        Ok(())
    }
    fn admit(&mut self, accession: &str, len: usize) -> Result<()> {
        match self.expected_len {
            Some(expected) if expected != len => Err(FeatureError::LengthMismatch {
                accession: accession.to_string(),
                expected,
                actual: len,
            }),
            Some(_) => Ok(()),
            None => {
                self.expected_len = Some(len);
                Ok(())
            }
        }
    }
}

/// Common length of all attached feature vectors, `None` if nothing is attached.
pub fn check_lengths(proteins: &[Protein]) -> Result<Option<usize>> {
    let mut store = FeatureStore::new();
    for protein in proteins {
        if let Some(vector) = protein.features() {
            store.admit(protein.accession(), vector.len())?;
        }
    }
    Ok(store.expected_len)
}
