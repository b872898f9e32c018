use crate::AtomCollection;
use log::debug;
use serde::{Deserialize, Serialize};

/// Ordered alpha-carbon coordinates of one protein backbone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaTrace {
    points: Vec<[f64; 3]>,
    /// amino-acid residues that had no CA atom and were skipped
    missing: usize,
}

impl CaTrace {
    pub fn new(points: Vec<[f64; 3]>) -> Self {
        CaTrace { points, missing: 0 }
    }
    pub fn points(&self) -> &[[f64; 3]] {
        &self.points
    }
    pub fn len(&self) -> usize {
        self.points.len()
    }
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
    pub fn missing(&self) -> usize {
        self.missing
    }
}

impl FromIterator<[f64; 3]> for CaTrace {
    fn from_iter<I: IntoIterator<Item = [f64; 3]>>(iter: I) -> Self {
        CaTrace::new(iter.into_iter().collect())
    }
}

/// Extract the CA trace of the amino-acid residues, optionally restricted to one chain.
///
/// Waters and ligands are never part of the trace. A residue without a `CA`
/// atom is skipped and counted in [`CaTrace::missing`]; the neighbouring CA
/// atoms are then adjacent in the trace.
pub fn ca_trace(atoms: &AtomCollection, chain: Option<&str>) -> CaTrace {
    let mut missing = 0;
    let points = atoms
        .amino_acids()
        .filter(|residue| chain.map_or(true, |id| residue.chain_id() == id))
        .filter_map(|residue| match residue.atom_coord("CA") {
            Some(&[x, y, z]) => Some([x as f64, y as f64, z as f64]),
            None => {
                debug!(
                    "residue {} {}{} has no CA atom",
                    residue.name(),
                    residue.chain_id(),
                    residue.id()
                );
                missing += 1;
                None
            }
        })
        .collect();
    CaTrace { points, missing }
}
