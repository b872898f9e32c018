use crate::info::constants::{is_amino_acid, is_water};
use crate::residue::Residue;
use itertools::{izip, Itertools};
use pdbtbx::Element;

/// One atom row, as read from a structure file.
#[derive(Debug, Clone, PartialEq)]
pub struct AtomRecord {
    pub coord: [f32; 3],
    pub atom_name: String,
    pub element: Element,
    pub res_id: i32,
    pub res_name: String,
    pub chain_id: String,
    pub is_hetero: bool,
}

/// Column-oriented atom table for a single structure model.
///
/// Each atom is one row across the parallel vectors. Residues are contiguous
/// runs of rows; see [`AtomCollection::residues`].
#[derive(Debug, Clone, Default)]
pub struct AtomCollection {
    coords: Vec<[f32; 3]>,
    atom_names: Vec<String>,
    elements: Vec<Element>,
    res_ids: Vec<i32>,
    res_names: Vec<String>,
    chain_ids: Vec<String>,
    is_hetero: Vec<bool>,
}

impl AtomCollection {
    pub fn push(&mut self, atom: AtomRecord) {
        self.coords.push(atom.coord);
        self.atom_names.push(atom.atom_name);
        self.elements.push(atom.element);
        self.res_ids.push(atom.res_id);
        self.res_names.push(atom.res_name);
        self.chain_ids.push(atom.chain_id);
        self.is_hetero.push(atom.is_hetero);
    }
    pub fn len(&self) -> usize {
        self.coords.len()
    }
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }
    pub fn coords(&self) -> &[[f32; 3]] {
        &self.coords
    }
    pub fn coord(&self, idx: usize) -> &[f32; 3] {
        &self.coords[idx]
    }
    pub fn atom_name(&self, idx: usize) -> &str {
        &self.atom_names[idx]
    }
    pub fn element(&self, idx: usize) -> &Element {
        &self.elements[idx]
    }
    pub fn is_hetero(&self, idx: usize) -> bool {
        self.is_hetero[idx]
    }
    pub fn chain_id(&self, idx: usize) -> &str {
        &self.chain_ids[idx]
    }
    pub fn res_ids(&self) -> &[i32] {
        &self.res_ids
    }
    pub fn res_names(&self) -> &[String] {
        &self.res_names
    }
    /// Distinct chain ids in order of first appearance.
    pub fn chain_ids(&self) -> Vec<&str> {
        self.chain_ids.iter().map(String::as_str).unique().collect()
    }

    /// Row boundaries of every residue, closed by `len()`: residue `k` spans
    /// `bounds[k]..bounds[k + 1]`. A residue ends where chain id, residue id
    /// or residue name changes.
    pub(crate) fn residue_bounds(&self) -> Vec<usize> {
        if self.is_empty() {
            return Vec::new();
        }
        let breaks = izip!(&self.chain_ids, &self.res_ids, &self.res_names)
            .tuple_windows()
            .positions(|(prev, next)| prev != next)
            .map(|i| i + 1);
        std::iter::once(0)
            .chain(breaks)
            .chain(std::iter::once(self.len()))
            .collect()
    }

    /// Every residue in file order, waters and ligands included.
    pub fn residues(&self) -> impl Iterator<Item = Residue<'_>> + '_ {
        self.residue_bounds()
            .into_iter()
            .tuple_windows()
            .map(move |(start, end)| Residue::new(self, start..end))
    }
    pub fn amino_acids(&self) -> impl Iterator<Item = Residue<'_>> + '_ {
        self.residues().filter(|residue| is_amino_acid(residue.name()))
    }
    pub fn waters(&self) -> impl Iterator<Item = Residue<'_>> + '_ {
        self.residues().filter(|residue| is_water(residue.name()))
    }
}

impl FromIterator<AtomRecord> for AtomCollection {
    fn from_iter<I: IntoIterator<Item = AtomRecord>>(iter: I) -> Self {
        let mut collection = AtomCollection::default();
        for atom in iter {
            collection.push(atom);
        }
        collection
    }
}
