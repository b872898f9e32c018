//! Borrowed view of one residue: a contiguous row range of an [`AtomCollection`].
use crate::AtomCollection;
use std::ops::Range;

#[derive(Debug, Clone)]
pub struct Residue<'a> {
    parent: &'a AtomCollection,
    rows: Range<usize>,
}

impl<'a> Residue<'a> {
    pub(crate) fn new(parent: &'a AtomCollection, rows: Range<usize>) -> Self {
        Residue { parent, rows }
    }
    pub fn rows(&self) -> Range<usize> {
        self.rows.clone()
    }
    pub fn atom_count(&self) -> usize {
        self.rows.len()
    }
    pub fn id(&self) -> i32 {
        self.parent.res_ids()[self.rows.start]
    }
    pub fn name(&self) -> &'a str {
        &self.parent.res_names()[self.rows.start]
    }
    pub fn chain_id(&self) -> &'a str {
        self.parent.chain_id(self.rows.start)
    }
    pub fn is_hetero(&self) -> bool {
        self.parent.is_hetero(self.rows.start)
    }
    /// Row of the first atom called `name`; alternate locations share a name.
    pub fn find_atom(&self, name: &str) -> Option<usize> {
        self.rows
            .clone()
            .find(|&row| self.parent.atom_name(row) == name)
    }
    pub fn atom_coord(&self, name: &str) -> Option<&'a [f32; 3]> {
        self.find_atom(name).map(|row| self.parent.coord(row))
    }
}
