//! # Constants
//!
//! Residue-name lookups used when walking a structure.
//!
//! - `is_amino_acid()` - Check if a residue name is a (possibly modified) amino acid
//! - `is_water()` - Check if a residue name is a solvent water

use std::collections::HashSet;
use std::sync::OnceLock;

static AMINO_ACIDS: OnceLock<HashSet<&'static str>> = OnceLock::new();

#[rustfmt::skip]
fn get_amino_acids() -> &'static HashSet<&'static str> {
    AMINO_ACIDS.get_or_init(|| {
        [
            "ALA", "ARG", "ASN", "ASP", "CYS", "GLN", "GLU", "GLY", "HIS", "ILE",
            "LEU", "LYS", "MET", "PHE", "PRO", "SER", "THR", "TRP", "TYR", "VAL",
            // selenocysteine, pyrrolysine and common modified residues
            "SEC", "PYL", "MSE", "SEP", "TPO", "PTR", "HYP", "MLY", "CSO", "KCX",
            "ASX", "GLX", "UNK",
        ]
        .into_iter()
        .collect()
    })
}

pub(crate) fn is_amino_acid(symbol: &str) -> bool {
    get_amino_acids().contains(symbol)
}

pub(crate) fn is_water(symbol: &str) -> bool {
    matches!(symbol, "HOH" | "WAT" | "DOD" | "H2O")
}
