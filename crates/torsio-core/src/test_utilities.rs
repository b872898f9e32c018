use crate::geometry::CaTrace;
use crate::{AtomCollection, AtomRecord};
use pdbtbx::Element;

pub(crate) const HELIX_ATOMS_PER_RESIDUE: usize = 4;

const RESIDUE_NAMES: [&str; 5] = ["MET", "ALA", "LEU", "GLU", "LYS"];

/// CA position of residue `i` on an ideal alpha helix: radius 2.3 Å,
/// 100° per residue, 1.5 Å rise.
pub(crate) fn helix_point(i: usize) -> [f64; 3] {
    let theta = (100.0 * i as f64).to_radians();
    [2.3 * theta.cos(), 2.3 * theta.sin(), 1.5 * i as f64]
}

pub(crate) fn helix_trace(n: usize) -> CaTrace {
    CaTrace::new((0..n).map(helix_point).collect())
}

pub(crate) fn atom(
    name: &str,
    element: Element,
    coord: [f32; 3],
    res_id: i32,
    res_name: &str,
    is_hetero: bool,
) -> AtomRecord {
    AtomRecord {
        coord,
        atom_name: name.to_string(),
        element,
        res_id,
        res_name: res_name.to_string(),
        chain_id: "A".to_string(),
        is_hetero,
    }
}

/// Backbone-only helix of `n` residues on chain A followed by a single water (res id 201).
pub(crate) fn helix_collection(n: usize) -> AtomCollection {
    let backbone = (0..n).flat_map(|i| {
        let [x, y, z] = helix_point(i).map(|v| v as f32);
        let res_id = i as i32 + 1;
        let res_name = RESIDUE_NAMES[i % RESIDUE_NAMES.len()];
        [
            ("N", Element::N, [x - 0.9, y + 0.6, z - 0.4]),
            ("CA", Element::C, [x, y, z]),
            ("C", Element::C, [x + 0.9, y + 0.5, z + 0.5]),
            ("O", Element::O, [x + 1.2, y + 1.6, z + 0.8]),
        ]
        .map(|(name, element, coord)| atom(name, element, coord, res_id, res_name, false))
    });
    let water = atom("O", Element::O, [10.0, 10.0, 10.0], 201, "HOH", true);
    backbone.chain(std::iter::once(water)).collect()
}
