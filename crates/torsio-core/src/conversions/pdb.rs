use crate::{AtomCollection, AtomRecord};
use pdbtbx::PDB;

/// First model only: NMR ensembles would otherwise repeat every chain.
/// Atoms without a recognised element are dropped.
impl From<&PDB> for AtomCollection {
    fn from(pdb: &PDB) -> Self {
        let Some(model) = pdb.models().next() else {
            return AtomCollection::default();
        };
        model
            .chains()
            .flat_map(|chain| {
                chain.residues().flat_map(move |residue| {
                    let (serial, _insertion_code) = residue.id();
                    residue.atoms().filter_map(move |atom| {
                        let (x, y, z) = atom.pos();
                        Some(AtomRecord {
                            coord: [x as f32, y as f32, z as f32],
                            atom_name: atom.name().to_string(),
                            element: atom.element()?.clone(),
                            res_id: serial as i32,
                            res_name: residue.name().unwrap_or_default().to_string(),
                            chain_id: chain.id().to_string(),
                            is_hetero: atom.hetero(),
                        })
                    })
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::AtomCollection;
    use itertools::Itertools;
    use pdbtbx::Element;
    use torsio_test_data::TestFile;

    #[test]
    fn test_from_pdb() {
        let (helix_file, _temp) = TestFile::helix_01().create_temp().unwrap();
        let (pdb, _warnings) = pdbtbx::open(helix_file).unwrap();
        assert_eq!(pdb.atom_count(), 41);

        let ac = AtomCollection::from(&pdb);
        assert_eq!(ac.len(), 41);
        assert_eq!(ac.amino_acids().count(), 10);
        assert_eq!(ac.waters().count(), 1);
        assert_eq!(ac.chain_ids(), vec!["A"]);

        let res_names: Vec<&str> = ac
            .res_names()
            .iter()
            .map(String::as_str)
            .unique()
            .sorted()
            .collect();
        assert_eq!(
            res_names,
            ["ALA", "GLU", "GLY", "HOH", "ILE", "LEU", "LYS", "MET", "SER", "VAL"]
        );

        let first_ca = ac
            .amino_acids()
            .next()
            .and_then(|res| res.atom_coord("CA").copied())
            .unwrap();
        assert!((first_ca[0] - 2.3).abs() < 1e-4);
        assert_eq!(*ac.element(1), Element::C);
        assert!(ac.is_hetero(40));
    }
}
