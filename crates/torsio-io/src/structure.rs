use anyhow::{anyhow, Context, Result};
use itertools::Itertools;
use log::{debug, warn};
use std::path::{Path, PathBuf};
use torsio_core::{ca_trace, AtomCollection, Protein};

const EXTENSIONS: [&str; 4] = ["pdb", "cif", "ent", "mmcif"];

/// Read a PDB or mmCIF file (format chosen by extension).
pub fn load_structure(path: impl AsRef<Path>) -> Result<AtomCollection> {
    let path = path.as_ref();
    let path_str = path
        .to_str()
        .with_context(|| format!("non UTF-8 path {}", path.display()))?;
    let (pdb, warnings) = pdbtbx::open(path_str).map_err(|errors| {
        anyhow!(
            "could not parse {}: {}",
            path.display(),
            errors.iter().map(|e| e.to_string()).join("; ")
        )
    })?;
    for warning in warnings {
        debug!("{}: {}", path.display(), warning);
    }
    Ok(AtomCollection::from(&pdb))
}

/// Finds structure files named after accessions, e.g. `P00001.pdb`, in one directory.
#[derive(Debug, Clone)]
pub struct StructureLocator {
    dir: PathBuf,
}

impl StructureLocator {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        StructureLocator { dir: dir.into() }
    }
    pub fn dir(&self) -> &Path {
        &self.dir
    }
    /// Try the accession as given, upper- and lower-cased, with each known extension.
    pub fn find(&self, accession: &str) -> Option<PathBuf> {
        [
            accession.to_string(),
            accession.to_uppercase(),
            accession.to_lowercase(),
        ]
        .into_iter()
        .unique()
        .cartesian_product(EXTENSIONS)
        .map(|(stem, ext)| self.dir.join(format!("{stem}.{ext}")))
        .find(|path| path.is_file())
    }
}

/// Load and attach the CA trace of every protein that has a structure file.
///
/// Missing or unreadable files are logged and leave the protein with an empty
/// trace, which the pipeline then reports as an exclusion. Returns the number
/// of traces attached.
pub fn attach_traces(
    proteins: &mut [Protein],
    locator: &StructureLocator,
    chain: Option<&str>,
) -> usize {
    let mut attached = 0;
    for protein in proteins.iter_mut() {
        let Some(path) = locator.find(protein.accession()) else {
            warn!(
                "no structure for {} in {}",
                protein.accession(),
                locator.dir().display()
            );
            continue;
        };
        match load_structure(&path) {
            Ok(atoms) => {
                let trace = ca_trace(&atoms, chain);
                if trace.missing() > 0 {
                    warn!(
                        "{}: {} residues without a CA atom",
                        protein.accession(),
                        trace.missing()
                    );
                }
                debug!("{}: {} CA atoms", protein.accession(), trace.len());
                protein.set_trace(trace);
                attached += 1;
            }
            Err(err) => warn!("{}: {:#}", protein.accession(), err),
        }
    }
    attached
}
