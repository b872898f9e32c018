//! torsio-io
//!
//! File-facing collaborators of the feature pipeline:
//! - structure files (PDB / mmCIF) to CA traces
//! - connection tables (EC number, accession) and feature / label tables as CSV
//! - a stage-keyed on-disk cache for expensive derived data
mod cache;
mod structure;
mod tables;

pub use cache::{corpus_fingerprint, StageCache};
pub use structure::{attach_traces, load_structure, StructureLocator};
pub use tables::{read_connections, write_connections, write_features, write_labels};
