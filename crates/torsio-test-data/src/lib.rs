//! torsio-test-data
//!
//! Small structure and table fixtures embedded in the crate for use in tests.
//!
//! The fixtures are represented as `TestFile` objects which package the raw bytes
//! and write them out to temporary files (or a caller-chosen directory) for programs to operate on.
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{Builder, NamedTempFile};

#[derive(Debug, Clone, Copy)]
/// Test File
///
/// Example usage:
///
/// ```ignore
/// // returns (filepath, _tempfile_handle).
/// // _handle ensures the tempfile remains in scope
/// use torsio_test_data::TestFile;
/// let (helix, _temp) = TestFile::helix_01().create_temp().unwrap();
/// ```
pub struct TestFile {
    filebinary: &'static [u8],
    suffix: &'static str,
}

impl TestFile {
    /// Ideal alpha helix, 10 residues (N, CA, C, O each) plus one water.
    pub fn helix_01() -> Self {
        Self {
            filebinary: include_bytes!("../data/structures/helix_10.pdb"),
            suffix: "pdb",
        }
    }
    /// Twisted zig-zag strand, 8 residues.
    pub fn strand_01() -> Self {
        Self {
            filebinary: include_bytes!("../data/structures/strand_08.pdb"),
            suffix: "pdb",
        }
    }
    /// Three residues: enough for curvature, too short for torsion.
    pub fn short_01() -> Self {
        Self {
            filebinary: include_bytes!("../data/structures/short_03.pdb"),
            suffix: "pdb",
        }
    }
    /// EC number / accession table.
    ///
    /// | ec_number | accession | fixture |
    /// |-----------|-----------|---------|
    /// | 1.1.1.1   | P00001    | `helix_01` |
    /// | 2.7.11.1  | P00002    | `strand_01` |
    /// | 3.4.21.-  | P00003    | `short_01` |
    /// | 1.1.1.1   | P99999    | duplicate EC, dropped on load |
    pub fn connections_01() -> Self {
        Self {
            filebinary: include_bytes!("../data/tables/connections.csv"),
            suffix: "csv",
        }
    }
    /// A table whose only protein is `short_01`.
    pub fn connections_short() -> Self {
        Self {
            filebinary: include_bytes!("../data/tables/connections_short.csv"),
            suffix: "csv",
        }
    }

    pub fn create_temp(&self) -> std::io::Result<(String, NamedTempFile)> {
        let temp = Builder::new()
            .suffix(&format!(".{}", self.suffix))
            .tempfile()?;

        fs::write(&temp, self.filebinary)?;
        let path = temp.path().to_string_lossy().into_owned();

        Ok((path, temp))
    }

    /// Write the fixture to `<dir>/<stem>.<suffix>`.
    pub fn write_to(&self, dir: &Path, stem: &str) -> std::io::Result<PathBuf> {
        let path = dir.join(format!("{}.{}", stem, self.suffix));
        fs::write(&path, self.filebinary)?;
        Ok(path)
    }
}

/// Lay out the structures referenced by `connections_01` under `dir`,
/// named by accession.
pub fn write_structure_dir(dir: &Path) -> std::io::Result<()> {
    TestFile::helix_01().write_to(dir, "P00001")?;
    TestFile::strand_01().write_to(dir, "P00002")?;
    TestFile::short_01().write_to(dir, "P00003")?;
    Ok(())
}
