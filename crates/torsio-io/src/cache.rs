//! Stage-keyed on-disk cache.
//!
//! Entries live at `<root>/<stage>/<sha256(stage + fingerprint)>.json`. A
//! changed corpus produces a different fingerprint and therefore a miss;
//! [`StageCache::invalidate`] drops every entry of one stage.
use anyhow::{bail, Context, Result};
use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use torsio_core::Protein;

#[derive(Debug, Clone)]
pub struct StageCache {
    root: PathBuf,
}

impl StageCache {
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)
            .with_context(|| format!("could not create cache dir {}", root.display()))?;
        Ok(StageCache { root })
    }
    pub fn root(&self) -> &Path {
        &self.root
    }
    pub fn key(stage: &str, fingerprint: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(stage.as_bytes());
        hasher.update(fingerprint.as_bytes());
        hex::encode(hasher.finalize())
    }
    fn stage_dir(&self, stage: &str) -> Result<PathBuf> {
        let valid = !stage.is_empty()
            && stage
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            bail!("invalid cache stage name {stage:?}");
        }
        Ok(self.root.join(stage))
    }
    fn entry_path(&self, stage: &str, fingerprint: &str) -> Result<PathBuf> {
        Ok(self
            .stage_dir(stage)?
            .join(format!("{}.json", Self::key(stage, fingerprint))))
    }

    /// `Ok(None)` on a miss. Unreadable entries are treated as misses.
    pub fn load<T: DeserializeOwned>(&self, stage: &str, fingerprint: &str) -> Result<Option<T>> {
        let path = self.entry_path(stage, fingerprint)?;
        if !path.is_file() {
            debug!("cache miss for stage {stage}");
            return Ok(None);
        }
        let file = File::open(&path).with_context(|| format!("could not open {}", path.display()))?;
        match serde_json::from_reader(BufReader::new(file)) {
            Ok(value) => {
                info!("cache hit for stage {stage}: {}", path.display());
                Ok(Some(value))
            }
            Err(err) => {
                warn!("ignoring corrupt cache entry {}: {err}", path.display());
                Ok(None)
            }
        }
    }

    pub fn store<T: Serialize>(&self, stage: &str, fingerprint: &str, value: &T) -> Result<PathBuf> {
        let path = self.entry_path(stage, fingerprint)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file =
            File::create(&path).with_context(|| format!("could not create {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, value)
            .with_context(|| format!("could not write {}", path.display()))?;
        writer.flush()?;
        debug!("stored stage {stage} at {}", path.display());
        Ok(path)
    }

    /// Remove every entry of `stage`. Returns whether anything was removed.
    pub fn invalidate(&self, stage: &str) -> Result<bool> {
        let dir = self.stage_dir(stage)?;
        if !dir.exists() {
            return Ok(false);
        }
        fs::remove_dir_all(&dir).with_context(|| format!("could not remove {}", dir.display()))?;
        info!("invalidated cache stage {stage}");
        Ok(true)
    }

    pub fn clear(&self) -> Result<()> {
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.is_dir() {
                fs::remove_dir_all(&path)?;
            } else {
                fs::remove_file(&path)?;
            }
        }
        Ok(())
    }
}

/// Identity of a corpus: every protein's EC number, accession and CA
/// coordinates, in order, plus `salt` for the settings that shape a stage.
pub fn corpus_fingerprint(proteins: &[Protein], salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    for protein in proteins {
        hasher.update(protein.ec_number().as_bytes());
        hasher.update([0u8]);
        hasher.update(protein.accession().as_bytes());
        hasher.update([0u8]);
        hasher.update((protein.trace().len() as u64).to_le_bytes());
        for point in protein.trace().points() {
            for coord in point {
                hasher.update(coord.to_le_bytes());
            }
        }
    }
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use torsio_core::{CaTrace, GeometryStage, Pipeline, PipelineConfig};

    fn corpus() -> Vec<Protein> {
        let trace: CaTrace = (0..6)
            .map(|i| {
                let t = i as f64 * 1.7;
                [2.3 * t.cos(), 2.3 * t.sin(), 1.5 * i as f64]
            })
            .collect();
        vec![
            Protein::new("1.1.1.1", "P00001").with_trace(trace),
            Protein::new("2.7.11.1", "P00002"),
        ]
    }

    #[test]
    fn test_key_is_hex_sha256() {
        let key = StageCache::key("geometry", "abc");
        assert_eq!(key.len(), 64);
        assert!(key.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(key, StageCache::key("geometry", "abd"));
        assert_ne!(key, StageCache::key("features", "abc"));
    }

    #[test]
    fn test_fingerprint_tracks_content() {
        let proteins = corpus();
        let base = corpus_fingerprint(&proteins, "min4");
        assert_eq!(base, corpus_fingerprint(&corpus(), "min4"));
        assert_ne!(base, corpus_fingerprint(&proteins, "min5"));
        assert_ne!(base, corpus_fingerprint(&proteins[..1], "min4"));
    }

    #[test]
    fn test_store_load_invalidate_clear() {
        let dir = tempfile::tempdir().unwrap();
        let cache = StageCache::open(dir.path().join("cache")).unwrap();
        let mut proteins = corpus();
        let fingerprint = corpus_fingerprint(&proteins, "");

        assert!(cache
            .load::<GeometryStage>("geometry", &fingerprint)
            .unwrap()
            .is_none());

        let pipeline = Pipeline::new(PipelineConfig::default()).unwrap();
        let excluded = pipeline.derive_geometry(&mut proteins);
        let stage = GeometryStage::capture(&proteins, &excluded);
        cache.store("geometry", &fingerprint, &stage).unwrap();

        let loaded: GeometryStage = cache.load("geometry", &fingerprint).unwrap().unwrap();
        assert_eq!(loaded, stage);
        assert!(cache
            .load::<GeometryStage>("geometry", "other")
            .unwrap()
            .is_none());

        assert!(cache.invalidate("geometry").unwrap());
        assert!(!cache.invalidate("geometry").unwrap());
        assert!(cache
            .load::<GeometryStage>("geometry", &fingerprint)
            .unwrap()
            .is_none());

        cache.store("geometry", &fingerprint, &stage).unwrap();
        cache.clear().unwrap();
        assert_eq!(fs::read_dir(cache.root()).unwrap().count(), 0);
    }

    #[test]
    fn test_corrupt_entry_is_a_miss() {
        let dir = tempfile::tempdir().unwrap();
        let cache = StageCache::open(dir.path()).unwrap();
        let path = cache.store("geometry", "fp", &vec![1, 2, 3]).unwrap();
        fs::write(&path, "{not json").unwrap();
        assert!(cache.load::<Vec<i32>>("geometry", "fp").unwrap().is_none());
    }

    #[test]
    fn test_rejects_path_like_stage() {
        let dir = tempfile::tempdir().unwrap();
        let cache = StageCache::open(dir.path()).unwrap();
        assert!(cache.store("../escape", "fp", &1).is_err());
        assert!(cache.invalidate("").is_err());
    }
}
