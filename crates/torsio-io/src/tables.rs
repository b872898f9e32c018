//! CSV tables: connection tables in, feature and label tables out.
use anyhow::{bail, Context, Result};
use itertools::Itertools;
use log::{info, warn};
use polars::prelude::*;
use std::fs::File;
use std::path::Path;
use torsio_core::{DesignMatrix, Protein};

/// Read `ec_number, accession` rows into proteins with empty traces.
///
/// Columns are taken by position so header names do not matter. Rows with a
/// missing cell are skipped. When an EC number appears more than once only
/// the first protein is kept.
pub fn read_connections(path: impl AsRef<Path>, has_header: bool) -> Result<Vec<Protein>> {
    let path = path.as_ref();
    let df = CsvReadOptions::default()
        .with_has_header(has_header)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .with_context(|| format!("could not open {}", path.display()))?
        .finish()
        .with_context(|| format!("could not read connections from {}", path.display()))?;

    let columns = df.get_columns();
    if columns.len() < 2 {
        bail!(
            "{}: expected two columns (ec_number, accession), found {}",
            path.display(),
            columns.len()
        );
    }
    let ec_numbers = columns[0].as_materialized_series().str()?;
    let accessions = columns[1].as_materialized_series().str()?;

    let rows: Vec<(&str, &str)> = ec_numbers
        .into_iter()
        .zip(accessions)
        .enumerate()
        .filter_map(|(row, pair)| match pair {
            (Some(ec), Some(accession)) => Some((ec.trim(), accession.trim())),
            _ => {
                warn!("{}: skipping incomplete row {}", path.display(), row);
                None
            }
        })
        .collect();
    let total = rows.len();
    let proteins: Vec<Protein> = rows
        .into_iter()
        .unique_by(|(ec, _)| *ec)
        .map(|(ec, accession)| Protein::new(ec, accession))
        .collect();
    if proteins.len() < total {
        warn!(
            "{}: {} rows with a repeated EC number ignored",
            path.display(),
            total - proteins.len()
        );
    }
    info!("{} proteins read from {}", proteins.len(), path.display());
    Ok(proteins)
}

pub fn write_connections(path: impl AsRef<Path>, proteins: &[Protein]) -> Result<()> {
    let ec_numbers: Vec<&str> = proteins.iter().map(|p| p.ec_number()).collect();
    let accessions: Vec<&str> = proteins.iter().map(|p| p.accession()).collect();
    let mut df = DataFrame::new(vec![
        Column::from(Series::new("ec_number".into(), ec_numbers)),
        Column::from(Series::new("accession".into(), accessions)),
    ])?;
    write_frame(path.as_ref(), &mut df)
}

/// One row per featurised protein: `accession, ec_number, f0 .. fN`.
pub fn write_features(path: impl AsRef<Path>, proteins: &[Protein]) -> Result<usize> {
    let rows: Vec<&Protein> = proteins.iter().filter(|p| p.features().is_some()).collect();
    let width = rows
        .iter()
        .filter_map(|p| p.features().map(|f| f.len()))
        .max()
        .unwrap_or(0);

    let mut columns = vec![
        Column::from(Series::new(
            "accession".into(),
            rows.iter().map(|p| p.accession()).collect::<Vec<_>>(),
        )),
        Column::from(Series::new(
            "ec_number".into(),
            rows.iter().map(|p| p.ec_number()).collect::<Vec<_>>(),
        )),
    ];
    for bin in 0..width {
        let counts: Vec<u64> = rows
            .iter()
            .map(|p| p.features().map_or(0, |f| f.get(bin) as u64))
            .collect();
        columns.push(Column::from(Series::new(format!("f{bin}").into(), counts)));
    }
    let mut df = DataFrame::new(columns)?;
    write_frame(path.as_ref(), &mut df)?;
    Ok(rows.len())
}

/// EC indicator rows of a [`DesignMatrix`]: `accession, y0 .. yM`.
pub fn write_labels(path: impl AsRef<Path>, design: &DesignMatrix) -> Result<()> {
    let mut columns = vec![Column::from(Series::new(
        "accession".into(),
        design.accessions.clone(),
    ))];
    for (j, label) in design.labels.columns().into_iter().enumerate() {
        let values: Vec<u32> = label.iter().map(|&v| u32::from(v)).collect();
        columns.push(Column::from(Series::new(format!("y{j}").into(), values)));
    }
    let mut df = DataFrame::new(columns)?;
    write_frame(path.as_ref(), &mut df)
}

fn write_frame(path: &Path, df: &mut DataFrame) -> Result<()> {
    let mut file =
        File::create(path).with_context(|| format!("could not create {}", path.display()))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(df)
        .with_context(|| format!("could not write {}", path.display()))?;
    Ok(())
}
