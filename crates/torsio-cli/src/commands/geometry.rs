use anyhow::Result;
use log::info;
use std::io::{self, Write};
use std::path::PathBuf;
use torsio_core::{ca_trace, compute};
use torsio_io::load_structure;

fn cell(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{v:.6}"),
        _ => String::new(),
    }
}

pub fn execute(input: PathBuf, chain: Option<String>) -> Result<()> {
    let atoms = load_structure(&input)?;
    let trace = ca_trace(&atoms, chain.as_deref());
    info!("{}: {} CA atoms", input.display(), trace.len());
    let geometry = compute(&trace);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "index,curvature,torsion")?;
    for residue in geometry.per_residue(trace.len()) {
        writeln!(
            out,
            "{},{},{}",
            residue.index,
            cell(residue.curvature),
            cell(residue.torsion)
        )?;
    }
    Ok(())
}
