use crate::cli::FeaturizeArgs;
use anyhow::{Context, Result};
use log::info;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use torsio_core::{
    BoundaryPolicy, CombineMode, DesignMatrix, EcHierarchy, GeometryStage, Pipeline,
    PipelineConfig, Protein,
};
use torsio_io::{
    attach_traces, corpus_fingerprint, read_connections, write_features, write_labels,
    StageCache, StructureLocator,
};

const GEOMETRY_STAGE: &str = "geometry";

fn load_config(args: &FeaturizeArgs) -> Result<PipelineConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let file =
                File::open(path).with_context(|| format!("could not open {}", path.display()))?;
            serde_json::from_reader(BufReader::new(file))
                .with_context(|| format!("invalid pipeline config {}", path.display()))?
        }
        None => PipelineConfig::default(),
    };
    if let Some(bins) = args.bins {
        config.bins = bins;
    }
    if args.no_clamp {
        config.boundary = BoundaryPolicy::Drop;
    }
    if args.concatenate {
        config.combine = CombineMode::Concatenate;
    }
    if args.sequential {
        config.parallel = false;
    }
    Ok(config)
}

pub fn execute(args: FeaturizeArgs) -> Result<()> {
    let config = load_config(&args)?;
    let pipeline = Pipeline::new(config)?;
    info!(
        "bins={} boundary={} combine={}",
        pipeline.config().bins,
        pipeline.config().boundary,
        pipeline.config().combine
    );

    let mut proteins: Vec<Protein> = read_connections(&args.connections, !args.no_header)?;
    let locator = StructureLocator::new(&args.structures);
    let attached = attach_traces(&mut proteins, &locator, args.chain.as_deref());
    info!("{attached} of {} structures loaded", proteins.len());

    let excluded = match &args.cache_dir {
        Some(dir) => {
            let cache = StageCache::open(dir)?;
            if args.refresh {
                cache.invalidate(GEOMETRY_STAGE)?;
            }
            let salt = format!(
                "min_trace_len={};chain={}",
                pipeline.config().min_trace_len,
                args.chain.as_deref().unwrap_or("*")
            );
            let fingerprint = corpus_fingerprint(&proteins, &salt);
            match cache.load::<GeometryStage>(GEOMETRY_STAGE, &fingerprint)? {
                Some(stage) => stage.restore(&mut proteins)?,
                None => {
                    let excluded = pipeline.derive_geometry(&mut proteins);
                    let stage = GeometryStage::capture(&proteins, &excluded);
                    cache.store(GEOMETRY_STAGE, &fingerprint, &stage)?;
                    excluded
                }
            }
        }
        None => pipeline.derive_geometry(&mut proteins),
    };

    let report = pipeline
        .featurize(&mut proteins, excluded)
        .context("featurization failed")?;

    let written = write_features(&args.output, &proteins)?;
    info!("{written} feature rows written to {}", args.output.display());

    if let Some(path) = &args.labels {
        let hierarchy = EcHierarchy::from_proteins(&proteins)?;
        let design = DesignMatrix::from_proteins(&proteins, &hierarchy)?;
        write_labels(path, &design)?;
        info!(
            "{} x {} label matrix written to {}",
            design.n_samples(),
            design.n_labels(),
            path.display()
        );
    }
    if let Some(path) = &args.report {
        let file =
            File::create(path).with_context(|| format!("could not create {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &report)?;
        writer.flush()?;
    }
    Ok(())
}
