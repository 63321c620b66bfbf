//! Trajectory grouping tool
//!
//! Reads 2D trajectories from a JSON file, computes the symmetric Hausdorff
//! distance between every pair, clusters them with DBSCAN over the distance
//! matrix and writes labels, the matrix and the grouped trajectories as CSV.

use clap::Parser;
use csv::WriterBuilder;
use log::{debug, error, info};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

mod cluster;
mod config;
mod error;


use cluster::{
    Cluster, DistanceMatrix, NOISE, RawTrajectory, Trajectory, build_labels, build_matrix,
    build_matrix_parallel, db_scan,
};
use config::Config;

#[derive(Parser)]
#[command(name = "trajectory_grouping")]
#[command(about = "Groups similar 2D trajectories with Hausdorff distance and DBSCAN", long_about = None)]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Input JSON file with trajectory records (overrides config)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Labels CSV output (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Distance matrix CSV output
    #[arg(long)]
    matrix_output: Option<PathBuf>,

    /// Grouped trajectories CSV output
    #[arg(long)]
    groups_output: Option<PathBuf>,

    /// DBSCAN epsilon parameter (maximum Hausdorff distance between neighbours)
    #[arg(short, long)]
    eps: Option<f64>,

    /// DBSCAN minSamples parameter (minimum neighbourhood size, itself included)
    #[arg(short = 'm', long)]
    min_samples: Option<usize>,

    /// Build the distance matrix on a single thread
    #[arg(long)]
    sequential: bool,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

/// Everything one run of the pipeline produces
struct PipelineOutput {
    trajectories: Vec<Trajectory>,
    matrix: DistanceMatrix,
    clusters: Vec<Cluster>,
    noise: Vec<usize>,
    labels: Vec<i32>,
}

fn main() {
    let args = Args::parse();

    let default_level = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp_millis()
        .init();

    let config = match resolve_config(&args) {
        Ok(config) => config,
        Err(e) => {
            error!("Error reading configuration: {}", e);
            std::process::exit(1);
        }
    };

    let records = match read_trajectories(&config.trajectory_src_path) {
        Ok(records) => records,
        Err(e) => {
            error!(
                "Error reading trajectories from {:?}: {}",
                config.trajectory_src_path, e
            );
            std::process::exit(1);
        }
    };

    info!(
        "Read {} trajectory records from {:?}",
        records.len(),
        config.trajectory_src_path
    );
    info!(
        "Running DBSCAN with eps={:.4}, minSamples={}",
        config.eps, config.min_samples
    );

    let output = match run_pipeline(&records, &config) {
        Ok(output) => output,
        Err(e) => {
            error!("Grouping failed: {}", e);
            std::process::exit(1);
        }
    };

    info!("Found {} clusters", output.clusters.len());
    info!("Found {} noise trajectories", output.noise.len());
    for cluster in &output.clusters {
        if let Some((min, max)) = cluster.bounds(&output.trajectories) {
            debug!(
                "Cluster {}: {} trajectories within ({}, {})-({}, {})",
                cluster.c,
                cluster.trajectories.len(),
                min.0[0],
                min.0[1],
                max.0[0],
                max.0[1]
            );
        }
    }

    if let Err(e) = write_outputs(&config, &output) {
        error!("Error writing output: {}", e);
        std::process::exit(1);
    }
}

/// Loads the configuration file (if any) and applies command line overrides
fn resolve_config(args: &Args) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    if let Some(input) = &args.input {
        config.trajectory_src_path = input.clone();
    }
    if let Some(output) = &args.output {
        config.save_labels_path = Some(output.clone());
    }
    if let Some(path) = &args.matrix_output {
        config.save_dist_matrix_path = Some(path.clone());
    }
    if let Some(path) = &args.groups_output {
        config.save_grouped_trajectories_path = Some(path.clone());
    }
    if let Some(eps) = args.eps {
        config.eps = eps;
    }
    if let Some(min_samples) = args.min_samples {
        config.min_samples = min_samples;
    }
    if args.sequential {
        config.parallel = false;
    }

    config.validate()?;
    Ok(config)
}

/// Reads raw trajectory records from a JSON file
///
/// Expected format: an array of objects with a `coordinates` string field,
/// e.g. `[{"id": 1, "coordinates": "0,0 1,1 2,2"}]`. Other fields are ignored.
fn read_trajectories(filename: &Path) -> Result<Vec<RawTrajectory>, Box<dyn std::error::Error>> {
    let file = File::open(filename)?;
    let records = serde_json::from_reader(BufReader::new(file))?;
    Ok(records)
}

/// Store -> distance matrix -> DBSCAN
///
/// Clustering only runs on a fully built matrix.
fn run_pipeline(records: &[RawTrajectory], config: &Config) -> error::Result<PipelineOutput> {
    let trajectories = cluster::load(records)?;

    let matrix = if config.parallel {
        build_matrix_parallel(&trajectories)?
    } else {
        build_matrix(&trajectories)?
    };
    debug!("Built {0}x{0} distance matrix", matrix.len());

    let (clusters, noise) = db_scan(&matrix, config.eps, config.min_samples)?;
    let labels = build_labels(&clusters, trajectories.len());

    Ok(PipelineOutput {
        trajectories,
        matrix,
        clusters,
        noise,
        labels,
    })
}

/// Groups trajectory indices by label, in ascending label order
///
/// Noise is left out: it is not a group.
fn group_trajectories(labels: &[i32]) -> Vec<(i32, Vec<usize>)> {
    let mut groups: BTreeMap<i32, Vec<usize>> = BTreeMap::new();

    for (idx, &label) in labels.iter().enumerate() {
        if label == NOISE {
            continue;
        }
        groups.entry(label).or_default().push(idx);
    }

    groups.into_iter().collect()
}

fn write_outputs(config: &Config, output: &PipelineOutput) -> Result<(), Box<dyn std::error::Error>> {
    match &config.save_labels_path {
        None => write_labels(io::stdout().lock(), &output.labels)?,
        Some(path) => {
            write_labels(File::create(path)?, &output.labels)?;
            info!("Labels written to {:?}", path);
        }
    }

    if let Some(path) = &config.save_dist_matrix_path {
        write_matrix(File::create(path)?, &output.matrix)?;
        info!("Distance matrix written to {:?}", path);
    }

    if let Some(path) = &config.save_grouped_trajectories_path {
        let groups = group_trajectories(&output.labels);
        write_groups(File::create(path)?, &output.trajectories, &groups)?;
        info!("Grouped trajectories written to {:?}", path);
    }

    Ok(())
}

/// Writes one `trajectory,label` row per trajectory
fn write_labels<W: Write>(out: W, labels: &[i32]) -> Result<(), Box<dyn std::error::Error>> {
    let mut writer = WriterBuilder::new().from_writer(out);

    writer.write_record(["trajectory", "label"])?;
    for (idx, label) in labels.iter().enumerate() {
        writer.write_record([idx.to_string(), label.to_string()])?;
    }

    writer.flush()?;
    Ok(())
}

/// Writes the distance matrix, one CSV row per matrix row, no header
fn write_matrix<W: Write>(
    out: W,
    matrix: &DistanceMatrix,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut writer = WriterBuilder::new().from_writer(out);

    for row in matrix.rows() {
        writer.write_record(row.iter().map(|d| d.to_string()))?;
    }

    writer.flush()?;
    Ok(())
}

/// Writes every point of every grouped trajectory as `label,trajectory,point,x,y`
///
/// Point order inside a trajectory is kept so the path can be drawn.
fn write_groups<W: Write>(
    out: W,
    trajectories: &[Trajectory],
    groups: &[(i32, Vec<usize>)],
) -> Result<(), Box<dyn std::error::Error>> {
    let mut writer = WriterBuilder::new().from_writer(out);

    writer.write_record(["label", "trajectory", "point", "x", "y"])?;
    for (label, members) in groups {
        for &idx in members {
            for (p, pt) in trajectories[idx].points().iter().enumerate() {
                writer.write_record([
                    label.to_string(),
                    idx.to_string(),
                    p.to_string(),
                    pt.0[0].to_string(),
                    pt.0[1].to_string(),
                ])?;
            }
        }
    }

    writer.flush()?;
    Ok(())
}
