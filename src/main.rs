use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use ibeamx::{
    evaluate_distances, render_json, render_table, DesignConfig, Outcome, SearchStrategy,
};
use tracing_subscriber::filter::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "ibeamx", version)]
#[command(about = "Find the most material-efficient I-beam section for each load distance")]
struct Args {
    /// TOML design configuration; defaults apply for anything it leaves out
    #[arg(long)]
    config: Option<PathBuf>,
    /// Allowable bending stress in N/mm²
    #[arg(long)]
    sigma: Option<f64>,
    /// Applied force in N
    #[arg(long)]
    force: Option<f64>,
    /// Flange and web thickness in mm
    #[arg(long)]
    thickness: Option<f64>,
    /// Upper bound on section modulus as a multiple of the required modulus
    #[arg(long)]
    tolerance: Option<f64>,
    /// Load distance in mm; repeat to study several distances
    #[arg(long = "distance")]
    distances: Vec<f64>,
    /// Grid scan strategy: sequential, grid or parallel
    #[arg(long)]
    strategy: Option<SearchStrategy>,
    /// Worker threads for the parallel strategy
    #[arg(long)]
    threads: Option<usize>,
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

fn main() -> Result<()> {
    // Diagnostics go to stderr; stdout carries only the report.
    // Filtering follows `RUST_LOG`, e.g. `RUST_LOG=ibeamx=debug`.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    // Layer the command line over the configuration file over the defaults.
    // The defaults reproduce the reference case: σ = 100 N/mm², F = 100 kN,
    // t = 10 mm and a waste tolerance of 2.
    let config = resolve_config(&args)?;

    // Size the section for each load distance. The bending moment M = F·d and
    // the allowable stress give the required section modulus Z = M/σ, see
    // https://en.wikipedia.org/wiki/Section_modulus.
    let outcomes = run_study(&config)?;

    // Report one row per distance. Distances with no admissible section are
    // listed separately rather than as a zero-efficiency design.
    match args.format {
        OutputFormat::Table => print!("{}", render_table(&outcomes)),
        OutputFormat::Json => println!("{}", render_json(&outcomes)?),
    }

    Ok(())
}

fn resolve_config(args: &Args) -> Result<DesignConfig> {
    let mut config = match &args.config {
        Some(path) => DesignConfig::load(path)
            .with_context(|| format!("failed loading {}", path.display()))?,
        None => DesignConfig::default(),
    };

    let parameters = &mut config.parameters;
    if let Some(sigma) = args.sigma {
        parameters.sigma = sigma;
    }
    if let Some(force) = args.force {
        parameters.force = force;
    }
    if let Some(thickness) = args.thickness {
        parameters.thickness = thickness;
    }
    if let Some(tolerance) = args.tolerance {
        parameters.tolerance = tolerance;
    }
    if !args.distances.is_empty() {
        config.distances.clone_from(&args.distances);
    }
    if let Some(strategy) = args.strategy {
        config.strategy = strategy;
    }
    if args.threads.is_some() {
        config.threads = args.threads;
    }
    Ok(config)
}

fn run_study(config: &DesignConfig) -> Result<Vec<Outcome>> {
    // Expand the configured ranges once; every distance searches the same grid.
    let candidates = config
        .candidates()
        .context("failed building candidate dimensions")?;

    let search = || {
        evaluate_distances(
            config.strategy,
            &config.parameters,
            &config.distances,
            &candidates,
        )
    };

    // A dedicated pool only matters for the parallel scan. The result does not
    // depend on the thread count because ties always go to the first
    // row-major candidate.
    let outcomes = match (config.strategy, config.threads) {
        (SearchStrategy::Parallel, Some(threads)) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .context("failed to build rayon threadpool")?;
            pool.install(search)
        }
        (strategy, Some(threads)) => {
            tracing::warn!(%strategy, threads, "thread count only applies to the parallel strategy");
            search()
        }
        (_, None) => search(),
    };

    Ok(outcomes?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_line_overrides_defaults() {
        let args = Args::try_parse_from([
            "ibeamx",
            "--tolerance",
            "1.5",
            "--distance",
            "250",
            "--distance",
            "500",
            "--strategy",
            "parallel",
            "--format",
            "json",
        ])
        .expect("valid arguments");
        let config = resolve_config(&args).expect("defaults resolve");

        assert_eq!(config.parameters.tolerance, 1.5);
        assert_eq!(config.parameters.sigma, 100.0);
        assert_eq!(config.distances, vec![250.0, 500.0]);
        assert_eq!(config.strategy, SearchStrategy::Parallel);
        assert_eq!(args.format, OutputFormat::Json);
    }

    #[test]
    fn unknown_strategy_is_a_usage_error() {
        let result = Args::try_parse_from(["ibeamx", "--strategy", "annealing"]);
        assert!(result.is_err());
    }

    #[test]
    fn inverted_band_reports_every_distance_as_infeasible() {
        let args = Args::try_parse_from(["ibeamx", "--tolerance", "0.5", "--threads", "2"])
            .expect("valid arguments");
        let mut config = resolve_config(&args).expect("defaults resolve");
        config.strategy = SearchStrategy::Parallel;

        let outcomes = run_study(&config).expect("study runs");
        assert_eq!(outcomes.len(), 5);
        assert!(outcomes
            .iter()
            .all(|outcome| matches!(outcome, Outcome::NoValidCombination { .. })));
    }

    #[test]
    fn missing_config_file_is_reported() {
        let args = Args::try_parse_from(["ibeamx", "--config", "/nonexistent/ibeamx.toml"])
            .expect("valid arguments");
        let error = resolve_config(&args).expect_err("file is missing");
        assert!(error.to_string().contains("failed loading"));
    }
}
