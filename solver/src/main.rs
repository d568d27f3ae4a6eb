//! `lem-in`: solve an ant-farm description and print the moves.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use lemin::{parse_farm, SolverLimits};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "lem-in")]
#[command(version, about = "Route every agent from the start room to the end room in as few turns as possible")]
struct Cli {
    /// Farm description to solve
    file: PathBuf,

    /// Most simple paths to enumerate before giving up
    #[arg(long, env = "LEMIN_MAX_PATHS", default_value_t = SolverLimits::default().max_paths)]
    max_paths: usize,

    /// Most rooms the path search may enter, dead ends included, before giving up
    #[arg(long, env = "LEMIN_MAX_EXPANSIONS", default_value_t = SolverLimits::default().max_expansions)]
    max_expansions: usize,

    /// Most path groups to consider before giving up
    #[arg(long, env = "LEMIN_MAX_GROUPS", default_value_t = SolverLimits::default().max_groups)]
    max_groups: usize,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress logging except errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    // stdout carries the puzzle output only
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .init();

    let description = std::fs::read_to_string(&cli.file)
        .with_context(|| format!("could not read {}", cli.file.display()))?;
    tracing::debug!(file = %cli.file.display(), "read farm description");

    let farm = parse_farm(&description).context("invalid data format")?;
    let limits = SolverLimits::default()
        .with_max_paths(cli.max_paths)
        .with_max_expansions(cli.max_expansions)
        .with_max_groups(cli.max_groups);
    let solution = farm.solve_with(&limits)?;

    println!("{}", description.trim_end_matches(['\r', '\n']));
    println!();
    println!("{}", solution.log);

    Ok(())
}
