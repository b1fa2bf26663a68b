
use anyhow::{bail, ensure, Context};
use clap::{Args, Parser, Subcommand};
use chrono::Datelike;
use lazy_static::lazy_static;
use log::info;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cli::simplify::SimplifySettings;
use crate::cli::view::ViewSettings;
use crate::solver::subprocess::{SolverConfig, SolverConfigBuilder, DEFAULT_SOLVER_PROGRAM};

lazy_static! {
    /// Stores the full version string we plan to use, which is generated in build.rs
    /// # Examples
    /// * `0.1.0-6bb9635-dirty` - while on a dirty branch
    /// * `0.1.0-6bb9635` - with a fresh commit
    pub static ref FULL_VERSION: String = format!("{}-{}", env!("CARGO_PKG_VERSION"), env!("VERGEN_GIT_DESCRIBE"));

    /// Shared after help string
    pub static ref AFTER_HELP: String = format!("Copyright (C) 2024-{}     vcfsimplify contributors
All VCF processing is performed by the VCF-Simplify solver.
This program comes with ABSOLUTELY NO WARRANTY.", chrono::Utc::now().year());
}

#[derive(Parser)]
#[clap(author,
    version = &**FULL_VERSION,
    about,
    after_help = &**AFTER_HELP)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands
}

/// vcfsimplify, a front end for simplifying and viewing VCF files.
/// Select a subcommand to see more usage information:
#[derive(Subcommand)]
pub enum Commands {
    /// Collapses genotype fields into haplotype strings or tables
    Simplify(Box<SimplifySettings>),
    /// Exports selected metadata sections to one or more formats
    View(Box<ViewSettings>),
    /// Prints selected metadata sections without writing anything
    Inspect(Box<ViewSettings>)
}

pub fn get_cli() -> Cli {
    Cli::parse()
}

/// Options shared by every subcommand that talks to the solver
#[derive(Args, Clone, Debug, Default)]
pub struct SolverSettings {
    /// Solver program name or path
    #[clap(long = "solver")]
    #[clap(value_name = "PROGRAM")]
    #[clap(help_heading = Some("Solver"))]
    #[clap(default_value = DEFAULT_SOLVER_PROGRAM)]
    pub program: String,

    /// Argument placed before the command arguments, e.g. the solver script for an interpreter (repeatable)
    #[clap(long = "solver-arg")]
    #[clap(value_name = "ARG")]
    #[clap(help_heading = Some("Solver"))]
    #[clap(allow_hyphen_values = true)]
    pub leading_args: Vec<String>,

    /// Maximum run time of the solver in seconds [default: no limit]
    #[clap(long = "timeout")]
    #[clap(value_name = "SECONDS")]
    #[clap(help_heading = Some("Solver"))]
    pub timeout_seconds: Option<f64>,

    /// Optional output file for the resolved configuration (JSON, .gz allowed)
    #[clap(long = "save-config")]
    #[clap(value_name = "JSON")]
    #[clap(help_heading = Some("Solver"))]
    pub save_config: Option<PathBuf>,

    /// Enable verbose output.
    #[clap(short = 'v')]
    #[clap(long = "verbose")]
    #[clap(action = clap::ArgAction::Count)]
    pub verbosity: u8,
}

impl SolverSettings {
    /// Builds the subprocess configuration from these settings
    pub fn solver_config(&self) -> anyhow::Result<SolverConfig> {
        let timeout = self.timeout_seconds
            .map(Duration::try_from_secs_f64)
            .transpose()
            .context("Error while converting --timeout:")?;
        let config = SolverConfigBuilder::default()
            .program(self.program.clone())
            .leading_args(self.leading_args.clone())
            .timeout(timeout)
            .build()?;
        Ok(config)
    }
}

/// Verifies and logs the solver options
pub fn check_solver_settings(settings: &SolverSettings) -> anyhow::Result<()> {
    info!("Solver:");
    ensure!(!settings.program.trim().is_empty(), "--solver must not be empty");
    info!("\tProgram: {:?}", settings.program);
    if !settings.leading_args.is_empty() {
        info!("\tLeading arguments: {:?}", settings.leading_args);
    }

    if let Some(timeout) = settings.timeout_seconds {
        ensure!(timeout.is_finite() && timeout > 0.0, "--timeout must be >0");
        ensure!(Duration::try_from_secs_f64(timeout).is_ok(), "--timeout is too large: {timeout}");
        info!("\tTimeout: {timeout} seconds");
    } else {
        info!("\tTimeout: None");
    }

    if let Some(config_fn) = settings.save_config.as_deref() {
        check_parent_folder(config_fn, "Resolved config output")?;
        info!("\tSave resolved config: {config_fn:?}");
    }
    Ok(())
}

/// Checks that the folder a file would be written into exists
/// # Arguments
/// * `filename` - the file path that will be written
/// * `label` - the label to use for error messages
pub fn check_parent_folder(filename: &Path, label: &str) -> anyhow::Result<()> {
    if let Some(parent) = filename.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            bail!("{} folder does not exist: \"{}\"", label, parent.display());
        }
    }

    // either a bare filename or the folder exists
    Ok(())
}
