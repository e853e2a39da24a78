use clap::error::ErrorKind;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::models::{ModelParameters, RunConfig, SimulationParams};

#[derive(Parser, Debug)]
#[command(name = "queue-lab", version, about = "Analyze and simulate Markovian queues")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Evaluate the closed-form M/M/1, M/M/1/K, M/M/c or M/M/c/K model.
    Analyze(AnalyzeArgs),
    /// Simulate a single-server FIFO queue.
    Simulate(SimulateArgs),
    /// Run an analysis or simulation described in a TOML or JSON file.
    Run(RunArgs),
    /// List the supported queueing models.
    Models,
}

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    #[arg(long, allow_negative_numbers = true, help = "Arrival rate (lambda)")]
    pub lambda: f64,
    #[arg(long, allow_negative_numbers = true, help = "Service rate per server (mu)")]
    pub mu: f64,
    #[arg(long, default_value_t = 1, help = "Number of servers (c)")]
    pub servers: u32,
    #[arg(long, help = "System capacity (K); omit for an unbounded queue")]
    pub capacity: Option<u32>,
    #[arg(long, value_enum, default_value_t = FormatArg::Human)]
    pub format: FormatArg,
}

#[derive(Args, Debug)]
pub struct SimulateArgs {
    #[arg(long, allow_negative_numbers = true, help = "Mean inter-arrival time (1/lambda)")]
    pub mean_interarrival: f64,
    #[arg(long, allow_negative_numbers = true, help = "Mean service time (1/mu)")]
    pub mean_service: f64,
    #[arg(long)]
    pub customers: usize,
    #[arg(long, help = "Seed the generator; omit for a fresh random run")]
    pub seed: Option<u64>,
    #[arg(long, value_enum, default_value_t = FormatArg::Human)]
    pub format: FormatArg,
}

#[derive(Args, Debug)]
pub struct RunArgs {
    #[arg(long)]
    pub config: PathBuf,
    #[arg(long, value_enum, default_value_t = FormatArg::Human)]
    pub format: FormatArg,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormatArg {
    Human,
    Json,
    Csv,
}

/// Work requested on the command line, with all parameters resolved.
#[derive(Clone, Debug, PartialEq)]
pub enum Job {
    Analyze(ModelParameters),
    Simulate(SimulationParams),
    ListModels,
}

pub fn parse_args() -> Result<Cli> {
    Cli::try_parse().map_err(|err| match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => err.exit(),
        _ => Error::Cli(err.to_string()),
    })
}

pub fn build_job(cli: Cli) -> Result<(Job, FormatArg)> {
    match cli.command {
        Command::Analyze(args) => {
            let params = ModelParameters {
                lambda: args.lambda,
                mu: args.mu,
                servers: args.servers,
                capacity: args.capacity,
            };
            Ok((Job::Analyze(params), args.format))
        }
        Command::Simulate(args) => {
            let params = SimulationParams {
                mean_interarrival: args.mean_interarrival,
                mean_service: args.mean_service,
                customers: args.customers,
                seed: args.seed,
            };
            Ok((Job::Simulate(params), args.format))
        }
        Command::Run(args) => {
            let job = match load_config(&args.config)? {
                RunConfig::Analyze(params) => Job::Analyze(params),
                RunConfig::Simulate(params) => Job::Simulate(params),
            };
            Ok((job, args.format))
        }
        Command::Models => Ok((Job::ListModels, FormatArg::Human)),
    }
}

pub fn load_config(path: &Path) -> Result<RunConfig> {
    let contents = fs::read_to_string(path).map_err(|err| {
        Error::ConfigIo(format!(
            "failed to read config '{}': {}",
            path.display(),
            err
        ))
    })?;
    let ext = path
        .extension()
        .and_then(|value| value.to_str())
        .unwrap_or("");

    match ext {
        "toml" => toml::from_str(&contents)
            .map_err(|err| Error::ConfigParse(format!("failed to parse TOML: {}", err))),
        "json" => serde_json::from_str(&contents)
            .map_err(|err| Error::ConfigParse(format!("failed to parse JSON: {}", err))),
        "" => Err(Error::UnsupportedConfigFormat("unknown".to_string())),
        _ => Err(Error::UnsupportedConfigFormat(ext.to_string())),
    }
}
