use queue_lab::analysis;
use queue_lab::config::{self, FormatArg, Job};
use queue_lab::error::Result;
use queue_lab::output::{self, CsvFormatter, Formatter, HumanFormatter, JsonFormatter};
use queue_lab::simulation;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run() {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = config::parse_args()?;
    let (job, format) = config::build_job(cli)?;
    let formatter = formatter_for(format);

    let rendered = match job {
        Job::Analyze(params) => formatter.analysis(&analysis::analyze(&params)?)?,
        Job::Simulate(params) => formatter.simulation(&simulation::run_simulation(&params)?)?,
        Job::ListModels => output::list_models(),
    };
    print!("{}", rendered);

    Ok(())
}

fn formatter_for(format: FormatArg) -> Box<dyn Formatter> {
    match format {
        FormatArg::Human => Box::new(HumanFormatter),
        FormatArg::Json => Box::new(JsonFormatter),
        FormatArg::Csv => Box::new(CsvFormatter),
    }
}
