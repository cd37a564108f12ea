use beatmap_sampler::app::{self, EXIT_SETUP_FAILED};
use beatmap_sampler::cli::Cli;
use beatmap_sampler::config::Config;
use beatmap_sampler::logging;

use clap::Parser;
use std::process::ExitCode;
use tracing::error;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = logging::init_logging(cli.verbose, cli.quiet) {
        eprintln!("beatmap-sampler: {}", err.describe());
        return ExitCode::from(EXIT_SETUP_FAILED);
    }

    let config = match Config::load(&cli.config).and_then(|mut config| {
        cli.apply(&mut config);
        config.validate()?;
        Ok(config)
    }) {
        Ok(config) => config,
        Err(err) => {
            error!("Cannot use {}: {}", cli.config.display(), err.describe());
            return ExitCode::from(EXIT_SETUP_FAILED);
        }
    };

    match app::run(&config, cli.seed).await {
        Ok(outcome) => ExitCode::from(outcome.exit_code()),
        Err(err) => {
            error!("{}", err.describe());
            ExitCode::from(EXIT_SETUP_FAILED)
        }
    }
}
