//! VinaEdu store CLI binary.

use anyhow::Context;
use clap::Parser;
use std::process;
use vinaedu_store::config::ConfigLoader;
use vinaedu_store::logging::init_logging;
use vinaedu_store::tooling::cli::{Cli, CliContext};

fn run(cli: &Cli) -> anyhow::Result<String> {
    let config = ConfigLoader::load(cli.config.as_deref()).context("loading configuration")?;

    if let Err(e) = init_logging(Some(&cli.logging_config(&config.logging))) {
        eprintln!("Warning: logging disabled: {}", e);
    }

    let context = CliContext::from_config(config).context("opening store")?;
    Ok(context.execute(&cli.command)?)
}

fn main() {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}
