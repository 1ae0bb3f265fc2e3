use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use std::fs;
use tracing::{error, info};

use wayback_evolution::api::{self, ApiError};
use wayback_evolution::args::{Args, Command};
use wayback_evolution::report;
use wayback_evolution::utils::{setup_logging, validate_args};
use wayback_evolution::{Config, EvolutionRequest, HttpArchive};

fn print_output<T: Serialize>(value: &T, json: bool, render: fn(&T) -> String) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        print!("{}", render(value));
    }
    Ok(())
}

fn run(args: &Args) -> Result<()> {
    let config = Config::from(args);
    info!(
        action = "configure",
        component = "cli",
        worker_count = config.workers,
        page_timeout_secs = config.page_timeout.as_secs(),
        "Configuration resolved"
    );

    let archive = HttpArchive::new(&config)?;

    match &args.command {
        Command::Search { url } => {
            let result = api::search(&archive, url, &config)?;
            print_output(&result, args.json, report::render_search)
        }
        Command::Evolution { url } => {
            let found = api::search(&archive, url, &config)?;
            let request = EvolutionRequest {
                year_groups: found.year_groups,
                url: found.url,
            };
            let result = api::analyze_evolution(&archive, &request, &config)?;
            print_output(&result, args.json, report::render_evolution)
        }
        Command::Analyze { input } => {
            let body = fs::read_to_string(input)
                .with_context(|| format!("Failed to read request file {:?}", input))?;
            let result = api::analyze_evolution_json(&archive, &body, &config)?;
            print_output(&result, args.json, report::render_evolution)
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging(args.verbose);
    validate_args(&args)?;

    if let Err(e) = run(&args) {
        match e.downcast_ref::<ApiError>() {
            Some(api_error) => {
                if args.json {
                    eprintln!("{}", serde_json::to_string(api_error)?);
                } else {
                    eprintln!("Error: {}", api_error);
                }
                std::process::exit(api_error.exit_code());
            }
            None => {
                error!("Error: {:#}", e);
                eprintln!("Error: {:#}", e);
                std::process::exit(1);
            }
        }
    }
    Ok(())
}
