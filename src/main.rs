use std::process::ExitCode;

use anyhow::Context;
use asteroid_scope::config::Cli;
use asteroid_scope::data::loader::{ensure_csv_extension, load_data};
use asteroid_scope::state::AppState;
use asteroid_scope::{app, pipeline};
use clap::Parser;

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let config = cli.pipeline_config();

    // 1. Load the data
    let raw = match load_data(&cli.path) {
        Ok(table) => table,
        Err(_) => {
            println!("Could not load data, exiting.");
            return Ok(ExitCode::FAILURE);
        }
    };

    // 2. Date filter and column projection
    let cleaned = match pipeline::clean(&raw, &config) {
        Ok(cleaned) => cleaned,
        Err(e) => {
            println!("{}", pipeline::clean_failure_message(&e));
            return Ok(ExitCode::FAILURE);
        }
    };

    // 3. Analyzers
    let report = pipeline::analyze(&cleaned, &config);
    if cli.json {
        let json = serde_json::to_string_pretty(&report).context("serializing report")?;
        println!("{json}");
    } else {
        print!("{report}");
    }

    // 4. Charts
    if cli.plot {
        let mut state = AppState::new(config);
        state.set_cleaned(ensure_csv_extension(&cli.path), cleaned);
        app::run_viewer(state)?;
    }

    Ok(ExitCode::SUCCESS)
}
