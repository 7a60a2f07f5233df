mod cli;
mod config;
mod error;
mod logging;
mod output;
mod progress;

use crate::cli::Cli;
use crate::error::Result;
use crate::progress::CliProgressHandler;
use bencheval::core::io::discovery::discover_molecules;
use bencheval::core::progress::ProgressReporter;
use bencheval::core::report::{write_results_csv, write_summary_csv};
use bencheval::core::scoring::backend::TmerScriptBackend;
use bencheval::workflows::evaluate;
use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, info};

fn main() {
    if let Err(e) = run_app() {
        eprintln!("\n❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn run_app() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.clone())?;

    info!("bencheval v{} starting up.", env!("CARGO_PKG_VERSION"));
    debug!("Full CLI arguments parsed: {:?}", &cli);

    let settings = config::build_settings(&cli)?;
    info!("Molecule constraints:\n{}", settings.constraints);

    let progress = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress.callback());

    info!(
        "Analyzing molecules from '{}'.",
        settings.directory.display()
    );
    let molecules = discover_molecules(&settings.directory, &reporter)?;
    info!("Found {} molecules.", molecules.len());

    let backend = TmerScriptBackend::new();
    let report = evaluate::run(
        &molecules,
        &settings.constraints,
        &backend,
        &settings.options,
        &reporter,
    )?;

    output::print_report(&report, &settings.options.method);

    if settings.write_csv {
        let results_path = PathBuf::from(format!("{}_results.csv", settings.options.method));
        write_results_csv(&results_path, &report.rows)?;
        println!("\nResults written to {}", results_path.display());

        let stats_path = PathBuf::from(format!("{}_stats.csv", settings.options.method));
        write_summary_csv(&stats_path, &settings.options.method, &report.summary)?;
        println!("Statistics written to {}", stats_path.display());
    }

    Ok(())
}
