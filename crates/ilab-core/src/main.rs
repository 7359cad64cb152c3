//! `ilab` — provision the Document AI invoice-parsing lab.

use std::io;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use ilab_core::{
    orchestrator, prompts, ExitCode, GcloudCli, LocalPaths, RetryPolicy, ThreadSleeper,
};

/// Provision the Google Cloud resources for the invoice-parsing exercise:
/// a Document AI processor, pipeline buckets, a BigQuery dataset and
/// table, IAM bindings, and the storage-triggered processing function.
///
/// No flags: the run is driven by three interactive prompts and the
/// ambient gcloud configuration.
#[derive(Parser, Debug)]
#[command(name = "ilab", version)]
struct Cli {}

fn main() {
    let _cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    std::process::exit(run().as_i32());
}

fn run() -> ExitCode {
    let plane = GcloudCli::new();
    if let Err(err) = plane.preflight() {
        error!("{err}");
        return ExitCode::ConfigError;
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();
    let config = match prompts::collect_run_config(&plane, &mut input, &mut output) {
        Ok(config) => config,
        Err(err) => {
            error!("{err}");
            return ExitCode::ConfigError;
        }
    };

    match orchestrator::provision(
        &plane,
        config,
        &LocalPaths::default(),
        &RetryPolicy::default(),
        &ThreadSleeper,
    ) {
        Ok(report) => {
            println!("{}", report.render());
            ExitCode::Success
        }
        Err(err) => {
            error!("provisioning failed: {err}");
            ExitCode::from(&err)
        }
    }
}
