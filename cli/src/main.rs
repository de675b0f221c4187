mod commands;
mod terminal;

use std::process::ExitCode;

use commands::{CommandLine, run};
use terminal::{logging, print};
use tracing::error;
use vmtask_common::task::TaskReport;

#[tokio::main]
async fn main() -> ExitCode {
    let commands = CommandLine::parse_args();
    let cfg = commands.to_config();

    if let Err(e) = logging::init(cfg.quiet) {
        eprintln!("failed to initialize logging: {e}");
    }

    print::banner(cfg.no_banner, cfg.quiet);

    let result = run::run(commands.to_request(), &cfg).await;
    if let Err(e) = &result {
        error!("{e:#}");
    }
    exit_code(&result)
}

/// 0 when every task passed, 1 otherwise.
fn exit_code(result: &anyhow::Result<TaskReport>) -> ExitCode {
    match result {
        Ok(report) if report.success() => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    }
}
