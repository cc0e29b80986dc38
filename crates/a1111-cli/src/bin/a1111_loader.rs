//! a1111-loader - switch the active checkpoint of a running Automatic1111
//! instance through its options API.

use a1111_cli::{logging, run_loader, LoaderArgs};
use clap::Parser;
use std::process::ExitCode;
use tracing::debug;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = LoaderArgs::parse();
    logging::init(args.debug);

    debug!("Starting a1111-loader");

    let mut stdout = std::io::stdout();
    let mut stderr = std::io::stderr();
    let code = run_loader(&args, &mut stdout, &mut stderr).await;
    ExitCode::from(code)
}
