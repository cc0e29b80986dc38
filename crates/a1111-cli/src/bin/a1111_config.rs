//! a1111-config - create or complete an Automatic1111 `config.json`.
//!
//! Every key of the default settings table ends up in the file; values that
//! are already there are kept as they are.

use a1111_cli::{logging, run_config, ConfigArgs};
use anyhow::Result;
use clap::Parser;
use tracing::debug;

fn main() -> Result<()> {
    let args = ConfigArgs::parse();
    logging::init(args.debug);

    debug!("Starting a1111-config");

    let stdout = std::io::stdout();
    run_config(args.config_file.as_deref(), &mut stdout.lock())
}
