//! Command implementations behind the `a1111-config` and `a1111-loader`
//! binaries. The binaries only parse arguments and install logging.

pub mod args;
pub mod commands;
pub mod logging;

pub use args::{ConfigArgs, LoaderArgs};
pub use commands::{run_config, run_loader};
