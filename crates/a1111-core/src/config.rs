//! Centralized configuration constants.
//!
//! The web UI instances are started one per GPU, each listening on
//! `BASE_PORT + gpu_index`, so every constant that ties the tools to a running
//! instance lives here.

use std::time::Duration;

/// Settings for talking to a running web UI instance.
pub struct LoaderConfig;

impl LoaderConfig {
    /// Port of the instance bound to GPU 0, and the default when no GPU is given.
    pub const BASE_PORT: u16 = 3001;
    pub const DEFAULT_HOST: &'static str = "localhost";
    pub const OPTIONS_PATH: &'static str = "/sdapi/v1/options";
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
    pub const USER_AGENT: &'static str = "a1111-tools/0.1";
    pub const CHECKPOINT_KEY: &'static str = "sd_model_checkpoint";
}

/// Settings for writing the merged `config.json`.
pub struct MergeConfig;

impl MergeConfig {
    pub const INDENT: &'static [u8] = b"    ";
    pub const TEMP_SUFFIX: &'static str = "tmp";
}
