//! A1111 Core - settings bootstrap and checkpoint switching for the
//! Automatic1111 Stable Diffusion web UI.
//!
//! Two independent pieces live here:
//!
//! - [`merge`] fills a `config.json` with the [`defaults`] table, keeping any
//!   values already present, and writes it back atomically.
//! - [`options`] talks to a running instance's `/sdapi/v1/options` endpoint to
//!   change the active model checkpoint.
//!
//! # Example
//!
//! ```rust,ignore
//! use a1111_core::{merge_config_file, resolve_port, OptionsClient};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> a1111_core::Result<()> {
//!     merge_config_file("/data/webui/config.json".as_ref())?;
//!
//!     let selection = resolve_port(3001, Some(1))?;
//!     OptionsClient::localhost(selection.port)?
//!         .load_checkpoint("sd_xl_base_1.0.safetensors")
//!         .await
//! }
//! ```

pub mod atomic;
pub mod config;
pub mod defaults;
pub mod error;
pub mod merge;
pub mod options;

pub use atomic::{atomic_write_json, to_pretty_json};
pub use config::{LoaderConfig, MergeConfig};
pub use defaults::{default_table, default_value, DefaultValue, DEFAULT_SETTINGS};
pub use error::{A1111Error, Result};
pub use merge::{
    load_document, merge_config_file, merge_defaults, parse_document, ConfigDocument,
    DocumentSource, MergeReport,
};
pub use options::{resolve_port, set_checkpoint, OptionsClient, PortSelection};
