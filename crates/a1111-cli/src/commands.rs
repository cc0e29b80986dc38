//! The two tool procedures.
//!
//! Both write their user-facing messages to the writers they are handed, so
//! the binaries pass stdout/stderr and the tests pass buffers.

use crate::args::LoaderArgs;
use a1111_core::{merge_config_file, resolve_port, DocumentSource, LoaderConfig, OptionsClient};
use anyhow::Context;
use std::io::Write;
use std::path::Path;

/// Create or complete the settings file at `config_file`.
///
/// Without a path this prints usage and succeeds without touching anything.
/// Missing, empty or malformed files are replaced by the defaults; only
/// filesystem failures are errors.
pub fn run_config(config_file: Option<&Path>, out: &mut dyn Write) -> anyhow::Result<()> {
    let Some(path) = config_file else {
        writeln!(out, "Usage: a1111-config <config_file>")?;
        return Ok(());
    };

    let report = merge_config_file(path)
        .with_context(|| format!("Failed to merge settings into {}", path.display()))?;

    match &report.source {
        DocumentSource::Missing | DocumentSource::Empty => writeln!(
            out,
            "Note: Using default configuration for {} ({})",
            path.display(),
            report.source
        )?,
        DocumentSource::Invalid { .. } => writeln!(
            out,
            "Warning: Invalid JSON in {}, using default configuration",
            path.display()
        )?,
        DocumentSource::Existing => {}
    }

    writeln!(out, "Configuration saved to {}", path.display())?;
    Ok(())
}

/// Switch the checkpoint on the local instance selected by `args`.
pub async fn run_loader(args: &LoaderArgs, out: &mut dyn Write, err: &mut dyn Write) -> u8 {
    run_loader_on(LoaderConfig::DEFAULT_HOST, args, out, err).await
}

/// Like [`run_loader`], against an arbitrary host.
///
/// Returns the process exit status: 0 on success, 1 on any failure.
pub async fn run_loader_on(
    host: &str,
    args: &LoaderArgs,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> u8 {
    match load_model(host, args, out).await {
        Ok(()) => 0,
        Err(e) => {
            let _ = writeln!(err, "Error: {:#}", e);
            1
        }
    }
}

async fn load_model(host: &str, args: &LoaderArgs, out: &mut dyn Write) -> anyhow::Result<()> {
    let selection = resolve_port(args.port, args.gpu)?;
    if let Some(gpu) = selection.gpu {
        writeln!(out, "Using port {} for GPU {}", selection.port, gpu)?;
    }

    let client = OptionsClient::new(host, selection.port)?;
    client
        .load_checkpoint(&args.model)
        .await
        .with_context(|| format!("Failed to load model {}", args.model))?;

    writeln!(
        out,
        "Loaded model: {} on port {}",
        args.model, selection.port
    )?;
    Ok(())
}
