//! Command-line arguments for both tools.

use a1111_core::LoaderConfig;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "a1111-config")]
#[command(about = "Fill an Automatic1111 config.json with default settings")]
pub struct ConfigArgs {
    /// Settings file to create or complete
    pub config_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub debug: bool,
}

#[derive(Parser, Debug)]
#[command(name = "a1111-loader")]
#[command(about = "Load a model into Automatic1111")]
pub struct LoaderArgs {
    /// Model checkpoint name
    #[arg(short, long)]
    pub model: String,

    /// Port of the web UI instance
    #[arg(short, long, default_value_t = LoaderConfig::BASE_PORT)]
    pub port: u16,

    /// GPU index; targets port 3001 + index and overrides --port
    #[arg(short, long)]
    pub gpu: Option<u16>,

    /// Enable debug logging
    #[arg(short, long)]
    pub debug: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loader_defaults() {
        let args = LoaderArgs::try_parse_from(["a1111-loader", "-m", "v1-5.safetensors"]).unwrap();
        assert_eq!(args.model, "v1-5.safetensors");
        assert_eq!(args.port, 3001);
        assert_eq!(args.gpu, None);
        assert!(!args.debug);
    }

    #[test]
    fn test_loader_long_flags() {
        let args = LoaderArgs::try_parse_from([
            "a1111-loader",
            "--model",
            "sdxl.safetensors",
            "--port",
            "7860",
            "--gpu",
            "3",
        ])
        .unwrap();
        assert_eq!(args.port, 7860);
        assert_eq!(args.gpu, Some(3));
    }

    #[test]
    fn test_loader_requires_model() {
        assert!(LoaderArgs::try_parse_from(["a1111-loader", "-p", "3002"]).is_err());
    }

    #[test]
    fn test_config_file_is_optional() {
        let args = ConfigArgs::try_parse_from(["a1111-config"]).unwrap();
        assert!(args.config_file.is_none());

        let args = ConfigArgs::try_parse_from(["a1111-config", "/data/config.json"]).unwrap();
        assert_eq!(args.config_file, Some(PathBuf::from("/data/config.json")));
    }
}
