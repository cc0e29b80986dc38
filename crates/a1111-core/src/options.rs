//! HTTP client for the web UI options endpoint.
//!
//! The web UI only accepts a complete settings object on
//! `POST /sdapi/v1/options`, so switching the active checkpoint is a
//! read-modify-write: fetch every option, overwrite `sd_model_checkpoint`,
//! post the whole object back. Each request is attempted once and bounded by
//! [`LoaderConfig::REQUEST_TIMEOUT`].

use crate::config::LoaderConfig;
use crate::merge::ConfigDocument;
use crate::{A1111Error, Result};
use reqwest::{Client, Response};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info};

/// The port a command should target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortSelection {
    pub port: u16,
    /// Set when the port was computed from a GPU index.
    pub gpu: Option<u16>,
}

impl PortSelection {
    pub fn derived_from_gpu(&self) -> bool {
        self.gpu.is_some()
    }
}

/// Pick the instance port. A GPU index wins over an explicit port.
pub fn resolve_port(port: u16, gpu: Option<u16>) -> Result<PortSelection> {
    match gpu {
        Some(index) => {
            let port = LoaderConfig::BASE_PORT
                .checked_add(index)
                .ok_or_else(|| A1111Error::Validation {
                    field: "gpu".to_string(),
                    message: format!(
                        "GPU index {} puts the port past {} (base port {})",
                        index,
                        u16::MAX,
                        LoaderConfig::BASE_PORT
                    ),
                })?;
            Ok(PortSelection {
                port,
                gpu: Some(index),
            })
        }
        None => Ok(PortSelection { port, gpu: None }),
    }
}

/// Overwrite the active checkpoint, leaving every other option alone.
///
/// Returns the previous value, if there was one.
pub fn set_checkpoint(options: &mut ConfigDocument, model: &str) -> Option<Value> {
    options.insert(
        LoaderConfig::CHECKPOINT_KEY.to_string(),
        Value::String(model.to_string()),
    )
}

/// Client bound to one web UI instance.
pub struct OptionsClient {
    url: String,
    client: Client,
    timeout: Duration,
}

impl OptionsClient {
    /// Create a client for `http://<host>:<port>/sdapi/v1/options`.
    pub fn new(host: &str, port: u16) -> Result<Self> {
        Self::with_timeout(host, port, LoaderConfig::REQUEST_TIMEOUT)
    }

    /// Create a client with a custom per-request timeout.
    pub fn with_timeout(host: &str, port: u16, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(LoaderConfig::USER_AGENT)
            // Instances are addressed directly, never through a system proxy
            .no_proxy()
            .build()
            .map_err(|e| A1111Error::Network {
                message: format!("Failed to create HTTP client: {}", e),
                cause: None,
            })?;

        Ok(Self {
            url: format!("http://{}:{}{}", host, port, LoaderConfig::OPTIONS_PATH),
            client,
            timeout,
        })
    }

    /// Client for the local instance on `port`.
    pub fn localhost(port: u16) -> Result<Self> {
        Self::new(LoaderConfig::DEFAULT_HOST, port)
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch the complete current options object.
    pub async fn fetch_options(&self) -> Result<ConfigDocument> {
        debug!("GET {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| self.request_error(e))?;
        let response = self.check_status("GET", response)?;

        let body: Value = response.json().await.map_err(|e| self.body_error(e))?;
        match body {
            Value::Object(options) => {
                debug!("Fetched {} options from {}", options.len(), self.url);
                Ok(options)
            }
            other => Err(A1111Error::Json {
                message: format!("Options from {} are not a JSON object: {}", self.url, other),
                source: None,
            }),
        }
    }

    /// Replace the remote options with `options`.
    pub async fn push_options(&self, options: &ConfigDocument) -> Result<()> {
        debug!("POST {} ({} options)", self.url, options.len());

        let response = self
            .client
            .post(&self.url)
            .json(options)
            .send()
            .await
            .map_err(|e| self.request_error(e))?;
        self.check_status("POST", response)?;

        Ok(())
    }

    /// Switch the active checkpoint to `model`.
    pub async fn load_checkpoint(&self, model: &str) -> Result<()> {
        let mut options = self.fetch_options().await?;
        let previous = set_checkpoint(&mut options, model);
        debug!("Replacing checkpoint {:?} with {:?}", previous, model);

        self.push_options(&options).await?;

        info!("Checkpoint set to {} via {}", model, self.url);
        Ok(())
    }

    fn check_status(&self, method: &'static str, response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(A1111Error::HttpStatus {
                method,
                url: self.url.clone(),
                status: status.as_u16(),
            })
        }
    }

    fn request_error(&self, err: reqwest::Error) -> A1111Error {
        if err.is_timeout() {
            A1111Error::Timeout {
                url: self.url.clone(),
                timeout: self.timeout,
            }
        } else {
            A1111Error::Network {
                message: format!("Failed to reach {}: {}", self.url, err),
                cause: std::error::Error::source(&err).map(|s| s.to_string()),
            }
        }
    }

    fn body_error(&self, err: reqwest::Error) -> A1111Error {
        if err.is_timeout() {
            return self.request_error(err);
        }
        A1111Error::Json {
            message: format!("Failed to parse options from {}: {}", self.url, err),
            source: None,
        }
    }
}
