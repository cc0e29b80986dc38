//! End-to-end tests for the `a1111-config` and `a1111-loader` binaries.
//!
//! The loader tests run the real binary against a mock of the web UI options
//! endpoint served from this process.

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

const CONFIG_BIN: &str = env!("CARGO_BIN_EXE_a1111-config");
const LOADER_BIN: &str = env!("CARGO_BIN_EXE_a1111-loader");

fn run_config(args: &[&str]) -> Output {
    Command::new(CONFIG_BIN)
        .args(args)
        .output()
        .expect("failed to spawn a1111-config")
}

async fn run_loader(args: &[&str]) -> Output {
    tokio::process::Command::new(LOADER_BIN)
        .args(args)
        .output()
        .await
        .expect("failed to spawn a1111-loader")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

// =============================================================================
// Mock web UI
// =============================================================================

struct MockWebUi {
    options: Value,
    get_status: StatusCode,
    post_status: StatusCode,
    posts: Mutex<Vec<Value>>,
}

async fn get_options(State(state): State<Arc<MockWebUi>>) -> (StatusCode, String) {
    (state.get_status, state.options.to_string())
}

async fn post_options(State(state): State<Arc<MockWebUi>>, Json(body): Json<Value>) -> StatusCode {
    state.posts.lock().unwrap().push(body);
    state.post_status
}

async fn start_mock(options: Value, get_status: StatusCode) -> (u16, Arc<MockWebUi>) {
    start_mock_with(options, get_status, StatusCode::OK).await
}

async fn start_mock_with(
    options: Value,
    get_status: StatusCode,
    post_status: StatusCode,
) -> (u16, Arc<MockWebUi>) {
    let state = Arc::new(MockWebUi {
        options,
        get_status,
        post_status,
        posts: Mutex::new(Vec::new()),
    });
    let app = Router::new()
        .route("/sdapi/v1/options", get(get_options).post(post_options))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (port, state)
}

// =============================================================================
// a1111-config
// =============================================================================

#[test]
fn test_config_without_argument_prints_usage() {
    let temp_dir = TempDir::new().unwrap();

    let output = Command::new(CONFIG_BIN)
        .current_dir(temp_dir.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    assert!(stdout(&output).starts_with("Usage:"));
    assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 0);
}

#[test]
fn test_config_creates_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");

    let output = run_config(&[path.to_str().unwrap()]);

    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("(file not found)"));
    assert!(text.contains(&format!("Configuration saved to {}", path.display())));

    let written = read_json(&path);
    assert_eq!(written["sd_model_checkpoint"], json!("v1-5-pruned.safetensors"));
    assert_eq!(written.as_object().unwrap().len(), 116);
}

#[test]
fn test_config_recovers_from_corrupt_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    fs::write(&path, "{\"sd_model_checkpoint\": ").unwrap();

    let output = run_config(&[path.to_str().unwrap()]);

    assert!(output.status.success());
    assert!(stdout(&output).starts_with("Warning: Invalid JSON in "));
    assert_eq!(
        read_json(&path)["sd_model_checkpoint"],
        json!("v1-5-pruned.safetensors")
    );
}

#[test]
fn test_config_preserves_values_and_is_idempotent() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    fs::write(
        &path,
        r#"{"sd_model_checkpoint": "dreamshaper_8.safetensors", "custom_flag": true}"#,
    )
    .unwrap();

    assert!(run_config(&[path.to_str().unwrap()]).status.success());
    let first = fs::read(&path).unwrap();
    assert!(run_config(&[path.to_str().unwrap()]).status.success());
    let second = fs::read(&path).unwrap();

    assert_eq!(first, second);
    let written = read_json(&path);
    assert_eq!(written["sd_model_checkpoint"], json!("dreamshaper_8.safetensors"));
    assert_eq!(written["custom_flag"], json!(true));
    assert!(String::from_utf8(first).unwrap().contains("\n    \"custom_flag\": true,\n"));
}

#[test]
fn test_config_fails_on_directory() {
    let temp_dir = TempDir::new().unwrap();

    let output = run_config(&[temp_dir.path().to_str().unwrap()]);

    assert!(!output.status.success());
    assert!(!stderr(&output).is_empty());
}

// =============================================================================
// a1111-loader
// =============================================================================

#[tokio::test]
async fn test_loader_updates_checkpoint() {
    let (port, mock) = start_mock(
        json!({"sd_model_checkpoint": "old.safetensors", "other_key": 1}),
        StatusCode::OK,
    )
    .await;

    let output = run_loader(&["-m", "new.safetensors", "-p", &port.to_string()]).await;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output).trim(),
        format!("Loaded model: new.safetensors on port {}", port)
    );
    assert_eq!(
        *mock.posts.lock().unwrap(),
        vec![json!({"sd_model_checkpoint": "new.safetensors", "other_key": 1})]
    );
}

#[tokio::test]
async fn test_loader_gpu_index_overrides_port() {
    let (port, mock) =
        start_mock(json!({"sd_model_checkpoint": "old.safetensors"}), StatusCode::OK).await;
    let gpu = port.checked_sub(3001).expect("ephemeral port below 3001");

    let output = run_loader(&[
        "--model",
        "new.safetensors",
        "--port",
        "1",
        "--gpu",
        &gpu.to_string(),
    ])
    .await;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(stdout(&output).starts_with(&format!("Using port {} for GPU {}", port, gpu)));
    assert_eq!(mock.posts.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_loader_server_error_exits_nonzero_without_post() {
    let (port, mock) =
        start_mock(json!({"error": "oops"}), StatusCode::INTERNAL_SERVER_ERROR).await;

    let output = run_loader(&["-m", "new.safetensors", "-p", &port.to_string()]).await;

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
    let err = stderr(&output);
    assert!(err.starts_with("Error: "), "stderr: {}", err);
    assert!(err.contains("500"));
    assert!(mock.posts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_loader_rejected_post_exits_nonzero() {
    let (port, mock) = start_mock_with(
        json!({"sd_model_checkpoint": "old.safetensors"}),
        StatusCode::OK,
        StatusCode::INTERNAL_SERVER_ERROR,
    )
    .await;

    let output = run_loader(&["-m", "new.safetensors", "-p", &port.to_string()]).await;

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
    let err = stderr(&output);
    assert!(err.starts_with("Error: "), "stderr: {}", err);
    assert!(err.contains("POST"));
    assert!(err.contains("500"));
    assert_eq!(mock.posts.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_loader_malformed_body_exits_nonzero() {
    let (port, mock) = start_mock(json!("not an object"), StatusCode::OK).await;

    let output = run_loader(&["-m", "new.safetensors", "-p", &port.to_string()]).await;

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).starts_with("Error: "));
    assert!(mock.posts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_loader_requires_model() {
    let output = run_loader(&["-p", "3001"]).await;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("--model"));
}
