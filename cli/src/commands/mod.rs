//! Command implementations for the notebook CLI.
//!
//! Each command module provides:
//! - Args struct for clap argument parsing
//! - execute() function that performs the command
//! - Human-readable and JSON output formatting

pub mod access;
pub mod create;
pub mod data;
pub mod delete;
pub mod find;
pub mod list;
pub mod note;
pub mod rename;
pub mod show;

use anyhow::Result;
use colored::Colorize;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// Common error type for HTTP requests.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },
}

/// Build the HTTP client shared by all commands.
pub fn build_client() -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(concat!("notebook-cli/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

/// Print output in JSON or human-readable format.
pub fn output<T: Serialize + HumanReadable>(value: &T, human: bool) -> Result<()> {
    if human {
        value.print_human();
    } else {
        println!("{}", serde_json::to_string_pretty(value)?);
    }
    Ok(())
}

/// Trait for types that can be printed in human-readable format.
pub trait HumanReadable {
    fn print_human(&self);
}

/// Confirmation printed for requests that return no body.
#[derive(Debug, Serialize)]
pub struct Done {
    pub ok: bool,
    pub message: String,
}

impl Done {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            message: message.into(),
        }
    }
}

impl HumanReadable for Done {
    fn print_human(&self) {
        println!("{}", self.message.green().bold());
    }
}

/// Error body returned by the server.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorDetails,
}

#[derive(Debug, Deserialize)]
struct ErrorDetails {
    code: String,
    message: String,
}

/// Send a request and decode the JSON response.
pub async fn make_request<T: DeserializeOwned>(request: reqwest::RequestBuilder) -> Result<T, CliError> {
    let response = checked(request).await?;
    Ok(response.json::<T>().await?)
}

/// Send a request whose successful response has no body.
pub async fn send_request(request: reqwest::RequestBuilder) -> Result<(), CliError> {
    checked(request).await?;
    Ok(())
}

async fn checked(request: reqwest::RequestBuilder) -> Result<reqwest::Response, CliError> {
    let response = request.send().await?;
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(CliError::Server {
        status: status.as_u16(),
        message: error_message(&body),
    })
}

/// Pull `CODE: message` out of a JSON error body, or return the body as is.
fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(parsed) => format!("{}: {}", parsed.error.code, parsed.error.message),
        Err(_) => body.trim().to_string(),
    }
}

/// Format a timestamp for human display.
pub fn format_timestamp(ts: &chrono::DateTime<chrono::Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Truncate a string for display, adding ellipsis if needed.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
