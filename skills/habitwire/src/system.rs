//! Health check and data export.

use crate::client::ApiClient;
use crate::output;
use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Response of `GET /health`.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct HealthResponse {
    pub status: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub version: String,
}

/// Response of `GET /export?format=json`.
///
/// The sections stay untyped: the CLI passes them through, it does not
/// interpret habit data.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct ExportData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub habits: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkins: Option<serde_json::Value>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}

pub async fn health(client: &ApiClient) -> Result<()> {
    let data = client.get("/health").await?;
    let health: HealthResponse =
        serde_json::from_slice(&data).context("failed to parse health response")?;
    output::print_json(&health)
}

/// Exports all habits, categories, and check-ins.
///
/// CSV passes the body through untouched. JSON is parsed and re-printed
/// compactly; a body that does not parse is printed raw rather than
/// rejected.
pub async fn export(client: &ApiClient, format: ExportFormat) -> Result<()> {
    let endpoint = match format {
        ExportFormat::Json => "/export?format=json",
        ExportFormat::Csv => "/export?format=csv",
    };
    let data = client.get(endpoint).await?;

    if format == ExportFormat::Csv {
        println!("{}", String::from_utf8_lossy(&data));
        return Ok(());
    }

    match serde_json::from_slice::<ExportData>(&data) {
        Ok(export) => output::print_json(&export),
        Err(_) => {
            println!("{}", String::from_utf8_lossy(&data));
            Ok(())
        }
    }
}
