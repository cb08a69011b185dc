//! API key types and operations.

use crate::client::ApiClient;
use crate::output;
use anyhow::{Context, Result};
use clap::Subcommand;
use serde::{Deserialize, Serialize};

/// An API key as the API models it.
///
/// `key` holds the secret value and appears in the creation response only;
/// listings return it empty.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct ApiKey {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub key: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub created_at: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub last_used: String,
}

/// What the CLI prints for a key.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ApiKeyLean {
    pub id: String,
    pub name: String,
    /// Present only right after creation.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub key: String,
}

impl ApiKey {
    pub fn to_lean(&self) -> ApiKeyLean {
        ApiKeyLean {
            id: self.id.clone(),
            name: self.name.clone(),
            key: self.key.clone(),
        }
    }
}

/// Creation request body.
#[derive(Serialize, Debug, Clone)]
pub struct CreateKeyRequest {
    pub name: String,
}

pub struct KeyService<'a> {
    client: &'a ApiClient,
}

impl<'a> KeyService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<ApiKey>> {
        let data = self.client.get("/keys").await?;
        serde_json::from_slice(&data).context("failed to parse keys")
    }

    pub async fn create(&self, request: &CreateKeyRequest) -> Result<ApiKey> {
        let data = self.client.post("/keys", request).await?;
        serde_json::from_slice(&data).context("failed to parse created key")
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.client.delete(&format!("/keys/{id}")).await?;
        Ok(())
    }
}

#[derive(Subcommand, Debug)]
pub enum KeyCommand {
    /// List all API keys
    List,

    /// Create a new API key; the key value is shown once, here only
    Create {
        #[arg(long, short = 'n')]
        name: String,
    },

    /// Delete an API key
    Delete { id: String },
}

pub async fn run(client: &ApiClient, command: KeyCommand) -> Result<()> {
    let service = KeyService::new(client);

    match command {
        KeyCommand::List => {
            let keys = service.list().await?;
            let lean: Vec<ApiKeyLean> = keys.iter().map(ApiKey::to_lean).collect();
            output::print_json(&lean)
        }
        KeyCommand::Create { name } => {
            let created = service.create(&CreateKeyRequest { name }).await?;
            output::print_json(&created.to_lean())
        }
        KeyCommand::Delete { id } => {
            service.delete(&id).await?;
            output::print_json(&serde_json::json!({ "deleted": true }))
        }
    }
}
