//! Label types and operations.
//!
//! Vikunja's label endpoints invert the usual REST verbs: creation is a PUT
//! on the collection and updates are a POST on the resource. The service
//! mirrors the API instead of papering over it.

use crate::client::ApiClient;
use crate::output;
use anyhow::{Context, Result};
use clap::Subcommand;
use serde::{Deserialize, Serialize};

/// A label as the API models it.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Label {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hex_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
}

/// What the CLI prints for a label.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct LabelLean {
    pub id: i64,
    pub title: String,
    pub hex_color: String,
}

impl Label {
    pub fn to_lean(&self) -> LabelLean {
        LabelLean {
            id: self.id.unwrap_or_default(),
            title: self.title.clone(),
            hex_color: self.hex_color.clone().unwrap_or_default(),
        }
    }
}

/// Update body. Omitted fields stay untouched server-side, so nothing here
/// may serialize when unset.
#[derive(Serialize, Debug, Clone, Default)]
pub struct LabelChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hex_color: Option<String>,
}

pub struct LabelService<'a> {
    client: &'a ApiClient,
}

impl<'a> LabelService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Label>> {
        let data = self.client.get("/labels").await?;
        serde_json::from_slice(&data).context("failed to parse labels")
    }

    pub async fn get(&self, id: i64) -> Result<Label> {
        let data = self.client.get(&format!("/labels/{id}")).await?;
        serde_json::from_slice(&data).context("failed to parse label")
    }

    /// PUT on the collection creates.
    pub async fn create(&self, label: &Label) -> Result<Label> {
        let data = self.client.put("/labels", label).await?;
        serde_json::from_slice(&data).context("failed to parse created label")
    }

    /// POST on the resource updates.
    pub async fn update(&self, id: i64, changes: &LabelChanges) -> Result<Label> {
        let data = self.client.post(&format!("/labels/{id}"), changes).await?;
        serde_json::from_slice(&data).context("failed to parse updated label")
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.client.delete(&format!("/labels/{id}")).await?;
        Ok(())
    }
}

#[derive(Subcommand, Debug)]
pub enum LabelCommand {
    /// List all labels
    List,

    /// Show one label
    Get { id: i64 },

    /// Create a label
    Create {
        #[arg(long, short = 't')]
        title: String,

        /// Hex color without the leading # (e.g. ff0000)
        #[arg(long)]
        color: Option<String>,
    },

    /// Update a label
    Update {
        id: i64,

        #[arg(long, short = 't')]
        title: Option<String>,

        #[arg(long)]
        color: Option<String>,
    },

    /// Delete a label
    Delete { id: i64 },
}

pub async fn run(client: &ApiClient, command: LabelCommand) -> Result<()> {
    let service = LabelService::new(client);

    match command {
        LabelCommand::List => {
            let labels = service.list().await?;
            let lean: Vec<LabelLean> = labels.iter().map(Label::to_lean).collect();
            output::print_json(&lean)
        }
        LabelCommand::Get { id } => {
            let label = service.get(id).await?;
            output::print_json(&label.to_lean())
        }
        LabelCommand::Create { title, color } => {
            let label = Label {
                title,
                hex_color: color,
                ..Label::default()
            };
            let created = service.create(&label).await?;
            output::print_json(&created.to_lean())
        }
        LabelCommand::Update { id, title, color } => {
            let changes = LabelChanges {
                title,
                hex_color: color,
            };
            let updated = service.update(id, &changes).await?;
            output::print_json(&updated.to_lean())
        }
        LabelCommand::Delete { id } => {
            service.delete(id).await?;
            output::print_json(&serde_json::json!({ "deleted": true }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lean_defaults_missing_color() {
        let label: Label =
            serde_json::from_str(r#"{"id": 5, "title": "urgent"}"#).expect("label json");

        let lean = label.to_lean();
        assert_eq!(lean.id, 5);
        assert_eq!(lean.hex_color, "");

        // Unlike dates, the color always appears, empty or not.
        let value = serde_json::to_value(&lean).expect("lean json");
        assert_eq!(value["hex_color"], "");
    }

    #[test]
    fn changes_omit_unset_fields() {
        let changes = LabelChanges {
            hex_color: Some("ff0000".to_string()),
            ..LabelChanges::default()
        };

        let value = serde_json::to_value(&changes).expect("changes json");
        let object = value.as_object().expect("object");
        assert_eq!(object.len(), 1);
        assert_eq!(object["hex_color"], "ff0000");
    }
}
