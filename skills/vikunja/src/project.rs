//! Project types and operations.

use crate::client::ApiClient;
use crate::output;
use anyhow::{Context, Result};
use clap::Subcommand;
use serde::{Deserialize, Serialize};

/// A project as the API models it.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Project {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hex_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_project_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_archived: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_favorite: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
}

/// What the CLI prints for a project.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ProjectLean {
    pub id: i64,
    pub title: String,
}

impl Project {
    pub fn to_lean(&self) -> ProjectLean {
        ProjectLean {
            id: self.id.unwrap_or_default(),
            title: self.title.clone(),
        }
    }
}

pub struct ProjectService<'a> {
    client: &'a ApiClient,
}

impl<'a> ProjectService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Project>> {
        let data = self.client.get("/projects").await?;
        serde_json::from_slice(&data).context("failed to parse projects")
    }

    pub async fn get(&self, id: i64) -> Result<Project> {
        let data = self.client.get(&format!("/projects/{id}")).await?;
        serde_json::from_slice(&data).context("failed to parse project")
    }
}

#[derive(Subcommand, Debug)]
pub enum ProjectCommand {
    /// List all projects
    List,

    /// Show one project
    Get { id: i64 },
}

pub async fn run(client: &ApiClient, command: ProjectCommand) -> Result<()> {
    let service = ProjectService::new(client);

    match command {
        ProjectCommand::List => {
            let projects = service.list().await?;
            let lean: Vec<ProjectLean> = projects.iter().map(Project::to_lean).collect();
            output::print_json(&lean)
        }
        ProjectCommand::Get { id } => {
            let project = service.get(id).await?;
            output::print_json(&project.to_lean())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lean_keeps_only_id_and_title() {
        let project: Project = serde_json::from_str(
            r#"{"id": 3, "title": "Inbox", "description": "default", "is_favorite": true}"#,
        )
        .expect("project json");

        let value = serde_json::to_value(project.to_lean()).expect("lean json");
        let object = value.as_object().expect("object");
        assert_eq!(object.len(), 2);
        assert_eq!(object["id"], 3);
        assert_eq!(object["title"], "Inbox");
    }
}
