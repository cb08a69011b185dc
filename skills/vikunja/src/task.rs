//! Task types and operations.

use crate::client::ApiClient;
use crate::output;
use anyhow::{bail, Context, Result};
use clap::Subcommand;
use serde::{Deserialize, Serialize};

/// Timestamp the API uses for unset dates.
const ZERO_DATE: &str = "0001-01-01T00:00:00Z";

/// A label as embedded in task responses.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct TaskLabel {
    pub id: i64,
    pub title: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub hex_color: String,
}

/// A task as the API models it.
///
/// Updates send the whole object back, so this mirrors the API's task model
/// rather than just the fields the CLI surfaces.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Task {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub done: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub done_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repeat_after: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repeat_mode: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percent_done: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_favorite: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hex_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bucket_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image_attachment_id: Option<i64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<TaskLabel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
}

/// The slimmed-down task the CLI prints: stable fields, label titles instead
/// of label objects, unset dates elided.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct TaskLean {
    pub id: i64,
    pub title: String,
    pub done: bool,
    pub priority: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    pub project_id: i64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "is_zero")]
    pub percent_done: f64,
    #[serde(skip_serializing_if = "is_false")]
    pub is_favorite: bool,
}

fn is_zero(value: &f64) -> bool {
    *value == 0.0
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl Task {
    pub fn to_lean(&self) -> TaskLean {
        TaskLean {
            id: self.id.unwrap_or_default(),
            title: self.title.clone(),
            done: self.done.unwrap_or_default(),
            priority: self.priority.unwrap_or_default(),
            due_date: lean_date(self.due_date.as_deref()),
            start_date: lean_date(self.start_date.as_deref()),
            end_date: lean_date(self.end_date.as_deref()),
            project_id: self.project_id.unwrap_or_default(),
            labels: self.labels.iter().map(|l| l.title.clone()).collect(),
            description: self.description.clone().filter(|d| !d.is_empty()),
            percent_done: self.percent_done.unwrap_or_default(),
            is_favorite: self.is_favorite.unwrap_or_default(),
        }
    }
}

/// The API reports unset dates as null, empty, or the zero timestamp.
fn lean_date(date: Option<&str>) -> Option<String> {
    match date {
        None | Some("") | Some(ZERO_DATE) => None,
        Some(d) => Some(d.to_string()),
    }
}

/// Field updates applied onto the fetched task before it goes back whole.
#[derive(Debug, Clone, Default)]
pub struct TaskChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<String>,
    pub priority: Option<i32>,
    pub done: Option<bool>,
    pub project_id: Option<i64>,
}

impl TaskChanges {
    fn apply(&self, task: &mut Task) {
        if let Some(title) = &self.title {
            task.title = title.clone();
        }
        if let Some(description) = &self.description {
            task.description = Some(description.clone());
        }
        if let Some(due) = &self.due_date {
            task.due_date = Some(due.clone());
        }
        if let Some(priority) = self.priority {
            task.priority = Some(priority);
        }
        if let Some(done) = self.done {
            task.done = Some(done);
        }
        if let Some(project_id) = self.project_id {
            task.project_id = Some(project_id);
        }
    }
}

pub struct TaskService<'a> {
    client: &'a ApiClient,
}

impl<'a> TaskService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// All tasks the token can see, optionally narrowed to one project.
    ///
    /// The filter runs client-side; `/tasks/all` is the only endpoint that
    /// spans projects.
    pub async fn list(&self, project: Option<i64>) -> Result<Vec<Task>> {
        let data = self.client.get("/tasks/all").await?;
        let mut tasks: Vec<Task> =
            serde_json::from_slice(&data).context("failed to parse tasks")?;

        if let Some(project) = project {
            tasks.retain(|t| t.project_id == Some(project));
        }
        Ok(tasks)
    }

    pub async fn get(&self, id: i64) -> Result<Task> {
        let data = self.client.get(&format!("/tasks/{id}")).await?;
        serde_json::from_slice(&data).context("failed to parse task")
    }

    pub async fn create(&self, project: i64, task: &Task) -> Result<Task> {
        let data = self
            .client
            .put(&format!("/projects/{project}/tasks"), task)
            .await?;
        serde_json::from_slice(&data).context("failed to parse created task")
    }

    /// Fetches the task, applies the changes, and posts the full object
    /// back. The API replaces the task wholesale on update, so a partial
    /// body would blank every omitted field.
    pub async fn update(&self, id: i64, changes: &TaskChanges) -> Result<Task> {
        let mut task = self.get(id).await?;
        changes.apply(&mut task);

        let data = self.client.post(&format!("/tasks/{id}"), &task).await?;
        serde_json::from_slice(&data).context("failed to parse updated task")
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.client.delete(&format!("/tasks/{id}")).await?;
        Ok(())
    }

    pub async fn add_label(&self, task_id: i64, label_id: i64) -> Result<()> {
        let body = serde_json::json!({ "label_id": label_id });
        self.client
            .put(&format!("/tasks/{task_id}/labels"), &body)
            .await?;
        Ok(())
    }

    pub async fn remove_label(&self, task_id: i64, label_id: i64) -> Result<()> {
        self.client
            .delete(&format!("/tasks/{task_id}/labels/{label_id}"))
            .await?;
        Ok(())
    }
}

#[derive(Subcommand, Debug)]
pub enum TaskCommand {
    /// List tasks across all projects
    List {
        /// Only show tasks in this project
        #[arg(long)]
        project: Option<i64>,
    },

    /// Show one task
    Get { id: i64 },

    /// Create a task in a project
    Create {
        /// Project to create the task in
        #[arg(long)]
        project: i64,

        #[arg(long, short = 't')]
        title: String,

        #[arg(long)]
        description: Option<String>,

        /// Due date, RFC 3339 (e.g. 2026-09-01T12:00:00Z)
        #[arg(long)]
        due: Option<String>,

        /// Priority from 0 (unset) to 5 (DO NOW)
        #[arg(long)]
        priority: Option<i32>,
    },

    /// Update fields on a task
    Update {
        id: i64,

        #[arg(long, short = 't')]
        title: Option<String>,

        #[arg(long)]
        description: Option<String>,

        /// Due date, RFC 3339
        #[arg(long)]
        due: Option<String>,

        #[arg(long)]
        priority: Option<i32>,

        /// Set the done state explicitly
        #[arg(long)]
        done: Option<bool>,

        /// Move the task to another project
        #[arg(long)]
        project: Option<i64>,
    },

    /// Mark a task done
    Done { id: i64 },

    /// Delete a task
    Delete { id: i64 },

    /// Attach or detach a label
    Label {
        /// Task to change
        id: i64,

        /// Label ID to attach
        #[arg(long, conflicts_with = "remove")]
        add: Option<i64>,

        /// Label ID to detach
        #[arg(long)]
        remove: Option<i64>,
    },
}

pub async fn run(client: &ApiClient, command: TaskCommand) -> Result<()> {
    let service = TaskService::new(client);

    match command {
        TaskCommand::List { project } => {
            let tasks = service.list(project).await?;
            let lean: Vec<TaskLean> = tasks.iter().map(Task::to_lean).collect();
            output::print_json(&lean)
        }
        TaskCommand::Get { id } => {
            let task = service.get(id).await?;
            output::print_json(&task.to_lean())
        }
        TaskCommand::Create {
            project,
            title,
            description,
            due,
            priority,
        } => {
            let task = Task {
                title,
                description,
                due_date: due,
                priority,
                ..Task::default()
            };
            let created = service.create(project, &task).await?;
            output::print_json(&created.to_lean())
        }
        TaskCommand::Update {
            id,
            title,
            description,
            due,
            priority,
            done,
            project,
        } => {
            let changes = TaskChanges {
                title,
                description,
                due_date: due,
                priority,
                done,
                project_id: project,
            };
            let updated = service.update(id, &changes).await?;
            output::print_json(&updated.to_lean())
        }
        TaskCommand::Done { id } => {
            let changes = TaskChanges {
                done: Some(true),
                ..TaskChanges::default()
            };
            let updated = service.update(id, &changes).await?;
            output::print_json(&updated.to_lean())
        }
        TaskCommand::Delete { id } => {
            service.delete(id).await?;
            output::print_json(&serde_json::json!({ "deleted": true }))
        }
        TaskCommand::Label { id, add, remove } => match (add, remove) {
            (Some(label_id), None) => {
                service.add_label(id, label_id).await?;
                output::print_json(&serde_json::json!({
                    "task_id": id,
                    "label_id": label_id,
                    "added": true,
                }))
            }
            (None, Some(label_id)) => {
                service.remove_label(id, label_id).await?;
                output::print_json(&serde_json::json!({
                    "task_id": id,
                    "label_id": label_id,
                    "removed": true,
                }))
            }
            _ => bail!("exactly one of --add or --remove is required"),
        },
    }
}
