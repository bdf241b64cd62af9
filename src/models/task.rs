use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::events::Loggable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    ToDo,
    InProgress,
    Completed,
    Overdue,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Task {
    pub id: Uuid,
    /// Must reference an existing project.
    pub project_id: Uuid,
    #[schema(example = "Integrate meter firmware API")]
    pub title: String,
    /// Must reference an existing user.
    pub assigned_to: Uuid,
    pub status: TaskStatus,
    #[schema(format = DateTime, example = "2025-12-01T00:00:00Z")]
    pub due_date: DateTime<Utc>,
}

impl Loggable for Task {
    fn entity_type() -> &'static str {
        "task"
    }
    fn subject_id(&self) -> Uuid {
        self.id
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TaskCreateRequest {
    #[schema(example = "Integrate meter firmware API")]
    pub title: String,
    pub assigned_to: Uuid,
    pub status: Option<TaskStatus>,
    #[schema(format = DateTime, example = "2025-12-01T00:00:00Z")]
    pub due_date: DateTime<Utc>,
}
