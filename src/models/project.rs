use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::events::{Loggable, Severity};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Active,
    Completed,
    Delayed,
    Pending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ProjectCategory {
    Business,
    Funded,
    Research,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Project {
    pub id: Uuid,
    #[schema(example = "Smart Metering Rollout")]
    pub title: String,
    pub status: ProjectStatus,
    pub category: ProjectCategory,
    #[schema(example = "Pune")]
    pub center: String,
    #[schema(example = "Software")]
    pub department: String,
    /// Id of the managing principal. Must reference an existing user.
    pub manager: Uuid,
    /// Ids of the assigned principals. Each must reference an existing user.
    pub assigned_to: Vec<Uuid>,
    #[schema(example = 65)]
    pub progress: u8,
    #[schema(format = DateTime, example = "2026-03-31T00:00:00Z")]
    pub deadline: DateTime<Utc>,
}

impl Loggable for Project {
    fn entity_type() -> &'static str {
        "project"
    }
    fn subject_id(&self) -> Uuid {
        self.id
    }
    fn severity(&self) -> Severity {
        Severity::Critical
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProjectCreateRequest {
    #[schema(example = "Smart Metering Rollout")]
    pub title: String,
    pub category: ProjectCategory,
    #[schema(example = "Pune")]
    pub center: String,
    #[schema(example = "Software")]
    pub department: String,
    pub manager: Uuid,
    #[schema(format = DateTime, example = "2026-03-31T00:00:00Z")]
    pub deadline: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AssignRequest {
    pub user_id: Uuid,
}
