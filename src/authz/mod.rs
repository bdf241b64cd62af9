//! Authorization module - role hierarchy and the access scope resolver.
//!
//! All visibility and management decisions in the portal go through this
//! module. Components never re-derive role logic locally; they hand the
//! resolver a principal and a collection and render what comes back.

mod principal;
mod scope;

pub use principal::Principal;
pub use scope::{
    authorized_chat_peers, can_manage, visible_chat_rooms, visible_projects, visible_tasks,
    visible_team_members,
};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Organizational roles, top of the hierarchy first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    DirectorGeneral,
    CenterHead,
    HeadOfDepartment,
    ProjectManager,
    ProjectCoordinator,
    ProjectEngineer,
    ProjectAssistant,
}

impl Role {
    /// Hierarchy depth: 1 (DirectorGeneral) down to 7 (ProjectAssistant).
    pub fn depth(self) -> u8 {
        match self {
            Role::DirectorGeneral => 1,
            Role::CenterHead => 2,
            Role::HeadOfDepartment => 3,
            Role::ProjectManager => 4,
            Role::ProjectCoordinator => 5,
            Role::ProjectEngineer => 6,
            Role::ProjectAssistant => 7,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::DirectorGeneral => "director_general",
            Role::CenterHead => "center_head",
            Role::HeadOfDepartment => "head_of_department",
            Role::ProjectManager => "project_manager",
            Role::ProjectCoordinator => "project_coordinator",
            Role::ProjectEngineer => "project_engineer",
            Role::ProjectAssistant => "project_assistant",
        }
    }

    /// Roles scoped to a department (head of department and below).
    pub fn is_department_scoped(self) -> bool {
        self.depth() >= Role::HeadOfDepartment.depth()
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
