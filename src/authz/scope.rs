//! The access scope resolver.
//!
//! Every operation is a pure function over immutable collections: given the
//! requesting principal and a resource collection, it returns the subset the
//! principal may see. Absence of a matching rule is the normal "no access"
//! path. An unrecognized or missing role resolves to an empty set, never an
//! error.

use std::collections::HashSet;

use uuid::Uuid;

use crate::models::chat::ChatRoom;
use crate::models::project::Project;
use crate::models::task::Task;
use crate::models::user::User;

use super::{Principal, Role};

/// Projects the principal may view.
///
/// First matching role wins; no role matches more than one rule.
pub fn visible_projects(principal: &Principal, all: &[Project]) -> Vec<Project> {
    let Some(role) = principal.role else {
        tracing::debug!(user_id = %principal.id, "no recognized role, project scope is empty");
        return Vec::new();
    };

    all.iter()
        .filter(|project| match role {
            Role::DirectorGeneral => true,
            Role::CenterHead => principal.in_center(&project.center),
            Role::HeadOfDepartment => principal.in_department(&project.department),
            Role::ProjectManager | Role::ProjectCoordinator => project.manager == principal.id,
            Role::ProjectEngineer | Role::ProjectAssistant => {
                project.assigned_to.contains(&principal.id)
            }
        })
        .cloned()
        .collect()
}

/// Tasks the principal may view.
///
/// Individual contributors see their own work items regardless of project
/// scope; everyone above them sees the task aggregate of the projects
/// already in scope, never more.
pub fn visible_tasks(principal: &Principal, all: &[Task], visible_projects: &[Project]) -> Vec<Task> {
    match principal.role {
        Some(Role::ProjectEngineer) | Some(Role::ProjectAssistant) => all
            .iter()
            .filter(|task| task.assigned_to == principal.id)
            .cloned()
            .collect(),
        Some(_) => {
            let project_ids: HashSet<Uuid> = visible_projects.iter().map(|p| p.id).collect();
            all.iter()
                .filter(|task| project_ids.contains(&task.project_id))
                .cloned()
                .collect()
        }
        None => Vec::new(),
    }
}

enum TeamScope {
    OrgWide,
    Center,
    CenterAndDepartment,
}

/// Team members visible to the principal, one to three role-classes down the
/// hierarchy, sorted ascending by hierarchy depth. The sort is stable: ties
/// keep the original collection order.
pub fn visible_team_members(principal: &Principal, all: &[User]) -> Vec<User> {
    let Some(role) = principal.role else {
        return Vec::new();
    };

    let mut members = match role {
        Role::DirectorGeneral => role_class_window(
            principal,
            all,
            &[Role::CenterHead, Role::HeadOfDepartment, Role::ProjectManager],
            TeamScope::OrgWide,
        ),
        Role::CenterHead => role_class_window(
            principal,
            all,
            &[Role::HeadOfDepartment, Role::ProjectManager, Role::ProjectCoordinator],
            TeamScope::Center,
        ),
        Role::HeadOfDepartment => role_class_window(
            principal,
            all,
            &[Role::ProjectManager, Role::ProjectCoordinator, Role::ProjectEngineer],
            TeamScope::CenterAndDepartment,
        ),
        Role::ProjectManager => role_class_window(
            principal,
            all,
            &[Role::ProjectCoordinator, Role::ProjectEngineer, Role::ProjectAssistant],
            TeamScope::CenterAndDepartment,
        ),
        Role::ProjectCoordinator => role_class_window(
            principal,
            all,
            &[Role::ProjectEngineer, Role::ProjectAssistant],
            TeamScope::CenterAndDepartment,
        ),
        Role::ProjectEngineer | Role::ProjectAssistant => {
            let mut peers: Vec<User> = all
                .iter()
                .filter(|user| {
                    user.id != principal.id
                        && same_center(principal, user)
                        && same_department(principal, user)
                })
                .cloned()
                .collect();
            peers.truncate(3);
            peers
        }
    };

    members.sort_by_key(|user| user.role.map(Role::depth).unwrap_or(u8::MAX));
    members
}

/// Users the principal may open a one-to-one conversation with: the
/// immediate superior and immediate subordinate role-class in scope.
/// Engineers and assistants may only reach the user named by `reports_to`.
/// Intentionally narrower than [`visible_team_members`].
pub fn authorized_chat_peers(principal: &Principal, all: &[User]) -> Vec<User> {
    let Some(role) = principal.role else {
        return Vec::new();
    };

    if matches!(role, Role::ProjectEngineer | Role::ProjectAssistant) {
        let Some(supervisor) = principal.reports_to else {
            return Vec::new();
        };
        return all
            .iter()
            .filter(|user| user.id == supervisor)
            .cloned()
            .collect();
    }

    let up = superior_class(role);
    let down = subordinate_class(role);

    all.iter()
        .filter(|user| {
            if user.id == principal.id {
                return false;
            }
            let Some(user_role) = user.role else {
                return false;
            };
            (Some(user_role) == up || Some(user_role) == down)
                && chat_scope_matches(role, principal, user, user_role)
        })
        .cloned()
        .collect()
}

/// Chat rooms visible to the principal. Membership only: no role, not even
/// the top of the hierarchy, gets blanket access to conversations it is not
/// a participant of.
pub fn visible_chat_rooms(principal: &Principal, all: &[ChatRoom]) -> Vec<ChatRoom> {
    if principal.role.is_none() {
        return Vec::new();
    }

    all.iter()
        .filter(|room| room.participants.contains(&principal.id))
        .cloned()
        .collect()
}

/// Whether the principal may create, assign, or delete resources in
/// `resource_department`.
pub fn can_manage(principal: &Principal, resource_department: Option<&str>) -> bool {
    match principal.role {
        Some(Role::DirectorGeneral) | Some(Role::CenterHead) => true,
        Some(Role::HeadOfDepartment) => match (principal.department.as_deref(), resource_department)
        {
            (Some(own), Some(resource)) => own == resource,
            _ => false,
        },
        _ => false,
    }
}

fn role_class_window(
    principal: &Principal,
    all: &[User],
    classes: &[Role],
    scope: TeamScope,
) -> Vec<User> {
    all.iter()
        .filter(|user| user.role.is_some_and(|role| classes.contains(&role)))
        .filter(|user| match scope {
            TeamScope::OrgWide => true,
            TeamScope::Center => same_center(principal, user),
            TeamScope::CenterAndDepartment => {
                same_center(principal, user) && same_department(principal, user)
            }
        })
        .cloned()
        .collect()
}

fn same_center(principal: &Principal, user: &User) -> bool {
    match user.center.as_deref() {
        Some(center) => principal.in_center(center),
        None => false,
    }
}

fn same_department(principal: &Principal, user: &User) -> bool {
    match user.department.as_deref() {
        Some(department) => principal.in_department(department),
        None => false,
    }
}

fn superior_class(role: Role) -> Option<Role> {
    match role {
        Role::DirectorGeneral => None,
        Role::CenterHead => Some(Role::DirectorGeneral),
        Role::HeadOfDepartment => Some(Role::CenterHead),
        Role::ProjectManager => Some(Role::HeadOfDepartment),
        Role::ProjectCoordinator => Some(Role::ProjectManager),
        Role::ProjectEngineer => Some(Role::ProjectCoordinator),
        Role::ProjectAssistant => Some(Role::ProjectEngineer),
    }
}

fn subordinate_class(role: Role) -> Option<Role> {
    match role {
        Role::DirectorGeneral => Some(Role::CenterHead),
        Role::CenterHead => Some(Role::HeadOfDepartment),
        Role::HeadOfDepartment => Some(Role::ProjectManager),
        Role::ProjectManager => Some(Role::ProjectCoordinator),
        Role::ProjectCoordinator => Some(Role::ProjectEngineer),
        Role::ProjectEngineer => Some(Role::ProjectAssistant),
        Role::ProjectAssistant => None,
    }
}

/// A conversation needs a shared center unless one end sits above centers,
/// and a shared department once both ends sit inside departments.
fn chat_scope_matches(
    principal_role: Role,
    principal: &Principal,
    user: &User,
    user_role: Role,
) -> bool {
    if principal_role == Role::DirectorGeneral || user_role == Role::DirectorGeneral {
        return true;
    }
    if !same_center(principal, user) {
        return false;
    }
    if principal_role.is_department_scoped() && user_role.is_department_scoped() {
        return same_department(principal, user);
    }
    true
}
