//! In-memory directory - the static data store behind the portal.
//!
//! Loaded once at startup and immutable for the lifetime of the process.
//! Referential integrity is checked at load time so the resolver can assume
//! every manager, assignee, and participant id points at a real user.

pub mod seed;

use std::collections::HashSet;

use uuid::Uuid;

use crate::errors::AppError;
use crate::models::chat::ChatRoom;
use crate::models::project::Project;
use crate::models::task::Task;
use crate::models::user::{DirectoryUser, User};

#[derive(Debug, Clone)]
pub struct Directory {
    users: Vec<DirectoryUser>,
    projects: Vec<Project>,
    tasks: Vec<Task>,
    rooms: Vec<ChatRoom>,
}

impl Directory {
    pub fn new(
        users: Vec<DirectoryUser>,
        projects: Vec<Project>,
        tasks: Vec<Task>,
        rooms: Vec<ChatRoom>,
    ) -> Result<Self, AppError> {
        validate(&users, &projects, &tasks, &rooms)?;
        Ok(Self {
            users,
            projects,
            tasks,
            rooms,
        })
    }

    /// The seeded demo organization.
    pub fn load_seed() -> Result<Self, AppError> {
        seed::demo()
    }

    pub fn users(&self) -> Vec<User> {
        self.users.iter().map(User::from).collect()
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn rooms(&self) -> &[ChatRoom] {
        &self.rooms
    }

    pub fn user_by_email(&self, email: &str) -> Option<&DirectoryUser> {
        self.users
            .iter()
            .find(|user| user.email.eq_ignore_ascii_case(email))
    }

    pub fn user_by_id(&self, id: Uuid) -> Option<&DirectoryUser> {
        self.users.iter().find(|user| user.id == id)
    }

    pub fn project_by_id(&self, id: Uuid) -> Option<&Project> {
        self.projects.iter().find(|project| project.id == id)
    }
}

fn validate(
    users: &[DirectoryUser],
    projects: &[Project],
    tasks: &[Task],
    rooms: &[ChatRoom],
) -> Result<(), AppError> {
    let user_ids: HashSet<Uuid> = users.iter().map(|user| user.id).collect();

    for user in users {
        if let Some(supervisor) = user.reports_to {
            if !user_ids.contains(&supervisor) {
                return Err(AppError::integrity(format!(
                    "user {} reports to unknown user {}",
                    user.id, supervisor
                )));
            }
        }
    }

    let project_ids: HashSet<Uuid> = projects.iter().map(|project| project.id).collect();

    for project in projects {
        if !user_ids.contains(&project.manager) {
            return Err(AppError::integrity(format!(
                "project {} has unknown manager {}",
                project.id, project.manager
            )));
        }
        for assignee in &project.assigned_to {
            if !user_ids.contains(assignee) {
                return Err(AppError::integrity(format!(
                    "project {} assigned to unknown user {}",
                    project.id, assignee
                )));
            }
        }
    }

    for task in tasks {
        if !project_ids.contains(&task.project_id) {
            return Err(AppError::integrity(format!(
                "task {} references unknown project {}",
                task.id, task.project_id
            )));
        }
        if !user_ids.contains(&task.assigned_to) {
            return Err(AppError::integrity(format!(
                "task {} assigned to unknown user {}",
                task.id, task.assigned_to
            )));
        }
    }

    for room in rooms {
        for participant in &room.participants {
            if !user_ids.contains(participant) {
                return Err(AppError::integrity(format!(
                    "room {} has unknown participant {}",
                    room.id, participant
                )));
            }
        }
        if let Some(project_id) = room.project_id {
            if !project_ids.contains(&project_id) {
                return Err(AppError::integrity(format!(
                    "room {} references unknown project {}",
                    room.id, project_id
                )));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_passes_integrity_checks() {
        let directory = Directory::load_seed().expect("seed must validate");
        assert!(directory.user_count() > 0);
        assert!(!directory.projects().is_empty());
    }

    #[test]
    fn dangling_manager_is_rejected() {
        let directory = Directory::load_seed().expect("seed must validate");
        let mut projects = directory.projects().to_vec();
        projects[0].manager = Uuid::from_u128(0xdead_beef);

        let users = directory.users.clone();
        let tasks = directory.tasks().to_vec();
        let rooms = directory.rooms().to_vec();

        let err = Directory::new(users, projects, tasks, rooms).unwrap_err();
        assert!(matches!(err, AppError::Integrity(_)));
    }
}
