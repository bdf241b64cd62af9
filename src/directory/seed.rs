//! Seeded demo organization: two centers, three departments, all seven
//! roles represented. Backs the server, the CLI, and the integration tests.

use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

use crate::authz::Role;
use crate::errors::AppError;
use crate::models::chat::{ChatRoom, RoomKind};
use crate::models::project::{Project, ProjectCategory, ProjectStatus};
use crate::models::task::{Task, TaskStatus};
use crate::models::user::DirectoryUser;
use crate::utils::hash_password;

use super::Directory;

/// Shared password for every seeded account.
pub const DEMO_PASSWORD: &str = "Portal#2024";

fn uid(n: u128) -> Uuid {
    Uuid::from_u128(n)
}

fn day(year: i32, month: u32, date: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, date, 0, 0, 0)
        .single()
        .expect("valid calendar date")
}

pub fn demo() -> Result<Directory, AppError> {
    // One argon2 hash shared across the demo accounts keeps startup cheap.
    let password_hash = hash_password(DEMO_PASSWORD)?;

    let user = |n: u128,
                name: &str,
                email: &str,
                role: Role,
                center: Option<&str>,
                department: Option<&str>,
                reports_to: Option<u128>| DirectoryUser {
        id: uid(n),
        name: name.to_string(),
        email: email.to_string(),
        password_hash: password_hash.clone(),
        role: Some(role),
        center: center.map(str::to_string),
        department: department.map(str::to_string),
        reports_to: reports_to.map(uid),
    };

    let users = vec![
        user(1, "Rajan Mehta", "rajan.mehta@orgscope.dev", Role::DirectorGeneral, None, None, None),
        user(2, "Asha Kulkarni", "asha.kulkarni@orgscope.dev", Role::CenterHead, Some("Pune"), None, Some(1)),
        user(3, "Vikram Shinde", "vikram.shinde@orgscope.dev", Role::CenterHead, Some("Mumbai"), None, Some(1)),
        user(4, "Neha Joshi", "neha.joshi@orgscope.dev", Role::HeadOfDepartment, Some("Pune"), Some("Software"), Some(2)),
        user(5, "Arun Patil", "arun.patil@orgscope.dev", Role::HeadOfDepartment, Some("Pune"), Some("Embedded"), Some(2)),
        user(6, "Farah Khan", "farah.khan@orgscope.dev", Role::HeadOfDepartment, Some("Mumbai"), Some("Civil"), Some(3)),
        user(7, "Sameer Deshpande", "sameer.deshpande@orgscope.dev", Role::ProjectManager, Some("Pune"), Some("Software"), Some(4)),
        user(8, "Kavita Rao", "kavita.rao@orgscope.dev", Role::ProjectCoordinator, Some("Pune"), Some("Software"), Some(7)),
        user(9, "Imran Sheikh", "imran.sheikh@orgscope.dev", Role::ProjectManager, Some("Mumbai"), Some("Civil"), Some(6)),
        user(10, "Priya Nair", "priya.nair@orgscope.dev", Role::ProjectEngineer, Some("Pune"), Some("Software"), Some(8)),
        user(11, "Rohit Kale", "rohit.kale@orgscope.dev", Role::ProjectEngineer, Some("Pune"), Some("Software"), Some(8)),
        user(12, "Sneha Gokhale", "sneha.gokhale@orgscope.dev", Role::ProjectAssistant, Some("Pune"), Some("Software"), Some(10)),
        user(13, "Manoj Gupta", "manoj.gupta@orgscope.dev", Role::ProjectEngineer, Some("Mumbai"), Some("Civil"), Some(9)),
        user(14, "Divya Iyer", "divya.iyer@orgscope.dev", Role::ProjectAssistant, Some("Mumbai"), Some("Civil"), Some(13)),
    ];

    let projects = vec![
        Project {
            id: uid(101),
            title: "Smart Metering Rollout".to_string(),
            status: ProjectStatus::Active,
            category: ProjectCategory::Business,
            center: "Pune".to_string(),
            department: "Software".to_string(),
            manager: uid(7),
            assigned_to: vec![uid(10), uid(11), uid(12)],
            progress: 65,
            deadline: day(2026, 3, 31),
        },
        Project {
            id: uid(102),
            title: "Telemetry Gateway Refresh".to_string(),
            status: ProjectStatus::Delayed,
            category: ProjectCategory::Funded,
            center: "Pune".to_string(),
            department: "Embedded".to_string(),
            manager: uid(7),
            assigned_to: vec![uid(11)],
            progress: 30,
            deadline: day(2025, 11, 15),
        },
        Project {
            id: uid(103),
            title: "Harbor Link Survey".to_string(),
            status: ProjectStatus::Pending,
            category: ProjectCategory::Research,
            center: "Mumbai".to_string(),
            department: "Civil".to_string(),
            manager: uid(9),
            assigned_to: vec![uid(13), uid(14)],
            progress: 10,
            deadline: day(2026, 6, 30),
        },
        Project {
            id: uid(104),
            title: "Dockyard Expansion".to_string(),
            status: ProjectStatus::Completed,
            category: ProjectCategory::Business,
            center: "Mumbai".to_string(),
            department: "Civil".to_string(),
            manager: uid(9),
            assigned_to: vec![uid(13)],
            progress: 100,
            deadline: day(2025, 12, 15),
        },
        Project {
            id: uid(105),
            title: "Campus Access Portal".to_string(),
            status: ProjectStatus::Active,
            category: ProjectCategory::Research,
            center: "Pune".to_string(),
            department: "Software".to_string(),
            manager: uid(8),
            assigned_to: vec![uid(10)],
            progress: 40,
            deadline: day(2026, 1, 31),
        },
    ];

    let task = |n: u128, project: u128, title: &str, assignee: u128, status: TaskStatus, due: DateTime<Utc>| Task {
        id: uid(n),
        project_id: uid(project),
        title: title.to_string(),
        assigned_to: uid(assignee),
        status,
        due_date: due,
    };

    let tasks = vec![
        task(201, 101, "Integrate meter firmware API", 10, TaskStatus::InProgress, day(2025, 12, 1)),
        task(202, 101, "Load-test ingestion pipeline", 11, TaskStatus::ToDo, day(2025, 12, 15)),
        task(203, 101, "Prepare field rollout checklist", 12, TaskStatus::Overdue, day(2025, 7, 30)),
        task(204, 102, "Port gateway driver to new SoC", 11, TaskStatus::InProgress, day(2025, 10, 20)),
        task(205, 103, "Digitize soil survey records", 13, TaskStatus::ToDo, day(2026, 2, 28)),
        task(206, 103, "Compile tide tables", 14, TaskStatus::InProgress, day(2026, 1, 31)),
        task(207, 104, "Archive structural drawings", 13, TaskStatus::Completed, day(2025, 11, 30)),
        task(208, 105, "Wire badge reader events", 10, TaskStatus::InProgress, day(2025, 12, 10)),
    ];

    let rooms = vec![
        ChatRoom {
            id: uid(301),
            name: "smart-metering".to_string(),
            kind: RoomKind::Project,
            participants: vec![uid(7), uid(8), uid(10), uid(11), uid(12)],
            project_id: Some(uid(101)),
        },
        ChatRoom {
            id: uid(302),
            name: "pune-software".to_string(),
            kind: RoomKind::Department,
            participants: vec![uid(4), uid(7), uid(8), uid(10), uid(11), uid(12)],
            project_id: None,
        },
        ChatRoom {
            id: uid(303),
            name: "pune-center".to_string(),
            kind: RoomKind::Center,
            participants: vec![uid(2), uid(4), uid(5), uid(7), uid(8)],
            project_id: None,
        },
        ChatRoom {
            id: uid(304),
            name: "priya-kavita".to_string(),
            kind: RoomKind::Private,
            participants: vec![uid(10), uid(8)],
            project_id: None,
        },
        ChatRoom {
            id: uid(305),
            name: "harbor-link".to_string(),
            kind: RoomKind::Project,
            participants: vec![uid(9), uid(13), uid(14)],
            project_id: Some(uid(103)),
        },
    ];

    Directory::new(users, projects, tasks, rooms)
}
