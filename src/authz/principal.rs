use uuid::Uuid;

use crate::models::user::{DirectoryUser, User};

use super::Role;

/// Principal is the resolver's view of the authenticated user: the identity
/// and scoping fields every access decision is made from.
///
/// `role` is `None` when the directory record carries no recognized role;
/// every resolver operation treats that as deny.
#[derive(Debug, Clone)]
pub struct Principal {
    pub id: Uuid,
    pub role: Option<Role>,
    pub center: Option<String>,
    pub department: Option<String>,
    pub reports_to: Option<Uuid>,
}

impl Principal {
    pub fn new(id: Uuid, role: Option<Role>) -> Self {
        Self {
            id,
            role,
            center: None,
            department: None,
            reports_to: None,
        }
    }

    pub fn with_center(mut self, center: impl Into<String>) -> Self {
        self.center = Some(center.into());
        self
    }

    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    pub fn with_reports_to(mut self, supervisor: Uuid) -> Self {
        self.reports_to = Some(supervisor);
        self
    }

    /// True iff the principal has a center and it equals `center`.
    pub fn in_center(&self, center: &str) -> bool {
        self.center.as_deref() == Some(center)
    }

    /// True iff the principal has a department and it equals `department`.
    pub fn in_department(&self, department: &str) -> bool {
        self.department.as_deref() == Some(department)
    }
}

impl From<&DirectoryUser> for Principal {
    fn from(user: &DirectoryUser) -> Self {
        Self {
            id: user.id,
            role: user.role,
            center: user.center.clone(),
            department: user.department.clone(),
            reports_to: user.reports_to,
        }
    }
}

impl From<&User> for Principal {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            role: user.role,
            center: user.center.clone(),
            department: user.department.clone(),
            reports_to: user.reports_to,
        }
    }
}
