use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Severity levels for recorded intents.
/// Controls retention policies and log filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Critical events: long-term retention, never auto-delete
    Critical,
    /// Important events: medium-term retention (default)
    Important,
    /// Noise events: aggressively trimmed
    Noise,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::Important => "important",
            Severity::Noise => "noise",
        }
    }
}

impl Default for Severity {
    fn default() -> Self {
        Severity::Important
    }
}

/// Trait for entities whose intended mutations end up in the intent log.
pub trait Loggable: Serialize + Send + Sync {
    /// The entity type name (e.g., "task", "project").
    /// This becomes the prefix in event names like "project.delete_requested".
    fn entity_type() -> &'static str;

    /// The subject id (usually the entity's primary key)
    fn subject_id(&self) -> Uuid;

    /// Severity level for records (defaults to Important)
    fn severity(&self) -> Severity {
        Severity::Important
    }
}
