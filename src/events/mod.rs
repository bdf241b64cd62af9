use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;

pub mod loggable;
pub use loggable::{Loggable, Severity};

#[derive(Debug, Clone, Serialize)]
pub struct DomainEvent {
    pub name: String,
    pub actor_id: Option<Uuid>,
    pub subject_id: Option<Uuid>,
    pub payload: Value,
    pub severity: Severity,
}

impl DomainEvent {
    pub fn new(
        name: impl Into<String>,
        actor_id: Option<Uuid>,
        subject_id: Option<Uuid>,
        payload: Value,
    ) -> Self {
        Self {
            name: name.into(),
            actor_id,
            subject_id,
            payload,
            severity: Severity::default(),
        }
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

/// Request context captured alongside an intent (IP, User-Agent).
#[derive(Debug, Clone, Default, Serialize, ToSchema)]
pub struct RequestContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl RequestContext {
    pub fn from_headers(headers: &axum::http::HeaderMap) -> Self {
        let ip = headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .map(|s| s.split(',').next().unwrap_or(s).trim().to_string());

        let user_agent = headers
            .get(axum::http::header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        Self { ip, user_agent }
    }
}

/// A recorded intended mutation. The directory itself is never modified;
/// the chain of records is the full mutation history of a session.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct IntentRecord {
    pub id: Uuid,
    #[schema(example = "project.create_requested")]
    pub event_name: String,
    pub actor_id: Option<Uuid>,
    pub subject_id: Option<Uuid>,
    pub occurred_at: DateTime<Utc>,
    #[schema(value_type = Object)]
    pub payload: Value,
    pub severity: Severity,
    pub context: RequestContext,
    /// Hash of the previous record, None for the first record.
    pub prev_hash: Option<String>,
    /// SHA256(prev_hash || payload), hex encoded.
    pub hash: String,
}

/// Append-only, hash-chained in-memory log of intended mutations.
#[derive(Debug, Default)]
pub struct IntentLog {
    records: RwLock<Vec<IntentRecord>>,
}

impl IntentLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&self, event: DomainEvent, context: RequestContext) -> IntentRecord {
        let payload_str = event.payload.to_string();

        let mut records = self.records.write().expect("intent log lock poisoned");
        let prev_hash = records.last().map(|record| record.hash.clone());

        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        if let Some(ref prev) = prev_hash {
            hasher.update(prev.as_bytes());
        }
        hasher.update(payload_str.as_bytes());
        let hash = hex::encode(hasher.finalize());

        let record = IntentRecord {
            id: Uuid::new_v4(),
            event_name: event.name,
            actor_id: event.actor_id,
            subject_id: event.subject_id,
            occurred_at: Utc::now(),
            payload: event.payload,
            severity: event.severity,
            context,
            prev_hash,
            hash,
        };

        tracing::info!(
            event = %record.event_name,
            actor = ?record.actor_id,
            severity = record.severity.as_str(),
            "recorded intended mutation"
        );

        records.push(record.clone());
        record
    }

    pub fn all(&self) -> Vec<IntentRecord> {
        self.records.read().expect("intent log lock poisoned").clone()
    }

    pub fn len(&self) -> usize {
        self.records.read().expect("intent log lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn records_chain_hashes() {
        let log = IntentLog::new();
        let first = log.append(
            DomainEvent::new("project.create_requested", None, None, json!({"n": 1})),
            RequestContext::default(),
        );
        let second = log.append(
            DomainEvent::new("project.delete_requested", None, None, json!({"n": 2})),
            RequestContext::default(),
        );

        assert!(first.prev_hash.is_none());
        assert_eq!(second.prev_hash.as_deref(), Some(first.hash.as_str()));
        assert_eq!(log.len(), 2);
    }
}
