use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RoomKind {
    Project,
    Department,
    Center,
    Private,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatRoom {
    pub id: Uuid,
    #[schema(example = "smart-metering")]
    pub name: String,
    pub kind: RoomKind,
    /// Ids of the participating principals.
    pub participants: Vec<Uuid>,
    /// Set for project rooms.
    pub project_id: Option<Uuid>,
}
