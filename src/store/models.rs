//! Task records and payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A stored task
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    pub id: i64,
    pub titulo: String,
    pub descricao: Option<String>,
    pub completa: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a task
#[derive(Debug, Clone, Deserialize)]
pub struct NewTask {
    #[serde(default)]
    pub titulo: String,
    pub descricao: Option<String>,
}

/// Partial payload for updating a task
///
/// Absent fields leave the stored value untouched. `descricao` is
/// double-wrapped so an explicit JSON `null` clears the stored value,
/// which a plain `Option` cannot distinguish from an absent field.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskChanges {
    pub titulo: Option<String>,
    #[serde(default, deserialize_with = "some_if_present")]
    pub descricao: Option<Option<String>>,
    pub completa: Option<bool>,
}

fn some_if_present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

impl TaskChanges {
    /// Fixed partial payload used by the mark-complete endpoints
    pub fn set_complete(completa: bool) -> Self {
        Self {
            completa: Some(completa),
            ..Self::default()
        }
    }
}
