use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;

/// A user-submitted reference. Immutable once created.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Link {
    pub id: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub description: String,
    pub url: String,
}
