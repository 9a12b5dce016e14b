use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;

/// A remark attached to exactly one Link. `link_id` always references an
/// existing row; the constraint lives in the database.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub body: String,
    pub link_id: i64,
}
