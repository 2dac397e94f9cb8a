use serde::Serialize;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// One teacher record per user; `user_id` is unique.
#[derive(Debug, Serialize, FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    pub id: i64,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
}
