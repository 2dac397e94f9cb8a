use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::FromRow;

/// Stored as TEXT. "PRESENCIAL" is the tag the old clients send for
/// in-person lessons; it deserializes to the same variant.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Modality {
    #[sqlx(rename = "ONLINE")]
    Online,
    #[serde(alias = "PRESENCIAL")]
    #[sqlx(rename = "IN_PERSON")]
    InPerson,
}

/// A scheduled meeting between one student and one teacher. The
/// date-time is a zoneless local timestamp, exactly as received.
#[derive(Debug, Serialize, FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub id: i64,
    pub student_id: i64,
    pub teacher_id: i64,
    pub date_time: NaiveDateTime,
    pub modality: Modality,
    pub created_at: DateTime<Utc>,
}

/// Insert payload; the id comes back from the database.
pub struct NewLesson {
    pub student_id: i64,
    pub teacher_id: i64,
    pub date_time: NaiveDateTime,
    pub modality: Modality,
}
