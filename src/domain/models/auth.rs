use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::domain::models::user::Role;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub iss: String,
    /// The caller's e-mail; every handler resolves identity from this.
    pub sub: String,
    pub aud: String,
    pub exp: usize,
    pub iat: usize,
    pub jti: String,

    #[serde(rename = "https://scheduling.app/claims/role")]
    pub role: Role,

    #[serde(rename = "https://scheduling.app/claims/csrf")]
    pub csrf_token: String,
}

/// The typed authenticated principal the `AuthUser` extractor hands to
/// handlers. Role checks happen in the API layer against this value.
#[derive(Debug, Clone)]
pub struct Principal {
    pub email: String,
    pub role: Role,
}

#[derive(Debug, FromRow)]
pub struct RefreshTokenRecord {
    pub token_hash: String,
    pub user_id: i64,
    pub family_id: String,
    pub generation_id: i32,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize)]
pub struct AuthResponse {
    pub csrf_token: String,
    pub user: UserProfile,
}

#[derive(Serialize)]
pub struct UserProfile {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
}
