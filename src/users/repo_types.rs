use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// User record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,                   // assigned by the store
    pub name: String,
    pub email: String,
    pub username: String,           // unique
    #[serde(skip_serializing)]
    pub password_hash: String,      // Argon2 PHC string
    pub status: bool,
    pub created_at: OffsetDateTime,
}

/// Candidate user submitted for registration. The password is plaintext
/// until the store hashes it.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub username: String,
    pub password: String,
}
