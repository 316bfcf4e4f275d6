use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT payload issued on login.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    pub sub: String,   // configured subject, not the user
    pub jti: Uuid,     // unique per token
    pub iat: i64,      // issued at (unix seconds)
    pub exp: i64,      // expires at (unix seconds)
    pub iss: String,
    pub aud: String,
    #[serde(rename = "Id")]
    pub id: Uuid,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Email")]
    pub email: String,
}
