use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::users::repo_types::{NewUser, User};

pub const SUCCESS_MESSAGE: &str = "Success";

/// Request body for user registration.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(alias = "Name")]
    pub name: String,
    #[serde(alias = "emailId", alias = "EmailId")]
    pub email: String,
    #[serde(alias = "userName", alias = "UserName")]
    pub username: String,
    #[serde(alias = "Password")]
    pub password: String,
}

impl From<RegisterRequest> for NewUser {
    fn from(req: RegisterRequest) -> Self {
        NewUser {
            name: req.name,
            email: req.email,
            username: req.username,
            password: req.password,
        }
    }
}

/// Login credentials, read from the query string or a urlencoded form.
#[derive(Debug, Default, Deserialize)]
pub struct LoginParams {
    #[serde(alias = "UserName", alias = "userName")]
    pub username: Option<String>,
    #[serde(alias = "Password")]
    pub password: Option<String>,
}

impl LoginParams {
    /// Fill fields missing here from `other`.
    pub fn or(self, other: LoginParams) -> LoginParams {
        LoginParams {
            username: self.username.or(other.username),
            password: self.password.or(other.password),
        }
    }
}

/// Public part of the user returned to the client.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub username: String,
    pub status: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<User> for PublicUser {
    fn from(u: User) -> Self {
        PublicUser {
            id: u.id,
            name: u.name,
            email: u.email,
            username: u.username,
            status: u.status,
            created_at: u.created_at,
        }
    }
}

/// Response envelope shared by every endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiEnvelope {
    pub status: u8,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_value: Option<Value>,
}

impl ApiEnvelope {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: 1,
            message: message.into(),
            token: None,
            response_value: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            status: 0,
            message: message.into(),
            token: None,
            response_value: None,
        }
    }

    pub fn with_token(mut self, token: String) -> Self {
        self.token = Some(token);
        self
    }

    pub fn with_value(mut self, value: impl Into<Value>) -> Self {
        self.response_value = Some(value.into());
        self
    }
}
