use anyhow::{bail, Context};
use serde::Deserialize;

/// How the stored `status` flag gates a successful login.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum StatusPolicy {
    /// Login succeeds only when `status == false`.
    #[default]
    ActiveWhenFalse,
    /// Login succeeds only when `status == true`.
    ActiveWhenTrue,
    /// The flag is not consulted.
    Ignore,
}

impl StatusPolicy {
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "false" => Ok(Self::ActiveWhenFalse),
            "true" => Ok(Self::ActiveWhenTrue),
            "any" => Ok(Self::Ignore),
            other => bail!("USER_STATUS_ACTIVE_WHEN must be one of false|true|any, got {other:?}"),
        }
    }

    pub fn allows(self, status: bool) -> bool {
        match self {
            Self::ActiveWhenFalse => !status,
            Self::ActiveWhenTrue => status,
            Self::Ignore => true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub key: String,
    pub issuer: String,
    pub audience: String,
    pub subject: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
    pub status_policy: StatusPolicy,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| -> anyhow::Result<String> {
            let value = lookup(name).with_context(|| format!("{name} is not set"))?;
            if value.trim().is_empty() {
                bail!("{name} is empty");
            }
            Ok(value)
        };

        let database_url = required("DATABASE_URL")?;
        let jwt = JwtConfig {
            key: required("JWT_KEY")?,
            issuer: required("JWT_ISSUER")?,
            audience: required("JWT_AUDIENCE")?,
            subject: required("JWT_SUBJECT")?,
        };
        let status_policy = match lookup("USER_STATUS_ACTIVE_WHEN") {
            Some(raw) => StatusPolicy::parse(&raw)?,
            None => StatusPolicy::default(),
        };

        Ok(Self {
            database_url,
            jwt,
            status_policy,
        })
    }
}
