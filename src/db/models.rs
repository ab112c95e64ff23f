use serde::{Deserialize, Serialize};
use std::fmt;

/// Built-in role granting read and write access to a single database.
pub const READ_WRITE_ROLE: &str = "readWrite";

/// A password held in memory only. `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

/// Username/password pair plus the database it authenticates against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: Secret,
    pub source: String,
}

impl Credentials {
    pub fn new(username: String, password: Secret, source: String) -> Self {
        Self {
            username,
            password,
            source,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleGrant {
    pub role: String,
    pub db: String,
}

/// Body of a `createUser` command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserSpec {
    #[serde(rename = "createUser")]
    pub user: String,
    pub pwd: Secret,
    pub roles: Vec<RoleGrant>,
}

impl UserSpec {
    /// A user holding `readWrite` on exactly `database` and nothing else.
    pub fn read_write(user: impl Into<String>, pwd: Secret, database: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            pwd,
            roles: vec![RoleGrant {
                role: READ_WRITE_ROLE.to_string(),
                db: database.into(),
            }],
        }
    }

    /// Database the grant is scoped to; the user is created there too.
    pub fn database(&self) -> &str {
        self.roles
            .first()
            .map(|grant| grant.db.as_str())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_write_spec_has_single_scoped_grant() {
        let spec = UserSpec::read_write("svc", Secret::new("pw123"), "orders");
        assert_eq!(
            spec.roles,
            vec![RoleGrant {
                role: "readWrite".to_string(),
                db: "orders".to_string(),
            }]
        );
        assert_eq!(spec.database(), "orders");
    }

    #[test]
    fn secret_debug_is_redacted() {
        let creds = Credentials::new("admin".into(), Secret::new("hunter2"), "admin".into());
        let rendered = format!("{creds:?}");
        assert!(rendered.contains("admin"));
        assert!(!rendered.contains("hunter2"));
    }
}
