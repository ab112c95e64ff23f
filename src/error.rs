use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum ProvisionError {
    #[error("Configuration error: {0}")]
    Config(#[from] Box<figment::Error>),

    #[error("Required environment variable {0} is empty")]
    EmptyValue(&'static str),

    #[error("URL parse error: {0}")]
    InvalidUri(#[from] url::ParseError),

    #[error("Authentication as '{username}' failed: {reason}")]
    Authentication { username: String, reason: String },

    #[error("Creating user '{username}' on database '{database}' failed: {reason}")]
    UserCreation {
        username: String,
        database: String,
        reason: CreateUserFailure,
    },

    #[error("Login check for '{username}' failed: {reason}")]
    Verification { username: String, reason: String },
}

impl From<figment::Error> for ProvisionError {
    fn from(e: figment::Error) -> Self {
        ProvisionError::Config(Box::new(e))
    }
}

/// Why the server refused a `createUser` request.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum CreateUserFailure {
    #[error("user already exists")]
    AlreadyExists,

    #[error("session is not authorized to create users")]
    Unauthorized,

    #[error("invalid database name")]
    InvalidDatabase,

    #[error("{0}")]
    Rejected(String),
}

impl CreateUserFailure {
    // Server error codes: 51003 DuplicateKey on the user document,
    // 13 Unauthorized, 73 InvalidNamespace.
    pub fn from_server_code(code: i32, message: impl Into<String>) -> Self {
        match code {
            51003 => CreateUserFailure::AlreadyExists,
            13 => CreateUserFailure::Unauthorized,
            73 => CreateUserFailure::InvalidDatabase,
            _ => CreateUserFailure::Rejected(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_known_server_codes() {
        assert_eq!(
            CreateUserFailure::from_server_code(51003, "User \"svc@orders\" already exists"),
            CreateUserFailure::AlreadyExists
        );
        assert_eq!(
            CreateUserFailure::from_server_code(13, "not authorized on orders"),
            CreateUserFailure::Unauthorized
        );
        assert_eq!(
            CreateUserFailure::from_server_code(73, "Invalid database name: ''"),
            CreateUserFailure::InvalidDatabase
        );
    }

    #[test]
    fn unknown_codes_keep_server_message() {
        let failure = CreateUserFailure::from_server_code(2, "bad role");
        assert_eq!(failure, CreateUserFailure::Rejected("bad role".to_string()));
        assert_eq!(failure.to_string(), "bad role");
    }
}
