//! Environment-driven configuration.
//!
//! Every value is read from `MONGO_*` variables (optionally seeded from a
//! `.env` file by the binary). The five credential values have no defaults;
//! connection tunables do.

use crate::db::models::{Credentials, Secret};
use crate::error::ProvisionError;
use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;
use url::Url;

pub const ENV_PREFIX: &str = "MONGO_";

/// Keys whose values are taken verbatim from the environment. figment would
/// otherwise type `0123` as a number or `[a,b]` as an array.
const TEXT_KEYS: [&str; 7] = [
    "root_username",
    "root_password",
    "app_user",
    "app_password",
    "initdb_database",
    "domain",
    "auth_source",
];

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub root_username: String,
    pub root_password: Secret,
    pub app_user: String,
    pub app_password: Secret,
    #[serde(rename = "initdb_database")]
    pub database: String,

    #[serde(flatten)]
    pub connection: ConnectionConfig,
}

/// Connection tunables; all optional.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConnectionConfig {
    pub domain: String,
    pub port: u16,
    pub auth_source: String,
    pub timeout_secs: u64,
    pub verify_app_user: bool,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            domain: "localhost".to_string(),
            port: 27017,
            auth_source: "admin".to_string(),
            timeout_secs: 10,
            verify_app_user: false,
        }
    }
}

impl ConnectionConfig {
    /// Base `mongodb://host:port/` URI; credentials are attached separately.
    pub fn server_uri(&self) -> Result<Url, ProvisionError> {
        let uri = Url::parse(&format!("mongodb://{}:{}/", self.domain, self.port))?;
        if uri.host_str().is_none_or(str::is_empty) {
            return Err(url::ParseError::EmptyHost.into());
        }
        Ok(uri)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(ConnectionConfig::default()))
            .merge(Env::prefixed(ENV_PREFIX).ignore(&TEXT_KEYS))
            .merge(Serialized::defaults(raw_text_values()))
    }

    /// Read and validate configuration from the process environment.
    pub fn load() -> Result<Self, ProvisionError> {
        Self::from_figment(Self::figment())
    }

    pub fn from_figment(figment: Figment) -> Result<Self, ProvisionError> {
        check_root_credentials(&figment)?;
        let cfg: Config = figment.extract()?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<(), ProvisionError> {
        let required = [
            ("MONGO_APP_USER", self.app_user.as_str()),
            ("MONGO_APP_PASSWORD", self.app_password.expose()),
            ("MONGO_INITDB_DATABASE", self.database.as_str()),
        ];
        match required.into_iter().find(|(_, v)| v.is_empty()) {
            Some((name, _)) => Err(ProvisionError::EmptyValue(name)),
            None => Ok(()),
        }
    }

    pub fn root_credentials(&self) -> Credentials {
        Credentials::new(
            self.root_username.clone(),
            self.root_password.clone(),
            self.connection.auth_source.clone(),
        )
    }

    /// The new user authenticates against the database it is created in.
    pub fn app_credentials(&self) -> Credentials {
        Credentials::new(
            self.app_user.clone(),
            self.app_password.clone(),
            self.database.clone(),
        )
    }
}

/// Untyped `MONGO_*` values for [`TEXT_KEYS`], keyed like figment's `Env`.
fn raw_text_values() -> BTreeMap<String, String> {
    Env::prefixed(ENV_PREFIX)
        .only(&TEXT_KEYS)
        .iter()
        .map(|(key, value)| (key.as_str().to_ascii_lowercase(), value))
        .collect()
}

/// Missing or empty root credentials cannot authenticate.
fn check_root_credentials(figment: &Figment) -> Result<(), ProvisionError> {
    let present = |key| {
        figment
            .extract_inner::<String>(key)
            .ok()
            .filter(|v| !v.is_empty())
    };
    let username = present("root_username");
    let missing = match (&username, present("root_password")) {
        (None, _) => "MONGO_ROOT_USERNAME",
        (Some(_), None) => "MONGO_ROOT_PASSWORD",
        (Some(_), Some(_)) => return Ok(()),
    };
    Err(ProvisionError::Authentication {
        username: username.unwrap_or_default(),
        reason: format!("{missing} is not set"),
    })
}

/// Fallback log filter when `RUST_LOG` is unset.
pub fn loglevel() -> String {
    Figment::from(Env::raw().only(&["loglevel"]))
        .extract_inner::<String>("loglevel")
        .unwrap_or_else(|_| "info".to_string())
}
