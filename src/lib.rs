pub mod config;
pub mod db;
pub mod error;
pub mod service;

pub use config::Config;
pub use error::{CreateUserFailure, ProvisionError};
pub use service::provision;
