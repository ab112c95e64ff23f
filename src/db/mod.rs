//! Database module: user-management seam and its MongoDB implementation.
//!
//! Layout:
//! - `admin.rs`: traits for authenticating and managing users
//! - `models.rs`: credentials, grants and the `createUser` body
//! - `mongo.rs`: driver-backed implementation of the traits

pub mod admin;
pub mod models;
pub mod mongo;

pub use admin::{AdminConnector, AdminSession};
pub use models::{Credentials, READ_WRITE_ROLE, RoleGrant, Secret, UserSpec};
pub use mongo::{MongoConnector, MongoSession};
