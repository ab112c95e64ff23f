use crate::db::models::{Credentials, UserSpec};
use crate::error::ProvisionError;
use std::future::Future;

/// Opens administrative sessions against a database server.
pub trait AdminConnector: Sync {
    type Session: AdminSession;

    /// Perform the credential handshake. The returned session is the only
    /// way to reach user management, so an unauthenticated session never
    /// exists.
    fn authenticate(
        &self,
        root: &Credentials,
    ) -> impl Future<Output = Result<Self::Session, ProvisionError>> + Send;

    /// Log in with the given credentials and ping their database.
    fn verify_login(
        &self,
        user: &Credentials,
    ) -> impl Future<Output = Result<(), ProvisionError>> + Send;
}

/// An authenticated administrative session.
pub trait AdminSession: Send {
    fn create_user(
        &self,
        spec: &UserSpec,
    ) -> impl Future<Output = Result<(), ProvisionError>> + Send;

    fn close(self) -> impl Future<Output = ()> + Send
    where
        Self: Sized,
    {
        async {}
    }
}
