use crate::config::Config;
use crate::db::admin::{AdminConnector, AdminSession};
use crate::db::models::UserSpec;
use crate::error::ProvisionError;
use tracing::{info, warn};

/// Authenticate as the root account, then create the application user with
/// `readWrite` on the configured database.
///
/// The first failure aborts the run; nothing is retried.
pub async fn provision<C: AdminConnector>(connector: &C, cfg: &Config) -> Result<(), ProvisionError> {
    let root = cfg.root_credentials();
    let session = connector.authenticate(&root).await?;

    let spec = UserSpec::read_write(cfg.app_user.clone(), cfg.app_password.clone(), cfg.database.clone());
    let created = session.create_user(&spec).await;
    session.close().await;
    created?;

    info!(
        username = %spec.user,
        database = %spec.database(),
        role = %crate::db::READ_WRITE_ROLE,
        "Application user created"
    );

    if cfg.connection.verify_app_user {
        let app = cfg.app_credentials();
        connector.verify_login(&app).await.inspect_err(|e| {
            warn!(username = %app.username, error = %e, "new user could not log in");
        })?;
        info!(username = %app.username, "Application user login verified");
    }

    Ok(())
}
