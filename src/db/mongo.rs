use crate::config::ConnectionConfig;
use crate::db::admin::{AdminConnector, AdminSession};
use crate::db::models::{Credentials, UserSpec};
use crate::error::{CreateUserFailure, ProvisionError};
use mongodb::Client;
use mongodb::bson::{self, Document, doc};
use mongodb::error::{Error as MongoError, ErrorKind};
use mongodb::options::{ClientOptions, Credential};
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

const APP_NAME: &str = "mongo-provision";

/// MongoDB driver backed connector.
pub struct MongoConnector {
    uri: Url,
    timeout: Duration,
}

impl MongoConnector {
    pub fn new(conn: &ConnectionConfig) -> Result<Self, ProvisionError> {
        Ok(Self {
            uri: conn.server_uri()?,
            timeout: conn.timeout(),
        })
    }

    /// Build a client for `creds` and force the handshake with a ping
    /// against their authentication database.
    async fn ping_as(&self, creds: &Credentials) -> Result<Client, MongoError> {
        let mut options = ClientOptions::parse(self.uri.as_str()).await?;
        options.app_name = Some(APP_NAME.to_string());
        options.connect_timeout = Some(self.timeout);
        options.server_selection_timeout = Some(self.timeout);
        options.credential = Some(
            Credential::builder()
                .username(creds.username.clone())
                .password(creds.password.expose().to_string())
                .source(creds.source.clone())
                .build(),
        );

        let client = Client::with_options(options)?;
        client
            .database(&creds.source)
            .run_command(doc! { "ping": 1 })
            .await?;
        Ok(client)
    }
}

impl AdminConnector for MongoConnector {
    type Session = MongoSession;

    async fn authenticate(&self, root: &Credentials) -> Result<MongoSession, ProvisionError> {
        let client = self
            .ping_as(root)
            .await
            .map_err(|e| ProvisionError::Authentication {
                username: root.username.clone(),
                reason: e.to_string(),
            })?;
        info!(
            host = self.uri.host_str().unwrap_or_default(),
            port = self.uri.port().unwrap_or_default(),
            username = %root.username,
            auth_source = %root.source,
            "Connected to MongoDB as administrator"
        );
        Ok(MongoSession { client })
    }

    async fn verify_login(&self, user: &Credentials) -> Result<(), ProvisionError> {
        let client = self
            .ping_as(user)
            .await
            .map_err(|e| ProvisionError::Verification {
                username: user.username.clone(),
                reason: e.to_string(),
            })?;
        client.shutdown().await;
        Ok(())
    }
}

/// Administrative session holding an authenticated client.
pub struct MongoSession {
    client: Client,
}

impl AdminSession for MongoSession {
    async fn create_user(&self, spec: &UserSpec) -> Result<(), ProvisionError> {
        let fail = |reason| ProvisionError::UserCreation {
            username: spec.user.clone(),
            database: spec.database().to_string(),
            reason,
        };

        let command = create_user_command(spec)
            .map_err(|e| fail(CreateUserFailure::Rejected(e.to_string())))?;
        let reply = self
            .client
            .database(spec.database())
            .run_command(command)
            .await
            .map_err(|e| fail(classify(&e)))?;
        debug!(reply = %reply, "createUser acknowledged");
        Ok(())
    }

    async fn close(self) {
        self.client.shutdown().await;
    }
}

fn create_user_command(spec: &UserSpec) -> Result<Document, bson::ser::Error> {
    bson::to_document(spec)
}

fn classify(e: &MongoError) -> CreateUserFailure {
    match e.kind.as_ref() {
        ErrorKind::Command(cmd) => CreateUserFailure::from_server_code(cmd.code, cmd.message.clone()),
        _ => CreateUserFailure::Rejected(e.to_string()),
    }
}
