use mimalloc::MiMalloc;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(mongo_provision::config::loglevel()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    let cfg = mongo_provision::Config::load().inspect_err(|e| error!(error = %e))?;

    info!(
        domain = %cfg.connection.domain,
        port = cfg.connection.port,
        auth_source = %cfg.connection.auth_source,
        root_username = %cfg.root_username,
        app_user = %cfg.app_user,
        database = %cfg.database,
    );

    let connector = mongo_provision::db::MongoConnector::new(&cfg.connection)?;
    mongo_provision::provision(&connector, &cfg)
        .await
        .inspect_err(|e| error!(error = %e, "provisioning failed"))?;

    Ok(())
}
