use anyhow::Result;
use darraa_pay_backend::{axum_http::http_serve, config::config_loader};
use darraa_pay_core::infra::db::postgres::postgres_connection;
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        error!("Backend exited with error: {:#}", error);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    darraa_pay_core::observability::init_observability("backend")?;

    let dotenvy_env = config_loader::load()?;
    info!(stage = %dotenvy_env.stage, "ENV has been loaded");

    let postgres_pool = Arc::new(postgres_connection::establish_connection(
        &dotenvy_env.database.url,
    )?);
    info!("Postgres connection has been established");

    http_serve::start(Arc::new(dotenvy_env), Arc::clone(&postgres_pool)).await?;

    drop(postgres_pool);
    info!("Postgres pool has been released");

    Ok(())
}
