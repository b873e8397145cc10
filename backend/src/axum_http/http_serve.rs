use crate::{
    axum_http::{default_routers, routers},
    config::config_model::DotEnvyConfig,
};
use anyhow::Result;
use axum::{
    Router,
    http::{Method, StatusCode, header::CONTENT_TYPE},
    routing::get,
};
use darraa_pay_core::infra::db::postgres::postgres_connection::PgPoolSquad;
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{info, warn};

pub fn build_router(config: &DotEnvyConfig, db_pool: Arc<PgPoolSquad>) -> Result<Router> {
    let service_name: Arc<str> = Arc::from(config.service_name.as_str());

    let mut app = Router::new()
        .fallback(default_routers::not_found)
        .route("/", get(default_routers::service_info).with_state(service_name))
        .nest("/payments", routers::payments::routes(Arc::clone(&db_pool)))
        .nest(
            "/webhooks",
            routers::webhooks::routes(Arc::clone(&db_pool), &config.webhooks),
        )
        .nest("/docs", routers::docs::routes());

    // The simulator is never mounted in production, whatever else is configured.
    match (config.stage.is_production(), config.dev_simulator.secret.as_deref()) {
        (true, _) => info!(stage = %config.stage, "Webhook simulator disabled"),
        (false, None) => warn!(
            stage = %config.stage,
            "DEV_WEBHOOK_SECRET is not set; webhook simulator disabled"
        ),
        (false, Some(dev_secret)) => {
            warn!(stage = %config.stage, "Webhook simulator enabled at /simulate/webhook");
            app = app.nest(
                "/simulate",
                routers::simulate::routes(Arc::clone(&db_pool), dev_secret),
            );
        }
    }

    let app = app
        .layer(timeout_layer(Duration::from_secs(config.server.timeout)))
        .layer(RequestBodyLimitLayer::new(
            (config.server.body_limit * 1024 * 1024).try_into()?,
        ))
        .layer(
            CorsLayer::new()
                .allow_methods([Method::GET, Method::POST])
                .allow_headers([CONTENT_TYPE])
                .allow_origin(Any),
        )
        .layer(TraceLayer::new_for_http());

    Ok(app)
}

/// Requests still running after `timeout` are answered with 408.
fn timeout_layer(timeout: Duration) -> TimeoutLayer {
    TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, timeout)
}

pub async fn start(config: Arc<DotEnvyConfig>, db_pool: Arc<PgPoolSquad>) -> Result<()> {
    let app = build_router(&config, db_pool)?;

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    let listener = TcpListener::bind(addr).await?;

    info!("Server is running on port {}", config.server.port);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "Failed to install CTRL+C signal handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                warn!(error = %err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received ctrl+C signal"),
        _ = terminate => info!("Received terminate signal"),
    }
}
