use crate::usecases::{payments::PaymentError, webhooks::WebhookUseCase};
use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::post,
};
use darraa_pay_core::{
    domain::{
        repositories::payments::PaymentRepository,
        value_objects::webhooks::{SimulateWebhookRequest, SimulateWebhookResponse},
    },
    infra::db::{
        postgres::postgres_connection::PgPoolSquad, repositories::payments::PaymentPostgres,
    },
};
use std::sync::Arc;

// Run example (non-production only)
//   curl -X POST "http://localhost:$SERVER_PORT/simulate/webhook" \
//     -H "Content-Type: application/json" \
//     -d '{"secret":"'"$DEV_WEBHOOK_SECRET"'","provider":"bankily","merchantRef":"BK-1718000000000","status":"success"}'

pub struct SimulateRouteState<T>
where
    T: PaymentRepository + Send + Sync,
{
    usecase: Arc<WebhookUseCase<T>>,
    dev_secret: Arc<str>,
}

impl<T> Clone for SimulateRouteState<T>
where
    T: PaymentRepository + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            usecase: Arc::clone(&self.usecase),
            dev_secret: Arc::clone(&self.dev_secret),
        }
    }
}

pub fn routes(db_pool: Arc<PgPoolSquad>, dev_secret: &str) -> Router {
    let payment_repository = PaymentPostgres::new(db_pool);
    let webhook_usecase = WebhookUseCase::new(Arc::new(payment_repository));

    router(Arc::new(webhook_usecase), dev_secret)
}

pub fn router<T>(webhook_usecase: Arc<WebhookUseCase<T>>, dev_secret: &str) -> Router
where
    T: PaymentRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/webhook", post(simulate_webhook::<T>))
        .with_state(SimulateRouteState {
            usecase: webhook_usecase,
            dev_secret: Arc::from(dev_secret),
        })
}

pub async fn simulate_webhook<T>(
    State(state): State<SimulateRouteState<T>>,
    payload: Result<Json<SimulateWebhookRequest>, JsonRejection>,
) -> Result<Json<SimulateWebhookResponse>, PaymentError>
where
    T: PaymentRepository + Send + Sync,
{
    let Json(request) = payload?;
    let response = state.usecase.simulate(&state.dev_secret, request).await?;
    Ok(Json(response))
}
