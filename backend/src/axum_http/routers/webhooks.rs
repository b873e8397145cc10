use crate::{
    config::config_model::WebhookSecrets,
    usecases::{
        payments::PaymentError,
        webhooks::{WebhookOutcome, WebhookUseCase},
    },
};
use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
};
use darraa_pay_core::{
    domain::{
        repositories::payments::PaymentRepository,
        value_objects::enums::payment_providers::PaymentProvider,
    },
    infra::db::{
        postgres::postgres_connection::PgPoolSquad, repositories::payments::PaymentPostgres,
    },
};
use std::sync::Arc;
use tracing::info;

/// Everything one provider route needs: which provider it speaks for and the
/// secret that provider signs with.
pub struct ProviderWebhookState<T>
where
    T: PaymentRepository + Send + Sync,
{
    usecase: Arc<WebhookUseCase<T>>,
    provider: PaymentProvider,
    secret: Arc<str>,
}

impl<T> Clone for ProviderWebhookState<T>
where
    T: PaymentRepository + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            usecase: Arc::clone(&self.usecase),
            provider: self.provider,
            secret: Arc::clone(&self.secret),
        }
    }
}

pub fn routes(db_pool: Arc<PgPoolSquad>, secrets: &WebhookSecrets) -> Router {
    let payment_repository = PaymentPostgres::new(db_pool);
    let webhook_usecase = WebhookUseCase::new(Arc::new(payment_repository));

    router(Arc::new(webhook_usecase), secrets)
}

/// One `POST /<provider>` route per known provider, all served by the same handler.
pub fn router<T>(webhook_usecase: Arc<WebhookUseCase<T>>, secrets: &WebhookSecrets) -> Router
where
    T: PaymentRepository + Send + Sync + 'static,
{
    PaymentProvider::ALL
        .into_iter()
        .fold(Router::new(), |router, provider| {
            let state = ProviderWebhookState {
                usecase: Arc::clone(&webhook_usecase),
                provider,
                secret: Arc::from(secrets.secret_for(provider)),
            };
            router.route(
                &format!("/{}", provider),
                post(handle_provider_webhook::<T>).with_state(state),
            )
        })
}

/// Takes the body as raw bytes: the signature covers exactly what was sent.
pub async fn handle_provider_webhook<T>(
    State(state): State<ProviderWebhookState<T>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, PaymentError>
where
    T: PaymentRepository + Send + Sync,
{
    info!(
        provider = %state.provider,
        body_len = body.len(),
        "webhooks: notification received"
    );

    let signature = headers
        .get(state.provider.signature_header())
        .and_then(|value| value.to_str().ok());

    let outcome = state
        .usecase
        .handle_provider_webhook(state.provider, &state.secret, &body, signature)
        .await?;

    if outcome == WebhookOutcome::NoMatchingPayment {
        info!(provider = %state.provider, "webhooks: acknowledged without update");
    }

    Ok((StatusCode::OK, "OK").into_response())
}
