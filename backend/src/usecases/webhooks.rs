use std::sync::Arc;

use darraa_pay_core::{
    domain::{
        repositories::payments::PaymentRepository,
        value_objects::{
            enums::{payment_providers::PaymentProvider, payment_statuses::PaymentStatus},
            webhooks::{ProviderWebhookPayload, SimulateWebhookRequest, SimulateWebhookResponse},
        },
    },
    payments::webhook_signature::verify_webhook_signature,
};
use tracing::{debug, info, warn};

use super::payments::{PaymentError, UseCaseResult};

/// What an authenticated provider webhook did to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookOutcome {
    Updated,
    NoMatchingPayment,
}

pub struct WebhookUseCase<T>
where
    T: PaymentRepository + Send + Sync,
{
    payment_repo: Arc<T>,
}

impl<T> WebhookUseCase<T>
where
    T: PaymentRepository + Send + Sync,
{
    pub fn new(payment_repo: Arc<T>) -> Self {
        Self { payment_repo }
    }

    /// Authenticates `payload` with the provider's secret, then applies the
    /// reported status. Nothing is read or written unless the signature matches.
    pub async fn handle_provider_webhook(
        &self,
        provider: PaymentProvider,
        secret: &str,
        payload: &[u8],
        signature: Option<&str>,
    ) -> UseCaseResult<WebhookOutcome> {
        verify_webhook_signature(secret, payload, signature).map_err(|err| {
            warn!(
                provider = %provider,
                error = %err,
                "webhooks: signature verification failed"
            );
            PaymentError::Authentication("Invalid signature".to_string())
        })?;

        let webhook: ProviderWebhookPayload = serde_json::from_slice(payload).map_err(|err| {
            warn!(provider = %provider, error = %err, "webhooks: undecodable payload");
            PaymentError::Validation("Invalid webhook payload".to_string())
        })?;

        let Some(status_update) = webhook.to_status_update(provider) else {
            warn!(provider = %provider, "webhooks: payload without merchantRef ignored");
            return Ok(WebhookOutcome::NoMatchingPayment);
        };

        debug!(
            provider = %provider,
            merchant_ref = %status_update.merchant_ref,
            status = %status_update.status,
            "webhooks: applying status"
        );

        let merchant_ref = status_update.merchant_ref.clone();
        let status = status_update.status.clone();
        let affected = self.payment_repo.apply_webhook_status(status_update).await?;

        if affected == 0 {
            // Providers get a 200 either way; only the log tells the two apart.
            warn!(
                provider = %provider,
                merchant_ref = %merchant_ref,
                "webhooks: no payment matches merchantRef"
            );
            return Ok(WebhookOutcome::NoMatchingPayment);
        }

        info!(
            provider = %provider,
            merchant_ref = %merchant_ref,
            status = %status,
            affected,
            "webhooks: payment status updated"
        );
        Ok(WebhookOutcome::Updated)
    }

    /// Development-only stand-in for a provider callback, authenticated by a
    /// plain shared secret instead of an HMAC.
    pub async fn simulate(
        &self,
        dev_secret: &str,
        request: SimulateWebhookRequest,
    ) -> UseCaseResult<SimulateWebhookResponse> {
        if request.secret.as_deref() != Some(dev_secret) {
            warn!("simulate: invalid dev secret");
            return Err(PaymentError::Authentication("Invalid dev secret".to_string()));
        }

        let provider = request
            .provider
            .as_deref()
            .and_then(|raw| raw.parse::<PaymentProvider>().ok())
            .ok_or_else(|| PaymentError::Validation("Unknown provider".to_string()))?;

        let status = match request.status.as_deref() {
            Some("success") => PaymentStatus::Success,
            Some("failed") => PaymentStatus::Failed,
            _ => return Err(PaymentError::Validation("Invalid status".to_string())),
        };

        let merchant_ref = request
            .merchant_ref
            .filter(|value| !value.is_empty())
            .ok_or_else(|| PaymentError::Validation("merchantRef is required".to_string()))?;

        let payment_id = self
            .payment_repo
            .set_status_by_provider_ref(
                provider.to_string(),
                merchant_ref.clone(),
                status.to_string(),
            )
            .await?
            .ok_or_else(|| PaymentError::NotFound("Payment not found".to_string()))?;

        info!(
            %payment_id,
            provider = %provider,
            merchant_ref = %merchant_ref,
            status = %status,
            "simulate: payment status updated"
        );

        Ok(SimulateWebhookResponse {
            ok: true,
            payment_id,
            provider,
            merchant_ref,
            status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use darraa_pay_core::{
        domain::{
            entities::payments::WebhookStatusUpdateEntity,
            repositories::payments::MockPaymentRepository,
        },
        payments::webhook_signature::sign_payload,
    };
    use mockall::predicate::eq;
    use uuid::Uuid;

    const SECRET: &str = "bankily-secret";
    const DEV_SECRET: &str = "dev-secret";

    fn signed(body: &str) -> (Vec<u8>, String) {
        let signature = sign_payload(SECRET, body.as_bytes()).unwrap();
        (body.as_bytes().to_vec(), signature)
    }

    fn simulate_request(provider: &str, status: &str) -> SimulateWebhookRequest {
        SimulateWebhookRequest {
            secret: Some(DEV_SECRET.to_string()),
            provider: Some(provider.to_string()),
            merchant_ref: Some("SD-1".to_string()),
            status: Some(status.to_string()),
        }
    }

    #[tokio::test]
    async fn signed_success_webhook_marks_payment_success() {
        let (body, signature) = signed(r#"{"merchantRef":"BK-1","status":"success"}"#);

        let mut payment_repo = MockPaymentRepository::new();
        payment_repo
            .expect_apply_webhook_status()
            .with(eq(WebhookStatusUpdateEntity {
                provider: "bankily".to_string(),
                merchant_ref: "BK-1".to_string(),
                status: "success".to_string(),
                provider_ref: "BK-1".to_string(),
            }))
            .times(1)
            .returning(|_| Ok(1));

        let usecase = WebhookUseCase::new(Arc::new(payment_repo));
        let outcome = usecase
            .handle_provider_webhook(PaymentProvider::Bankily, SECRET, &body, Some(&signature))
            .await
            .unwrap();

        assert_eq!(outcome, WebhookOutcome::Updated);
    }

    #[tokio::test]
    async fn other_statuses_mark_payment_failed() {
        let (body, signature) =
            signed(r#"{"merchantRef":"BK-1","status":"declined","providerRef":"TX-7"}"#);

        let mut payment_repo = MockPaymentRepository::new();
        payment_repo
            .expect_apply_webhook_status()
            .withf(|update| update.status == "failed" && update.provider_ref == "TX-7")
            .times(1)
            .returning(|_| Ok(1));

        let usecase = WebhookUseCase::new(Arc::new(payment_repo));
        let outcome = usecase
            .handle_provider_webhook(PaymentProvider::Bankily, SECRET, &body, Some(&signature))
            .await
            .unwrap();

        assert_eq!(outcome, WebhookOutcome::Updated);
    }

    #[tokio::test]
    async fn signed_webhook_with_numeric_provider_ref_is_applied() {
        let (body, signature) =
            signed(r#"{"merchantRef":"BK-1","status":"success","providerRef":987654}"#);

        let mut payment_repo = MockPaymentRepository::new();
        payment_repo
            .expect_apply_webhook_status()
            .with(eq(WebhookStatusUpdateEntity {
                provider: "bankily".to_string(),
                merchant_ref: "BK-1".to_string(),
                status: "success".to_string(),
                provider_ref: "987654".to_string(),
            }))
            .times(1)
            .returning(|_| Ok(1));

        let usecase = WebhookUseCase::new(Arc::new(payment_repo));
        let outcome = usecase
            .handle_provider_webhook(PaymentProvider::Bankily, SECRET, &body, Some(&signature))
            .await
            .unwrap();

        assert_eq!(outcome, WebhookOutcome::Updated);
    }

    #[tokio::test]
    async fn signed_webhook_with_numeric_merchant_ref_is_applied() {
        let (body, signature) = signed(r#"{"merchantRef":1718000000000,"status":"failed"}"#);

        let mut payment_repo = MockPaymentRepository::new();
        payment_repo
            .expect_apply_webhook_status()
            .withf(|update| {
                update.merchant_ref == "1718000000000"
                    && update.provider_ref == "1718000000000"
                    && update.status == "failed"
            })
            .times(1)
            .returning(|_| Ok(0));

        let usecase = WebhookUseCase::new(Arc::new(payment_repo));
        let outcome = usecase
            .handle_provider_webhook(PaymentProvider::Bankily, SECRET, &body, Some(&signature))
            .await
            .unwrap();

        assert_eq!(outcome, WebhookOutcome::NoMatchingPayment);
    }

    #[tokio::test]
    async fn bad_or_missing_signature_never_touches_storage() {
        let body = br#"{"merchantRef":"BK-1","status":"success"}"#;
        let forged = sign_payload("wrong-secret", body).unwrap();

        let mut payment_repo = MockPaymentRepository::new();
        payment_repo.expect_apply_webhook_status().never();

        let usecase = WebhookUseCase::new(Arc::new(payment_repo));

        for signature in [Some(forged.as_str()), None] {
            let err = usecase
                .handle_provider_webhook(PaymentProvider::Bankily, SECRET, body, signature)
                .await
                .unwrap_err();
            assert!(matches!(err, PaymentError::Authentication(_)));
            assert_eq!(err.status_code(), axum::http::StatusCode::UNAUTHORIZED);
        }
    }

    #[tokio::test]
    async fn unmatched_reference_is_still_a_success() {
        let (body, signature) = signed(r#"{"merchantRef":"BK-404","status":"success"}"#);

        let mut payment_repo = MockPaymentRepository::new();
        payment_repo
            .expect_apply_webhook_status()
            .times(1)
            .returning(|_| Ok(0));

        let usecase = WebhookUseCase::new(Arc::new(payment_repo));
        let outcome = usecase
            .handle_provider_webhook(PaymentProvider::Bankily, SECRET, &body, Some(&signature))
            .await
            .unwrap();

        assert_eq!(outcome, WebhookOutcome::NoMatchingPayment);
    }

    #[tokio::test]
    async fn signed_payload_without_merchant_ref_is_ignored() {
        let (body, signature) = signed(r#"{"status":"success"}"#);

        let mut payment_repo = MockPaymentRepository::new();
        payment_repo.expect_apply_webhook_status().never();

        let usecase = WebhookUseCase::new(Arc::new(payment_repo));
        let outcome = usecase
            .handle_provider_webhook(PaymentProvider::Bankily, SECRET, &body, Some(&signature))
            .await
            .unwrap();

        assert_eq!(outcome, WebhookOutcome::NoMatchingPayment);
    }

    #[tokio::test]
    async fn signed_garbage_is_a_validation_error() {
        let (body, signature) = signed("not json");

        let mut payment_repo = MockPaymentRepository::new();
        payment_repo.expect_apply_webhook_status().never();

        let usecase = WebhookUseCase::new(Arc::new(payment_repo));
        let err = usecase
            .handle_provider_webhook(PaymentProvider::Bankily, SECRET, &body, Some(&signature))
            .await
            .unwrap_err();

        assert!(matches!(err, PaymentError::Validation(_)));
    }

    #[tokio::test]
    async fn storage_failure_surfaces_as_storage_error() {
        let (body, signature) = signed(r#"{"merchantRef":"BK-1","status":"success"}"#);

        let mut payment_repo = MockPaymentRepository::new();
        payment_repo
            .expect_apply_webhook_status()
            .returning(|_| Err(anyhow::anyhow!("pool timed out")));

        let usecase = WebhookUseCase::new(Arc::new(payment_repo));
        let err = usecase
            .handle_provider_webhook(PaymentProvider::Bankily, SECRET, &body, Some(&signature))
            .await
            .unwrap_err();

        assert!(matches!(err, PaymentError::Storage(_)));
    }

    #[tokio::test]
    async fn simulate_updates_matching_payment() {
        let payment_id = Uuid::new_v4();
        let mut payment_repo = MockPaymentRepository::new();
        payment_repo
            .expect_set_status_by_provider_ref()
            .with(
                eq("sedad".to_string()),
                eq("SD-1".to_string()),
                eq("failed".to_string()),
            )
            .times(1)
            .returning(move |_, _, _| Ok(Some(payment_id)));

        let usecase = WebhookUseCase::new(Arc::new(payment_repo));
        let response = usecase
            .simulate(DEV_SECRET, simulate_request("sedad", "failed"))
            .await
            .unwrap();

        assert_eq!(
            response,
            SimulateWebhookResponse {
                ok: true,
                payment_id,
                provider: PaymentProvider::Sedad,
                merchant_ref: "SD-1".to_string(),
                status: PaymentStatus::Failed,
            }
        );
    }

    #[tokio::test]
    async fn simulate_reports_missing_payment() {
        let mut payment_repo = MockPaymentRepository::new();
        payment_repo
            .expect_set_status_by_provider_ref()
            .returning(|_, _, _| Ok(None));

        let usecase = WebhookUseCase::new(Arc::new(payment_repo));
        let err = usecase
            .simulate(DEV_SECRET, simulate_request("sedad", "success"))
            .await
            .unwrap_err();

        assert!(matches!(err, PaymentError::NotFound(_)));
    }

    #[tokio::test]
    async fn simulate_rejects_before_touching_storage() {
        let mut payment_repo = MockPaymentRepository::new();
        payment_repo.expect_set_status_by_provider_ref().never();
        let usecase = WebhookUseCase::new(Arc::new(payment_repo));

        let wrong_secret = SimulateWebhookRequest {
            secret: Some("guess".to_string()),
            ..simulate_request("sedad", "success")
        };
        let no_secret = SimulateWebhookRequest {
            secret: None,
            ..simulate_request("sedad", "success")
        };
        for request in [wrong_secret, no_secret] {
            let err = usecase.simulate(DEV_SECRET, request).await.unwrap_err();
            assert!(matches!(err, PaymentError::Authentication(_)));
        }

        let err = usecase
            .simulate(DEV_SECRET, simulate_request("paypal", "success"))
            .await
            .unwrap_err();
        assert!(matches!(err, PaymentError::Validation(ref m) if m == "Unknown provider"));

        let err = usecase
            .simulate(DEV_SECRET, simulate_request("sedad", "pending"))
            .await
            .unwrap_err();
        assert!(matches!(err, PaymentError::Validation(ref m) if m == "Invalid status"));
    }
}
