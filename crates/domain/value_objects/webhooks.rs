use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    entities::payments::WebhookStatusUpdateEntity,
    value_objects::{
        enums::{payment_providers::PaymentProvider, payment_statuses::PaymentStatus},
        scalars::scalar_text,
    },
};

/// Notification body posted by a provider once a payment settles.
///
/// Fields stay loosely typed: a signed notification is applied whatever JSON
/// types the provider picked for its references.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderWebhookPayload {
    pub merchant_ref: Option<serde_json::Value>,
    pub status: Option<serde_json::Value>,
    pub provider_ref: Option<serde_json::Value>,
}

impl ProviderWebhookPayload {
    /// Builds the status change for `provider`, or `None` when the payload carries
    /// no merchant reference and therefore cannot match any payment.
    pub fn to_status_update(&self, provider: PaymentProvider) -> Option<WebhookStatusUpdateEntity> {
        let merchant_ref = self.merchant_ref.as_ref().and_then(scalar_text)?;

        let provider_ref = self
            .provider_ref
            .as_ref()
            .and_then(scalar_text)
            .unwrap_or_else(|| merchant_ref.clone());

        Some(WebhookStatusUpdateEntity {
            provider: provider.to_string(),
            merchant_ref,
            status: PaymentStatus::from_provider_report(self.status.as_ref()).to_string(),
            provider_ref,
        })
    }
}

/// Body of the development-only `POST /simulate/webhook`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulateWebhookRequest {
    pub secret: Option<String>,
    pub provider: Option<String>,
    pub merchant_ref: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulateWebhookResponse {
    pub ok: bool,
    pub payment_id: Uuid,
    pub provider: PaymentProvider,
    pub merchant_ref: String,
    pub status: PaymentStatus,
}
