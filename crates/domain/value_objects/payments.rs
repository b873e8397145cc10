use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    entities::payments::{InsertPaymentEntity, PaymentStatusEntity},
    value_objects::{
        enums::{payment_providers::PaymentProvider, payment_statuses::PaymentStatus},
        scalars::scalar_text,
    },
};

/// Body of `POST /payments/create`. Every field is optional at the wire level so
/// that missing fields surface as a validation error rather than a decode error.
/// `orderId` is the caller's own reference and may be a string or a number.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentRequest {
    pub order_id: Option<serde_json::Value>,
    #[serde(rename = "amountMRU")]
    pub amount_mru: Option<AmountInput>,
    pub provider: Option<String>,
}

/// Amounts arrive either as JSON integers or as numeric strings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
    Integer(i64),
    Text(String),
}

impl AmountInput {
    /// Minor-unit amount, when it is a strictly positive integer.
    pub fn to_minor_units(&self) -> Option<i64> {
        let amount = match self {
            AmountInput::Integer(value) => *value,
            AmountInput::Text(raw) => raw.trim().parse::<i64>().ok()?,
        };
        (amount > 0).then_some(amount)
    }

    fn is_empty(&self) -> bool {
        matches!(self, AmountInput::Text(raw) if raw.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPaymentModel {
    pub order_id: String,
    pub provider: PaymentProvider,
    pub amount: i64,
}

impl CreatePaymentRequest {
    pub fn validate(self) -> Result<NewPaymentModel, String> {
        let order_id = self.order_id.as_ref().and_then(scalar_text);
        let amount = self.amount_mru.filter(|value| !value.is_empty());
        let provider = self.provider.filter(|value| !value.trim().is_empty());

        let (Some(order_id), Some(amount), Some(provider)) = (order_id, amount, provider) else {
            return Err("missing fields".to_string());
        };

        let amount = amount
            .to_minor_units()
            .ok_or_else(|| "amountMRU must be a positive integer".to_string())?;
        let provider = provider.parse::<PaymentProvider>()?;

        Ok(NewPaymentModel {
            order_id,
            provider,
            amount,
        })
    }
}

impl NewPaymentModel {
    /// `<PREFIX>-<unix millis>`, e.g. `BK-1718000000000`.
    pub fn merchant_ref(&self, created_at_millis: i64) -> String {
        format!("{}-{}", self.provider.ref_prefix(), created_at_millis)
    }

    pub fn to_entity(&self, provider_ref: String) -> InsertPaymentEntity {
        InsertPaymentEntity {
            order_id: self.order_id.clone(),
            provider: self.provider.to_string(),
            amount: self.amount,
            status: PaymentStatus::Pending.to_string(),
            provider_ref,
            provider_payload: serde_json::json!({}),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentResponse {
    pub payment_id: Uuid,
    pub merchant_ref: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentStatusDto {
    pub status: String,
    pub provider_ref: String,
}

impl From<PaymentStatusEntity> for PaymentStatusDto {
    fn from(value: PaymentStatusEntity) -> Self {
        Self {
            status: value.status,
            provider_ref: value.provider_ref,
        }
    }
}
