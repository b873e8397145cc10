use diesel::prelude::*;
use uuid::Uuid;

use crate::infra::db::postgres::schema::payments;

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = payments)]
pub struct InsertPaymentEntity {
    pub order_id: String,
    pub provider: String,
    pub amount: i64,
    pub status: String,
    pub provider_ref: String,
    pub provider_payload: serde_json::Value,
}

/// Identity of a freshly inserted payment, as handed back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable)]
#[diesel(table_name = payments)]
pub struct PaymentReferenceEntity {
    pub id: Uuid,
    pub provider_ref: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable)]
#[diesel(table_name = payments)]
pub struct PaymentStatusEntity {
    pub status: String,
    pub provider_ref: String,
}

/// Status change applied by an authenticated provider webhook.
///
/// The row is located by `(provider, merchant_ref)`; `provider_ref` is the
/// reference stored afterwards, which may differ when the provider reports
/// its own reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookStatusUpdateEntity {
    pub provider: String,
    pub merchant_ref: String,
    pub status: String,
    pub provider_ref: String,
}
