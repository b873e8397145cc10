use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::payments::{
    InsertPaymentEntity, PaymentReferenceEntity, PaymentStatusEntity, WebhookStatusUpdateEntity,
};

#[automock]
#[async_trait]
pub trait PaymentRepository {
    async fn create_payment(&self, payment: InsertPaymentEntity) -> Result<PaymentReferenceEntity>;

    async fn find_status_by_id(&self, payment_id: Uuid) -> Result<Option<PaymentStatusEntity>>;

    /// Applies a provider webhook in a single statement and returns the number of
    /// rows it touched. Zero means no payment carried that reference.
    async fn apply_webhook_status(&self, update: WebhookStatusUpdateEntity) -> Result<usize>;

    /// Overwrites only the status of the payment matching `(provider, merchant_ref)`
    /// and returns its id, or `None` when nothing matched.
    async fn set_status_by_provider_ref(
        &self,
        provider: String,
        merchant_ref: String,
        status: String,
    ) -> Result<Option<Uuid>>;
}
