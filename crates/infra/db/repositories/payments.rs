use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use diesel::{OptionalExtension, RunQueryDsl, insert_into, prelude::*, update};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain,
    infra::db::postgres::{postgres_connection::PgPoolSquad, schema::payments},
};
use domain::{
    entities::payments::{
        InsertPaymentEntity, PaymentReferenceEntity, PaymentStatusEntity,
        WebhookStatusUpdateEntity,
    },
    repositories::payments::PaymentRepository,
};

pub struct PaymentPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl PaymentPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl PaymentRepository for PaymentPostgres {
    async fn create_payment(&self, payment: InsertPaymentEntity) -> Result<PaymentReferenceEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let created = insert_into(payments::table)
            .values(&payment)
            .returning(PaymentReferenceEntity::as_returning())
            .get_result::<PaymentReferenceEntity>(&mut conn)?;

        Ok(created)
    }

    async fn find_status_by_id(&self, payment_id: Uuid) -> Result<Option<PaymentStatusEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let status = payments::table
            .filter(payments::id.eq(payment_id))
            .select(PaymentStatusEntity::as_select())
            .first::<PaymentStatusEntity>(&mut conn)
            .optional()?;

        Ok(status)
    }

    async fn apply_webhook_status(&self, status_update: WebhookStatusUpdateEntity) -> Result<usize> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let affected = update(
            payments::table
                .filter(payments::provider.eq(&status_update.provider))
                .filter(payments::provider_ref.eq(&status_update.merchant_ref)),
        )
        .set((
            payments::status.eq(&status_update.status),
            payments::provider_ref.eq(&status_update.provider_ref),
            payments::updated_at.eq(Utc::now()),
        ))
        .execute(&mut conn)?;

        Ok(affected)
    }

    async fn set_status_by_provider_ref(
        &self,
        provider: String,
        merchant_ref: String,
        status: String,
    ) -> Result<Option<Uuid>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let payment_id = update(
            payments::table
                .filter(payments::provider.eq(provider))
                .filter(payments::provider_ref.eq(merchant_ref)),
        )
        .set((
            payments::status.eq(status),
            payments::updated_at.eq(Utc::now()),
        ))
        .returning(payments::id)
        .get_result::<Uuid>(&mut conn)
        .optional()?;

        Ok(payment_id)
    }
}
