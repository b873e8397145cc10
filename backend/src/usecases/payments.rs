use std::sync::Arc;

use chrono::Utc;
use darraa_pay_core::domain::{
    repositories::payments::PaymentRepository,
    value_objects::payments::{CreatePaymentRequest, CreatePaymentResponse, PaymentStatusDto},
};
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Authentication(String),
    #[error("{0}")]
    NotFound(String),
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl PaymentError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            PaymentError::Validation(_) => StatusCode::BAD_REQUEST,
            PaymentError::Authentication(_) => StatusCode::UNAUTHORIZED,
            PaymentError::NotFound(_) => StatusCode::NOT_FOUND,
            PaymentError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, PaymentError>;

pub struct PaymentUseCase<T>
where
    T: PaymentRepository + Send + Sync,
{
    payment_repo: Arc<T>,
}

impl<T> PaymentUseCase<T>
where
    T: PaymentRepository + Send + Sync,
{
    pub fn new(payment_repo: Arc<T>) -> Self {
        Self { payment_repo }
    }

    pub async fn create_payment(
        &self,
        request: CreatePaymentRequest,
    ) -> UseCaseResult<CreatePaymentResponse> {
        let new_payment = request.validate().map_err(|reason| {
            warn!(reason = %reason, "payments: rejected create request");
            PaymentError::Validation(reason)
        })?;

        let merchant_ref = new_payment.merchant_ref(Utc::now().timestamp_millis());
        let created = self
            .payment_repo
            .create_payment(new_payment.to_entity(merchant_ref))
            .await?;

        info!(
            payment_id = %created.id,
            provider = %new_payment.provider,
            merchant_ref = %created.provider_ref,
            "payments: payment created"
        );

        Ok(CreatePaymentResponse {
            payment_id: created.id,
            merchant_ref: created.provider_ref,
        })
    }

    /// Looks up a payment by its id as given in the URL. Ids that are not UUIDs
    /// cannot match any record and are reported as not found.
    pub async fn get_status(&self, raw_payment_id: &str) -> UseCaseResult<PaymentStatusDto> {
        let not_found = || PaymentError::NotFound("Not found".to_string());

        let payment_id = Uuid::parse_str(raw_payment_id).map_err(|_| not_found())?;

        self.payment_repo
            .find_status_by_id(payment_id)
            .await?
            .map(PaymentStatusDto::from)
            .ok_or_else(not_found)
    }
}
