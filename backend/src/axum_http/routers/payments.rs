use crate::usecases::payments::{PaymentError, PaymentUseCase};
use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    routing::{get, post},
};
use darraa_pay_core::{
    domain::{
        repositories::payments::PaymentRepository,
        value_objects::payments::{CreatePaymentRequest, CreatePaymentResponse, PaymentStatusDto},
    },
    infra::db::{
        postgres::postgres_connection::PgPoolSquad, repositories::payments::PaymentPostgres,
    },
};
use std::sync::Arc;

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let payment_repository = PaymentPostgres::new(db_pool);
    let payment_usecase = PaymentUseCase::new(Arc::new(payment_repository));

    router(Arc::new(payment_usecase))
}

pub fn router<T>(payment_usecase: Arc<PaymentUseCase<T>>) -> Router
where
    T: PaymentRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/create", post(create_payment::<T>))
        .route("/:id/status", get(get_payment_status::<T>))
        .with_state(payment_usecase)
}

pub async fn create_payment<T>(
    State(payment_usecase): State<Arc<PaymentUseCase<T>>>,
    payload: Result<Json<CreatePaymentRequest>, JsonRejection>,
) -> Result<Json<CreatePaymentResponse>, PaymentError>
where
    T: PaymentRepository + Send + Sync,
{
    let Json(request) = payload?;
    let created = payment_usecase.create_payment(request).await?;
    Ok(Json(created))
}

pub async fn get_payment_status<T>(
    State(payment_usecase): State<Arc<PaymentUseCase<T>>>,
    Path(payment_id): Path<String>,
) -> Result<Json<PaymentStatusDto>, PaymentError>
where
    T: PaymentRepository + Send + Sync,
{
    let status = payment_usecase.get_status(&payment_id).await?;
    Ok(Json(status))
}
