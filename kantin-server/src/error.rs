//! Service-layer error for kantin-server
//!
//! `ServiceError` lets handlers `?` both store failures and `AppError`s.
//! Store failures become 500 responses carrying the store's message.

use axum::response::IntoResponse;
use shared::error::AppError;

use crate::db::StoreError;

#[derive(Debug)]
pub enum ServiceError {
    /// Data store failure (logged, message passed through)
    Store(StoreError),
    /// Business-rule error, returned as is
    App(AppError),
}

impl From<StoreError> for ServiceError {
    fn from(e: StoreError) -> Self {
        ServiceError::Store(e)
    }
}

impl From<AppError> for ServiceError {
    fn from(e: AppError) -> Self {
        ServiceError::App(e)
    }
}

impl From<ServiceError> for AppError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::App(app_err) => app_err,
            ServiceError::Store(store_err) => {
                tracing::error!(error = %store_err, "Store error");
                AppError::database(store_err.to_string())
            }
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> axum::response::Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
