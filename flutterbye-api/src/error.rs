use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use flutterbye_catalog::{CatalogError, PricingError};
use flutterbye_store::TrackError;
use serde::Serialize;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    InvalidInput(#[from] PricingError),
    #[error(transparent)]
    UnknownProduct(#[from] CatalogError),
    #[error(transparent)]
    Tracking(#[from] TrackError),
    #[error("Malformed request body: {0}")]
    MalformedBody(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Error payload, also embedded in batch results
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ErrorBody {
    pub code: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<&'static str>,
    pub message: String,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_)
            | AppError::UnknownProduct(_)
            | AppError::Tracking(_)
            | AppError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn body(&self) -> ErrorBody {
        match self {
            AppError::InvalidInput(err) => ErrorBody {
                code: "INVALID_INPUT",
                field: Some(err.field().as_str()),
                message: err.to_string(),
            },
            AppError::UnknownProduct(err) => ErrorBody {
                code: "UNKNOWN_PRODUCT",
                field: Some("productType"),
                message: err.to_string(),
            },
            AppError::Tracking(err) => ErrorBody {
                code: "INVALID_INPUT",
                field: Some(match err {
                    TrackError::InvalidPrice
                    | TrackError::PriceTooHigh
                    | TrackError::TallyOverflow(_) => "price",
                    TrackError::MissingProduct => "productType",
                }),
                message: err.to_string(),
            },
            AppError::MalformedBody(msg) => ErrorBody {
                code: "MALFORMED_BODY",
                field: None,
                message: msg.clone(),
            },
            AppError::NotFound(msg) => ErrorBody {
                code: "NOT_FOUND",
                field: None,
                message: msg.clone(),
            },
            AppError::Internal(_) => ErrorBody {
                code: "INTERNAL_ERROR",
                field: None,
                message: "Internal Server Error".to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Internal(err) => tracing::error!("Internal Server Error: {:#}", err),
            other => tracing::warn!("Rejected request: {}", other),
        }

        let status = self.status();
        (status, Json(json!({ "error": self.body() }))).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::MalformedBody(rejection.body_text())
    }
}
