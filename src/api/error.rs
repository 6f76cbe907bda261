use crate::application::{
    catalog::CatalogError, circulation::CirculationError, payment::PaymentError,
};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::types::ErrorResponse;

/// API層のエラー型
///
/// アプリケーション層のエラーをラップし、HTTPレスポンスへのマッピングを提供する。
/// メッセージはアプリケーション層のエラーの表示文字列をそのまま使う。
#[derive(Debug)]
pub enum ApiError {
    Catalog(CatalogError),
    Circulation(CirculationError),
    Payment(PaymentError),
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        ApiError::Catalog(err)
    }
}

impl From<CirculationError> for ApiError {
    fn from(err: CirculationError) -> Self {
        ApiError::Circulation(err)
    }
}

impl From<PaymentError> for ApiError {
    fn from(err: PaymentError) -> Self {
        ApiError::Payment(err)
    }
}

fn log_source(err: &dyn std::error::Error) {
    match err.source() {
        Some(source) => tracing::error!("{}: {}", err, source),
        None => tracing::error!("{}", err),
    }
}

impl ApiError {
    fn status_and_type(&self) -> (StatusCode, &'static str) {
        match self {
            // 400 Bad Request - 入力値の形式エラー
            ApiError::Catalog(CatalogError::InvalidField(_)) => {
                (StatusCode::BAD_REQUEST, "INVALID_FIELD")
            }
            ApiError::Circulation(CirculationError::InvalidPatronId)
            | ApiError::Payment(PaymentError::InvalidPatronId) => {
                (StatusCode::BAD_REQUEST, "INVALID_PATRON_ID")
            }
            ApiError::Payment(PaymentError::InvalidTransactionId) => {
                (StatusCode::BAD_REQUEST, "INVALID_TRANSACTION_ID")
            }
            ApiError::Payment(
                PaymentError::RefundAmountNotPositive | PaymentError::RefundAmountExceedsMaximum,
            ) => (StatusCode::BAD_REQUEST, "INVALID_REFUND_AMOUNT"),

            // 404 Not Found - リクエストされたリソースが存在しない
            ApiError::Circulation(CirculationError::BookNotFound)
            | ApiError::Payment(PaymentError::BookNotFound) => {
                (StatusCode::NOT_FOUND, "BOOK_NOT_FOUND")
            }
            ApiError::Circulation(CirculationError::NoActiveBorrowRecord) => {
                (StatusCode::NOT_FOUND, "NO_ACTIVE_BORROW_RECORD")
            }

            // 422 Unprocessable Entity - ビジネスルール違反
            ApiError::Catalog(CatalogError::DuplicateIsbn) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "DUPLICATE_ISBN")
            }
            ApiError::Circulation(CirculationError::BookNotAvailable) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "BOOK_NOT_AVAILABLE")
            }
            ApiError::Circulation(CirculationError::BorrowLimitReached) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "BORROW_LIMIT_REACHED")
            }
            ApiError::Payment(PaymentError::NoFeesDue) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "NO_FEES_DUE")
            }

            // 402 Payment Required - ゲートウェイが拒否した
            ApiError::Payment(PaymentError::PaymentDeclined(_)) => {
                (StatusCode::PAYMENT_REQUIRED, "PAYMENT_DECLINED")
            }
            ApiError::Payment(PaymentError::RefundDeclined(_)) => {
                (StatusCode::PAYMENT_REQUIRED, "REFUND_DECLINED")
            }

            // 502 Bad Gateway - ゲートウェイの障害
            ApiError::Payment(
                PaymentError::PaymentGatewayFailed(_) | PaymentError::RefundGatewayFailed(_),
            ) => (StatusCode::BAD_GATEWAY, "PAYMENT_GATEWAY_ERROR"),

            // 500 Internal Server Error - データストアの障害
            ApiError::Catalog(CatalogError::InsertFailed(_) | CatalogError::ReadFailed(_))
            | ApiError::Circulation(
                CirculationError::RecordCreationFailed(_)
                | CirculationError::RecordUpdateFailed(_)
                | CirculationError::AvailabilityUpdateFailed(_)
                | CirculationError::ReadFailed(_),
            )
            | ApiError::Payment(PaymentError::BookLookupFailed(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "DATABASE_ERROR")
            }
        }
    }

    fn as_error(&self) -> &(dyn std::error::Error + 'static) {
        match self {
            ApiError::Catalog(e) => e,
            ApiError::Circulation(e) => e,
            ApiError::Payment(e) => e,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type) = self.status_and_type();

        // 障害の詳細はログに記録する（メッセージ自体は汎用的な文言）
        if status.is_server_error() {
            log_source(self.as_error());
        }

        let body = Json(ErrorResponse::new(error_type, self.as_error().to_string()));
        (status, body).into_response()
    }
}
