use crate::application::{
    ServiceDependencies,
    catalog::{add_book_to_catalog, list_catalog, search_books_in_catalog},
    circulation::{
        CirculationError, StatusReport, borrow_book_by_patron, calculate_late_fee_for_book,
        get_patron_status_report, return_book_by_patron,
    },
    payment::{pay_late_fees, refund_late_fee_payment},
};
use crate::domain::{
    BookId, FeeResult, PatronId,
    commands::{BorrowBook, PayLateFees, RefundLateFee, ReturnBook},
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::Utc;
use std::sync::Arc;

use super::{
    error::ApiError,
    types::{
        AddBookRequest, BookResponse, OperationResponse, PatronBookRequest, PaymentResponse,
        RefundRequest, SearchQuery, StatusQuery,
    },
};

// ============================================================================
// State
// ============================================================================

/// ハンドラー間で共有されるアプリケーション状態
#[derive(Clone)]
pub struct AppState {
    pub service_deps: ServiceDependencies,
}

// ============================================================================
// Catalog
// ============================================================================

/// GET /books - カタログの全書籍
pub async fn list_books(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<BookResponse>>, ApiError> {
    let books = list_catalog(&state.service_deps).await?;
    Ok(Json(books.into_iter().map(BookResponse::from).collect()))
}

/// POST /books - 書籍をカタログに追加
pub async fn add_book(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AddBookRequest>,
) -> Result<(StatusCode, Json<OperationResponse>), ApiError> {
    let added = add_book_to_catalog(&state.service_deps, req.to_command()).await?;
    let response = OperationResponse::ok(added.to_string());

    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /search?q=&type= - カタログ検索
///
/// `type` を省略した場合はタイトル検索。
pub async fn search_books(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<BookResponse>>, ApiError> {
    let search_type = query.search_type.as_deref().unwrap_or("title");
    let books = search_books_in_catalog(&state.service_deps, &query.q, search_type).await?;
    Ok(Json(books.into_iter().map(BookResponse::from).collect()))
}

// ============================================================================
// Circulation
// ============================================================================

/// POST /borrow - 書籍を貸し出す
pub async fn borrow_book(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PatronBookRequest>,
) -> Result<Json<OperationResponse>, ApiError> {
    let cmd = BorrowBook {
        patron_id: req.patron_id,
        book_id: BookId::new(req.book_id),
        borrowed_at: Utc::now(),
    };

    let receipt = borrow_book_by_patron(&state.service_deps, cmd).await?;
    Ok(Json(OperationResponse::ok(receipt.to_string())))
}

/// POST /return - 書籍を返却する
pub async fn return_book(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PatronBookRequest>,
) -> Result<Json<OperationResponse>, ApiError> {
    let cmd = ReturnBook {
        patron_id: req.patron_id,
        book_id: BookId::new(req.book_id),
        returned_at: Utc::now(),
    };

    let receipt = return_book_by_patron(&state.service_deps, cmd).await?;
    Ok(Json(OperationResponse::ok(receipt.to_string())))
}

/// GET /late-fee/:patron_id/:book_id - 貸出中の書籍1冊の延滞料金
pub async fn late_fee(
    State(state): State<Arc<AppState>>,
    Path((patron_id, book_id)): Path<(String, i64)>,
) -> Result<Json<FeeResult>, ApiError> {
    let patron_id = PatronId::parse(&patron_id).ok_or(CirculationError::InvalidPatronId)?;
    let fee = calculate_late_fee_for_book(
        &state.service_deps,
        &patron_id,
        BookId::new(book_id),
        Utc::now(),
    )
    .await;
    Ok(Json(fee))
}

/// GET /status?patron_id= - 会員の状況レポート
///
/// 会員IDが不正な場合も空のレポートを返す。
pub async fn patron_status(
    State(state): State<Arc<AppState>>,
    Query(query): Query<StatusQuery>,
) -> Json<StatusReport> {
    let report =
        get_patron_status_report(&state.service_deps, query.patron_id.trim(), Utc::now()).await;
    Json(report)
}

// ============================================================================
// Payments
// ============================================================================

/// POST /payments - 延滞料金を支払う
pub async fn pay_fees(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PatronBookRequest>,
) -> Result<Json<PaymentResponse>, ApiError> {
    let cmd = PayLateFees {
        patron_id: req.patron_id,
        book_id: BookId::new(req.book_id),
        as_of: Utc::now(),
    };

    let confirmation = pay_late_fees(&state.service_deps, cmd).await?;
    Ok(Json(PaymentResponse {
        success: true,
        message: confirmation.to_string(),
        transaction_id: Some(confirmation.transaction_id),
    }))
}

/// POST /refunds - 支払いを返金する
pub async fn refund_payment(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RefundRequest>,
) -> Result<Json<OperationResponse>, ApiError> {
    let cmd = RefundLateFee {
        transaction_id: req.transaction_id,
        amount: req.amount,
    };

    let confirmation = refund_late_fee_payment(&state.service_deps, cmd).await?;
    Ok(Json(OperationResponse::ok(confirmation.to_string())))
}
