use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::handlers::{
    AppState, add_book, borrow_book, late_fee, list_books, patron_status, pay_fees,
    refund_payment, return_book, search_books,
};

/// Creates the API router
///
/// Catalog:
/// - GET /books - List the catalog
/// - POST /books - Add a book
/// - GET /search - Search by title, author or ISBN
///
/// Circulation:
/// - POST /borrow - Borrow a book
/// - POST /return - Return a book
/// - GET /late-fee/:patron_id/:book_id - Late fee for one active loan
/// - GET /status - Patron status report
///
/// Payments:
/// - POST /payments - Pay late fees
/// - POST /refunds - Refund a late-fee payment
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check endpoint
        .route("/health", get(health_check))
        .route("/books", get(list_books).post(add_book))
        .route("/search", get(search_books))
        .route("/borrow", post(borrow_book))
        .route("/return", post(return_book))
        .route("/late-fee/:patron_id/:book_id", get(late_fee))
        .route("/status", get(patron_status))
        .route("/payments", post(pay_fees))
        .route("/refunds", post(refund_payment))
        // Add tracing middleware
        .layer(TraceLayer::new_for_http())
        // Add application state
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
