use crate::application::ServiceDependencies;
use crate::domain::{BookId, PatronId, total_fees};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use super::late_fee::calculate_late_fee_for_book;

/// 貸出中の書籍
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentlyBorrowed {
    pub book_id: BookId,
    pub title: String,
    pub due_date: DateTime<Utc>,
}

/// 貸出履歴の1件
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BorrowingHistoryEntry {
    pub book_id: BookId,
    pub title: String,
    pub borrow_date: DateTime<Utc>,
    pub return_date: Option<DateTime<Utc>>,
}

/// 会員の状況レポート
///
/// 日時はISO-8601文字列としてシリアライズされる。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    pub currently_borrowed: Vec<CurrentlyBorrowed>,
    pub borrowing_history: Vec<BorrowingHistoryEntry>,
    pub num_currently_borrowed: usize,
    pub total_late_fees: Decimal,
}

impl StatusReport {
    pub fn empty() -> Self {
        Self {
            currently_borrowed: Vec::new(),
            borrowing_history: Vec::new(),
            num_currently_borrowed: 0,
            total_late_fees: dec!(0.00),
        }
    }
}

/// 会員の状況レポートを作成する
///
/// - 会員IDが不正な場合は空のレポートを返す（エラーにはしない）
/// - 貸出中と履歴は独立して読み込み、失敗した側だけ空になる
/// - 貸出中の各書籍の延滞料金は `as_of` 時点で再計算して合計する
pub async fn get_patron_status_report(
    deps: &ServiceDependencies,
    patron_id: &str,
    as_of: DateTime<Utc>,
) -> StatusReport {
    let Some(patron_id) = PatronId::parse(patron_id) else {
        return StatusReport::empty();
    };

    let current = deps
        .borrow_records
        .get_patron_borrowed_books(&patron_id)
        .await
        .unwrap_or_else(|e| {
            tracing::warn!(patron_id = %patron_id, error = %e, "could not load current loans");
            Vec::new()
        });

    let history = deps
        .borrow_records
        .get_patron_borrow_history(&patron_id)
        .await
        .unwrap_or_else(|e| {
            tracing::warn!(patron_id = %patron_id, error = %e, "could not load borrow history");
            Vec::new()
        });

    let mut currently_borrowed = Vec::with_capacity(current.len());
    let mut fees = Vec::with_capacity(current.len());
    for loan in current {
        let fee = calculate_late_fee_for_book(deps, &patron_id, loan.book_id, as_of).await;
        fees.push(fee.fee_amount);
        currently_borrowed.push(CurrentlyBorrowed {
            book_id: loan.book_id,
            title: loan.title,
            due_date: loan.due_date,
        });
    }

    let borrowing_history = history
        .into_iter()
        .map(|entry| BorrowingHistoryEntry {
            book_id: entry.book_id,
            title: entry.title,
            borrow_date: entry.borrow_date,
            return_date: entry.return_date,
        })
        .collect();

    StatusReport {
        num_currently_borrowed: currently_borrowed.len(),
        currently_borrowed,
        borrowing_history,
        total_late_fees: total_fees(fees),
    }
}
