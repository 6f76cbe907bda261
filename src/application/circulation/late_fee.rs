use crate::application::ServiceDependencies;
use crate::domain::{BookId, FeeResult, PatronId};
use crate::ports::CurrentLoanView;
use chrono::{DateTime, Utc};

/// 会員の貸出中の記録から `book_id` に一致する最初の1件を探す
///
/// 読み込みに失敗した場合は見つからなかったものとして扱う。
pub(super) async fn find_active_loan(
    deps: &ServiceDependencies,
    patron_id: &PatronId,
    book_id: BookId,
) -> Option<CurrentLoanView> {
    let loans = deps
        .borrow_records
        .get_patron_borrowed_books(patron_id)
        .await;

    match loans {
        Ok(loans) => loans.into_iter().find(|loan| loan.book_id == book_id),
        Err(e) => {
            tracing::warn!(
                patron_id = %patron_id,
                book_id = %book_id,
                error = %e,
                "could not load active loans; treating as no fee"
            );
            None
        }
    }
}

/// 貸出中の書籍1冊の延滞料金を計算する
///
/// 貸出中の記録が見つからない場合、または読み込みに失敗した場合は
/// 料金0の結果を返す（エラーは伝播しない）。
pub async fn calculate_late_fee_for_book(
    deps: &ServiceDependencies,
    patron_id: &PatronId,
    book_id: BookId,
    as_of: DateTime<Utc>,
) -> FeeResult {
    find_active_loan(deps, patron_id, book_id)
        .await
        .map(|loan| FeeResult::for_due_date(loan.due_date, as_of))
        .unwrap_or_default()
}
