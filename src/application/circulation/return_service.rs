use crate::application::ServiceDependencies;
use crate::domain::{FeeResult, PatronId, commands::ReturnBook};

use super::errors::{CirculationError, Result};
use super::late_fee::find_active_loan;

/// 返却結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnReceipt {
    pub title: String,
    pub late_fee: FeeResult,
}

impl std::fmt::Display for ReturnReceipt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.late_fee.is_owed() {
            write!(
                f,
                "Return processed for \"{}\". Late fee: ${:.2}.",
                self.title, self.late_fee.fee_amount
            )
        } else {
            write!(f, "Return processed for \"{}\". No late fee.", self.title)
        }
    }
}

/// 書籍を返却する（純粋な関数）
///
/// ビジネスルール：
/// - 会員IDが6桁の数字であること
/// - 書籍が存在すること
/// - 会員がその書籍を貸出中であること
/// - 延滞料金は返却日時と返却期限から計算する
///
/// 返却期限は記録を閉じる前に読み取っておく（閉じた後は貸出中の一覧に現れないため）。
///
/// # 一貫性保証
///
/// 記録のクローズと在庫の加算はトランザクションで囲まれていない。
/// 詳細は`borrow_book_by_patron()`を参照。
pub async fn return_book_by_patron(
    deps: &ServiceDependencies,
    cmd: ReturnBook,
) -> Result<ReturnReceipt> {
    // 1. 会員IDの形式確認
    let patron_id = PatronId::parse(&cmd.patron_id).ok_or(CirculationError::InvalidPatronId)?;

    // 2. 書籍の存在確認
    let book = deps
        .books
        .get_book_by_id(cmd.book_id)
        .await
        .map_err(CirculationError::ReadFailed)?
        .ok_or(CirculationError::BookNotFound)?;

    // 3. 料金計算用に返却期限を取得
    let active_loan = find_active_loan(deps, &patron_id, book.id).await;

    // 4. 貸出記録を閉じる
    let closed = deps
        .borrow_records
        .update_borrow_record_return_date(&patron_id, book.id, cmd.returned_at)
        .await
        .map_err(CirculationError::RecordUpdateFailed)?;

    if !closed {
        tracing::debug!(patron_id = %patron_id, book_id = %book.id, "no active borrow record");
        return Err(CirculationError::NoActiveBorrowRecord);
    }

    // 5. 在庫を1増やす
    match deps.books.update_book_availability(book.id, 1).await {
        Ok(true) => {}
        Ok(false) => {
            tracing::error!(
                patron_id = %patron_id,
                book_id = %book.id,
                "borrow record closed but availability was not incremented"
            );
            return Err(CirculationError::AvailabilityUpdateFailed(None));
        }
        Err(e) => {
            tracing::error!(
                patron_id = %patron_id,
                book_id = %book.id,
                error = %e,
                "borrow record closed but availability update failed"
            );
            return Err(CirculationError::AvailabilityUpdateFailed(Some(e)));
        }
    }

    // 6. 延滞料金を計算
    let late_fee = active_loan
        .map(|loan| FeeResult::for_due_date(loan.due_date, cmd.returned_at))
        .unwrap_or_default();

    tracing::info!(
        patron_id = %patron_id,
        book_id = %book.id,
        fee = %late_fee.fee_amount,
        days_overdue = late_fee.days_overdue,
        "book returned"
    );

    Ok(ReturnReceipt {
        title: book.title,
        late_fee,
    })
}
