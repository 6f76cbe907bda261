use crate::application::ServiceDependencies;
use crate::domain::{PatronId, commands::BorrowBook, loan};
use chrono::{DateTime, Utc};

use super::errors::{CirculationError, Result};

/// 会員1人あたりの最大貸出冊数
pub const MAX_ACTIVE_LOANS: usize = 5;

/// 貸出結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BorrowReceipt {
    pub title: String,
    pub due_date: DateTime<Utc>,
}

impl std::fmt::Display for BorrowReceipt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Borrowed \"{}\" successfully. Due date: {}.",
            self.title,
            self.due_date.format("%Y-%m-%d")
        )
    }
}

/// 書籍を貸し出す（純粋な関数）
///
/// ビジネスルール（この順に判定し、最初の違反で打ち切る）：
/// - 会員IDが6桁の数字であること
/// - 書籍が存在すること
/// - 貸出可能な在庫があること
/// - 会員の貸出中の冊数が5冊未満であること
///
/// # 一貫性保証
///
/// 貸出記録の作成と在庫の減算は独立した2回の書き込みで、トランザクションで
/// 囲まれていない。在庫の更新に失敗した場合、貸出記録は作成済みのまま
/// `AvailabilityUpdateFailed` を返す。同じ書籍への同時貸出は競合しうる。
pub async fn borrow_book_by_patron(
    deps: &ServiceDependencies,
    cmd: BorrowBook,
) -> Result<BorrowReceipt> {
    // 1. 会員IDの形式確認
    let patron_id = PatronId::parse(&cmd.patron_id).ok_or(CirculationError::InvalidPatronId)?;

    // 2. 書籍の存在確認
    let book = deps
        .books
        .get_book_by_id(cmd.book_id)
        .await
        .map_err(CirculationError::ReadFailed)?
        .ok_or(CirculationError::BookNotFound)?;

    // 3. 在庫確認
    if !book.is_available() {
        tracing::debug!(book_id = %book.id, "book has no available copies");
        return Err(CirculationError::BookNotAvailable);
    }

    // 4. 貸出上限確認（5冊まで）
    let active_loans = deps
        .borrow_records
        .get_patron_borrow_count(&patron_id)
        .await
        .map_err(CirculationError::ReadFailed)?;

    if active_loans >= MAX_ACTIVE_LOANS {
        tracing::debug!(patron_id = %patron_id, active_loans, "borrow limit reached");
        return Err(CirculationError::BorrowLimitReached);
    }

    // 5. 貸出記録を作成
    let record = loan::open_loan(patron_id, book.id, cmd.borrowed_at);

    let created = deps
        .borrow_records
        .insert_borrow_record(
            &record.patron_id,
            record.book_id,
            record.borrow_date,
            record.due_date,
        )
        .await
        .map_err(|e| CirculationError::RecordCreationFailed(Some(e)))?;

    if !created {
        return Err(CirculationError::RecordCreationFailed(None));
    }

    // 6. 在庫を1減らす（この時点で貸出記録は作成済み）
    match deps.books.update_book_availability(book.id, -1).await {
        Ok(true) => {}
        Ok(false) => {
            tracing::error!(
                patron_id = %record.patron_id,
                book_id = %book.id,
                "borrow record created but availability was not decremented"
            );
            return Err(CirculationError::AvailabilityUpdateFailed(None));
        }
        Err(e) => {
            tracing::error!(
                patron_id = %record.patron_id,
                book_id = %book.id,
                error = %e,
                "borrow record created but availability update failed"
            );
            return Err(CirculationError::AvailabilityUpdateFailed(Some(e)));
        }
    }

    tracing::info!(
        patron_id = %record.patron_id,
        book_id = %book.id,
        due_date = %record.due_date,
        "book borrowed"
    );

    Ok(BorrowReceipt {
        title: book.title,
        due_date: record.due_date,
    })
}
