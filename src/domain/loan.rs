use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use super::{BookId, PatronId, ReturnBookError};

/// 貸出期間（日数）
pub const LOAN_PERIOD_DAYS: i64 = 14;

/// 貸出記録 - 会員1人による書籍1冊の貸出
///
/// ライフサイクル：なし → 貸出中（貸出時） → 返却済み（返却時）。
/// `return_date` が `None` の間は貸出中。返却済みの記録は履歴となり、以後変更されない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BorrowRecord {
    pub patron_id: PatronId,
    pub book_id: BookId,
    pub borrow_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub return_date: Option<DateTime<Utc>>,
}

impl BorrowRecord {
    pub fn is_active(&self) -> bool {
        self.return_date.is_none()
    }

    pub fn belongs_to(&self, patron_id: &PatronId, book_id: BookId) -> bool {
        &self.patron_id == patron_id && self.book_id == book_id
    }
}

/// 純粋関数：返却期限を計算する
pub fn due_date_for(borrowed_at: DateTime<Utc>) -> DateTime<Utc> {
    borrowed_at + Duration::days(LOAN_PERIOD_DAYS)
}

/// 純粋関数：貸出記録を作成する
///
/// 返却期限は貸出日時のちょうど14日後。
pub fn open_loan(patron_id: PatronId, book_id: BookId, borrowed_at: DateTime<Utc>) -> BorrowRecord {
    BorrowRecord {
        patron_id,
        book_id,
        borrow_date: borrowed_at,
        due_date: due_date_for(borrowed_at),
        return_date: None,
    }
}

/// 純粋関数：貸出記録を閉じる
///
/// 返却済みの記録は変更できない。
pub fn close_loan(
    record: &BorrowRecord,
    returned_at: DateTime<Utc>,
) -> Result<BorrowRecord, ReturnBookError> {
    if !record.is_active() {
        return Err(ReturnBookError::AlreadyReturned);
    }

    Ok(BorrowRecord {
        return_date: Some(returned_at),
        ..record.clone()
    })
}
