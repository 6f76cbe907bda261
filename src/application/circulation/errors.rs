use thiserror::Error;

use super::borrow_service::MAX_ACTIVE_LOANS;

/// 貸出・返却アプリケーション層のエラー
#[derive(Debug, Error)]
pub enum CirculationError {
    /// 会員IDの形式が不正
    #[error("Invalid patron ID. Must be exactly 6 digits.")]
    InvalidPatronId,

    /// 書籍が存在しない
    #[error("Book not found.")]
    BookNotFound,

    /// 貸出可能な在庫がない
    #[error("This book is currently not available.")]
    BookNotAvailable,

    /// 貸出上限（5冊）に達している
    #[error("You have reached the maximum borrowing limit of {} books.", MAX_ACTIVE_LOANS)]
    BorrowLimitReached,

    /// 貸出中の記録が見つからない
    #[error("No active borrow record found for this patron and book.")]
    NoActiveBorrowRecord,

    /// 貸出記録の作成に失敗した（`None` は作成が拒否されたことを表す）
    #[error("Database error occurred while creating borrow record.")]
    RecordCreationFailed(#[source] Option<Box<dyn std::error::Error + Send + Sync>>),

    /// 貸出可能冊数の更新に失敗した（`None` は更新が拒否されたことを表す）
    #[error("Database error occurred while updating book availability.")]
    AvailabilityUpdateFailed(#[source] Option<Box<dyn std::error::Error + Send + Sync>>),

    /// 貸出記録の返却処理に失敗した
    #[error("Database error occurred while updating borrow record.")]
    RecordUpdateFailed(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// 書籍・貸出記録の読み込みに失敗した
    #[error("Database error occurred while reading library records.")]
    ReadFailed(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// アプリケーション層の Result型
pub type Result<T> = std::result::Result<T, CirculationError>;
