use crate::domain::validation::FieldViolation;
use thiserror::Error;

/// カタログ管理アプリケーション層のエラー
#[derive(Debug, Error)]
pub enum CatalogError {
    /// 入力値がルールに違反している
    #[error(transparent)]
    InvalidField(#[from] FieldViolation),

    /// 同じISBNの書籍が既に存在する
    #[error("A book with this ISBN already exists.")]
    DuplicateIsbn,

    /// 書籍の登録に失敗した（`None` は登録が拒否されたことを表す）
    #[error("Database error occurred while adding the book.")]
    InsertFailed(#[source] Option<Box<dyn std::error::Error + Send + Sync>>),

    /// カタログの読み込みに失敗した
    #[error("Database error occurred while reading the catalog.")]
    ReadFailed(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// アプリケーション層の Result型
pub type Result<T> = std::result::Result<T, CatalogError>;
