use crate::domain::{Book, BookId, NewBook};
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// 書籍リポジトリポート
///
/// カタログの読み書きを抽象化する。保存方式はアダプター側の責務。
/// `Ok(false)` は「書き込みが行われなかった」ことを表し、`Err` は障害を表す。
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// IDで書籍を取得する
    async fn get_book_by_id(&self, book_id: BookId) -> Result<Option<Book>>;

    /// ISBNで書籍を取得する（完全一致）
    async fn get_book_by_isbn(&self, isbn: &str) -> Result<Option<Book>>;

    /// 書籍を登録する
    async fn insert_book(&self, book: NewBook) -> Result<bool>;

    /// カタログの全書籍を取得する
    async fn get_all_books(&self) -> Result<Vec<Book>>;

    /// 貸出可能冊数を `delta` だけ増減する
    ///
    /// 結果が `0..=total_copies` を外れる場合は更新せず `false` を返す。
    async fn update_book_availability(&self, book_id: BookId, delta: i32) -> Result<bool>;
}
