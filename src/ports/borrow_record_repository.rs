use crate::domain::{BookId, PatronId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// 貸出中の記録（書籍タイトル付きのビュー）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentLoanView {
    pub book_id: BookId,
    pub title: String,
    pub borrow_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
}

/// 返却済みの記録（貸出履歴のビュー）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntryView {
    pub book_id: BookId,
    pub title: String,
    pub borrow_date: DateTime<Utc>,
    pub return_date: Option<DateTime<Utc>>,
}

/// 貸出記録リポジトリポート
///
/// 同じ (patron, book) の組に対して貸出中の記録は1件だけと想定する。
#[async_trait]
pub trait BorrowRecordRepository: Send + Sync {
    /// 会員の貸出中の冊数を取得する
    ///
    /// 貸出上限（5冊）の確認に使用される。
    async fn get_patron_borrow_count(&self, patron_id: &PatronId) -> Result<usize>;

    /// 会員の貸出中の記録を取得する
    async fn get_patron_borrowed_books(
        &self,
        patron_id: &PatronId,
    ) -> Result<Vec<CurrentLoanView>>;

    /// 会員の返却済みの記録を取得する
    async fn get_patron_borrow_history(
        &self,
        patron_id: &PatronId,
    ) -> Result<Vec<HistoryEntryView>>;

    /// 貸出記録を作成する
    async fn insert_borrow_record(
        &self,
        patron_id: &PatronId,
        book_id: BookId,
        borrow_date: DateTime<Utc>,
        due_date: DateTime<Utc>,
    ) -> Result<bool>;

    /// 貸出中の記録に返却日時を設定する
    ///
    /// 該当する貸出中の記録がない場合は `false` を返す。
    async fn update_borrow_record_return_date(
        &self,
        patron_id: &PatronId,
        book_id: BookId,
        return_date: DateTime<Utc>,
    ) -> Result<bool>;
}
