use serde::Serialize;

use super::BookId;

/// カタログの書籍
///
/// 不変条件：`available_copies <= total_copies`。貸出で1冊減り、返却で1冊戻る。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub total_copies: u32,
    pub available_copies: u32,
}

impl Book {
    pub fn is_available(&self) -> bool {
        self.available_copies > 0
    }

    /// `delta` を適用した後の貸出可能冊数（`0..=total_copies` を外れる場合は `None`）
    pub fn adjusted_availability(&self, delta: i32) -> Option<u32> {
        let adjusted = i64::from(self.available_copies) + i64::from(delta);
        u32::try_from(adjusted)
            .ok()
            .filter(|n| *n <= self.total_copies)
    }
}

/// 検証済みの登録用書籍データ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub total_copies: u32,
    pub available_copies: u32,
}

impl NewBook {
    /// 登録時は全冊が貸出可能
    pub fn fully_available(title: String, author: String, isbn: String, total_copies: u32) -> Self {
        Self {
            title,
            author,
            isbn,
            total_copies,
            available_copies: total_copies,
        }
    }
}
