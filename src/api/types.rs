use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{Book, commands::AddBook};

/// 書籍追加リクエスト（POST /books）
///
/// `total_copies` は任意のJSON値として受け取り、整数以外は拒否する（変換しない）。
#[derive(Debug, Deserialize)]
pub struct AddBookRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub isbn: String,
    #[serde(default)]
    pub total_copies: serde_json::Value,
}

impl AddBookRequest {
    pub fn to_command(self) -> AddBook {
        AddBook {
            title: self.title,
            author: self.author,
            isbn: self.isbn,
            total_copies: self.total_copies.as_i64(),
        }
    }
}

/// 貸出・返却・支払いリクエスト
#[derive(Debug, Deserialize)]
pub struct PatronBookRequest {
    pub patron_id: String,
    pub book_id: i64,
}

/// 返金リクエスト（POST /refunds）
#[derive(Debug, Deserialize)]
pub struct RefundRequest {
    pub transaction_id: String,
    pub amount: Decimal,
}

/// 検索のクエリパラメータ
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
    #[serde(rename = "type")]
    pub search_type: Option<String>,
}

/// 状況レポートのクエリパラメータ
#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    #[serde(default)]
    pub patron_id: String,
}

/// 書籍レスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct BookResponse {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub total_copies: u32,
    pub available_copies: u32,
}

impl From<Book> for BookResponse {
    fn from(book: Book) -> Self {
        Self {
            id: book.id.value(),
            title: book.title,
            author: book.author,
            isbn: book.isbn,
            total_copies: book.total_copies,
            available_copies: book.available_copies,
        }
    }
}

/// 操作結果レスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct OperationResponse {
    pub success: bool,
    pub message: String,
}

impl OperationResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// 支払いレスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct PaymentResponse {
    pub success: bool,
    pub message: String,
    pub transaction_id: Option<String>,
}

/// エラーレスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error_type.into(),
            message: message.into(),
        }
    }
}
