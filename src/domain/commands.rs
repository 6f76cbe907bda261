use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::BookId;

/// コマンド：書籍をカタログに追加する
///
/// `total_copies` が `None` の場合、整数以外の値が渡されたことを表す。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddBook {
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub total_copies: Option<i64>,
}

/// コマンド：書籍を貸し出す
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BorrowBook {
    pub patron_id: String,
    pub book_id: BookId,
    pub borrowed_at: DateTime<Utc>,
}

/// コマンド：書籍を返却する
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnBook {
    pub patron_id: String,
    pub book_id: BookId,
    pub returned_at: DateTime<Utc>,
}

/// コマンド：延滞料金を支払う
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayLateFees {
    pub patron_id: String,
    pub book_id: BookId,
    pub as_of: DateTime<Utc>,
}

/// コマンド：延滞料金の支払いを返金する
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefundLateFee {
    pub transaction_id: String,
    pub amount: Decimal,
}
