//! カタログ入力と各種IDの検証（純粋関数）
//!
//! `is_valid_*` は真偽のみを返し、`validate_*` は最初に違反したルールを返す。

use thiserror::Error;

pub const PATRON_ID_LENGTH: usize = 6;
pub const ISBN13_LENGTH: usize = 13;
pub const MAX_TITLE_LENGTH: usize = 200;
pub const MAX_AUTHOR_LENGTH: usize = 100;

/// 決済ゲートウェイの取引IDの接頭辞
pub const TRANSACTION_ID_PREFIX: &str = "txn_";

/// カタログ入力のルール違反
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldViolation {
    #[error("Title is required.")]
    TitleRequired,

    #[error("Title must be less than 200 characters.")]
    TitleTooLong,

    #[error("Author is required.")]
    AuthorRequired,

    #[error("Author must be less than 100 characters.")]
    AuthorTooLong,

    #[error("ISBN must be exactly 13 digits.")]
    InvalidIsbn,

    #[error("Total copies must be a positive integer.")]
    InvalidTotalCopies,
}

/// ASCIIの数字のみで構成され、ちょうど `length` 文字であるか
///
/// 全角数字などASCII以外の数字は受け付けない。
fn is_digits_of_length(s: &str, length: usize) -> bool {
    s.chars().count() == length && s.chars().all(|c| c.is_ascii_digit())
}

pub fn is_valid_patron_id(s: &str) -> bool {
    is_digits_of_length(s, PATRON_ID_LENGTH)
}

pub fn is_valid_isbn13(s: &str) -> bool {
    is_digits_of_length(s, ISBN13_LENGTH)
}

pub fn is_valid_transaction_id(s: &str) -> bool {
    s.starts_with(TRANSACTION_ID_PREFIX)
}

/// タイトル：前後の空白を除いて空でなく、200文字以内
pub fn validate_title(title: &str) -> Result<(), FieldViolation> {
    let title = title.trim();
    if title.is_empty() {
        return Err(FieldViolation::TitleRequired);
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(FieldViolation::TitleTooLong);
    }
    Ok(())
}

/// 著者：前後の空白を除いて空でなく、100文字以内
pub fn validate_author(author: &str) -> Result<(), FieldViolation> {
    let author = author.trim();
    if author.is_empty() {
        return Err(FieldViolation::AuthorRequired);
    }
    if author.chars().count() > MAX_AUTHOR_LENGTH {
        return Err(FieldViolation::AuthorTooLong);
    }
    Ok(())
}

pub fn validate_isbn(isbn: &str) -> Result<(), FieldViolation> {
    if is_valid_isbn13(isbn) {
        Ok(())
    } else {
        Err(FieldViolation::InvalidIsbn)
    }
}

/// 総冊数：正の整数
///
/// `None` は整数として表せない値（文字列や小数）を表し、変換せずに拒否する。
/// `u32::MAX` を超える値も拒否する。
pub fn validate_total_copies(total_copies: Option<i64>) -> Result<u32, FieldViolation> {
    total_copies
        .filter(|n| *n > 0)
        .and_then(|n| u32::try_from(n).ok())
        .ok_or(FieldViolation::InvalidTotalCopies)
}
