use crate::application::ServiceDependencies;
use crate::domain::{
    Book, NewBook,
    commands::AddBook,
    validation::{validate_author, validate_isbn, validate_title, validate_total_copies},
};
use std::str::FromStr;

use super::errors::{CatalogError, Result};

/// 書籍の追加結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookAdded {
    pub title: String,
}

impl std::fmt::Display for BookAdded {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Book \"{}\" successfully added to catalog.", self.title)
    }
}

/// 検索種別
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchType {
    /// タイトルの部分一致（大文字小文字を区別しない）
    Title,
    /// 著者の部分一致（大文字小文字を区別しない）
    Author,
    /// ISBNの完全一致
    Isbn,
}

impl FromStr for SearchType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "title" => Ok(SearchType::Title),
            "author" => Ok(SearchType::Author),
            "isbn" => Ok(SearchType::Isbn),
            other => Err(format!("Invalid search type: {}", other)),
        }
    }
}

/// 書籍をカタログに追加する（純粋な関数）
///
/// 検証順序（最初の違反で打ち切る）：
/// タイトル必須 → タイトル長 → 著者必須 → 著者長 → ISBN形式 → 冊数 → ISBN重複
///
/// 登録時の貸出可能冊数は常に総冊数と同じ。
pub async fn add_book_to_catalog(deps: &ServiceDependencies, cmd: AddBook) -> Result<BookAdded> {
    let title = cmd.title.trim().to_string();
    let author = cmd.author.trim().to_string();
    let isbn = cmd.isbn.trim().to_string();

    // 1. 入力検証
    validate_title(&title)?;
    validate_author(&author)?;
    validate_isbn(&isbn)?;
    let total_copies = validate_total_copies(cmd.total_copies)?;

    // 2. ISBN重複確認
    let existing = deps
        .books
        .get_book_by_isbn(&isbn)
        .await
        .map_err(|e| CatalogError::InsertFailed(Some(e)))?;

    if existing.is_some() {
        tracing::debug!(isbn = %isbn, "rejected duplicate ISBN");
        return Err(CatalogError::DuplicateIsbn);
    }

    // 3. 登録
    let new_book = NewBook::fully_available(title.clone(), author, isbn, total_copies);
    let inserted = deps
        .books
        .insert_book(new_book)
        .await
        .map_err(|e| CatalogError::InsertFailed(Some(e)))?;

    if !inserted {
        return Err(CatalogError::InsertFailed(None));
    }

    tracing::info!(title = %title, total_copies, "book added to catalog");
    Ok(BookAdded { title })
}

/// カタログを検索する（純粋な関数）
///
/// - 空白のみの検索語は検索せずに空の結果を返す
/// - title/author は部分一致（大文字小文字を区別しない）
/// - isbn は完全一致のみ
/// - 未知の検索種別は空の結果を返す（エラーにはしない）
pub async fn search_books_in_catalog(
    deps: &ServiceDependencies,
    term: &str,
    search_type: &str,
) -> Result<Vec<Book>> {
    let term = term.trim();
    if term.is_empty() {
        return Ok(Vec::new());
    }

    let Ok(search_type) = search_type.parse::<SearchType>() else {
        tracing::debug!(search_type, "unknown search type");
        return Ok(Vec::new());
    };

    match search_type {
        SearchType::Isbn => {
            let book = deps
                .books
                .get_book_by_isbn(term)
                .await
                .map_err(CatalogError::ReadFailed)?;
            Ok(book.into_iter().collect())
        }
        SearchType::Title | SearchType::Author => {
            let needle = term.to_lowercase();
            let books = deps
                .books
                .get_all_books()
                .await
                .map_err(CatalogError::ReadFailed)?;

            Ok(books
                .into_iter()
                .filter(|book| {
                    let haystack = match search_type {
                        SearchType::Author => &book.author,
                        _ => &book.title,
                    };
                    haystack.to_lowercase().contains(&needle)
                })
                .collect())
        }
    }
}

/// カタログの全書籍を取得する
pub async fn list_catalog(deps: &ServiceDependencies) -> Result<Vec<Book>> {
    deps.books
        .get_all_books()
        .await
        .map_err(CatalogError::ReadFailed)
}
