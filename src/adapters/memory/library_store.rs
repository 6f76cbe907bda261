use crate::domain::{
    Book, BookId, NewBook, PatronId,
    loan::{self, BorrowRecord},
};
use crate::ports::book_repository::{BookRepository, Result};
use crate::ports::borrow_record_repository::{
    BorrowRecordRepository, CurrentLoanView, HistoryEntryView,
};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

/// インメモリストアの障害
#[derive(Debug, thiserror::Error)]
pub enum InMemoryStoreError {
    #[error("library store lock was poisoned")]
    LockPoisoned,
}

#[derive(Debug, Default)]
struct StoreState {
    books: BTreeMap<BookId, Book>,
    next_book_id: i64,
    records: Vec<BorrowRecord>,
}

impl StoreState {
    fn book_title(&self, book_id: BookId) -> Option<&str> {
        self.books.get(&book_id).map(|book| book.title.as_str())
    }
}

/// 書籍リポジトリと貸出記録リポジトリのインメモリ実装
///
/// 書籍IDは1から順に採番する。ISBNは一意で、貸出可能冊数は
/// `0..=total_copies` を外れない。違反する書き込みはエラーではなく `Ok(false)` を返す。
pub struct InMemoryLibraryStore {
    state: Mutex<StoreState>,
}

impl InMemoryLibraryStore {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(StoreState::default()),
        }
    }

    fn lock(&self) -> std::result::Result<MutexGuard<'_, StoreState>, InMemoryStoreError> {
        self.state
            .lock()
            .map_err(|_| InMemoryStoreError::LockPoisoned)
    }

    /// ストアが空の場合にサンプルの蔵書を登録する
    ///
    /// 3冊を登録し、"1984" の唯一の1冊は会員 123456 に貸出中とする。
    /// 登録した冊数を返す。
    pub fn seed_sample_data(
        &self,
        now: DateTime<Utc>,
    ) -> std::result::Result<usize, InMemoryStoreError> {
        let mut state = self.lock()?;
        if !state.books.is_empty() {
            return Ok(0);
        }

        let samples = [
            (
                "The Great Gatsby",
                "F. Scott Fitzgerald",
                "9780743273565",
                3,
                3,
            ),
            ("To Kill a Mockingbird", "Harper Lee", "9780061120084", 2, 2),
            ("1984", "George Orwell", "9780451524935", 1, 0),
        ];

        for (title, author, isbn, total, available) in samples {
            let id = insert_locked(
                &mut state,
                NewBook {
                    title: title.to_string(),
                    author: author.to_string(),
                    isbn: isbn.to_string(),
                    total_copies: total,
                    available_copies: available,
                },
            );

            if available < total
                && let Some(patron_id) = PatronId::parse("123456")
            {
                let record = loan::open_loan(patron_id, id, now - Duration::days(5));
                state.records.push(record);
            }
        }

        Ok(samples.len())
    }
}

impl Default for InMemoryLibraryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn insert_locked(state: &mut StoreState, book: NewBook) -> BookId {
    state.next_book_id += 1;
    let id = BookId::new(state.next_book_id);
    state.books.insert(
        id,
        Book {
            id,
            title: book.title,
            author: book.author,
            isbn: book.isbn,
            total_copies: book.total_copies,
            available_copies: book.available_copies.min(book.total_copies),
        },
    );
    id
}

#[async_trait]
impl BookRepository for InMemoryLibraryStore {
    async fn get_book_by_id(&self, book_id: BookId) -> Result<Option<Book>> {
        Ok(self.lock()?.books.get(&book_id).cloned())
    }

    async fn get_book_by_isbn(&self, isbn: &str) -> Result<Option<Book>> {
        Ok(self
            .lock()?
            .books
            .values()
            .find(|book| book.isbn == isbn)
            .cloned())
    }

    async fn insert_book(&self, book: NewBook) -> Result<bool> {
        let mut state = self.lock()?;
        if state.books.values().any(|other| other.isbn == book.isbn) {
            return Ok(false);
        }
        insert_locked(&mut state, book);
        Ok(true)
    }

    async fn get_all_books(&self) -> Result<Vec<Book>> {
        Ok(self.lock()?.books.values().cloned().collect())
    }

    async fn update_book_availability(&self, book_id: BookId, delta: i32) -> Result<bool> {
        let mut state = self.lock()?;
        let Some(book) = state.books.get_mut(&book_id) else {
            return Ok(false);
        };
        match book.adjusted_availability(delta) {
            Some(available) => {
                book.available_copies = available;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl BorrowRecordRepository for InMemoryLibraryStore {
    async fn get_patron_borrow_count(&self, patron_id: &PatronId) -> Result<usize> {
        Ok(self
            .lock()?
            .records
            .iter()
            .filter(|record| record.is_active() && &record.patron_id == patron_id)
            .count())
    }

    async fn get_patron_borrowed_books(
        &self,
        patron_id: &PatronId,
    ) -> Result<Vec<CurrentLoanView>> {
        let state = self.lock()?;
        Ok(state
            .records
            .iter()
            .filter(|record| record.is_active() && &record.patron_id == patron_id)
            .filter_map(|record| {
                let title = state.book_title(record.book_id)?;
                Some(CurrentLoanView {
                    book_id: record.book_id,
                    title: title.to_string(),
                    borrow_date: record.borrow_date,
                    due_date: record.due_date,
                })
            })
            .collect())
    }

    async fn get_patron_borrow_history(
        &self,
        patron_id: &PatronId,
    ) -> Result<Vec<HistoryEntryView>> {
        let state = self.lock()?;
        Ok(state
            .records
            .iter()
            .filter(|record| !record.is_active() && &record.patron_id == patron_id)
            .filter_map(|record| {
                let title = state.book_title(record.book_id)?;
                Some(HistoryEntryView {
                    book_id: record.book_id,
                    title: title.to_string(),
                    borrow_date: record.borrow_date,
                    return_date: record.return_date,
                })
            })
            .collect())
    }

    async fn insert_borrow_record(
        &self,
        patron_id: &PatronId,
        book_id: BookId,
        borrow_date: DateTime<Utc>,
        due_date: DateTime<Utc>,
    ) -> Result<bool> {
        let mut state = self.lock()?;
        if !state.books.contains_key(&book_id) {
            return Ok(false);
        }
        state.records.push(BorrowRecord {
            patron_id: patron_id.clone(),
            book_id,
            borrow_date,
            due_date,
            return_date: None,
        });
        Ok(true)
    }

    async fn update_borrow_record_return_date(
        &self,
        patron_id: &PatronId,
        book_id: BookId,
        return_date: DateTime<Utc>,
    ) -> Result<bool> {
        let mut state = self.lock()?;
        let Some(record) = state
            .records
            .iter_mut()
            .find(|record| record.is_active() && record.belongs_to(patron_id, book_id))
        else {
            return Ok(false);
        };

        match loan::close_loan(record, return_date) {
            Ok(closed) => {
                *record = closed;
                Ok(true)
            }
            Err(_) => Ok(false),
        }
    }
}
