#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use library_fees::application::ServiceDependencies;
use library_fees::domain::{Book, BookId, NewBook, PatronId};
use library_fees::ports::*;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

// ============================================================================
// スタブ実装（テスト用）
// ============================================================================

/// 書き込み系コラボレーターの振る舞い
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Write {
    /// 通常どおり書き込む
    #[default]
    Succeed,
    /// `Ok(false)` を返す
    Reject,
    /// `Err` を返す
    Fail,
}

/// 読み込み・書き込みの振る舞いの切り替え
#[derive(Debug, Default)]
pub struct Behavior {
    pub insert_book: Write,
    pub insert_borrow_record: Write,
    pub update_availability: Write,
    pub close_borrow_record: Write,
    pub fail_book_reads: bool,
    pub fail_borrowed_books: bool,
    pub fail_history: bool,
    pub borrow_count_override: Option<usize>,
}

/// 呼び出し回数の記録
#[derive(Debug, Default, Clone)]
pub struct Calls {
    pub get_book_by_isbn: usize,
    pub get_all_books: usize,
    pub get_patron_borrowed_books: usize,
    pub inserted_books: Vec<NewBook>,
    pub inserted_records: Vec<(String, BookId, DateTime<Utc>, DateTime<Utc>)>,
    pub availability_updates: Vec<(BookId, i32)>,
    pub closed_records: Vec<(String, BookId, DateTime<Utc>)>,
}

fn stub_error(what: &str) -> Box<dyn std::error::Error + Send + Sync> {
    format!("stub failure: {}", what).into()
}

/// インメモリの書籍・貸出記録スタブ
#[derive(Default)]
pub struct StubLibrary {
    books: Mutex<Vec<Book>>,
    current_loans: Mutex<HashMap<String, Vec<CurrentLoanView>>>,
    history: Mutex<HashMap<String, Vec<HistoryEntryView>>>,
    pub behavior: Mutex<Behavior>,
    pub calls: Mutex<Calls>,
}

impl StubLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_book(
        &self,
        id: i64,
        title: &str,
        author: &str,
        isbn: &str,
        total: u32,
        available: u32,
    ) {
        self.books.lock().unwrap().push(Book {
            id: BookId::new(id),
            title: title.to_string(),
            author: author.to_string(),
            isbn: isbn.to_string(),
            total_copies: total,
            available_copies: available,
        });
    }

    pub fn add_current_loan(
        &self,
        patron_id: &str,
        book_id: i64,
        title: &str,
        borrow_date: DateTime<Utc>,
        due_date: DateTime<Utc>,
    ) {
        self.current_loans
            .lock()
            .unwrap()
            .entry(patron_id.to_string())
            .or_default()
            .push(CurrentLoanView {
                book_id: BookId::new(book_id),
                title: title.to_string(),
                borrow_date,
                due_date,
            });
    }

    /// 返却期限から14日さかのぼって貸し出された記録を追加する
    pub fn add_loan_due(
        &self,
        patron_id: &str,
        book_id: i64,
        title: &str,
        due_date: DateTime<Utc>,
    ) {
        let borrow_date = due_date - Duration::days(14);
        self.add_current_loan(patron_id, book_id, title, borrow_date, due_date);
    }

    pub fn add_history(
        &self,
        patron_id: &str,
        book_id: i64,
        title: &str,
        borrow_date: DateTime<Utc>,
        return_date: Option<DateTime<Utc>>,
    ) {
        self.history
            .lock()
            .unwrap()
            .entry(patron_id.to_string())
            .or_default()
            .push(HistoryEntryView {
                book_id: BookId::new(book_id),
                title: title.to_string(),
                borrow_date,
                return_date,
            });
    }

    pub fn book(&self, id: i64) -> Option<Book> {
        self.books
            .lock()
            .unwrap()
            .iter()
            .find(|b| b.id == BookId::new(id))
            .cloned()
    }

    pub fn calls(&self) -> Calls {
        self.calls.lock().unwrap().clone()
    }

    pub fn configure(&self, f: impl FnOnce(&mut Behavior)) {
        f(&mut self.behavior.lock().unwrap());
    }
}

#[async_trait]
impl BookRepository for StubLibrary {
    async fn get_book_by_id(&self, book_id: BookId) -> book_repository::Result<Option<Book>> {
        if self.behavior.lock().unwrap().fail_book_reads {
            return Err(stub_error("get_book_by_id"));
        }
        Ok(self.book(book_id.value()))
    }

    async fn get_book_by_isbn(&self, isbn: &str) -> book_repository::Result<Option<Book>> {
        self.calls.lock().unwrap().get_book_by_isbn += 1;
        if self.behavior.lock().unwrap().fail_book_reads {
            return Err(stub_error("get_book_by_isbn"));
        }
        Ok(self
            .books
            .lock()
            .unwrap()
            .iter()
            .find(|b| b.isbn == isbn)
            .cloned())
    }

    async fn insert_book(&self, book: NewBook) -> book_repository::Result<bool> {
        self.calls.lock().unwrap().inserted_books.push(book.clone());
        match self.behavior.lock().unwrap().insert_book {
            Write::Succeed => {}
            Write::Reject => return Ok(false),
            Write::Fail => return Err(stub_error("insert_book")),
        }
        let mut books = self.books.lock().unwrap();
        let id = books.len() as i64 + 1;
        books.push(Book {
            id: BookId::new(id),
            title: book.title,
            author: book.author,
            isbn: book.isbn,
            total_copies: book.total_copies,
            available_copies: book.available_copies,
        });
        Ok(true)
    }

    async fn get_all_books(&self) -> book_repository::Result<Vec<Book>> {
        self.calls.lock().unwrap().get_all_books += 1;
        if self.behavior.lock().unwrap().fail_book_reads {
            return Err(stub_error("get_all_books"));
        }
        Ok(self.books.lock().unwrap().clone())
    }

    async fn update_book_availability(
        &self,
        book_id: BookId,
        delta: i32,
    ) -> book_repository::Result<bool> {
        self.calls
            .lock()
            .unwrap()
            .availability_updates
            .push((book_id, delta));
        match self.behavior.lock().unwrap().update_availability {
            Write::Succeed => {}
            Write::Reject => return Ok(false),
            Write::Fail => return Err(stub_error("update_book_availability")),
        }
        let mut books = self.books.lock().unwrap();
        let Some(book) = books.iter_mut().find(|b| b.id == book_id) else {
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
impl BorrowRecordRepository for StubLibrary {
    async fn get_patron_borrow_count(
        &self,
        patron_id: &PatronId,
    ) -> borrow_record_repository::Result<usize> {
        if let Some(count) = self.behavior.lock().unwrap().borrow_count_override {
            return Ok(count);
        }
        Ok(self
            .current_loans
            .lock()
            .unwrap()
            .get(patron_id.as_str())
            .map_or(0, Vec::len))
    }

    async fn get_patron_borrowed_books(
        &self,
        patron_id: &PatronId,
    ) -> borrow_record_repository::Result<Vec<CurrentLoanView>> {
        self.calls.lock().unwrap().get_patron_borrowed_books += 1;
        if self.behavior.lock().unwrap().fail_borrowed_books {
            return Err(stub_error("get_patron_borrowed_books"));
        }
        Ok(self
            .current_loans
            .lock()
            .unwrap()
            .get(patron_id.as_str())
            .cloned()
            .unwrap_or_default())
    }

    async fn get_patron_borrow_history(
        &self,
        patron_id: &PatronId,
    ) -> borrow_record_repository::Result<Vec<HistoryEntryView>> {
        if self.behavior.lock().unwrap().fail_history {
            return Err(stub_error("get_patron_borrow_history"));
        }
        Ok(self
            .history
            .lock()
            .unwrap()
            .get(patron_id.as_str())
            .cloned()
            .unwrap_or_default())
    }

    async fn insert_borrow_record(
        &self,
        patron_id: &PatronId,
        book_id: BookId,
        borrow_date: DateTime<Utc>,
        due_date: DateTime<Utc>,
    ) -> borrow_record_repository::Result<bool> {
        self.calls.lock().unwrap().inserted_records.push((
            patron_id.to_string(),
            book_id,
            borrow_date,
            due_date,
        ));
        match self.behavior.lock().unwrap().insert_borrow_record {
            Write::Succeed => {}
            Write::Reject => return Ok(false),
            Write::Fail => return Err(stub_error("insert_borrow_record")),
        }
        let title = self
            .book(book_id.value())
            .map(|b| b.title)
            .unwrap_or_default();
        self.add_current_loan(
            patron_id.as_str(),
            book_id.value(),
            &title,
            borrow_date,
            due_date,
        );
        Ok(true)
    }

    async fn update_borrow_record_return_date(
        &self,
        patron_id: &PatronId,
        book_id: BookId,
        return_date: DateTime<Utc>,
    ) -> borrow_record_repository::Result<bool> {
        self.calls.lock().unwrap().closed_records.push((
            patron_id.to_string(),
            book_id,
            return_date,
        ));
        match self.behavior.lock().unwrap().close_borrow_record {
            Write::Succeed => {}
            Write::Reject => return Ok(false),
            Write::Fail => return Err(stub_error("update_borrow_record_return_date")),
        }

        let closed = {
            let mut loans = self.current_loans.lock().unwrap();
            let Some(patron_loans) = loans.get_mut(patron_id.as_str()) else {
                return Ok(false);
            };
            let Some(index) = patron_loans.iter().position(|l| l.book_id == book_id) else {
                return Ok(false);
            };
            patron_loans.remove(index)
        };

        self.add_history(
            patron_id.as_str(),
            book_id.value(),
            &closed.title,
            closed.borrow_date,
            Some(return_date),
        );
        Ok(true)
    }
}

/// ゲートウェイの応答設定
#[derive(Debug, Clone)]
pub enum GatewayReply {
    Approve {
        transaction_id: String,
        message: String,
    },
    Decline(String),
    Error(String),
}

/// 決済ゲートウェイスタブ
pub struct StubGateway {
    pub payment_reply: Mutex<GatewayReply>,
    pub refund_reply: Mutex<GatewayReply>,
    pub payments: Mutex<Vec<(String, Decimal, String)>>,
    pub refunds: Mutex<Vec<(String, Decimal)>>,
}

impl StubGateway {
    pub fn new() -> Self {
        Self {
            payment_reply: Mutex::new(GatewayReply::Approve {
                transaction_id: "txn_123".to_string(),
                message: "Success".to_string(),
            }),
            refund_reply: Mutex::new(GatewayReply::Approve {
                transaction_id: String::new(),
                message: "Refund OK".to_string(),
            }),
            payments: Mutex::new(Vec::new()),
            refunds: Mutex::new(Vec::new()),
        }
    }

    pub fn reply_to_payments(&self, reply: GatewayReply) {
        *self.payment_reply.lock().unwrap() = reply;
    }

    pub fn reply_to_refunds(&self, reply: GatewayReply) {
        *self.refund_reply.lock().unwrap() = reply;
    }

    pub fn payment_calls(&self) -> Vec<(String, Decimal, String)> {
        self.payments.lock().unwrap().clone()
    }

    pub fn refund_calls(&self) -> Vec<(String, Decimal)> {
        self.refunds.lock().unwrap().clone()
    }
}

#[async_trait]
impl PaymentGateway for StubGateway {
    async fn process_payment(
        &self,
        patron_id: &PatronId,
        amount: Decimal,
        description: &str,
    ) -> payment_gateway::Result<PaymentOutcome> {
        self.payments.lock().unwrap().push((
            patron_id.to_string(),
            amount,
            description.to_string(),
        ));

        match self.payment_reply.lock().unwrap().clone() {
            GatewayReply::Approve {
                transaction_id,
                message,
            } => Ok(PaymentOutcome {
                success: true,
                transaction_id,
                message,
            }),
            GatewayReply::Decline(message) => Ok(PaymentOutcome {
                success: false,
                transaction_id: String::new(),
                message,
            }),
            GatewayReply::Error(message) => Err(message.into()),
        }
    }

    async fn refund_payment(
        &self,
        transaction_id: &str,
        amount: Decimal,
    ) -> payment_gateway::Result<RefundOutcome> {
        self.refunds
            .lock()
            .unwrap()
            .push((transaction_id.to_string(), amount));

        match self.refund_reply.lock().unwrap().clone() {
            GatewayReply::Approve { message, .. } => Ok(RefundOutcome {
                success: true,
                message,
            }),
            GatewayReply::Decline(message) => Ok(RefundOutcome {
                success: false,
                message,
            }),
            GatewayReply::Error(message) => Err(message.into()),
        }
    }
}

/// スタブ一式で依存関係を組み立てる
pub fn service_deps(library: &Arc<StubLibrary>, gateway: &Arc<StubGateway>) -> ServiceDependencies {
    ServiceDependencies {
        books: library.clone(),
        borrow_records: library.clone(),
        payment_gateway: gateway.clone(),
    }
}

/// 新しいスタブ一式
pub fn setup() -> (Arc<StubLibrary>, Arc<StubGateway>, ServiceDependencies) {
    let library = Arc::new(StubLibrary::new());
    let gateway = Arc::new(StubGateway::new());
    let deps = service_deps(&library, &gateway);
    (library, gateway, deps)
}
