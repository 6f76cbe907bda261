use crate::ports::{BookRepository, BorrowRecordRepository, PaymentGateway};
use std::sync::Arc;

/// サービスの依存関係
///
/// 各ユースケースは振る舞いを持たない純粋な関数として定義し、
/// コラボレーターはこの構造体で明示的に渡す。
/// テストではスタブ実装に差し替える。
#[derive(Clone)]
pub struct ServiceDependencies {
    pub books: Arc<dyn BookRepository>,
    pub borrow_records: Arc<dyn BorrowRecordRepository>,
    pub payment_gateway: Arc<dyn PaymentGateway>,
}
