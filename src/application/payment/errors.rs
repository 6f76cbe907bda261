use thiserror::Error;

/// 延滞料金の支払い・返金のエラー
///
/// ゲートウェイの障害（`Err`）と拒否（`success == false`）は区別する。
#[derive(Debug, Error)]
pub enum PaymentError {
    /// 会員IDの形式が不正
    #[error("Invalid patron ID. Must be exactly 6 digits.")]
    InvalidPatronId,

    /// 支払うべき延滞料金がない
    #[error("No late fees to pay for this book.")]
    NoFeesDue,

    /// 書籍が存在しない
    #[error("Book not found.")]
    BookNotFound,

    /// 書籍の読み込みに失敗した
    #[error("Database error occurred while looking up the book.")]
    BookLookupFailed(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// ゲートウェイが支払いを拒否した
    #[error("Payment failed: {0}")]
    PaymentDeclined(String),

    /// ゲートウェイの障害（支払い）
    #[error("Payment processing error: {0}")]
    PaymentGatewayFailed(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// 取引IDの形式が不正
    #[error("Invalid transaction ID.")]
    InvalidTransactionId,

    /// 返金額が0以下
    #[error("Refund amount must be greater than 0.")]
    RefundAmountNotPositive,

    /// 返金額が延滞料金の上限を超えている
    #[error("Refund amount exceeds maximum late fee.")]
    RefundAmountExceedsMaximum,

    /// ゲートウェイが返金を拒否した
    #[error("Refund failed: {0}")]
    RefundDeclined(String),

    /// ゲートウェイの障害（返金）
    #[error("Refund processing error: {0}")]
    RefundGatewayFailed(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// アプリケーション層の Result型
pub type Result<T> = std::result::Result<T, PaymentError>;
