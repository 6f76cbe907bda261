use crate::domain::PatronId;
use async_trait::async_trait;
use rust_decimal::Decimal;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// 支払いに対するゲートウェイの判定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentOutcome {
    pub success: bool,
    pub transaction_id: String,
    pub message: String,
}

/// 返金に対するゲートウェイの判定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefundOutcome {
    pub success: bool,
    pub message: String,
}

/// 決済ゲートウェイポート（延滞料金の精算用）
///
/// 取引はゲートウェイが管理し、呼び出し側は判定を中継するだけ。
/// 拒否は `success == false` の `Ok` で表し、`Err` はゲートウェイ自体の障害を表す。
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// 会員に `amount` を請求する
    async fn process_payment(
        &self,
        patron_id: &PatronId,
        amount: Decimal,
        description: &str,
    ) -> Result<PaymentOutcome>;

    /// 過去の取引に対して `amount` を返金する
    async fn refund_payment(&self, transaction_id: &str, amount: Decimal) -> Result<RefundOutcome>;
}
