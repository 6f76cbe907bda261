use crate::domain::{PatronId, validation::TRANSACTION_ID_PREFIX};
use crate::ports::payment_gateway::{
    PaymentGateway as PaymentGatewayTrait, PaymentOutcome, RefundOutcome, Result,
};
use async_trait::async_trait;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

/// モックゲートウェイが承認する1回の請求額の上限
const PAYMENT_LIMIT: Decimal = dec!(1000.00);

/// PaymentGatewayのモック実装
///
/// 実際の決済処理は行わず、妥当なリクエストはすべて承認する。
/// 取引IDは `txn_<会員ID>_<uuid>` の形式。
pub struct PaymentGateway;

impl PaymentGateway {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PaymentGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PaymentGatewayTrait for PaymentGateway {
    /// 金額が範囲外でなければ請求を承認する
    async fn process_payment(
        &self,
        patron_id: &PatronId,
        amount: Decimal,
        description: &str,
    ) -> Result<PaymentOutcome> {
        if amount <= Decimal::ZERO {
            return Ok(PaymentOutcome {
                success: false,
                transaction_id: String::new(),
                message: "Invalid amount".to_string(),
            });
        }
        if amount > PAYMENT_LIMIT {
            return Ok(PaymentOutcome {
                success: false,
                transaction_id: String::new(),
                message: "Payment declined: amount exceeds limit".to_string(),
            });
        }

        let transaction_id = format!(
            "{}{}_{}",
            TRANSACTION_ID_PREFIX,
            patron_id,
            Uuid::new_v4().simple()
        );
        tracing::debug!(%transaction_id, %amount, description, "mock payment approved");

        Ok(PaymentOutcome {
            success: true,
            transaction_id,
            message: format!("Payment of ${:.2} processed successfully", amount),
        })
    }

    /// 形式が正しい取引IDであれば返金を承認する
    async fn refund_payment(
        &self,
        transaction_id: &str,
        amount: Decimal,
    ) -> Result<RefundOutcome> {
        if !transaction_id.starts_with(TRANSACTION_ID_PREFIX) {
            return Ok(RefundOutcome {
                success: false,
                message: "Invalid transaction ID".to_string(),
            });
        }
        if amount <= Decimal::ZERO {
            return Ok(RefundOutcome {
                success: false,
                message: "Invalid refund amount".to_string(),
            });
        }

        Ok(RefundOutcome {
            success: true,
            message: format!(
                "Refund of ${:.2} processed successfully. Refund ID: refund_{}",
                amount,
                Uuid::new_v4().simple()
            ),
        })
    }
}
