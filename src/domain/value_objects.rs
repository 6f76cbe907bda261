use serde::{Deserialize, Serialize};

use super::validation::is_valid_patron_id;

/// 会員ID - 図書カード番号（6桁の数字）
///
/// [`PatronId::parse`] からのみ生成できるため、手元にある値は常に形式チェック済み。
/// 会員が実在するかは確認しない。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PatronId(String);

impl PatronId {
    pub fn parse(raw: &str) -> Option<Self> {
        is_valid_patron_id(raw).then(|| Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PatronId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// 書籍ID - カタログの行ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BookId(i64);

impl BookId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for BookId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
