//! Store Failure - Classification of backing-store errors
//!
//! Repositories translate driver errors into [`StoreFailure`] once, and each
//! bounded context maps the result onto its own error enum. Driver details are
//! kept for logging only.

use std::time::Duration;

use thiserror::Error;

/// バッキングストアの失敗分類
///
/// * `Unavailable` - ストアに到達できない（タイムアウト・接続断）
/// * `UniqueViolation` - 一意制約違反
/// * `ForeignKeyViolation` - 外部キー制約違反
/// * `NotFound` - 該当行なし
/// * `Other` - 上記以外（内部エラーとして扱う）
#[derive(Debug, Error)]
pub enum StoreFailure {
    #[error("store unreachable: {0}")]
    Unavailable(String),

    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error("foreign key constraint violated: {0}")]
    ForeignKeyViolation(String),

    #[error("no matching row")]
    NotFound,

    #[error("store error: {0}")]
    Other(String),
}

impl StoreFailure {
    /// ストア呼び出しが期限を超過した
    pub fn deadline_exceeded(limit: Duration) -> Self {
        StoreFailure::Unavailable(format!("store call exceeded {} ms", limit.as_millis()))
    }

    /// 到達不可かどうか
    pub fn is_unavailable(&self) -> bool {
        matches!(self, StoreFailure::Unavailable(_))
    }
}
