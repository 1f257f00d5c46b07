use serde::{Deserialize, Serialize};

use super::enums::{RecordStatus, TransactionKind};

/// A money-movement request awaiting (or past) review.
///
/// `amount` and `kind` are immutable once filed; only `status` changes, and
/// only for pending records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    /// Owning user. A reference, not an embedded record.
    pub user_id: i64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: f64,
    pub status: RecordStatus,
    /// ISO-8601 timestamp set by the server when the request was filed.
    pub request_date: Option<String>,
    /// ISO-8601 timestamp of the review decision; null while pending.
    pub approval_date: Option<String>,
}
