//! Guestbook message record

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Timestamp format used in the guestbook log
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One guestbook entry. Records are append-only: never edited or deleted
/// once written. Field order matches the CSV columns of the durable log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct GuestbookMessage {
    /// Local timestamp, "YYYY-MM-DD HH:MM:SS"
    pub timestamp: String,
    /// Username of the author
    pub author: String,
    pub body: String,
}

/// Post request body
#[derive(Debug, Deserialize, ToSchema)]
pub struct PostMessage {
    pub body: String,
}
