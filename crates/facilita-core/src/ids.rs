//! Identifier and timestamp allocation.
//!
//! Every entity id is a UUID v4 behind a short entity prefix (`req_…`,
//! `msg_…`), so ids stay unique even when several entities are created
//! within the same millisecond.

use chrono::{SecondsFormat, Utc};
use uuid::Uuid;

pub const USER_PREFIX: &str = "usr";
pub const REQUEST_PREFIX: &str = "req";
pub const CONVERSATION_PREFIX: &str = "conv";
pub const MESSAGE_PREFIX: &str = "msg";
pub const PAYMENT_PREFIX: &str = "pay";
pub const REVIEW_PREFIX: &str = "rev";

/// Allocates a fresh id with the given entity prefix.
pub fn new_id(prefix: &str) -> String {
    format!("{}_{}", prefix, Uuid::new_v4().simple())
}

/// Current UTC time as an RFC 3339 string with millisecond precision.
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_id_has_prefix_and_is_unique() {
        let a = new_id(REQUEST_PREFIX);
        let b = new_id(REQUEST_PREFIX);
        assert!(a.starts_with("req_"));
        assert_ne!(a, b);
    }

    #[test]
    fn test_timestamp_parses_as_rfc3339() {
        let ts = now_timestamp();
        assert!(chrono::DateTime::parse_from_rfc3339(&ts).is_ok());
        assert!(ts.ends_with('Z'));
    }
}
