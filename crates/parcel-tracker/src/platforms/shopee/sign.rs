use sha2::{Digest, Sha256};

/// Shared secret appended to every signed tracking query.
pub const SALT: &str = "MGViZmZmZTYzZDJhNDgxY2Y1N2ZlN2Q1ZWJkYzlmZDY=";

/// Builds the `sls_tracking_number` query value:
/// `{order_id}|{timestamp}{hex(sha256(order_id + timestamp + salt))}`.
#[must_use]
pub fn tracking_token(order_id: &str, timestamp: i64, salt: &str) -> String {
    let ts = timestamp.to_string();
    let digest = Sha256::digest(format!("{order_id}{ts}{salt}").as_bytes());
    format!("{order_id}|{ts}{digest:x}")
}
