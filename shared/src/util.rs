/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Current UTC time as an RFC 3339 string
///
/// Order and delivery dates default to this at draft creation.
pub fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339()
}
