use time::OffsetDateTime;

/// Current time as a unix timestamp in seconds.
pub fn now() -> u64 {
    OffsetDateTime::now_utc().unix_timestamp().max(0) as u64
}
