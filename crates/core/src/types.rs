/// Frame and rep timestamps are epoch milliseconds, as produced by the capture loop.
pub type EpochMillis = i64;

/// All session timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
