/// Labor line identifiers are UUID strings on the wire and in storage.
pub type LaborLineId = String;

/// All timestamps are epoch seconds (UTC).
pub type EpochSeconds = i64;

/// Current time as epoch seconds.
pub fn now_epoch_seconds() -> EpochSeconds {
    chrono::Utc::now().timestamp()
}
