//! Validation errors raised before a scan starts.

/// Input column an invalid value was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Column {
    #[display("entity_id")]
    EntityId,
    #[display("period")]
    Period,
    #[display("event_flag")]
    EventFlag,
}

/// Reasons an observation table cannot be scanned.
///
/// Every variant is detected before the first row is scanned, so a scan
/// either returns a complete result or one of these errors.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ScanError {
    #[display("no observations supplied")]
    EmptyInput,
    #[display(
        "column lengths differ: {entity_ids} entity ids, {periods} periods, {event_flags} event flags"
    )]
    LengthMismatch {
        entity_ids: usize,
        periods: usize,
        event_flags: usize,
    },
    #[display("invalid {column} value {value} at row {row}")]
    InvalidValue { column: Column, row: usize, value: i64 },
    #[display("row {row} is scanned before any period-1 row selected an active slot")]
    InvalidSequence { row: usize },
}
