use crate::{constants::binary, utils::duration::quote};

/// Error returned when text does not match the duration grammar.
///
/// Messages mirror the conventional parser wording so callers can surface
/// them verbatim. Fields hold the raw input; quoting happens on display.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseDurationError {
    #[error("time: invalid duration {}", quote(.0))]
    Invalid(String),

    #[error("time: missing unit in duration {}", quote(.0))]
    MissingUnit(String),

    #[error("time: unknown unit {} in duration {}", quote(.unit), quote(.input))]
    UnknownUnit { unit: String, input: String },
}

/// Errors raised by the [`StringDuration`](crate::StringDuration) decoders.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DurationError {
    #[error(transparent)]
    Parse(#[from] ParseDurationError),

    #[error("expected {width} bytes, saw {0}", width = binary::WIDTH)]
    Length(usize),

    #[error("int64 overflow: {0}")]
    Overflow(u64),

    /// A standard library span past the signed nanosecond range.
    #[error("int64 overflow: {0}ns")]
    OutOfRange(u128),
}
