// Crate-wide constants

/// Nanosecond scales for each duration unit
pub mod time {
    pub const NANOSECOND: u64 = 1;
    pub const MICROSECOND: u64 = 1_000 * NANOSECOND;
    pub const MILLISECOND: u64 = 1_000 * MICROSECOND;
    pub const SECOND: u64 = 1_000 * MILLISECOND;
    pub const MINUTE: u64 = 60 * SECOND;
    pub const HOUR: u64 = 60 * MINUTE;

    pub const SECONDS_PER_MINUTE: u64 = 60;
    pub const SECONDS_PER_HOUR: u64 = 3600;

    /// Unit suffixes accepted by the parser, with their scale.
    /// Both the micro sign (U+00B5) and the greek mu (U+03BC) spell microseconds.
    pub const UNITS: [(&str, u64); 8] = [
        ("ns", NANOSECOND),
        ("us", MICROSECOND),
        ("\u{00b5}s", MICROSECOND),
        ("\u{03bc}s", MICROSECOND),
        ("ms", MILLISECOND),
        ("s", SECOND),
        ("m", MINUTE),
        ("h", HOUR),
    ];
}

/// Textual encodings
pub mod text {
    /// Canonical rendering of a zero duration
    pub const ZERO: &str = "0s";
    /// Literal tolerated as a no-op by the text and JSON decoders
    pub const NULL: &[u8] = b"null";
    pub const QUOTE: char = '"';
}

/// Binary encoding
pub mod binary {
    /// Width of the little-endian encoding in bytes
    pub const WIDTH: usize = 8;
}
