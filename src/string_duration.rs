//! Duration value that is always observed in its canonical text form.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{
    constants::{binary, text},
    errors::{DurationError, ParseDurationError},
    settable,
    utils::duration::{format_duration, parse_duration},
};

/// A time span usable as a config value in flags, YAML/TOML files, JSON and
/// map-decoded structs.
///
/// Every text entry point canonicalizes its input, so `"24h"` reads back as
/// `"24h0m0s"` whichever encoding it arrived through. The default value
/// renders as `"0s"`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StringDuration {
    nanos: i64,
}

impl StringDuration {
    pub const ZERO: StringDuration = StringDuration { nanos: 0 };

    pub const fn from_nanos(nanos: i64) -> Self {
        Self { nanos }
    }

    /// Replaces the value with the canonical form of `value`.
    ///
    /// An empty string resets to zero. On error the previous value is kept.
    pub fn set(&mut self, value: &str) -> Result<(), ParseDurationError> {
        if value.is_empty() {
            *self = Self::ZERO;
            return Ok(());
        }
        self.nanos = parse_duration(value)?;
        Ok(())
    }

    /// Nanosecond count of the span.
    pub const fn nanoseconds(&self) -> i64 {
        self.nanos
    }

    /// Converts to a standard library duration. `None` when negative.
    pub fn to_std(&self) -> Option<std::time::Duration> {
        u64::try_from(self.nanos).ok().map(std::time::Duration::from_nanos)
    }

    pub fn marshal_text(&self) -> Vec<u8> {
        self.to_string().into_bytes()
    }

    /// Decodes text bytes. The literal `null` leaves the value untouched.
    pub fn unmarshal_text(&mut self, bytes: &[u8]) -> Result<(), ParseDurationError> {
        if bytes == text::NULL {
            return Ok(());
        }
        self.set(decode_utf8(bytes)?)
    }

    /// Quoted canonical form. The rendering never holds characters that
    /// need JSON escaping.
    pub fn marshal_json(&self) -> Vec<u8> {
        format!("{q}{self}{q}", q = text::QUOTE).into_bytes()
    }

    /// Decodes a raw JSON token. `null` leaves the value untouched; surrounding
    /// quotes are trimmed without unescaping, so a token such as `"\u0032h"`
    /// is rejected here while the serde path decodes it as `2h`.
    pub fn unmarshal_json(&mut self, bytes: &[u8]) -> Result<(), ParseDurationError> {
        if bytes == text::NULL {
            return Ok(());
        }
        let raw = decode_utf8(bytes)?;
        self.set(raw.trim_matches(text::QUOTE))
    }

    /// Little-endian encoding of the nanosecond count. Negative spans keep
    /// their two's complement bit pattern.
    pub fn marshal_binary(&self) -> [u8; binary::WIDTH] {
        (self.nanos as u64).to_le_bytes()
    }

    /// Decodes the little-endian form.
    ///
    /// Patterns with the top bit set are rejected as overflow, including the
    /// ones [`marshal_binary`](Self::marshal_binary) emits for negative spans.
    pub fn unmarshal_binary(&mut self, bytes: &[u8]) -> Result<(), DurationError> {
        let raw: [u8; binary::WIDTH] = bytes
            .try_into()
            .map_err(|_| DurationError::Length(bytes.len()))?;
        let value = u64::from_le_bytes(raw);
        self.nanos = i64::try_from(value).map_err(|_| DurationError::Overflow(value))?;
        Ok(())
    }
}

fn decode_utf8(bytes: &[u8]) -> Result<&str, ParseDurationError> {
    std::str::from_utf8(bytes)
        .map_err(|_| ParseDurationError::Invalid(String::from_utf8_lossy(bytes).into_owned()))
}

impl fmt::Display for StringDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_duration(self.nanos))
    }
}

impl FromStr for StringDuration {
    type Err = ParseDurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut value = Self::ZERO;
        value.set(s)?;
        Ok(value)
    }
}

impl From<i64> for StringDuration {
    fn from(nanos: i64) -> Self {
        Self::from_nanos(nanos)
    }
}

impl From<StringDuration> for i64 {
    fn from(value: StringDuration) -> Self {
        value.nanos
    }
}

impl TryFrom<std::time::Duration> for StringDuration {
    type Error = DurationError;

    fn try_from(value: std::time::Duration) -> Result<Self, Self::Error> {
        let nanos = value.as_nanos();
        i64::try_from(nanos)
            .map(Self::from_nanos)
            .map_err(|_| DurationError::OutOfRange(nanos))
    }
}

// Stream-encoder form, same contract as marshal_binary/unmarshal_binary
impl From<StringDuration> for [u8; binary::WIDTH] {
    fn from(value: StringDuration) -> Self {
        value.marshal_binary()
    }
}

impl TryFrom<&[u8]> for StringDuration {
    type Error = DurationError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let mut value = Self::ZERO;
        value.unmarshal_binary(bytes)?;
        Ok(value)
    }
}

impl Serialize for StringDuration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for StringDuration {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        settable::deserialize(deserializer)
    }
}
