//! Duration parsing and formatting utilities.

use crate::constants::{text, time};
use crate::errors::ParseDurationError;

/// Largest magnitude a term may reach before the sign is applied.
const MAGNITUDE_LIMIT: u64 = 1 << 63;

/// Parses a duration expression like "300ms", "-1.5h" or "2h45m" into a
/// signed nanosecond count.
///
/// The expression is an optional sign followed by one or more
/// `<number><unit>` terms which are summed. Numbers may carry a fraction.
/// Valid units are "ns", "us" (or "µs"), "ms", "s", "m" and "h".
///
/// # Arguments
/// * `input` - Duration expression (e.g., "24h", "1h30m", "500ms")
///
/// # Returns
/// * `Ok(i64)` nanoseconds on success
/// * `Err(ParseDurationError)` when the text is not a duration
pub fn parse_duration(input: &str) -> Result<i64, ParseDurationError> {
    let invalid = || ParseDurationError::Invalid(input.to_string());

    let mut s = input;
    let mut negative = false;
    if let Some(rest) = s.strip_prefix('-') {
        negative = true;
        s = rest;
    } else if let Some(rest) = s.strip_prefix('+') {
        s = rest;
    }

    // Special case: a bare zero needs no unit
    if s == "0" {
        return Ok(0);
    }
    if s.is_empty() {
        return Err(invalid());
    }

    let mut total: u64 = 0;
    while let Some(&first) = s.as_bytes().first() {
        if !(first == b'.' || first.is_ascii_digit()) {
            return Err(invalid());
        }

        let (whole, rest) = leading_int(s).ok_or_else(invalid)?;
        let has_whole = rest.len() != s.len();
        s = rest;

        let mut fraction = 0;
        let mut fraction_scale = 1.0;
        let mut has_fraction = false;
        if let Some(rest) = s.strip_prefix('.') {
            let (value, scale, after) = leading_fraction(rest);
            has_fraction = after.len() != rest.len();
            fraction = value;
            fraction_scale = scale;
            s = after;
        }
        if !has_whole && !has_fraction {
            return Err(invalid());
        }

        let unit_len = s
            .bytes()
            .position(|c| c == b'.' || c.is_ascii_digit())
            .unwrap_or(s.len());
        if unit_len == 0 {
            return Err(ParseDurationError::MissingUnit(input.to_string()));
        }
        let (unit, rest) = s.split_at(unit_len);
        s = rest;

        let scale = unit_scale(unit).ok_or_else(|| ParseDurationError::UnknownUnit {
            unit: unit.to_string(),
            input: input.to_string(),
        })?;

        if whole > MAGNITUDE_LIMIT / scale {
            return Err(invalid());
        }
        let mut term = whole * scale;
        if fraction > 0 {
            term += (fraction as f64 * (scale as f64 / fraction_scale)) as u64;
            if term > MAGNITUDE_LIMIT {
                return Err(invalid());
            }
        }

        total = total
            .checked_add(term)
            .filter(|sum| *sum <= MAGNITUDE_LIMIT)
            .ok_or_else(invalid)?;
    }

    if negative {
        // 1 << 63 maps onto i64::MIN
        return Ok((total as i64).wrapping_neg());
    }
    if total > i64::MAX as u64 {
        return Err(invalid());
    }
    Ok(total as i64)
}

/// Renders a nanosecond count in canonical form, e.g. "72h3m0.5s".
///
/// Leading zero units are omitted. Spans under one second use a smaller unit
/// ("1.5ms", "250ns") so the leading digit is non-zero. Zero renders as "0s".
pub fn format_duration(nanos: i64) -> String {
    let mut out = String::with_capacity(32);
    if nanos < 0 {
        out.push('-');
    }
    let magnitude = nanos.unsigned_abs();

    if magnitude < time::SECOND {
        if magnitude == 0 {
            return text::ZERO.to_string();
        }
        let (precision, unit) = if magnitude < time::MICROSECOND {
            (0, "ns")
        } else if magnitude < time::MILLISECOND {
            (3, "\u{00b5}s")
        } else {
            (6, "ms")
        };
        let (whole, fraction) = split_fraction(magnitude, precision);
        out.push_str(&format!("{whole}{fraction}{unit}"));
        return out;
    }

    let (seconds, fraction) = split_fraction(magnitude, 9);
    let hours = seconds / time::SECONDS_PER_HOUR;
    let minutes = (seconds / time::SECONDS_PER_MINUTE) % 60;
    if hours > 0 {
        out.push_str(&format!("{hours}h"));
    }
    if seconds >= time::SECONDS_PER_MINUTE {
        out.push_str(&format!("{minutes}m"));
    }
    out.push_str(&format!("{}{fraction}s", seconds % time::SECONDS_PER_MINUTE));
    out
}

/// Wraps `s` in double quotes for error messages. `"` and `\` are
/// backslash-escaped; control and non-ASCII bytes are written as `\xNN`.
pub(crate) fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for byte in s.bytes() {
        match byte {
            b'"' | b'\\' => {
                out.push('\\');
                out.push(char::from(byte));
            }
            b' '..=0x7f => out.push(char::from(byte)),
            _ => out.push_str(&format!("\\x{byte:02x}")),
        }
    }
    out.push('"');
    out
}

/// Looks up the nanosecond scale of a unit suffix.
fn unit_scale(unit: &str) -> Option<u64> {
    time::UNITS
        .iter()
        .find(|(name, _)| *name == unit)
        .map(|(_, scale)| *scale)
}

/// Consumes leading digits. `None` on overflow past 1 << 63.
fn leading_int(s: &str) -> Option<(u64, &str)> {
    let digits = s.bytes().take_while(u8::is_ascii_digit).count();
    let mut value: u64 = 0;
    for c in s[..digits].bytes() {
        if value > MAGNITUDE_LIMIT / 10 {
            return None;
        }
        value = value * 10 + u64::from(c - b'0');
        if value > MAGNITUDE_LIMIT {
            return None;
        }
    }
    Some((value, &s[digits..]))
}

/// Consumes leading fraction digits, returning the value and its power-of-ten
/// scale. Digits beyond what fits are dropped rather than rejected.
fn leading_fraction(s: &str) -> (u64, f64, &str) {
    let digits = s.bytes().take_while(u8::is_ascii_digit).count();
    let mut value: u64 = 0;
    let mut scale = 1.0;
    let mut overflow = false;
    for c in s[..digits].bytes() {
        if overflow {
            continue;
        }
        if value > (MAGNITUDE_LIMIT - 1) / 10 {
            overflow = true;
            continue;
        }
        let next = value * 10 + u64::from(c - b'0');
        if next > MAGNITUDE_LIMIT {
            overflow = true;
            continue;
        }
        value = next;
        scale *= 10.0;
    }
    (value, scale, &s[digits..])
}

/// Splits `value` into its integer part and a ".ddd" suffix holding the lowest
/// `precision` digits with trailing zeros trimmed (empty when all zero).
fn split_fraction(value: u64, precision: u32) -> (u64, String) {
    if precision == 0 {
        return (value, String::new());
    }
    let divisor = 10u64.pow(precision);
    let digits = format!("{:0width$}", value % divisor, width = precision as usize);
    let digits = digits.trim_end_matches('0');
    let fraction = if digits.is_empty() {
        String::new()
    } else {
        format!(".{digits}")
    };
    (value / divisor, fraction)
}
