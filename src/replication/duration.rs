// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Parsing of duration strings in the Go `time.ParseDuration` format.
//!
//! A duration is an optional sign followed by one or more `<decimal><unit>`
//! groups, e.g. "300ms", "1.5h" or "2h45m". Valid units are "ns", "us"
//! ("µs"), "ms", "s", "m" and "h". The bare string "0" is accepted.

use std::time::Duration;
use thiserror::Error;

const NANOS_PER_MICRO: u128 = 1_000;
const NANOS_PER_MILLI: u128 = 1_000_000;
const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Go durations are an i64 nanosecond count.
const MAX_NANOS: u128 = i64::MAX as u128;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DurationParseError {
    #[error("invalid duration '{0}'")]
    Invalid(String),

    #[error("missing unit in duration '{0}'")]
    MissingUnit(String),

    #[error("unknown unit '{unit}' in duration '{input}'")]
    UnknownUnit { unit: String, input: String },

    #[error("duration '{0}' overflows")]
    Overflow(String),

    #[error("duration '{0}' must be positive")]
    NotPositive(String),
}

fn unit_nanos(unit: &str) -> Option<u128> {
    match unit {
        "ns" => Some(1),
        "us" | "µs" | "μs" => Some(NANOS_PER_MICRO),
        "ms" => Some(NANOS_PER_MILLI),
        "s" => Some(NANOS_PER_SEC),
        "m" => Some(60 * NANOS_PER_SEC),
        "h" => Some(3600 * NANOS_PER_SEC),
        _ => None,
    }
}

/// Parse a Go-style duration string into a strictly positive [`Duration`].
///
/// Zero and negative durations are syntactically valid Go durations but are
/// rejected with [`DurationParseError::NotPositive`], since they cannot serve
/// as a requeue interval.
pub fn parse_go_duration(input: &str) -> Result<Duration, DurationParseError> {
    let invalid = || DurationParseError::Invalid(input.to_string());

    let mut rest = input;
    let mut negative = false;
    if let Some(stripped) = rest.strip_prefix('-') {
        negative = true;
        rest = stripped;
    } else if let Some(stripped) = rest.strip_prefix('+') {
        rest = stripped;
    }

    if rest == "0" {
        return Err(DurationParseError::NotPositive(input.to_string()));
    }
    if rest.is_empty() {
        return Err(invalid());
    }

    let mut total: u128 = 0;
    while !rest.is_empty() {
        let first = rest.as_bytes()[0];
        if !(first == b'.' || first.is_ascii_digit()) {
            return Err(invalid());
        }

        // Integer part
        let int_len = rest.bytes().take_while(u8::is_ascii_digit).count();
        let int_digits = &rest[..int_len];
        rest = &rest[int_len..];
        let whole: u128 = if int_digits.is_empty() {
            0
        } else {
            int_digits
                .parse()
                .map_err(|_| DurationParseError::Overflow(input.to_string()))?
        };

        // Fractional part
        let mut frac: u128 = 0;
        let mut scale: u128 = 1;
        let mut has_fraction = false;
        if let Some(after_dot) = rest.strip_prefix('.') {
            let frac_len = after_dot.bytes().take_while(u8::is_ascii_digit).count();
            has_fraction = frac_len > 0;
            // Digits beyond nanosecond precision of an hour cannot change the result.
            for digit in after_dot[..frac_len].bytes().take(18) {
                frac = frac * 10 + u128::from(digit - b'0');
                scale *= 10;
            }
            rest = &after_dot[frac_len..];
        }

        if int_digits.is_empty() && !has_fraction {
            return Err(invalid());
        }

        // Unit
        let unit_len = rest
            .char_indices()
            .find(|(_, c)| *c == '.' || c.is_ascii_digit())
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        if unit_len == 0 {
            return Err(DurationParseError::MissingUnit(input.to_string()));
        }
        let unit = &rest[..unit_len];
        rest = &rest[unit_len..];
        let per_unit = unit_nanos(unit).ok_or_else(|| DurationParseError::UnknownUnit {
            unit: unit.to_string(),
            input: input.to_string(),
        })?;

        let value = whole
            .checked_mul(per_unit)
            .and_then(|v| v.checked_add(frac * per_unit / scale))
            .ok_or_else(|| DurationParseError::Overflow(input.to_string()))?;
        total = total
            .checked_add(value)
            .filter(|t| *t <= MAX_NANOS)
            .ok_or_else(|| DurationParseError::Overflow(input.to_string()))?;
    }

    if negative || total == 0 {
        return Err(DurationParseError::NotPositive(input.to_string()));
    }

    let secs = (total / NANOS_PER_SEC) as u64;
    let nanos = (total % NANOS_PER_SEC) as u32;
    Ok(Duration::new(secs, nanos))
}
