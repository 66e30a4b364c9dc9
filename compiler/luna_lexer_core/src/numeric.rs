//! Numeric literal parsing.
//!
//! Integer parsers never wrap: a value that does not fit in `i64` is a
//! failure. The decimal parser goes through an arbitrary-precision
//! intermediate so that, on overflow, callers still get the exact value to
//! put in a diagnostic.

use num_bigint::BigInt;
use num_traits::ToPrimitive;

use crate::char_class::{binary_value, hex_value, is_binary_digit, is_dec_digit, is_hex_digit};

/// Result of [`try_parse_decimal_i64`].
///
/// `value` is always the best-effort parse of the text: the exact value
/// when the text is a well-formed integer (whether or not it fits), zero when
/// it is malformed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecimalParse {
    pub fits: bool,
    pub value: BigInt,
}

impl DecimalParse {
    /// The value as `i64`, if it fits.
    pub fn as_i64(&self) -> Option<i64> {
        if self.fits {
            self.value.to_i64()
        } else {
            None
        }
    }

    /// Nearest `f64` to the value, saturating to infinity.
    pub fn to_f64_lossy(&self) -> f64 {
        self.value.to_f64().unwrap_or(f64::INFINITY)
    }
}

/// Parse decimal integer text into an `i64` via an arbitrary-precision value.
///
/// Accepts an optional leading `+` or `-` followed by ASCII digits.
/// Malformed text yields `fits == false` with a zero value; out-of-range
/// text yields `fits == false` with the exact value.
pub fn try_parse_decimal_i64(text: &str) -> DecimalParse {
    let digits = text
        .strip_prefix('-')
        .or_else(|| text.strip_prefix('+'))
        .unwrap_or(text);
    let well_formed = !digits.is_empty() && digits.chars().all(is_dec_digit);
    let Some(value) = well_formed
        .then(|| BigInt::parse_bytes(text.as_bytes(), 10))
        .flatten()
    else {
        return DecimalParse {
            fits: false,
            value: BigInt::default(),
        };
    };
    DecimalParse {
        fits: value.to_i64().is_some(),
        value,
    }
}

/// Parse hexadecimal integer text, with an optional case-insensitive `0x`
/// prefix.
///
/// Returns `None` for empty digit runs, non-hex characters, or values above
/// `i64::MAX`.
pub fn try_parse_hexadecimal_i64(text: &str) -> Option<i64> {
    let digits = strip_radix_prefix(text, 'x');
    parse_radix(digits, 4, is_hex_digit, hex_value)
}

/// Parse binary integer text, with an optional case-insensitive `0b` prefix.
///
/// Same failure policy as [`try_parse_hexadecimal_i64`].
pub fn try_parse_binary_i64(text: &str) -> Option<i64> {
    let digits = strip_radix_prefix(text, 'b');
    parse_radix(digits, 1, is_binary_digit, binary_value)
}

fn strip_radix_prefix(text: &str, marker: char) -> &str {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some('0'), Some(c)) if c.eq_ignore_ascii_case(&marker) => chars.as_str(),
        _ => text,
    }
}

/// Shift-accumulate digits of a power-of-two radix.
fn parse_radix(
    digits: &str,
    bits_per_digit: u32,
    is_digit: fn(char) -> bool,
    value_of: fn(char) -> u8,
) -> Option<i64> {
    if digits.is_empty() {
        return None;
    }
    let mut acc: u64 = 0;
    for c in digits.chars() {
        if !is_digit(c) {
            return None;
        }
        if acc.leading_zeros() < bits_per_digit {
            return None;
        }
        acc = (acc << bits_per_digit) | u64::from(value_of(c));
    }
    i64::try_from(acc).ok()
}

/// Parse a decimal float: digits with an optional fraction and exponent.
/// `3.`, `.5` and `1e10` are accepted; `inf`, `nan` and empty text are not.
pub fn parse_float(text: &str) -> Option<f64> {
    let bytes = text.as_bytes();
    let mut i = 0;
    let mut mantissa_digits = 0;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
        mantissa_digits += 1;
    }
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
            mantissa_digits += 1;
        }
    }
    if mantissa_digits == 0 {
        return None;
    }
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        i += 1;
        if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
            i += 1;
        }
        let exponent_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == exponent_start {
            return None;
        }
    }
    if i != bytes.len() {
        return None;
    }
    text.parse().ok()
}

/// Parse a hexadecimal float in Lua syntax: `0xA.8p1`, `0x.1`, `0x1P-2`.
///
/// The `0x` prefix is required. The binary exponent is optional.
pub fn parse_hex_float(text: &str) -> Option<f64> {
    let body = strip_radix_prefix(text, 'x');
    if body.len() == text.len() {
        return None;
    }
    let (mantissa, exponent) = match body.find(['p', 'P']) {
        Some(at) => (&body[..at], Some(&body[at + 1..])),
        None => (body, None),
    };

    let mut value = 0.0f64;
    let mut digits = 0u32;
    let mut significant = 0u32;
    // Binary exponent contributed by the mantissa's digit positions.
    let mut scale = 0i32;
    let mut seen_dot = false;
    for c in mantissa.chars() {
        if c == '.' && !seen_dot {
            seen_dot = true;
            continue;
        }
        if !is_hex_digit(c) {
            return None;
        }
        digits += 1;
        if significant == 0 && c == '0' {
            if seen_dot {
                scale = scale.saturating_sub(4);
            }
        } else if significant < MAX_HEX_SIGNIFICANT_DIGITS {
            significant += 1;
            value = value * 16.0 + f64::from(hex_value(c));
            if seen_dot {
                scale = scale.saturating_sub(4);
            }
        } else if !seen_dot {
            scale = scale.saturating_add(4);
        }
    }
    if digits == 0 {
        return None;
    }

    let exp = match exponent {
        None => 0i32,
        Some(exp) => parse_exponent(exp)?,
    };
    Some(scale_by_power_of_two(value, exp.saturating_add(scale)))
}

/// Hex digits kept in a hex float mantissa; later digits only move the
/// exponent. 30 digits is 120 bits, well past `f64` precision.
const MAX_HEX_SIGNIFICANT_DIGITS: u32 = 30;

/// `value * 2^exp` without the intermediate power overflowing or
/// underflowing on its own.
fn scale_by_power_of_two(mut value: f64, mut exp: i32) -> f64 {
    const STEP: i32 = 1000;
    while exp > STEP && value.is_finite() && value != 0.0 {
        value *= 2f64.powi(STEP);
        exp -= STEP;
    }
    while exp < -STEP && value != 0.0 {
        value *= 2f64.powi(-STEP);
        exp += STEP;
    }
    value * 2f64.powi(exp)
}

/// Signed decimal exponent, saturating at `i32` bounds.
fn parse_exponent(text: &str) -> Option<i32> {
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let magnitude = digits.parse::<i32>().unwrap_or(i32::MAX);
    Some(if negative { -magnitude } else { magnitude })
}
