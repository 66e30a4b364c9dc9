//! Numeric literal scanning and cooking.
//!
//! The numeral is read the way Lua reads one: hex digits, dots, exponent
//! markers with an optional sign, then any trailing identifier characters.
//! Whatever was read is then classified; text that is not a valid literal
//! still produces a numeric token, with an `InvalidNumber` diagnostic.

use luna_diagnostic::ErrorCode;
use luna_ir::{Dialect, Feature, SyntaxKind};
use luna_lexer_core::char_class::{binary_value, is_binary_digit, is_dec_digit, is_hex_digit, is_identifier_part};
use luna_lexer_core::numeric::{
    parse_float, parse_hex_float, try_parse_binary_i64, try_parse_decimal_i64,
    try_parse_hexadecimal_i64,
};
use luna_syntax::TokenValue;

use crate::lexer::{Lexer, Scanned};

impl Lexer<'_> {
    pub(crate) fn scan_number(&mut self, start: usize) -> Scanned {
        self.read_numeral();
        let end = self.cursor.pos();
        let text = self.cursor.slice_from(start);
        let value = if let Some(digits) = strip_radix(text, 'x') {
            self.cook_hex(start, end, text, digits)
        } else if let Some(digits) = strip_radix(text, 'b').filter(|d| is_binary_body(d)) {
            self.cook_binary(start, end, text, digits)
        } else {
            self.cook_decimal(start, end, text)
        };
        let scanned = Scanned::new(SyntaxKind::NumericLiteralToken);
        match value {
            Some(value) => scanned.with_value(value),
            None => {
                self.report(start, end, ErrorCode::InvalidNumber, [text]);
                scanned
            }
        }
    }

    fn read_numeral(&mut self) {
        let rest = self.cursor.rest();
        let mut exponent = ['e', 'E'];
        if strip_radix(rest, 'x').is_some() {
            self.cursor.advance(2);
            exponent = ['p', 'P'];
        } else if strip_radix(rest, 'b').is_some_and(|after| after.starts_with(is_binary_digit)) {
            self.cursor.advance(2);
        }
        loop {
            match self.cursor.peek() {
                Some(c) if exponent.contains(&c) => {
                    self.cursor.bump();
                    if !self.cursor.eat('+') {
                        self.cursor.eat('-');
                    }
                }
                Some(c) if is_hex_digit(c) || c == '.' => {
                    self.cursor.bump();
                }
                _ => break,
            }
        }
        self.cursor.eat_while(is_identifier_part);
    }

    fn cook_hex(&mut self, start: usize, end: usize, text: &str, digits: &str) -> Option<TokenValue> {
        if digits.is_empty() {
            return None;
        }
        let is_float = digits.contains(['.', 'p', 'P']);
        if is_float {
            let value = parse_hex_float(text)?;
            if self.options.dialect == Dialect::Lua && !self.options.version.has_hex_floats() {
                self.report_unavailable(start, end, "hexadecimal floats");
            }
            return Some(TokenValue::Float(value));
        }
        if !digits.chars().all(is_hex_digit) {
            return None;
        }
        if !self.options.has_integers() {
            return parse_hex_float(text).map(TokenValue::Float);
        }
        match try_parse_hexadecimal_i64(text) {
            Some(value) => Some(TokenValue::Integer(value)),
            None => {
                let value = parse_hex_float(text)?;
                self.report(start, end, ErrorCode::IntegerLiteralOverflow, [text]);
                Some(TokenValue::Float(value))
            }
        }
    }

    fn cook_binary(&mut self, start: usize, end: usize, text: &str, digits: &str) -> Option<TokenValue> {
        if !self.options.has_feature(Feature::BinaryNumbers) {
            self.report_unavailable(start, end, "binary literals");
        }
        let as_float = || {
            digits
                .chars()
                .fold(0.0f64, |acc, c| acc * 2.0 + f64::from(binary_value(c)))
        };
        if !self.options.has_integers() {
            return Some(TokenValue::Float(as_float()));
        }
        match try_parse_binary_i64(text) {
            Some(value) => Some(TokenValue::Integer(value)),
            None => {
                self.report(start, end, ErrorCode::IntegerLiteralOverflow, [text]);
                Some(TokenValue::Float(as_float()))
            }
        }
    }

    fn cook_decimal(&mut self, start: usize, end: usize, text: &str) -> Option<TokenValue> {
        let is_integer = text.chars().all(is_dec_digit);
        if !is_integer || !self.options.has_integers() {
            return parse_float(text).map(TokenValue::Float);
        }
        let parsed = try_parse_decimal_i64(text);
        if let Some(value) = parsed.as_i64() {
            return Some(TokenValue::Integer(value));
        }
        // Too large for i64: read as the nearest float, and keep the exact
        // value for the message.
        self.report(
            start,
            end,
            ErrorCode::IntegerLiteralOverflow,
            [parsed.value.to_string()],
        );
        Some(TokenValue::Float(parsed.to_f64_lossy()))
    }
}

/// Digits after a case-insensitive `0x` / `0b` prefix.
fn strip_radix(text: &str, radix: char) -> Option<&str> {
    let mut chars = text.chars();
    if chars.next() != Some('0') {
        return None;
    }
    match chars.next() {
        Some(c) if c.to_ascii_lowercase() == radix => Some(chars.as_str()),
        _ => None,
    }
}

fn is_binary_body(digits: &str) -> bool {
    !digits.is_empty() && digits.chars().all(is_binary_digit)
}

#[cfg(test)]
mod tests;
