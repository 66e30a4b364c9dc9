//! Character classification.

/// The most specific digit/newline class of a character.
///
/// Digit classes nest (binary < decimal < hex), so [`classify`] reports the
/// narrowest one that holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CharClass {
    NewLine,
    /// `0` or `1`.
    BinaryDigit,
    /// `2`-`9`.
    DecDigit,
    /// `a`-`f`, `A`-`F`.
    HexDigit,
    Other,
}

/// Classify a character into exactly one [`CharClass`].
#[inline]
pub fn classify(c: char) -> CharClass {
    if is_new_line(c) {
        CharClass::NewLine
    } else if is_binary_digit(c) {
        CharClass::BinaryDigit
    } else if is_dec_digit(c) {
        CharClass::DecDigit
    } else if is_hex_digit(c) {
        CharClass::HexDigit
    } else {
        CharClass::Other
    }
}

/// CR, LF, NEL (U+0085), LS (U+2028), PS (U+2029).
#[inline]
pub const fn is_new_line(c: char) -> bool {
    matches!(c, '\r' | '\n' | '\u{0085}' | '\u{2028}' | '\u{2029}')
}

#[inline]
pub const fn is_hex_digit(c: char) -> bool {
    c.is_ascii_hexdigit()
}

#[inline]
pub const fn is_binary_digit(c: char) -> bool {
    matches!(c, '0' | '1')
}

/// ASCII `0`-`9` only; other Unicode decimal digits are not digits here.
#[inline]
pub const fn is_dec_digit(c: char) -> bool {
    c.is_ascii_digit()
}

/// Value of a hex digit.
///
/// Precondition: `is_hex_digit(c)`.
#[inline]
pub fn hex_value(c: char) -> u8 {
    debug_assert!(is_hex_digit(c), "hex_value called on non-hex digit {c:?}");
    match c {
        '0'..='9' => c as u8 - b'0',
        'a'..='f' => c as u8 - b'a' + 10,
        'A'..='F' => c as u8 - b'A' + 10,
        _ => 0,
    }
}

/// Value of a binary digit.
///
/// Precondition: `is_binary_digit(c)`.
#[inline]
pub fn binary_value(c: char) -> u8 {
    debug_assert!(is_binary_digit(c), "binary_value called on non-binary digit {c:?}");
    u8::from(c == '1')
}

/// Value of a decimal digit.
///
/// Precondition: `is_dec_digit(c)`.
#[inline]
pub fn dec_value(c: char) -> u8 {
    debug_assert!(is_dec_digit(c), "dec_value called on non-decimal digit {c:?}");
    (c as u8).wrapping_sub(b'0')
}

/// Intra-line whitespace: space, tab, vertical tab, form feed and Unicode
/// space separators. Newlines are excluded.
#[inline]
pub fn is_whitespace(c: char) -> bool {
    match c {
        ' ' | '\t' | '\u{000B}' | '\u{000C}' => true,
        c if c.is_ascii() => false,
        c => c.is_whitespace() && !is_new_line(c),
    }
}

/// ASCII letters, `_`, and non-ASCII alphabetic characters.
#[inline]
pub fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || (!c.is_ascii() && c.is_alphabetic())
}

#[inline]
pub fn is_identifier_part(c: char) -> bool {
    is_identifier_start(c) || c.is_ascii_digit() || (!c.is_ascii() && c.is_numeric())
}
