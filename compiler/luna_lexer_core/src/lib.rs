//! Low-level building blocks for the Luna lexer.
//!
//! Two leaf components with no state and no `luna_*` dependencies:
//!
//! - [`char_class`]: predicates over single Unicode scalar values (newline,
//!   digits, whitespace, identifier characters) and digit values
//! - [`numeric`]: integer and float literal parsing with overflow detection
//!   against an arbitrary-precision intermediate
//!
//! # Contract violations
//!
//! Digit-value accessors require the matching predicate to hold. Calling
//! them on anything else is a caller bug and trips a `debug_assert!`; it is
//! never reported as a diagnostic.

pub mod char_class;
pub mod numeric;

pub use char_class::CharClass;
pub use numeric::DecimalParse;
