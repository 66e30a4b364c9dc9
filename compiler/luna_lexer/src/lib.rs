//! Lexer for the Luna front-end.
//!
//! Turns a [`SourceText`] into green tokens with their trivia attached:
//!
//! - Leading trivia is everything between the previous token's trailing
//!   trivia and the token text.
//! - Trailing trivia stops before the first trivia containing a line break,
//!   so line breaks always open the next token's leading trivia and set its
//!   `NEWLINE_BEFORE` flag.
//!
//! Fixed-spelling tokens come from a logos scanner; numerals,
//! strings, long brackets and comments are scanned by hand because they
//! depend on the dialect and language version in [`ParseOptions`].
//!
//! Lexical errors never stop the lexer. They become diagnostics on the token
//! that contains them (see [`luna_syntax::GreenToken::diagnostics`]).

mod cursor;
mod keywords;
mod lexer;
mod numbers;
mod raw_token;
mod strings;

use luna_ir::{ParseOptions, SourceText, SyntaxKind};

pub use lexer::{LexedToken, Lexer, LexerMode};

/// Lex a whole text, following the mode each token asks for, up to and
/// including the end-of-file token.
#[tracing::instrument(level = "debug", skip_all, fields(len = text.len()))]
pub fn lex_to_end(text: &SourceText, options: &ParseOptions) -> Vec<LexedToken> {
    let mut lexer = Lexer::new(text, options);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.lex(lexer.next_mode());
        let done = token.kind() == SyntaxKind::EndOfFileToken;
        tokens.push(token);
        if done {
            break;
        }
    }
    tracing::debug!(tokens = tokens.len(), "lexed");
    tokens
}
