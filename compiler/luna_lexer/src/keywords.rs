//! Identifier and keyword cooking.

use std::borrow::Cow;

use luna_ir::{facts, SyntaxKind};
use luna_lexer_core::char_class::is_identifier_part;
use luna_syntax::TokenValue;

use crate::lexer::{Lexer, Scanned};

impl Lexer<'_> {
    /// An identifier, reserved word or contextual keyword starting at `start`.
    ///
    /// Keyword lookup goes through the dialect profile; with
    /// case-insensitive options the lookup text is lowercased but the token
    /// keeps its source spelling.
    pub(crate) fn scan_identifier(&mut self, start: usize) -> Scanned {
        self.cursor.eat_while(is_identifier_part);
        let text = self.cursor.slice_from(start);
        let lookup = if self.options.case_sensitive {
            Cow::Borrowed(text)
        } else {
            Cow::Owned(text.to_lowercase())
        };
        let version = self.options.version;

        if let Some(kind) = self.profile.keyword_kind(&lookup, version) {
            let scanned = Scanned::new(kind);
            return match kind {
                SyntaxKind::TrueKeyword => scanned.with_value(TokenValue::Boolean(true)),
                SyntaxKind::FalseKeyword => scanned.with_value(TokenValue::Boolean(false)),
                SyntaxKind::NilKeyword => scanned.with_value(TokenValue::Nil),
                _ => scanned,
            };
        }

        let mut scanned = Scanned::new(SyntaxKind::IdentifierToken);
        scanned.contextual_kind = self
            .profile
            .contextual_keyword_kind(&lookup, version)
            .or_else(|| facts::metamethod_kind(text));
        scanned
    }
}

#[cfg(test)]
mod tests {
    use luna_ir::{Dialect, LanguageVersion, ParseOptions, SourceText, SyntaxKind};
    use luna_syntax::TokenValue;
    use pretty_assertions::assert_eq;

    use crate::{Lexer, LexerMode};

    fn first(text: &str, options: ParseOptions) -> (SyntaxKind, Option<SyntaxKind>, Option<TokenValue>) {
        let source = SourceText::new(text);
        let token = Lexer::new(&source, &options).lex(LexerMode::Syntax).token;
        (token.kind(), token.contextual_kind(), token.value().cloned())
    }

    #[test]
    fn lua_keywords_and_literals() {
        let lua = ParseOptions::default();
        assert_eq!(first("while", lua).0, SyntaxKind::WhileKeyword);
        assert_eq!(first("elseif", lua).0, SyntaxKind::ElseIfKeyword);
        assert_eq!(
            first("true", lua),
            (SyntaxKind::TrueKeyword, None, Some(TokenValue::Boolean(true)))
        );
        assert_eq!(first("nil", lua), (SyntaxKind::NilKeyword, None, Some(TokenValue::Nil)));
        assert_eq!(first("whiles", lua).0, SyntaxKind::IdentifierToken);
    }

    #[test]
    fn goto_depends_on_version() {
        let lua52 = ParseOptions::default().with_version(LanguageVersion::Lua52);
        let lua51 = ParseOptions::default().with_version(LanguageVersion::Lua51);
        assert_eq!(first("goto", lua52).0, SyntaxKind::GotoKeyword);
        assert_eq!(
            first("goto", lua51),
            (SyntaxKind::IdentifierToken, Some(SyntaxKind::GotoKeyword), None)
        );
    }

    #[test]
    fn contextual_keywords_and_metamethods() {
        let lua = ParseOptions::default();
        assert_eq!(
            first("const", lua),
            (SyntaxKind::IdentifierToken, Some(SyntaxKind::ConstKeyword), None)
        );
        assert_eq!(
            first("__index", lua),
            (SyntaxKind::IdentifierToken, Some(SyntaxKind::IndexMetamethod), None)
        );
        assert_eq!(first("__nope", lua).1, None);
    }

    #[test]
    fn moonscript_keywords() {
        let moon = ParseOptions::new(Dialect::MoonScript);
        assert_eq!(first("class", moon).0, SyntaxKind::ClassKeyword);
        assert_eq!(first("unless", moon).0, SyntaxKind::UnlessKeyword);
        assert_eq!(first("end", moon).0, SyntaxKind::IdentifierToken);
        assert_eq!(first("goto", moon).0, SyntaxKind::IdentifierToken);
        assert_eq!(first("class", ParseOptions::default()).0, SyntaxKind::IdentifierToken);
    }

    #[test]
    fn case_insensitive_lookup_keeps_spelling() {
        let options = ParseOptions::default().with_case_sensitive(false);
        let source = SourceText::new("END");
        let token = Lexer::new(&source, &options).lex(LexerMode::Syntax).token;
        assert_eq!(token.kind(), SyntaxKind::EndKeyword);
        assert_eq!(token.text(), "END");
        assert_eq!(first("END", ParseOptions::default()).0, SyntaxKind::IdentifierToken);
    }

    #[test]
    fn non_ascii_identifiers() {
        let lua = ParseOptions::default();
        let source = SourceText::new("café = 1");
        let token = Lexer::new(&source, &lua).lex(LexerMode::Syntax).token;
        assert_eq!(token.kind(), SyntaxKind::IdentifierToken);
        assert_eq!(token.text(), "café");
        assert_eq!(first("ñame", lua).0, SyntaxKind::IdentifierToken);
    }
}
