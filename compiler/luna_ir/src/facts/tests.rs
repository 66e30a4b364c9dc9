use super::*;

#[test]
fn fixed_text_for_tokens() {
    assert_eq!(kind_text(SyntaxKind::DotDotDotToken), Some("..."));
    assert_eq!(kind_text(SyntaxKind::TildeEqualsToken), Some("~="));
    assert_eq!(kind_text(SyntaxKind::ElseIfKeyword), Some("elseif"));
    assert_eq!(kind_text(SyntaxKind::IndexMetamethod), Some("__index"));
    assert_eq!(kind_text(SyntaxKind::IdentifierToken), None);
    assert_eq!(kind_text(SyntaxKind::WhitespaceTrivia), None);
    assert_eq!(kind_text(SyntaxKind::Statement), None);
}

#[test]
fn every_punctuation_operator_and_keyword_has_text() {
    for &kind in SyntaxKind::ALL {
        let fixed = kind.is_punctuation()
            || kind.is_operator()
            || kind.is_keyword()
            || kind.is_metamethod();
        assert_eq!(kind_text(kind).is_some(), fixed, "{kind:?}");
    }
}

#[test]
fn raw_lookup() {
    assert_eq!(get_kind_text(SyntaxKind::EndKeyword.raw()), "end");
    assert_eq!(get_kind_text(SyntaxKind::IdentifierToken.raw()), "");
    assert_eq!(get_kind_text(9999), "");
    assert_eq!(token_class_raw(9999), None);
    assert_eq!(
        token_class_raw(SyntaxKind::NumericLiteralToken.raw()),
        Some(TokenClass::Number)
    );
}

#[test]
fn metamethod_names_round_trip() {
    for &kind in SyntaxKind::ALL.iter().filter(|k| k.is_metamethod()) {
        let text = kind_text(kind).unwrap_or_default();
        assert_eq!(metamethod_kind(text), Some(kind), "{text}");
    }
    assert_eq!(metamethod_kind("__INDEX"), None);
    assert_eq!(metamethod_kind("index"), None);
    assert_eq!(metamethod_kind("__"), None);
}

#[test]
fn highlighting_classes() {
    assert_eq!(token_class(SyntaxKind::LocalKeyword), TokenClass::Keyword);
    assert_eq!(token_class(SyntaxKind::SelfKeyword), TokenClass::Keyword);
    assert_eq!(token_class(SyntaxKind::PlusToken), TokenClass::Operator);
    assert_eq!(token_class(SyntaxKind::CommaToken), TokenClass::Punctuation);
    assert_eq!(
        token_class(SyntaxKind::InterpolatedStringTextToken),
        TokenClass::String
    );
    assert_eq!(
        token_class(SyntaxKind::MultiLineCommentTrivia),
        TokenClass::Comment
    );
    assert_eq!(token_class(SyntaxKind::BadToken), TokenClass::Error);
    assert_eq!(token_class(SyntaxKind::CompilationUnit), TokenClass::Other);
}

#[test]
fn operator_arity() {
    assert!(is_binary_operator(SyntaxKind::MinusToken));
    assert!(is_unary_operator(SyntaxKind::MinusToken));
    assert!(is_binary_operator(SyntaxKind::AndKeyword));
    assert!(!is_unary_operator(SyntaxKind::AndKeyword));
    assert!(is_unary_operator(SyntaxKind::HashToken));
    assert!(!is_binary_operator(SyntaxKind::HashToken));
}

#[test]
fn compound_assignments() {
    assert!(is_compound_assignment(SyntaxKind::PlusEqualsToken));
    assert!(is_compound_assignment(SyntaxKind::DotDotEqualsToken));
    assert!(!is_compound_assignment(SyntaxKind::EqualsToken));
    assert!(!is_compound_assignment(SyntaxKind::EqualsEqualsToken));
}

#[test]
fn continuation_start_excludes_expression_starters() {
    assert!(is_statement_continuation_start(SyntaxKind::DotDotToken));
    assert!(is_statement_continuation_start(SyntaxKind::ThenKeyword));
    assert!(!is_statement_continuation_start(SyntaxKind::MinusToken));
    assert!(!is_statement_continuation_start(SyntaxKind::IdentifierToken));
}

#[test]
fn blocks_and_delimiters() {
    assert!(is_block_opener(SyntaxKind::ElseKeyword));
    assert!(is_block_closer(SyntaxKind::ElseKeyword));
    assert!(!is_block_opener(SyntaxKind::EndKeyword));
    assert_eq!(
        closing_delimiter(SyntaxKind::HashOpenBraceToken),
        Some(SyntaxKind::CloseBraceToken)
    );
    assert_eq!(closing_delimiter(SyntaxKind::CloseBraceToken), None);
    assert!(is_closing_delimiter(SyntaxKind::CloseBracketToken));
}
