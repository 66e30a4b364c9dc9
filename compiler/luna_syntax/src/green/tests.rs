use luna_diagnostic::ErrorCode;
use pretty_assertions::assert_eq;
use smallvec::smallvec;

use super::*;

fn ws(text: &str) -> GreenTrivia {
    GreenTrivia::new(SyntaxKind::WhitespaceTrivia, text)
}

fn eol() -> GreenTrivia {
    GreenTrivia::new(SyntaxKind::EndOfLineTrivia, "\n")
}

fn comment(text: &str) -> GreenTrivia {
    GreenTrivia::new(SyntaxKind::SingleLineCommentTrivia, text)
}

fn ident(text: &str) -> GreenToken {
    GreenToken::new(SyntaxKind::IdentifierToken, text, TriviaList::new(), TriviaList::new())
}

#[test]
fn fixed_text_is_not_stored() {
    let token = GreenToken::new(SyntaxKind::EndKeyword, "end", TriviaList::new(), TriviaList::new());
    assert!(token.0.text.is_none());
    assert_eq!(token.text(), "end");

    // Case-insensitive spellings keep their own text.
    let upper = GreenToken::new(SyntaxKind::EndKeyword, "END", TriviaList::new(), TriviaList::new());
    assert_eq!(upper.text(), "END");
}

#[test]
fn widths_include_trivia() {
    let token = GreenToken::new(
        SyntaxKind::IdentifierToken,
        "x",
        smallvec![ws("  ")],
        smallvec![ws(" "), comment("-- c")],
    );
    assert_eq!(token.leading_width(), 2);
    assert_eq!(token.width(), 1);
    assert_eq!(token.trailing_width(), 5);
    assert_eq!(token.full_width(), 8);

    let mut text = String::new();
    token.write_to(&mut text);
    assert_eq!(text, "  x -- c");
}

#[test]
fn missing_token_is_empty() {
    let token = GreenToken::missing(SyntaxKind::EndKeyword);
    assert!(token.is_missing());
    assert_eq!(token.text(), "");
    assert_eq!(token.full_width(), 0);
    assert_eq!(format!("{token:?}"), "EndKeyword (missing)");
}

#[test]
fn newline_before_flag() {
    let first = GreenToken::new(SyntaxKind::IdentifierToken, "a", smallvec![ws(" ")], TriviaList::new());
    let second = GreenToken::new(SyntaxKind::IdentifierToken, "b", smallvec![eol()], TriviaList::new());
    let block = GreenToken::new(
        SyntaxKind::IdentifierToken,
        "c",
        smallvec![GreenTrivia::new(SyntaxKind::MultiLineCommentTrivia, "--[[\n]]")],
        TriviaList::new(),
    );
    assert!(!first.has_newline_before());
    assert!(second.has_newline_before());
    assert!(block.has_newline_before());
}

#[test]
fn whitespace_indent_resets_and_stops() {
    let plain = GreenToken::new(
        SyntaxKind::IdentifierToken,
        "x",
        smallvec![eol(), ws("    ")],
        TriviaList::new(),
    );
    assert_eq!(plain.whitespace_indent(), 4);

    // Indentation is measured on the token's own line.
    let two_lines = GreenToken::new(
        SyntaxKind::IdentifierToken,
        "x",
        smallvec![ws("        "), comment("-- a"), eol(), ws("  ")],
        TriviaList::new(),
    );
    assert_eq!(two_lines.whitespace_indent(), 2);

    // A comment on the same line stops accumulation.
    let after_comment = GreenToken::new(
        SyntaxKind::IdentifierToken,
        "x",
        smallvec![ws("  "), GreenTrivia::new(SyntaxKind::MultiLineCommentTrivia, "--[[a]]"), ws("   ")],
        TriviaList::new(),
    );
    assert_eq!(after_comment.whitespace_indent(), 2);

    let after_block = GreenToken::new(
        SyntaxKind::IdentifierToken,
        "x",
        smallvec![GreenTrivia::new(SyntaxKind::MultiLineCommentTrivia, "--[[\n]]"), ws("  ")],
        TriviaList::new(),
    );
    assert_eq!(after_block.whitespace_indent(), 0);
}

#[test]
fn value_and_contextual_kind() {
    let token = GreenToken::new(SyntaxKind::NumericLiteralToken, "0xFF", TriviaList::new(), TriviaList::new())
        .with_value(TokenValue::Integer(255));
    assert_eq!(token.value(), Some(&TokenValue::Integer(255)));

    let self_token = ident("self").with_contextual_kind(SyntaxKind::SelfKeyword);
    assert_eq!(self_token.kind(), SyntaxKind::IdentifierToken);
    assert_eq!(self_token.contextual_kind(), Some(SyntaxKind::SelfKeyword));
}

#[test]
fn diagnostics_set_flag_and_bubble_up() {
    let bad = GreenToken::new(SyntaxKind::BadToken, "$", TriviaList::new(), TriviaList::new())
        .with_diagnostics(vec![DiagnosticInfo::new(ErrorCode::BadCharacter, ["$"]).with_location(0, 1)]);
    assert!(bad.has_diagnostics());
    assert_eq!(bad.diagnostics().len(), 1);

    let clean = ident("x").with_diagnostics(Vec::new());
    assert!(!clean.has_diagnostics());

    let inner = GreenNode::new(SyntaxKind::Statement, [Some(bad.into())]);
    let outer = GreenNode::new(SyntaxKind::StatementList, [Some(inner.into()), Some(clean.into())]);
    assert!(outer.contains_diagnostics());
}

#[test]
fn node_offsets_and_lookup() {
    let node = GreenNode::new(
        SyntaxKind::Statement,
        [
            Some(ident("ab").into()),
            None,
            Some(GreenToken::missing(SyntaxKind::EqualsToken).into()),
            Some(ident("cde").into()),
        ],
    );
    assert_eq!(node.full_width(), 5);
    assert_eq!(node.slot_offset(0), 0);
    assert_eq!(node.slot_offset(2), 2);
    assert_eq!(node.slot_offset(3), 2);
    assert_eq!(node.slot_offset(9), 5);

    assert_eq!(node.slot_at_offset(0), Some(0));
    assert_eq!(node.slot_at_offset(1), Some(0));
    assert_eq!(node.slot_at_offset(2), Some(3));
    assert_eq!(node.slot_at_offset(4), Some(3));
    assert_eq!(node.slot_at_offset(5), None);
}

#[test]
fn first_and_last_token_skip_empty_nodes() {
    let empty = GreenNode::new(SyntaxKind::StatementList, []);
    let node = GreenNode::new(
        SyntaxKind::CompilationUnit,
        [Some(empty.clone().into()), Some(ident("x").into()), Some(empty.into())],
    );
    assert_eq!(node.first_token().map(GreenToken::text), Some("x"));
    assert_eq!(node.last_token().map(GreenToken::text), Some("x"));
}

#[test]
fn builder_nests_and_reuses() {
    let mut builder = GreenNodeBuilder::new();
    builder.start_node(SyntaxKind::CompilationUnit);
    builder.start_node(SyntaxKind::StatementList);
    builder.start_node(SyntaxKind::Statement);
    builder.token(ident("a"));
    builder.finish_node();
    builder.finish_node();
    builder.empty_slot();
    builder.finish_node();
    let root = builder.finish();

    assert_eq!(root.kind(), SyntaxKind::CompilationUnit);
    assert_eq!(root.slot_count(), 2);
    assert!(root.slot(1).is_none());
    assert_eq!(root.to_full_string(), "a");

    let Some(GreenElement::Node(list)) = root.slot(0) else {
        panic!("expected a statement list");
    };
    let mut builder = GreenNodeBuilder::new();
    builder.start_node(SyntaxKind::CompilationUnit);
    builder.node(list.clone());
    builder.finish_node();
    let rebuilt = builder.finish();
    let Some(GreenElement::Node(reused)) = rebuilt.slot(0) else {
        panic!("expected a statement list");
    };
    assert!(reused.ptr_eq(list));
    assert_eq!(rebuilt.to_full_string(), root.to_full_string());
}
