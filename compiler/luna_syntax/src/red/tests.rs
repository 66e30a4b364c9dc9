use luna_ir::{ParseOptions, SourceText, Span, SyntaxKind};
use pretty_assertions::assert_eq;

use crate::{GreenNodeBuilder, GreenToken, GreenTrivia, SyntaxTree};

fn ws(text: &str) -> GreenTrivia {
    GreenTrivia::new(SyntaxKind::WhitespaceTrivia, text)
}

fn tok(kind: SyntaxKind, text: &str, leading: &[GreenTrivia], trailing: &[GreenTrivia]) -> GreenToken {
    GreenToken::new(
        kind,
        text,
        leading.iter().cloned().collect(),
        trailing.iter().cloned().collect(),
    )
}

/// `"  x -- c\ny"` as two statements, the second with a missing `=`.
fn sample() -> SyntaxTree {
    let x = tok(
        SyntaxKind::IdentifierToken,
        "x",
        &[ws("  ")],
        &[ws(" "), GreenTrivia::new(SyntaxKind::SingleLineCommentTrivia, "-- c")],
    );
    let y = tok(
        SyntaxKind::IdentifierToken,
        "y",
        &[GreenTrivia::new(SyntaxKind::EndOfLineTrivia, "\n")],
        &[],
    );
    let eof = tok(SyntaxKind::EndOfFileToken, "", &[], &[]);

    let mut builder = GreenNodeBuilder::new();
    builder.start_node(SyntaxKind::CompilationUnit);
    builder.start_node(SyntaxKind::StatementList);
    builder.start_node(SyntaxKind::Statement);
    builder.token(x);
    builder.finish_node();
    builder.start_node(SyntaxKind::Statement);
    builder.token(y);
    builder.token(GreenToken::missing(SyntaxKind::EqualsToken));
    builder.finish_node();
    builder.finish_node();
    builder.token(eof);
    builder.finish_node();
    SyntaxTree::new(
        builder.finish(),
        SourceText::new("  x -- c\ny"),
        ParseOptions::default(),
    )
}

#[test]
fn debug_tree_shows_positions() {
    let tree = sample();
    assert_eq!(
        tree.root().debug_tree(),
        "\
CompilationUnit@0..10
  StatementList@0..10
    Statement@0..8
      IdentifierToken@2..3 \"x\"
    Statement@8..10
      IdentifierToken@9..10 \"y\"
      EqualsToken@10..10 (missing)
  EndOfFileToken@10..10 \"\"
"
    );
}

#[test]
fn spans_exclude_outer_trivia() {
    let root = sample().root();
    let statements: Vec<_> = root.children().flat_map(|list| list.children().collect::<Vec<_>>()).collect();
    assert_eq!(statements.len(), 2);
    assert_eq!(statements[0].full_span(), Span::new(0, 8));
    assert_eq!(statements[0].span(), Span::new(2, 3));
    assert_eq!(statements[0].text(), "x");
    assert_eq!(statements[0].full_text(), "  x -- c");
    assert_eq!(statements[1].span(), Span::new(9, 10));
    assert_eq!(root.full_text(), "  x -- c\ny");
}

#[test]
fn trivia_positions() {
    let root = sample().root();
    let x = root.first_token(false).unwrap_or_else(|| panic!("no tokens"));
    let leading: Vec<_> = x.leading_trivia().map(|t| (t.kind(), t.span())).collect();
    let trailing: Vec<_> = x.trailing_trivia().map(|t| (t.kind(), t.span())).collect();
    assert_eq!(leading, vec![(SyntaxKind::WhitespaceTrivia, Span::new(0, 2))]);
    assert_eq!(
        trailing,
        vec![
            (SyntaxKind::WhitespaceTrivia, Span::new(3, 4)),
            (SyntaxKind::SingleLineCommentTrivia, Span::new(4, 8)),
        ]
    );
}

#[test]
fn parent_links_and_identity() {
    let root = sample().root();
    let list = root.children().next();
    let again = root.children().next();
    assert!(list.is_some());
    assert_eq!(list, again);

    let token = root.first_token(false).unwrap_or_else(|| panic!("no tokens"));
    let kinds: Vec<_> = token.parent().ancestors().map(|n| n.kind()).collect();
    assert_eq!(
        kinds,
        vec![SyntaxKind::Statement, SyntaxKind::StatementList, SyntaxKind::CompilationUnit]
    );
    assert!(root.parent().is_none());
    assert_eq!(token.parent().index(), 0);
}

#[test]
fn token_navigation_skips_zero_width() {
    let root = sample().root();
    let x = root.first_token(false).unwrap_or_else(|| panic!("no tokens"));
    let y = x.next_token(false).unwrap_or_else(|| panic!("no next token"));
    assert_eq!(y.text(), "y");
    assert!(y.next_token(false).is_none());

    let missing = y.next_token(true).unwrap_or_else(|| panic!("no missing token"));
    assert!(missing.is_missing());
    assert_eq!(missing.kind(), SyntaxKind::EqualsToken);

    let eof = root.last_token(true).unwrap_or_else(|| panic!("no eof"));
    assert_eq!(eof.kind(), SyntaxKind::EndOfFileToken);
    assert_eq!(eof.previous_token(false), Some(y.clone()));
    assert_eq!(eof.previous_token(true), Some(missing));
    assert_eq!(y.previous_token(false), Some(x.clone()));
    assert!(x.previous_token(true).is_none());
    assert_eq!(root.last_token(false), Some(y));
}

#[test]
fn descendant_tokens_in_order() {
    let root = sample().root();
    let kinds: Vec<_> = root.descendant_tokens().map(|t| t.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            SyntaxKind::IdentifierToken,
            SyntaxKind::IdentifierToken,
            SyntaxKind::EqualsToken,
            SyntaxKind::EndOfFileToken,
        ]
    );
}

#[test]
fn find_token_by_position() {
    let root = sample().root();
    let text_at = |position| root.find_token(position).map(|t| (t.kind(), t.span()));
    let x = Some((SyntaxKind::IdentifierToken, Span::new(2, 3)));
    let y = Some((SyntaxKind::IdentifierToken, Span::new(9, 10)));
    assert_eq!(text_at(0), x);
    assert_eq!(text_at(2), x);
    assert_eq!(text_at(7), x);
    assert_eq!(text_at(8), y);
    assert_eq!(text_at(9), y);
    assert_eq!(text_at(10), Some((SyntaxKind::EndOfFileToken, Span::new(10, 10))));
    assert_eq!(text_at(11), None);
}

#[test]
fn find_trivia_by_position() {
    let root = sample().root();
    let comment = root.find_trivia(5);
    assert_eq!(comment.as_ref().map(|t| t.text()), Some("-- c"));
    assert_eq!(comment.map(|t| t.span()), Some(Span::new(4, 8)));
    assert_eq!(root.find_trivia(8).map(|t| t.kind()), Some(SyntaxKind::EndOfLineTrivia));
    assert!(root.find_trivia(2).is_none());
}

#[test]
fn concurrent_materialisation_publishes_one_node() {
    let tree = sample();
    let root = tree.root();
    let seen: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| root.children().next()))
            .collect();
        handles.into_iter().filter_map(|h| h.join().ok().flatten()).collect()
    });
    assert_eq!(seen.len(), 4);
    assert!(seen.windows(2).all(|pair| pair[0] == pair[1]));
}
