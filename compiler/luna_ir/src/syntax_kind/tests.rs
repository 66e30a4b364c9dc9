use super::SyntaxKind;

#[test]
fn from_raw_round_trips_every_kind() {
    for &kind in SyntaxKind::ALL {
        assert_eq!(SyntaxKind::from_raw(kind.raw()), Some(kind), "{kind:?}");
    }
}

#[test]
fn from_raw_rejects_gaps() {
    assert_eq!(SyntaxKind::from_raw(49), None);
    assert_eq!(SyntaxKind::from_raw(125), None);
    assert_eq!(SyntaxKind::from_raw(280), None);
    assert_eq!(SyntaxKind::from_raw(u16::MAX), None);
}

#[test]
fn all_is_sorted_and_unique() {
    for pair in SyntaxKind::ALL.windows(2) {
        assert!(pair[0].raw() < pair[1].raw(), "{:?} >= {:?}", pair[0], pair[1]);
    }
}

#[test]
fn categories_are_disjoint() {
    for &kind in SyntaxKind::ALL {
        let categories = [
            kind.is_punctuation(),
            kind.is_operator(),
            kind.is_reserved_keyword(),
            kind.is_contextual_keyword(),
            kind.is_metamethod(),
            kind.is_literal_or_text(),
            kind.is_trivia(),
            kind.is_node(),
        ];
        let count = categories.iter().filter(|&&c| c).count();
        if kind == SyntaxKind::None {
            assert_eq!(count, 0);
        } else {
            assert_eq!(count, 1, "{kind:?} falls in {count} categories");
        }
    }
}

#[test]
fn token_trivia_node_partition() {
    assert!(SyntaxKind::EndKeyword.is_token());
    assert!(SyntaxKind::IdentifierToken.is_token());
    assert!(!SyntaxKind::ConstKeyword.is_token());
    assert!(SyntaxKind::ConstKeyword.is_keyword());
    assert!(SyntaxKind::MultiLineCommentTrivia.is_trivia());
    assert!(SyntaxKind::MultiLineCommentTrivia.is_comment());
    assert!(SyntaxKind::Block.is_node());
    assert!(!SyntaxKind::Block.is_token());
}

#[test]
fn names_match_variants() {
    assert_eq!(SyntaxKind::DotDotDotToken.name(), "DotDotDotToken");
    assert_eq!(SyntaxKind::CompilationUnit.name(), "CompilationUnit");
}
