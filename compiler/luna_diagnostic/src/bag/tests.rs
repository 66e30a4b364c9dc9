use luna_ir::Span;
use pretty_assertions::assert_eq;

use super::*;
use crate::Severity;

fn at(start: u32) -> Location {
    Location::source(Span::new(start, start + 1))
}

#[test]
fn add_returns_the_appended_info() {
    let mut bag = DiagnosticBag::new();
    let info = bag.add(ErrorCode::BadCharacter, at(0), ["$"]);
    assert_eq!(bag.len(), 1);
    assert_eq!(bag.iter().next().map(|d| &d.info), Some(&info));
}

#[test]
fn drain_preserves_call_order() {
    let mut bag = DiagnosticBag::new();
    for i in 0..10u32 {
        bag.add(ErrorCode::UnexpectedToken, at(i), [i.to_string()]);
    }
    let drained = bag.drain();
    assert_eq!(drained.len(), 10);
    let starts: Vec<u32> = drained
        .iter()
        .filter_map(|d| d.span().map(|s| s.start))
        .collect();
    assert_eq!(starts, (0..10).collect::<Vec<_>>());
    assert!(bag.is_empty());
}

#[test]
fn duplicates_are_kept() {
    let mut bag = DiagnosticBag::new();
    bag.add(ErrorCode::UnclosedDelimiter, at(3), ["("]);
    bag.add(ErrorCode::UnclosedDelimiter, at(3), ["("]);
    assert_eq!(bag.len(), 2);
    let all = bag.to_vec();
    assert_eq!(all[0], all[1]);
}

#[test]
fn has_errors_ignores_warnings_and_suppressed() {
    let mut bag = DiagnosticBag::new();
    bag.add(ErrorCode::ObsoleteSymbol, at(0), ["f"]);
    assert!(!bag.has_errors());

    let info = DiagnosticInfo::new(ErrorCode::BadCharacter, ["$"]).with_is_suppressed(true);
    bag.add_info(info, at(1));
    assert!(!bag.has_errors());
    assert_eq!(bag.error_count(), 1);

    bag.add_info(
        DiagnosticInfo::new(ErrorCode::ObsoleteSymbol, ["g"]).with_severity(Severity::Error),
        at(2),
    );
    assert!(bag.has_errors());
}

#[test]
fn extend_merges_in_order() {
    let mut main = DiagnosticBag::new();
    main.add(ErrorCode::BadCharacter, at(0), ["$"]);
    let mut worker = DiagnosticBag::new();
    worker.add(ErrorCode::InvalidNumber, at(5), ["1e"]);
    worker.add(ErrorCode::InvalidEscape, at(9), ["\\q"]);

    main.extend(worker);
    let codes: Vec<ErrorCode> = main.iter().map(Diagnostic::code).collect();
    assert_eq!(
        codes,
        [ErrorCode::BadCharacter, ErrorCode::InvalidNumber, ErrorCode::InvalidEscape]
    );
}

#[test]
fn pool_reuses_empty_bags() {
    let pool = DiagnosticBagPool::new(1);
    let mut bag = pool.get();
    bag.add(ErrorCode::BadCharacter, at(0), ["$"]);
    pool.release(bag);
    assert_eq!(pool.available(), 1);

    let reused = pool.get();
    assert!(reused.is_empty());
    assert_eq!(pool.available(), 0);

    pool.release(reused);
    pool.release(DiagnosticBag::new());
    assert_eq!(pool.available(), 1);
}
