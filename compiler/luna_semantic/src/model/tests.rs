use luna_diagnostic::{ErrorCode, Location};
use luna_ir::{ParseOptions, SourceText, SyntaxKind};
use luna_parse::parse;
use luna_syntax::SyntaxNode;
use pretty_assertions::assert_eq;

use super::*;
use crate::symbols::AssemblySymbol;
use crate::BindingDiagnosticBag;

fn model(text: &str) -> SemanticModel {
    SemanticModel::new(parse(SourceText::new(text), &ParseOptions::default()))
}

fn first_statement(model: &SemanticModel) -> SyntaxNode {
    let root = model.syntax_tree().root();
    let list = root.children().next().expect("statement list");
    let statement = list.children().next().expect("statement");
    statement
}

#[test]
fn nodes_of_other_trees_are_rejected() {
    let first = model("x = 1");
    let second = model("x = 1");
    let node = first_statement(&first);
    assert!(first.is_in_tree(&node));
    assert!(!second.is_in_tree(&node));
    assert_eq!(first.check_syntax_node(&node), Ok(()));
    assert_eq!(
        second.check_syntax_node(&node),
        Err(SemanticError::NodeNotInTree)
    );
    assert_eq!(
        second.get_adjusted_node_position(&node),
        Err(SemanticError::NodeNotInTree)
    );
}

#[test]
fn clones_share_the_tree() {
    let model = model("x = 1");
    let copy = model.clone();
    assert!(copy.is_in_tree(&first_statement(&model)));
}

#[test]
fn positions_snap_to_token_starts() {
    let model = model("local x = 1\n");
    let adjusted: Vec<u32> = (0..=12)
        .map(|position| model.check_and_adjust_position(position).expect("in range"))
        .collect();
    // Trailing trivia belongs to the token before it, the final line break
    // to the end-of-file token and so to the last real token.
    assert_eq!(adjusted, [0, 0, 0, 0, 0, 0, 6, 6, 8, 8, 10, 10, 10]);
}

#[test]
fn positions_past_the_end_are_errors() {
    let model = model("local x = 1\n");
    assert_eq!(
        model.check_and_adjust_position(13),
        Err(SemanticError::PositionOutOfRange {
            position: 13,
            start: 0,
            end: 12,
        })
    );
    assert!(model.find_token_at_position(13).is_err());
}

#[test]
fn empty_tree_accepts_only_its_start() {
    let model = model("");
    assert_eq!(model.check_and_adjust_position(0), Ok(0));
    assert!(model.check_and_adjust_position(1).is_err());
}

#[test]
fn missing_tokens_are_skipped() {
    // The missing `end` sits at 8 with zero width.
    let model = model("do x = 1");
    assert_eq!(model.check_and_adjust_position(8), Ok(7));
}

#[test]
fn bad_tokens_are_skipped() {
    let after_assignment = model("x = $");
    assert_eq!(after_assignment.check_and_adjust_position(4), Ok(2));

    // Nothing real to snap back to: the found token's own start is kept.
    let only_bad = model("  $");
    assert_eq!(only_bad.check_and_adjust_position(0), Ok(2));
    assert_eq!(only_bad.check_and_adjust_position(2), Ok(2));
    assert_eq!(only_bad.check_and_adjust_position(3), Ok(3));
}

#[test]
fn node_positions_start_at_the_first_real_token() {
    let model = model("  local x = 1");
    let statement = first_statement(&model);
    assert_eq!(model.get_adjusted_node_position(&statement), Ok(2));
}

#[test]
fn empty_node_position_snaps_back() {
    let model = model("do\n  end");
    let block = first_statement(&model)
        .children()
        .next()
        .expect("block");
    let body = block.children().next().expect("block statements");
    assert_eq!(body.kind(), SyntaxKind::StatementList);
    assert!(body.span().is_empty());
    assert_eq!(model.get_adjusted_node_position(&body), Ok(0));
}

#[test]
fn token_lookup() {
    let model = model("local x = 1\n");
    let token = model.find_token_at_position(6).expect("token");
    assert_eq!(token.kind(), SyntaxKind::IdentifierToken);
    assert_eq!(token.text(), "x");
    let eof = model.find_token_at_position(12).expect("end of file");
    assert_eq!(eof.kind(), SyntaxKind::EndOfFileToken);
}

#[test]
fn parameter_lookup() {
    let assembly = AssemblySymbol::new("core");
    let method = assembly
        .add_module("m")
        .global_namespace()
        .add_type("T")
        .add_method("f");
    method.add_parameter("self");
    method.add_parameter("Value");
    let cancel = CancellationToken::new();

    let model = model("f(1)");
    let found = model
        .find_parameter_symbol(&method, "Value", &cancel)
        .expect("not cancelled")
        .expect("parameter");
    assert_eq!(found.ordinal(), 1);
    assert_eq!(
        model.find_parameter_symbol(&method, "value", &cancel),
        Ok(None)
    );

    let insensitive = SemanticModel::new(parse(
        SourceText::new("f(1)"),
        &ParseOptions::default().with_case_sensitive(false),
    ));
    let found = insensitive
        .find_parameter_symbol(&method, "value", &cancel)
        .expect("not cancelled");
    assert_eq!(found.map(|parameter| parameter.ordinal()), Some(1));
}

#[test]
fn cancelled_lookup_stops() {
    let method = AssemblySymbol::new("core")
        .add_module("m")
        .global_namespace()
        .add_type("T")
        .add_method("f");
    method.add_parameter("a");
    let cancel = CancellationToken::new();
    cancel.cancel();
    assert_eq!(
        model("f()")
            .find_parameter_symbol(&method, "a", &cancel)
            .map(|found| found.is_some()),
        Err(SemanticError::Cancelled)
    );
}

#[test]
fn use_site_reported_at_an_adjusted_node_position() {
    let assembly = AssemblySymbol::missing("ext");
    let ty = assembly.add_module("m").global_namespace().add_type("Widget");
    let model = model("  Widget.new()");
    let statement = first_statement(&model);
    let start = model
        .get_adjusted_node_position(&statement)
        .expect("node in tree");

    let mut bag = BindingDiagnosticBag::new();
    let location = Location::source(luna_ir::Span::from_len(start, 6));
    assert!(bag.report_use_site(ty.as_ref(), &location));
    let diagnostics = bag.diagnostics().expect("diagnostics").to_vec();
    assert_eq!(diagnostics[0].code(), ErrorCode::MissingAssembly);
    assert_eq!(diagnostics[0].span(), Some(luna_ir::Span::new(2, 8)));
}

#[allow(
    clippy::disallowed_types,
    reason = "proptest macros internally use Arc"
)]
mod proptest_model {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn adjusting_is_idempotent(text in "[a-z0-9 \n=(){}\"'#$.,;+-]{0,60}") {
            let model = model(&text);
            let end = model.syntax_tree().root().full_span().end;
            for position in 0..=end {
                let adjusted = model.check_and_adjust_position(position);
                prop_assert!(adjusted.is_ok());
                let adjusted = adjusted.unwrap_or_default();
                prop_assert!(adjusted <= end);
                prop_assert_eq!(model.check_and_adjust_position(adjusted), Ok(adjusted));
            }
            prop_assert!(model.check_and_adjust_position(end + 1).is_err());
        }
    }
}
