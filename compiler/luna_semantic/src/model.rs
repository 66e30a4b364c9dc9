//! Position and node queries over one syntax tree.

use std::sync::Arc;

use luna_ir::SyntaxKind;
use luna_syntax::{find_token_at_position, SyntaxNode, SyntaxToken, SyntaxTree};

use crate::symbols::{MethodSymbol, ParameterSymbol, Symbol};
use crate::{CancellationToken, SemanticError};

/// Semantic view of a single syntax tree.
///
/// Queries take positions and nodes of that tree only. Anything else is an
/// `Err`, not a diagnostic.
#[derive(Clone, Debug)]
pub struct SemanticModel {
    tree: SyntaxTree,
}

impl SemanticModel {
    pub fn new(tree: SyntaxTree) -> Self {
        SemanticModel { tree }
    }

    pub fn syntax_tree(&self) -> &SyntaxTree {
        &self.tree
    }

    pub fn is_in_tree(&self, node: &SyntaxNode) -> bool {
        node.tree().ptr_eq(&self.tree)
    }

    pub fn check_syntax_node(&self, node: &SyntaxNode) -> Result<(), SemanticError> {
        if self.is_in_tree(node) {
            Ok(())
        } else {
            Err(SemanticError::NodeNotInTree)
        }
    }

    /// Snap `position` to the start of the nearest real token at or before
    /// it.
    ///
    /// Positions in leading trivia move to the previous token; zero-width
    /// and bad tokens are skipped backwards. The end of the tree is a valid
    /// position; anything past it is an error. Adjusting an adjusted
    /// position returns it unchanged.
    pub fn check_and_adjust_position(&self, position: u32) -> Result<u32, SemanticError> {
        let root = self.tree.root();
        let full = root.full_span();
        if position < full.start || position > full.end {
            return Err(SemanticError::PositionOutOfRange {
                position,
                start: full.start,
                end: full.end,
            });
        }
        let Some(token) = find_token_at_position(&root, position, position == full.end) else {
            return Ok(full.start);
        };

        let mut candidate = if position < token.span().start {
            token.previous_token(false)
        } else {
            Some(token.clone())
        };
        while let Some(current) = candidate {
            if !is_phantom(&current) {
                return Ok(current.span().start);
            }
            candidate = current.previous_token(false);
        }
        Ok(token.span().start)
    }

    /// The position queries about `node` should be answered at: the start
    /// of its first real token, adjusted like any other position when the
    /// node is empty or erroneous.
    pub fn get_adjusted_node_position(&self, node: &SyntaxNode) -> Result<u32, SemanticError> {
        self.check_syntax_node(node)?;
        let full = self.tree.root().full_span();
        let position = node
            .first_token(false)
            .map_or(node.span().start, |token| token.span().start);
        if full.is_empty() {
            Ok(position)
        } else if node.span().is_empty() || node.green().contains_diagnostics() {
            self.check_and_adjust_position(position)
        } else {
            Ok(position)
        }
    }

    /// The token whose full span contains `position`; the end of the tree
    /// resolves to the end-of-file token.
    pub fn find_token_at_position(&self, position: u32) -> Result<SyntaxToken, SemanticError> {
        let root = self.tree.root();
        let full = root.full_span();
        find_token_at_position(&root, position, position == full.end).ok_or(
            SemanticError::PositionOutOfRange {
                position,
                start: full.start,
                end: full.end,
            },
        )
    }

    /// Look up a parameter of `method` by name, honoring the tree's case
    /// sensitivity. Stops with `Cancelled` as soon as `cancel` is set.
    pub fn find_parameter_symbol(
        &self,
        method: &MethodSymbol,
        name: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<Arc<ParameterSymbol>>, SemanticError> {
        let case_sensitive = self.tree.options().case_sensitive;
        for parameter in method.parameters() {
            cancel.check()?;
            let matches = if case_sensitive {
                parameter.name() == name
            } else {
                parameter.name().eq_ignore_ascii_case(name)
            };
            if matches {
                return Ok(Some(parameter));
            }
        }
        Ok(None)
    }
}

/// Tokens a position never snaps to.
fn is_phantom(token: &SyntaxToken) -> bool {
    token.span().is_empty() || token.kind() == SyntaxKind::BadToken
}

#[cfg(test)]
mod tests;
