//! Statement-level parser.
//!
//! The tree this builds is deliberately shallow: a statement is a run of
//! tokens, with delimiter groups, keyword blocks (Lua), indented blocks
//! (MoonScript) and interpolated strings nested inside it. Everything the
//! lexer produced ends up in the tree, so the tree text is the source text.

use luna_diagnostic::{DiagnosticInfo, ErrorCode};
use luna_ir::facts::{
    is_block_closer, is_block_opener, is_closing_delimiter, is_statement_continuation,
    is_statement_continuation_start, kind_text,
};
use luna_ir::{ParseOptions, SourceText, SyntaxKind};
use luna_lexer::{LexedToken, Lexer, LexerMode};
use luna_syntax::{GreenNode, GreenNodeBuilder, GreenToken};

use SyntaxKind as K;

pub(crate) struct Parser<'a> {
    lexer: Lexer<'a>,
    /// One token of lookahead, already lexed in the mode its predecessor
    /// asked for.
    current: LexedToken,
    builder: GreenNodeBuilder,
    /// Kind of the last token pushed, missing tokens included.
    last_kind: SyntaxKind,
    /// Open delimiter groups and interpolations around the current position.
    group_depth: u32,
    /// Lua closes blocks with keywords; MoonScript with indentation.
    keyword_blocks: bool,
}

impl<'a> Parser<'a> {
    /// A parser whose first token starts at `start`.
    pub(crate) fn new(text: &'a SourceText, options: &ParseOptions, start: u32) -> Self {
        let mut lexer = Lexer::new(text, options);
        if start > 0 {
            lexer.reset_to(start);
        }
        let current = lexer.lex(LexerMode::Syntax);
        Parser {
            lexer,
            current,
            builder: GreenNodeBuilder::new(),
            last_kind: K::None,
            group_depth: 0,
            keyword_blocks: options.dialect.profile().has_keyword_blocks(),
        }
    }

    pub(crate) fn parse_compilation_unit(mut self) -> GreenNode {
        self.start_compilation_unit();
        while self.next_statement_start().is_some() {
            self.parse_statement();
        }
        self.finish_compilation_unit()
    }

    pub(crate) fn start_compilation_unit(&mut self) {
        self.builder.start_node(K::CompilationUnit);
        self.builder.start_node(K::StatementList);
    }

    /// Closes the statement list and attaches the end-of-file token.
    pub(crate) fn finish_compilation_unit(self) -> GreenNode {
        let Parser {
            mut builder,
            current,
            ..
        } = self;
        builder.finish_node();
        builder.token(current.token);
        builder.finish_node();
        builder.finish()
    }

    /// Full start of the next top-level statement, or `None` at end of file.
    ///
    /// An interpolation left unbalanced by the previous statement has its
    /// lexer state dropped here, so every top-level statement is lexed from
    /// a clean state no matter what came before it.
    pub(crate) fn next_statement_start(&mut self) -> Option<u32> {
        if self.lexer.in_interpolation() {
            self.lexer.reset_to(self.current.start);
            self.current = self.lexer.lex(LexerMode::Syntax);
        }
        (self.current.kind() != K::EndOfFileToken).then_some(self.current.start)
    }

    /// Push a statement that lies wholly before the position this parser
    /// started at.
    pub(crate) fn reuse_prefix(&mut self, statement: GreenNode) {
        self.builder.node(statement);
    }

    /// Splice in a statement from a previous tree. It must start at the
    /// current token's full start.
    pub(crate) fn reuse_statement(&mut self, statement: GreenNode) {
        let end = self.current.start + statement.full_width();
        self.builder.node(statement);
        self.lexer.reset_to(end);
        self.current = self.lexer.lex(LexerMode::Syntax);
    }

    /// Parse one statement. Always consumes at least the current token, so
    /// callers must not call it at end of file.
    pub(crate) fn parse_statement(&mut self) {
        self.builder.start_node(K::Statement);
        let indent = self.current.token.whitespace_indent();
        let first = self.current.kind();
        if is_closing_delimiter(first) || (self.keyword_blocks && is_block_closer(first)) {
            self.bump_unexpected();
        } else {
            let mut awaiting_body = false;
            self.parse_item(&mut awaiting_body);
            while self.continues_statement(indent) {
                if is_closing_delimiter(self.current.kind()) {
                    self.bump_unexpected();
                } else if self.starts_indented_block(indent) {
                    self.parse_indented_block(indent);
                } else {
                    self.parse_item(&mut awaiting_body);
                }
            }
        }
        self.builder.finish_node();
    }

    fn continues_statement(&self, indent: u32) -> bool {
        let kind = self.current.kind();
        if kind == K::EndOfFileToken || self.last_kind == K::SemicolonToken {
            return false;
        }
        if self.keyword_blocks && is_block_closer(kind) {
            return false;
        }
        if is_closing_delimiter(kind) {
            // Inside a group the closer belongs to the group.
            return self.group_depth == 0;
        }
        if !self.current.token.has_newline_before() || self.line_continues() {
            return true;
        }
        !self.keyword_blocks && self.current.token.whitespace_indent() > indent
    }

    fn line_continues(&self) -> bool {
        is_statement_continuation(self.last_kind) || is_statement_continuation_start(self.current.kind())
    }

    fn starts_indented_block(&self, indent: u32) -> bool {
        !self.keyword_blocks
            && self.current.token.has_newline_before()
            && !self.line_continues()
            && self.current.token.whitespace_indent() > indent
    }

    /// One token, group, block or interpolated string.
    ///
    /// `awaiting_body` carries a `function` keyword over to its parameter
    /// list: the body block opens right after the closing parenthesis.
    fn parse_item(&mut self, awaiting_body: &mut bool) {
        let kind = self.current.kind();
        match kind {
            K::OpenParenToken | K::OpenBracketToken | K::OpenBraceToken => {
                self.parse_group();
                if kind == K::OpenParenToken && *awaiting_body {
                    *awaiting_body = false;
                    self.parse_keyword_block(K::FunctionKeyword);
                }
            }
            K::InterpolatedStringStartToken => self.parse_interpolated_string(),
            _ if self.keyword_blocks && is_block_opener(kind) && kind != K::ElseKeyword => {
                self.bump();
                if kind == K::FunctionKeyword {
                    *awaiting_body = true;
                } else {
                    self.parse_keyword_block(kind);
                }
            }
            _ => self.bump(),
        }
    }

    fn parse_group(&mut self) {
        let open = self.current.kind();
        let (node, close) = match open {
            K::OpenParenToken => (K::ParenthesizedGroup, K::CloseParenToken),
            K::OpenBracketToken => (K::BracketedGroup, K::CloseBracketToken),
            _ => (K::BracedGroup, K::CloseBraceToken),
        };
        self.builder.start_node(node);
        self.bump();
        self.group_depth += 1;
        let mut awaiting_body = false;
        loop {
            let kind = self.current.kind();
            if kind == close {
                self.bump();
                break;
            }
            if kind == K::EndOfFileToken
                || is_closing_delimiter(kind)
                || (self.keyword_blocks && is_block_closer(kind))
            {
                self.missing_closer(ErrorCode::UnclosedDelimiter, open, close);
                break;
            }
            self.parse_item(&mut awaiting_body);
        }
        self.group_depth -= 1;
        self.builder.finish_node();
    }

    /// `Block(StatementList, closer)` after a block-opening keyword.
    ///
    /// A closer that does not match the opener is left for the enclosing
    /// construct and a missing closer is recorded instead. `else` closes the
    /// block before it and opens its own.
    fn parse_keyword_block(&mut self, opener: SyntaxKind) {
        self.builder.start_node(K::Block);
        self.builder.start_node(K::StatementList);
        while !self.at_block_end() {
            self.parse_statement();
        }
        self.builder.finish_node();

        let closer = self.current.kind();
        let closes = block_closes(opener, closer);
        if closes {
            self.bump();
        } else {
            let expected = if opener == K::RepeatKeyword {
                K::UntilKeyword
            } else {
                K::EndKeyword
            };
            self.missing_closer(ErrorCode::MissingBlockEnd, opener, expected);
        }
        self.builder.finish_node();

        if closes && closer == K::ElseKeyword {
            self.parse_keyword_block(K::ElseKeyword);
        }
    }

    fn at_block_end(&self) -> bool {
        let kind = self.current.kind();
        kind == K::EndOfFileToken
            || is_block_closer(kind)
            || (self.group_depth > 0 && is_closing_delimiter(kind))
    }

    /// `Block(StatementList, <empty>)` for the lines indented deeper than
    /// the statement owning them.
    fn parse_indented_block(&mut self, indent: u32) {
        self.builder.start_node(K::Block);
        self.builder.start_node(K::StatementList);
        loop {
            self.parse_statement();
            if self.at_dedent(indent) {
                break;
            }
        }
        self.builder.finish_node();
        self.builder.empty_slot();
        self.builder.finish_node();
    }

    fn at_dedent(&self, indent: u32) -> bool {
        let kind = self.current.kind();
        kind == K::EndOfFileToken
            || (self.group_depth > 0 && is_closing_delimiter(kind))
            || (self.current.token.has_newline_before()
                && self.current.token.whitespace_indent() <= indent)
    }

    fn parse_interpolated_string(&mut self) {
        self.builder.start_node(K::InterpolatedString);
        self.bump();
        loop {
            match self.current.kind() {
                K::InterpolatedStringTextToken => self.bump(),
                K::HashOpenBraceToken => self.parse_interpolation(),
                K::InterpolatedStringEndToken => {
                    self.bump();
                    break;
                }
                // An unclosed interpolation already reported the problem.
                _ => {
                    self.push_missing(K::InterpolatedStringEndToken, None);
                    break;
                }
            }
        }
        self.builder.finish_node();
    }

    fn parse_interpolation(&mut self) {
        self.builder.start_node(K::Interpolation);
        self.bump();
        self.group_depth += 1;
        let mut awaiting_body = false;
        loop {
            let kind = self.current.kind();
            if kind == K::CloseBraceToken {
                self.bump();
                break;
            }
            if kind == K::EndOfFileToken {
                self.missing_closer(
                    ErrorCode::UnclosedDelimiter,
                    K::HashOpenBraceToken,
                    K::CloseBraceToken,
                );
                break;
            }
            if is_closing_delimiter(kind) {
                self.bump_unexpected();
            } else {
                self.parse_item(&mut awaiting_body);
            }
        }
        self.group_depth -= 1;
        self.builder.finish_node();
    }

    fn bump(&mut self) {
        let next = self.lexer.lex(self.lexer.next_mode());
        let token = std::mem::replace(&mut self.current, next);
        self.last_kind = token.kind();
        self.builder.token(token.token);
    }

    /// Consume the current token, attaching an "unexpected symbol" error.
    fn bump_unexpected(&mut self) {
        let token = &self.current.token;
        let info = DiagnosticInfo::new(ErrorCode::UnexpectedToken, [token.text()])
            .with_location(token.leading_width(), token.width());
        tracing::trace!(kind = ?token.kind(), start = self.current.start, "unexpected token");
        self.current.token = token.clone().with_diagnostics(vec![info]);
        self.bump();
    }

    fn missing_closer(&mut self, code: ErrorCode, open: SyntaxKind, close: SyntaxKind) {
        let info = DiagnosticInfo::new(
            code,
            [
                kind_text(open).unwrap_or_default(),
                kind_text(close).unwrap_or_default(),
            ],
        );
        self.push_missing(close, Some(info));
    }

    fn push_missing(&mut self, kind: SyntaxKind, diagnostic: Option<DiagnosticInfo>) {
        let token = GreenToken::missing(kind).with_diagnostics(diagnostic.into_iter().collect());
        self.last_kind = kind;
        self.builder.token(token);
    }
}

fn block_closes(opener: SyntaxKind, closer: SyntaxKind) -> bool {
    match opener {
        K::ThenKeyword => matches!(
            closer,
            K::EndKeyword | K::ElseIfKeyword | K::ElseKeyword
        ),
        K::RepeatKeyword => closer == K::UntilKeyword,
        _ => closer == K::EndKeyword,
    }
}
