//! Grammar productions for rellang.
//!
//! This module implements all `parse_*` methods as an extension of `Parser`.
//!
//! Precedence of relation operators, loosest first: `;`, `+`, `*`. Set
//! expressions use `+` then `*`. An outer `: A -> B` after a composed
//! expression becomes an `Ascription`; `Id :` always starts an atomic
//! relation.
//!
//! Set operators and relation operators share `+` and `*`. Inside a domain or
//! codomain, an operator keeps extending the set expression only when its
//! right operand reads as a set: a name not followed by `:`, or a
//! parenthesized group made only of names, set operators and parens.
//! Otherwise the set expression ends and the operator applies to relations.

use super::core::Parser;
use super::cst::SyntaxKind;
use super::cst::token_sets::{EXPR_FIRST, SET_GROUP, STMT_FIRST, STMT_RECOVERY};
use crate::diagnostics::DiagnosticKind;

impl Parser<'_> {
    pub fn parse_root(&mut self) {
        self.start_node(SyntaxKind::Root);

        loop {
            while self.currently_is(SyntaxKind::Newline) {
                self.bump();
            }
            if self.at_end() {
                break;
            }

            self.parse_statement();

            if self.at_end() || self.currently_is(SyntaxKind::Newline) {
                continue;
            }
            if self.currently_is_one_of(STMT_FIRST) {
                self.error_recover(DiagnosticKind::MissingSeparator, STMT_RECOVERY);
            } else {
                self.error_recover(DiagnosticKind::UnexpectedToken, STMT_RECOVERY);
            }
        }

        self.eat_trivia();
        self.finish_node();
    }

    fn parse_statement(&mut self) {
        match self.current() {
            SyntaxKind::KwSet => self.parse_set_def(),
            SyntaxKind::KwRel => self.parse_rel_def(),
            kind if EXPR_FIRST.contains(kind) => {
                self.start_node(SyntaxKind::ExprStmt);
                self.parse_rel_expr();
                self.finish_node();
            }
            _ => self.error_recover(DiagnosticKind::ExpectedExpression, STMT_RECOVERY),
        }
    }

    /// `set Name := set_expr`
    fn parse_set_def(&mut self) {
        self.assert_current(SyntaxKind::KwSet);
        self.start_node(SyntaxKind::SetDef);
        self.bump();

        if self.parse_def_head() {
            if EXPR_FIRST.contains(self.current()) {
                self.parse_set_coproduct();
            } else {
                self.error_msg(
                    DiagnosticKind::ExpectedSetExpression,
                    "after `:=` in set definition",
                );
            }
        }

        self.finish_node();
    }

    /// `rel Name := rel_expr`
    fn parse_rel_def(&mut self) {
        self.assert_current(SyntaxKind::KwRel);
        self.start_node(SyntaxKind::RelDef);
        self.bump();

        if self.parse_def_head() {
            if EXPR_FIRST.contains(self.current()) {
                self.parse_rel_expr();
            } else {
                self.error_msg(
                    DiagnosticKind::ExpectedExpression,
                    "after `:=` in relation definition",
                );
            }
        }

        self.finish_node();
    }

    /// `Name :=` shared by both definition forms. On failure the rest of the
    /// line is swallowed inside the definition node.
    fn parse_def_head(&mut self) -> bool {
        let ok = self.expect(SyntaxKind::Id, DiagnosticKind::ExpectedIdentifier)
            && self.expect(SyntaxKind::DefEquals, DiagnosticKind::ExpectedDefEquals);
        if !ok {
            self.skip_to_recovery();
        }
        ok
    }

    fn skip_to_recovery(&mut self) {
        if self.currently_is_one_of(STMT_RECOVERY) || self.should_stop() {
            return;
        }
        self.start_node(SyntaxKind::Error);
        while !self.currently_is_one_of(STMT_RECOVERY) && !self.should_stop() {
            self.bump();
        }
        self.finish_node();
    }

    /// Composition chain with an optional outer annotation.
    fn parse_rel_expr(&mut self) {
        if !self.enter_recursion() {
            self.bail_out();
            return;
        }

        let checkpoint = self.checkpoint();
        self.parse_composition();

        while self.currently_is(SyntaxKind::Colon) {
            self.start_node_at(checkpoint, SyntaxKind::Ascription);
            self.bump();
            self.parse_dom_cod();
            self.finish_node();
        }

        self.exit_recursion();
    }

    fn parse_composition(&mut self) {
        let checkpoint = self.checkpoint();
        self.parse_rel_coproduct();

        while self.currently_is(SyntaxKind::Semicolon) {
            self.start_node_at(checkpoint, SyntaxKind::Composition);
            self.bump();
            if self.expect_operand() {
                self.parse_rel_coproduct();
            }
            self.finish_node();
        }
    }

    fn parse_rel_coproduct(&mut self) {
        let checkpoint = self.checkpoint();
        self.parse_rel_product();

        while self.currently_is(SyntaxKind::Plus) {
            self.start_node_at(checkpoint, SyntaxKind::RelCoproduct);
            self.bump();
            if self.expect_operand() {
                self.parse_rel_product();
            }
            self.finish_node();
        }
    }

    fn parse_rel_product(&mut self) {
        let checkpoint = self.checkpoint();
        self.parse_rel_atom();

        while self.currently_is(SyntaxKind::Star) {
            self.start_node_at(checkpoint, SyntaxKind::RelProduct);
            self.bump();
            if self.expect_operand() {
                self.parse_rel_atom();
            }
            self.finish_node();
        }
    }

    fn expect_operand(&mut self) -> bool {
        if EXPR_FIRST.contains(self.current()) {
            return true;
        }
        self.error(DiagnosticKind::ExpectedExpression);
        false
    }

    fn parse_rel_atom(&mut self) {
        match self.current() {
            SyntaxKind::ParenOpen => self.parse_rel_paren(),
            SyntaxKind::Id if self.next_is(SyntaxKind::Colon) => self.parse_atomic_rel(),
            SyntaxKind::Id => {
                self.start_node(SyntaxKind::RelRef);
                self.bump();
                self.finish_node();
            }
            _ => self.error(DiagnosticKind::ExpectedExpression),
        }
    }

    fn parse_rel_paren(&mut self) {
        self.start_node(SyntaxKind::RelParen);
        let open = self.current_span();
        self.bump();

        if self.expect_operand() {
            self.parse_rel_expr();
        }
        if !self.eat_token(SyntaxKind::ParenClose) {
            self.error_unclosed_paren(open);
        }

        self.finish_node();
    }

    /// `R : A -> B`
    fn parse_atomic_rel(&mut self) {
        self.start_node(SyntaxKind::AtomicRel);
        self.bump();
        self.assert_current(SyntaxKind::Colon);
        self.bump();
        self.parse_dom_cod();
        self.finish_node();
    }

    /// `A -> B`; the codomain is skipped when the arrow is missing.
    fn parse_dom_cod(&mut self) {
        self.start_node(SyntaxKind::DomCod);

        if self.expect_set_operand() {
            self.parse_set_coproduct();
        }
        if self.expect(SyntaxKind::Arrow, DiagnosticKind::ExpectedArrow) && self.expect_set_operand()
        {
            self.parse_set_coproduct();
        }

        self.finish_node();
    }

    fn expect_set_operand(&mut self) -> bool {
        if EXPR_FIRST.contains(self.current()) {
            return true;
        }
        self.error(DiagnosticKind::ExpectedSetExpression);
        false
    }

    fn parse_set_coproduct(&mut self) {
        let checkpoint = self.checkpoint();
        self.parse_set_product();

        while self.currently_is(SyntaxKind::Plus) && self.operator_continues_set() {
            self.start_node_at(checkpoint, SyntaxKind::SetCoproduct);
            self.bump();
            if self.expect_set_operand() {
                self.parse_set_product();
            }
            self.finish_node();
        }
    }

    fn parse_set_product(&mut self) {
        let checkpoint = self.checkpoint();
        self.parse_set_atom();

        while self.currently_is(SyntaxKind::Star) && self.operator_continues_set() {
            self.start_node_at(checkpoint, SyntaxKind::SetProduct);
            self.bump();
            if self.expect_set_operand() {
                self.parse_set_atom();
            }
            self.finish_node();
        }
    }

    fn parse_set_atom(&mut self) {
        match self.current() {
            SyntaxKind::ParenOpen => self.parse_set_paren(),
            SyntaxKind::Id => {
                self.start_node(SyntaxKind::SetRef);
                self.bump();
                self.finish_node();
            }
            _ => self.error(DiagnosticKind::ExpectedSetExpression),
        }
    }

    fn parse_set_paren(&mut self) {
        if !self.enter_recursion() {
            self.bail_out();
            return;
        }

        self.start_node(SyntaxKind::SetParen);
        let open = self.current_span();
        self.bump();

        if self.expect_set_operand() {
            self.parse_set_coproduct();
        }
        if !self.eat_token(SyntaxKind::ParenClose) {
            self.error_unclosed_paren(open);
        }

        self.finish_node();
        self.exit_recursion();
    }

    /// Decides whether the `+` or `*` at the current position belongs to the
    /// set expression being parsed.
    fn operator_continues_set(&mut self) -> bool {
        let Some(operand) = self.nth_non_trivia(1) else {
            return true;
        };

        match self.tokens[operand].kind {
            SyntaxKind::Id => {
                let after = self.tokens[operand + 1..]
                    .iter()
                    .find(|t| !t.kind.is_trivia())
                    .map(|t| t.kind);
                after != Some(SyntaxKind::Colon)
            }
            SyntaxKind::ParenOpen => self.is_set_group(operand),
            // Missing operand: let the set production report it.
            _ => true,
        }
    }

    /// Scans a parenthesized group starting at `open` for anything that
    /// cannot appear in a set expression.
    fn is_set_group(&self, open: usize) -> bool {
        let mut depth = 0usize;
        for token in &self.tokens[open..] {
            if !SET_GROUP.contains(token.kind) {
                return false;
            }
            match token.kind {
                SyntaxKind::ParenOpen => depth += 1,
                SyntaxKind::ParenClose => {
                    depth -= 1;
                    if depth == 0 {
                        return true;
                    }
                }
                _ => {}
            }
        }
        // Unclosed at end of input: still a set group, the paren error comes later.
        true
    }
}
