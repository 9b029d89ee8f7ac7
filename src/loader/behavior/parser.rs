//! Recursive-descent engine over the behavior grammar.
//!
//! Binary operators share one precedence level and chain left to right: `a+b*c` reduces
//! `a+b` first. Statements are separated by `;` and any number of trailing semicolons is
//! accepted. Parenthesised groups nest at most [`MAX_GROUP_DEPTH`] deep.

use log::trace;

use super::grammar::{
    AssignOperator, BinaryOperator, Production, Reducer, assignment_operator, binary_operator,
};
use super::lexer::{Lexer, Token, TokenKind};
use crate::error::{BehaviorError, ParseError};
use crate::ir::TranslationContext;

pub const MAX_GROUP_DEPTH: usize = 256;

pub struct Parser<'src, 'a, 't> {
    lexer: Lexer<'src>,
    peeked: Option<Token>,
    reducer: Reducer<'a, 't>,
    depth: usize,
}

impl<'src, 'a, 't> Parser<'src, 'a, 't> {
    pub fn new(source: &'src str, reducer: Reducer<'a, 't>) -> Self {
        Self {
            lexer: Lexer::new(source),
            peeked: None,
            reducer,
            depth: 0,
        }
    }

    /// Parses the whole input and returns the context of the top-level statement.
    pub fn parse(&mut self) -> Result<TranslationContext, BehaviorError> {
        let mut program = self.parse_statement()?;
        loop {
            if self.match_token(&TokenKind::Semi)? {
                if self.check(&TokenKind::Semi)? || self.check(&TokenKind::EOF)? {
                    self.reduced(Production::StatementTrailingSemi);
                    continue;
                }
                let next = self.parse_statement()?;
                program = self.reducer.statement_list(program, next);
                continue;
            }
            if self.check(&TokenKind::EOF)? {
                return Ok(program);
            }
            return Err(self.unexpected()?);
        }
    }

    fn parse_statement(&mut self) -> Result<TranslationContext, BehaviorError> {
        if self.check_register()? {
            let token = self.consume()?;
            let target = self.reduce_register(&token);
            if let Some(op) = self.match_assignment()? {
                let expr = self.parse_expression()?;
                let assigned = self.reducer.assign(target, op, expr)?;
                self.reduced(Production::StatementAssign);
                return Ok(assigned);
            }
            self.reduced(Production::ExpressionRegister);
            let expr = self.parse_binary_tail(target)?;
            self.reduced(Production::StatementExpression);
            return Ok(expr);
        }
        let expr = self.parse_expression()?;
        self.reduced(Production::StatementExpression);
        Ok(expr)
    }

    fn parse_expression(&mut self) -> Result<TranslationContext, BehaviorError> {
        let lhs = self.parse_primary()?;
        self.parse_binary_tail(lhs)
    }

    fn parse_binary_tail(
        &mut self,
        mut lhs: TranslationContext,
    ) -> Result<TranslationContext, BehaviorError> {
        while let Some(op) = self.match_binary()? {
            let rhs = self.parse_primary()?;
            lhs = self.reducer.binary(lhs, op, rhs)?;
        }
        Ok(lhs)
    }

    fn parse_primary(&mut self) -> Result<TranslationContext, BehaviorError> {
        if self.check_register()? {
            let token = self.consume()?;
            let ctx = self.reduce_register(&token);
            self.reduced(Production::ExpressionRegister);
            return Ok(ctx);
        }
        let immediate = match self.peek()?.kind {
            TokenKind::Immediate(value) => Some(value),
            _ => None,
        };
        if let Some(value) = immediate {
            self.consume()?;
            return Ok(self.reducer.immediate(value));
        }
        if self.check(&TokenKind::LParen)? {
            let open = self.consume()?;
            if self.depth == MAX_GROUP_DEPTH {
                return Err(ParseError {
                    found: Some(open.lexeme),
                    line: open.line,
                    column: open.column,
                }
                .into());
            }
            self.depth += 1;
            let inner = self.parse_expression();
            self.depth -= 1;
            let inner = inner?;
            if !self.match_token(&TokenKind::RParen)? {
                return Err(self.unexpected()?);
            }
            self.reduced(Production::ExpressionGroup);
            return Ok(inner);
        }
        Err(self.unexpected()?)
    }

    fn reduce_register(&mut self, token: &Token) -> TranslationContext {
        self.reducer.register(token)
    }

    /// Structural reductions carry no semantic action beyond passing the context through.
    fn reduced(&self, production: Production) {
        trace!("reduce {production:?}");
    }

    fn check_register(&mut self) -> Result<bool, BehaviorError> {
        Ok(matches!(
            self.peek()?.kind,
            TokenKind::Register | TokenKind::EffectiveAddress
        ))
    }

    fn match_binary(&mut self) -> Result<Option<BinaryOperator>, BehaviorError> {
        let op = binary_operator(&self.peek()?.kind);
        if op.is_some() {
            self.consume()?;
        }
        Ok(op)
    }

    fn match_assignment(&mut self) -> Result<Option<AssignOperator>, BehaviorError> {
        let op = assignment_operator(&self.peek()?.kind);
        if op.is_some() {
            self.consume()?;
        }
        Ok(op)
    }

    /// Consumes the offending token and turns it into a parse error.
    fn unexpected(&mut self) -> Result<BehaviorError, BehaviorError> {
        let token = self.consume()?;
        let found = if token.kind == TokenKind::EOF {
            None
        } else {
            Some(token.lexeme)
        };
        Ok(ParseError {
            found,
            line: token.line,
            column: token.column,
        }
        .into())
    }

    fn match_token(&mut self, kind: &TokenKind) -> Result<bool, BehaviorError> {
        if self.check(kind)? {
            self.consume()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn check(&mut self, kind: &TokenKind) -> Result<bool, BehaviorError> {
        Ok(&self.peek()?.kind == kind)
    }

    fn peek(&mut self) -> Result<&Token, BehaviorError> {
        let token = match self.peeked.take() {
            Some(token) => token,
            None => self.lexer.next_token()?,
        };
        Ok(&*self.peeked.insert(token))
    }

    fn consume(&mut self) -> Result<Token, BehaviorError> {
        if let Some(token) = self.peeked.take() {
            return Ok(token);
        }
        Ok(self.lexer.next_token()?)
    }
}
