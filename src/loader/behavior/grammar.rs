//! Behavior grammar as data: the production list, operator tables, and the reduction actions
//! that build [`TranslationContext`]s.
//!
//! The engine in [`super::parser`] decides *when* a production fires; everything here decides
//! *what* it emits.

use std::fmt;

use log::debug;

use super::lexer::{Token, TokenKind};
use crate::error::BehaviorError;
use crate::ir::{IrInstruction, Opcode, Operand, TemporaryAllocator, TranslationContext};
use crate::trace::{ReductionEvent, ReductionTracer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Production {
    StatementExpression,
    StatementList,
    StatementTrailingSemi,
    StatementAssign,
    ExpressionRegister,
    ExpressionImmediate,
    ExpressionGroup,
    RegisterReg,
    RegisterEffectiveAddress,
    Assign,
    Binary,
}

impl Production {
    /// Nonterminal the production reduces to.
    pub fn lhs(self) -> &'static str {
        match self {
            Production::StatementExpression
            | Production::StatementList
            | Production::StatementTrailingSemi
            | Production::StatementAssign => "statement",
            Production::ExpressionRegister
            | Production::ExpressionImmediate
            | Production::ExpressionGroup
            | Production::Binary => "expression",
            Production::RegisterReg | Production::RegisterEffectiveAddress => "register",
            Production::Assign => "statement_assign",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Plus,
    Minus,
    Times,
    Divide,
    Or,
    And,
    Not,
    Xor,
    LogNot,
    LShift,
    RShift,
    Lt,
    Gt,
    Le,
    Ge,
    Eq,
    Ne,
}

impl BinaryOperator {
    pub fn symbol(self) -> &'static str {
        spelling(BINARY_OPERATORS, self)
    }

    /// Every operator currently lowers to `add`. The per-operator mapping has not been
    /// confirmed against the reference manual.
    pub fn opcode(self) -> Opcode {
        Opcode::Add
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssignOperator {
    Assign,
    Times,
    Divide,
    Plus,
    Minus,
    LShift,
    RShift,
    And,
    Or,
    Xor,
}

impl AssignOperator {
    pub fn symbol(self) -> &'static str {
        spelling(ASSIGNMENT_OPERATORS, self)
    }

    /// Compound assignments are accepted but collapse to a plain store of the right-hand side;
    /// the target's previous value is not combined in.
    pub fn opcode(self) -> Opcode {
        Opcode::Str
    }
}

impl fmt::Display for AssignOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

pub type OperatorTable<T> = [(&'static str, TokenKind, T)];

pub const BINARY_OPERATORS: &OperatorTable<BinaryOperator> = &[
    ("+", TokenKind::Plus, BinaryOperator::Plus),
    ("-", TokenKind::Minus, BinaryOperator::Minus),
    ("*", TokenKind::Times, BinaryOperator::Times),
    ("/", TokenKind::Divide, BinaryOperator::Divide),
    ("|", TokenKind::Or, BinaryOperator::Or),
    ("&", TokenKind::And, BinaryOperator::And),
    ("!", TokenKind::Not, BinaryOperator::Not),
    ("^", TokenKind::Xor, BinaryOperator::Xor),
    ("~", TokenKind::LogNot, BinaryOperator::LogNot),
    ("<<", TokenKind::LShift, BinaryOperator::LShift),
    (">>", TokenKind::RShift, BinaryOperator::RShift),
    ("<", TokenKind::Lt, BinaryOperator::Lt),
    (">", TokenKind::Gt, BinaryOperator::Gt),
    ("<=", TokenKind::Le, BinaryOperator::Le),
    (">=", TokenKind::Ge, BinaryOperator::Ge),
    ("==", TokenKind::Eq, BinaryOperator::Eq),
    ("!=", TokenKind::Ne, BinaryOperator::Ne),
];

pub const ASSIGNMENT_OPERATORS: &OperatorTable<AssignOperator> = &[
    ("=", TokenKind::Equals, AssignOperator::Assign),
    ("*=", TokenKind::TimesEqual, AssignOperator::Times),
    ("/=", TokenKind::DivEqual, AssignOperator::Divide),
    ("+=", TokenKind::PlusEqual, AssignOperator::Plus),
    ("-=", TokenKind::MinusEqual, AssignOperator::Minus),
    ("<<=", TokenKind::LShiftEqual, AssignOperator::LShift),
    (">>=", TokenKind::RShiftEqual, AssignOperator::RShift),
    ("&=", TokenKind::AndEqual, AssignOperator::And),
    ("|=", TokenKind::OrEqual, AssignOperator::Or),
    ("^=", TokenKind::XorEqual, AssignOperator::Xor),
];

pub fn binary_operator(kind: &TokenKind) -> Option<BinaryOperator> {
    lookup(BINARY_OPERATORS, kind)
}

pub fn assignment_operator(kind: &TokenKind) -> Option<AssignOperator> {
    lookup(ASSIGNMENT_OPERATORS, kind)
}

fn lookup<T: Copy>(table: &OperatorTable<T>, kind: &TokenKind) -> Option<T> {
    table
        .iter()
        .find(|(_, token, _)| token == kind)
        .map(|(_, _, op)| *op)
}

fn spelling<T: Copy + PartialEq>(table: &OperatorTable<T>, op: T) -> &'static str {
    table
        .iter()
        .find(|(_, _, entry)| *entry == op)
        .map_or("?", |(symbol, _, _)| *symbol)
}

/// Reduction actions. Owns nothing: the allocator and tracer are borrowed for one parse.
pub struct Reducer<'a, 't> {
    allocator: &'a mut TemporaryAllocator,
    width: u32,
    tracer: &'a mut (dyn ReductionTracer + 't),
}

impl<'a, 't> Reducer<'a, 't> {
    pub fn new(
        allocator: &'a mut TemporaryAllocator,
        width: u32,
        tracer: &'a mut (dyn ReductionTracer + 't),
    ) -> Self {
        Self {
            allocator,
            width,
            tracer,
        }
    }

    /// `register : REG` and `register : REG_EA`. Naming a register emits nothing.
    pub fn register(&mut self, token: &Token) -> TranslationContext {
        let operand = Operand::register(token.lexeme.as_str(), self.width);
        if let Operand::Register { name, flags, .. } = &operand {
            self.emit(ReductionEvent::Register {
                name: name.clone(),
                flags: *flags,
            });
        }
        TranslationContext::with_value(operand)
    }

    /// `expression : IMM`
    pub fn immediate(&mut self, value: u64) -> TranslationContext {
        self.emit(ReductionEvent::Immediate { value });
        TranslationContext::with_value(Operand::immediate(value, self.width))
    }

    /// `statement : statement SEMI statement`
    pub fn statement_list(
        &mut self,
        mut left: TranslationContext,
        right: TranslationContext,
    ) -> TranslationContext {
        left.extend(right);
        self.emit(ReductionEvent::JoinStatements {
            instructions: left.len(),
        });
        left
    }

    /// `statement_assign : register <assign-op> expression`
    pub fn assign(
        &mut self,
        target: TranslationContext,
        op: AssignOperator,
        mut expr: TranslationContext,
    ) -> Result<TranslationContext, BehaviorError> {
        let source = expr.value()?.clone();
        let target = target.value()?.clone();
        expr.add(IrInstruction::unary(op.opcode(), source.clone(), target.clone()));
        expr.set_value(target.clone());
        self.emit(ReductionEvent::Assign { op, source, target });
        Ok(expr)
    }

    /// `expression : expression <binop> expression`
    pub fn binary(
        &mut self,
        mut lhs: TranslationContext,
        op: BinaryOperator,
        rhs: TranslationContext,
    ) -> Result<TranslationContext, BehaviorError> {
        let left = lhs.value()?.clone();
        let right = rhs.value()?.clone();
        lhs.extend(rhs);
        let dest = TranslationContext::temporary(self.allocator, self.width);
        lhs.add(IrInstruction::binary(
            op.opcode(),
            left.clone(),
            right.clone(),
            dest.clone(),
        ));
        lhs.set_value(dest.clone());
        self.emit(ReductionEvent::Binary {
            op,
            lhs: left,
            rhs: right,
            dest,
        });
        Ok(lhs)
    }

    fn emit(&mut self, event: ReductionEvent) {
        debug!("{}: {event}", event.production().lhs());
        self.tracer.on_event(event);
    }
}
