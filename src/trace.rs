use std::fmt;
use std::io::Write;

use crate::ir::{Operand, RegisterFlags};
use crate::loader::behavior::grammar::{AssignOperator, BinaryOperator, Production};

/// Semantic actions performed while reducing a behavior string, in reduction order.
#[derive(Debug, Clone, PartialEq)]
pub enum ReductionEvent {
    Register {
        name: String,
        flags: RegisterFlags,
    },
    Immediate {
        value: u64,
    },
    Assign {
        op: AssignOperator,
        source: Operand,
        target: Operand,
    },
    Binary {
        op: BinaryOperator,
        lhs: Operand,
        rhs: Operand,
        dest: Operand,
    },
    JoinStatements {
        instructions: usize,
    },
}

impl ReductionEvent {
    /// Grammar production whose action produced this event.
    pub fn production(&self) -> Production {
        match self {
            ReductionEvent::Register { flags, .. } => {
                if flags.contains(RegisterFlags::EFFECTIVE_ADDRESS) {
                    Production::RegisterEffectiveAddress
                } else {
                    Production::RegisterReg
                }
            }
            ReductionEvent::Immediate { .. } => Production::ExpressionImmediate,
            ReductionEvent::Assign { .. } => Production::Assign,
            ReductionEvent::Binary { .. } => Production::Binary,
            ReductionEvent::JoinStatements { .. } => Production::StatementList,
        }
    }
}

impl fmt::Display for ReductionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReductionEvent::Register { name, flags } => {
                write!(f, "register {name} {}", flags.describe())
            }
            ReductionEvent::Immediate { value } => write!(f, "immediate 0x{value:X}"),
            ReductionEvent::Assign { op, source, target } => {
                write!(f, "assign {source} {op} {target}")
            }
            ReductionEvent::Binary { op, lhs, rhs, dest } => {
                write!(f, "binop {lhs} {op} {rhs} -> {dest}")
            }
            ReductionEvent::JoinStatements { instructions } => {
                write!(f, "join statements ({instructions} instructions)")
            }
        }
    }
}

/// Consumers implement this trait to observe reductions as they happen.
pub trait ReductionTracer {
    fn on_event(&mut self, event: ReductionEvent);
}

/// Discards every event.
pub struct NoopTracer;

impl ReductionTracer for NoopTracer {
    fn on_event(&mut self, _event: ReductionEvent) {}
}

/// Prints one line per reduction, tagged with the production that fired.
pub struct ReductionPrinter<W: Write> {
    writer: W,
}

impl<W: Write> ReductionPrinter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn writeln(&mut self, line: &str) {
        let _ = writeln!(self.writer, "{line}");
    }
}

impl ReductionPrinter<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> ReductionTracer for ReductionPrinter<W> {
    fn on_event(&mut self, event: ReductionEvent) {
        let production = event.production();
        self.writeln(&format!("[{:>8}] {event}", production.lhs()));
    }
}
