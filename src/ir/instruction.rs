use std::fmt;

use smallvec::{SmallVec, smallvec};

use super::operand::Operand;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    /// Binary combine of two sources into the destination.
    Add,
    /// Moves the single source into the destination.
    Str,
}

impl Opcode {
    pub fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Add => "add",
            Opcode::Str => "str",
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// Three-slot instruction: up to two sources and one destination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IrInstruction {
    pub opcode: Opcode,
    pub sources: SmallVec<[Operand; 2]>,
    pub dest: Operand,
    pub width: u32,
}

impl IrInstruction {
    /// Two-source instruction; the width follows the destination.
    pub fn binary(opcode: Opcode, lhs: Operand, rhs: Operand, dest: Operand) -> Self {
        let width = dest.width();
        Self {
            opcode,
            sources: smallvec![lhs, rhs],
            dest,
            width,
        }
    }

    pub fn unary(opcode: Opcode, source: Operand, dest: Operand) -> Self {
        let width = dest.width();
        Self {
            opcode,
            sources: smallvec![source],
            dest,
            width,
        }
    }

    pub fn add(lhs: Operand, rhs: Operand, dest: Operand) -> Self {
        Self::binary(Opcode::Add, lhs, rhs, dest)
    }

    pub fn store(source: Operand, dest: Operand) -> Self {
        Self::unary(Opcode::Str, source, dest)
    }

    /// Operands in slot order; unused source slots are `None`.
    pub fn operands(&self) -> [Option<&Operand>; 3] {
        [self.sources.first(), self.sources.get(1), Some(&self.dest)]
    }
}

impl fmt::Display for IrInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<4}[", self.opcode.mnemonic())?;
        for (idx, slot) in self.operands().iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            match slot {
                Some(operand) => write!(f, "{operand}")?,
                None => f.write_str("EMPTY")?,
            }
        }
        f.write_str("]")
    }
}
