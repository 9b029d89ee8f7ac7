//! Per-reduction builder pairing an instruction list with the value it computes.

use super::instruction::IrInstruction;
use super::operand::Operand;
use super::temporary::TemporaryAllocator;

/// Marker error: a context's value was read before anything set it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnsetValue;

/// Accumulates the instructions of one expression or statement.
///
/// Instructions are append-only and stay in source evaluation order; merging concatenates left
/// before right.
#[derive(Debug, Clone, Default)]
pub struct TranslationContext {
    instructions: Vec<IrInstruction>,
    value: Option<Operand>,
}

impl TranslationContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: Operand) -> Self {
        Self {
            instructions: Vec::new(),
            value: Some(value),
        }
    }

    /// Appends `other`'s instructions after ours. Our value is left untouched.
    pub fn extend(&mut self, other: TranslationContext) {
        self.instructions.extend(other.instructions);
    }

    pub fn add(&mut self, instruction: IrInstruction) {
        self.instructions.push(instruction);
    }

    pub fn set_value(&mut self, value: Operand) {
        self.value = Some(value);
    }

    pub fn value(&self) -> Result<&Operand, UnsetValue> {
        self.value.as_ref().ok_or(UnsetValue)
    }

    /// Allocates a fresh temporary operand. No instruction is emitted.
    pub fn temporary(allocator: &mut TemporaryAllocator, width: u32) -> Operand {
        Operand::temporary(allocator.next_name(), width)
    }

    pub fn instructions(&self) -> &[IrInstruction] {
        &self.instructions
    }

    pub fn into_instructions(self) -> Vec<IrInstruction> {
        self.instructions
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reading_unset_value_fails() {
        let ctx = TranslationContext::new();
        assert_eq!(ctx.value(), Err(UnsetValue));
    }

    #[test]
    fn extend_keeps_left_then_right_and_preserves_value() {
        let mut left = TranslationContext::with_value(Operand::register("Rd", 32));
        left.add(IrInstruction::store(
            Operand::register("Rs", 32),
            Operand::register("Rd", 32),
        ));
        let mut right = TranslationContext::with_value(Operand::register("Re", 32));
        right.add(IrInstruction::store(
            Operand::register("Rt", 32),
            Operand::register("Re", 32),
        ));

        left.extend(right);
        assert_eq!(left.len(), 2);
        assert_eq!(left.instructions()[0].dest, Operand::register("Rd", 32));
        assert_eq!(left.instructions()[1].dest, Operand::register("Re", 32));
        assert_eq!(left.value(), Ok(&Operand::register("Rd", 32)));
    }

    #[test]
    fn temporary_does_not_emit() {
        let mut alloc = TemporaryAllocator::default();
        let ctx = TranslationContext::new();
        let first = TranslationContext::temporary(&mut alloc, 32);
        let second = TranslationContext::temporary(&mut alloc, 32);
        assert_ne!(first, second);
        assert!(first.is_temporary());
        assert!(ctx.is_empty());
    }
}
