//! REIL-style IR: operands, instructions, temporaries and the reduction builder.

pub mod context;
pub mod instruction;
pub mod operand;
pub mod temporary;

pub use context::{TranslationContext, UnsetValue};
pub use instruction::{IrInstruction, Opcode};
pub use operand::{Operand, RegisterFlags};
pub use temporary::TemporaryAllocator;
