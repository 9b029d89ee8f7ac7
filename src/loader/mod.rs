//! Input side: behavior pseudocode front end and instruction definition lists.

pub mod behavior;
pub mod definitions;

pub use definitions::{DefinitionSet, InstructionDefinition};
