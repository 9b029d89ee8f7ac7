//! Translates instruction behavior pseudocode (`Rd=Rs+Rt;`) into REIL-style three-operand IR.
//!
//! The pipeline is lexer → recursive-descent parser → grammar reductions that build
//! [`ir::TranslationContext`]s; the final context's instruction list is the translation.
//! [`driver::BatchRunner`] runs a whole definitions file with best-effort error handling.

pub mod config;
pub mod diagnostic;
pub mod driver;
pub mod error;
pub mod ir;
pub mod loader;
pub mod trace;
pub mod translator;

pub use config::{BatchOptions, TranslatorOptions};
pub use error::{BehaviorError, LexError, ParseError};
pub use ir::{IrInstruction, Opcode, Operand};
pub use translator::Translator;
