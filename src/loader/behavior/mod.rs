//! Behavior pseudocode front end (lexer, grammar tables, parser engine).

pub mod grammar;
pub mod lexer;
pub mod parser;

pub use grammar::{AssignOperator, BinaryOperator, Production, Reducer};
pub use lexer::{Lexer, Token, TokenKind};
pub use parser::Parser;
