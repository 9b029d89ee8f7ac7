use std::fmt;

use crate::diagnostic::{BehaviorDiagnostic, DiagnosticPhase, SourcePosition};
use crate::ir::UnsetValue;

/// What went wrong while tokenizing a behavior string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexErrorKind {
    IllegalCharacter(char),
    ImmediateOverflow,
}

/// Tokenization failure. `lexeme` holds the remaining input starting at the offending
/// character, or the literal text for overflowing immediates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub lexeme: String,
    pub line: usize,
    pub column: usize,
}

impl LexError {
    pub fn character(&self) -> Option<char> {
        match self.kind {
            LexErrorKind::IllegalCharacter(ch) => Some(ch),
            LexErrorKind::ImmediateOverflow => None,
        }
    }

    pub fn position(&self) -> SourcePosition {
        SourcePosition::new(self.line, self.column)
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            LexErrorKind::IllegalCharacter(ch) => {
                write!(f, "illegal character '{ch}' in: {}", self.lexeme)
            }
            LexErrorKind::ImmediateOverflow => {
                write!(f, "immediate literal '{}' does not fit in 64 bits", self.lexeme)
            }
        }
    }
}

/// No grammar production accepts the current token. `found == None` means end of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub found: Option<String>,
    pub line: usize,
    pub column: usize,
}

impl ParseError {
    pub fn is_eof(&self) -> bool {
        self.found.is_none()
    }

    pub fn position(&self) -> SourcePosition {
        SourcePosition::new(self.line, self.column)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.found {
            Some(text) => write!(f, "syntax error at '{text}'"),
            None => write!(f, "syntax error at EOF"),
        }
    }
}

/// Represents any failure that can occur while loading definitions or translating behaviors.
#[derive(Debug)]
pub enum BehaviorError {
    Lexer(LexError),
    Parser(ParseError),
    /// A reduction read the current value of a context that never had one. This is a grammar
    /// defect, never a property of the input.
    UnsetValue,
    Io(std::io::Error),
    Definitions {
        line: usize,
        message: String,
    },
    InvalidOption {
        option: &'static str,
        message: String,
    },
}

impl BehaviorError {
    /// Lexer and parser errors reject one input; everything else should stop the caller.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, BehaviorError::Lexer(_) | BehaviorError::Parser(_))
    }

    pub fn diagnostic(&self) -> BehaviorDiagnostic {
        match self {
            BehaviorError::Lexer(err) => {
                let code = match err.kind {
                    LexErrorKind::IllegalCharacter(_) => "lexer.illegal-character",
                    LexErrorKind::ImmediateOverflow => "lexer.immediate-overflow",
                };
                BehaviorDiagnostic::error(
                    DiagnosticPhase::Lexer,
                    code,
                    err.to_string(),
                    Some(err.position()),
                )
            }
            BehaviorError::Parser(err) => {
                let code = if err.is_eof() {
                    "parser.unexpected-eof"
                } else {
                    "parser.unexpected-token"
                };
                BehaviorDiagnostic::error(
                    DiagnosticPhase::Parser,
                    code,
                    err.to_string(),
                    Some(err.position()),
                )
            }
            BehaviorError::UnsetValue => BehaviorDiagnostic::error(
                DiagnosticPhase::Translation,
                "translation.unset-value",
                self.to_string(),
                None,
            ),
            BehaviorError::Io(err) => BehaviorDiagnostic::error(
                DiagnosticPhase::Definitions,
                "definitions.io",
                err.to_string(),
                None,
            ),
            BehaviorError::Definitions { line, message } => BehaviorDiagnostic::error(
                DiagnosticPhase::Definitions,
                "definitions.malformed",
                message.clone(),
                Some(SourcePosition::new(*line, 1)),
            ),
            BehaviorError::InvalidOption { .. } => BehaviorDiagnostic::error(
                DiagnosticPhase::Configuration,
                "config.invalid-option",
                self.to_string(),
                None,
            ),
        }
    }
}

impl From<LexError> for BehaviorError {
    fn from(err: LexError) -> Self {
        BehaviorError::Lexer(err)
    }
}

impl From<ParseError> for BehaviorError {
    fn from(err: ParseError) -> Self {
        BehaviorError::Parser(err)
    }
}

impl From<UnsetValue> for BehaviorError {
    fn from(_: UnsetValue) -> Self {
        BehaviorError::UnsetValue
    }
}

impl From<std::io::Error> for BehaviorError {
    fn from(err: std::io::Error) -> Self {
        BehaviorError::Io(err)
    }
}

impl fmt::Display for BehaviorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BehaviorError::Lexer(err) => write!(f, "lexer error: {err}"),
            BehaviorError::Parser(err) => write!(f, "parser error: {err}"),
            BehaviorError::UnsetValue => {
                write!(f, "internal error: expression value read before it was set")
            }
            BehaviorError::Io(err) => write!(f, "I/O error: {err}"),
            BehaviorError::Definitions { line, message } => {
                write!(f, "definitions error on line {line}: {message}")
            }
            BehaviorError::InvalidOption { option, message } => {
                write!(f, "invalid {option}: {message}")
            }
        }
    }
}

impl std::error::Error for BehaviorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BehaviorError::Io(err) => Some(err),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_lexer_and_parser_errors_are_recoverable() {
        let lex = BehaviorError::from(LexError {
            kind: LexErrorKind::IllegalCharacter('@'),
            lexeme: "@Rt;".into(),
            line: 1,
            column: 6,
        });
        let parse = BehaviorError::from(ParseError {
            found: None,
            line: 1,
            column: 4,
        });
        assert!(lex.is_recoverable());
        assert!(parse.is_recoverable());
        assert!(!BehaviorError::UnsetValue.is_recoverable());
        assert!(
            !BehaviorError::Definitions {
                line: 3,
                message: "missing tab".into()
            }
            .is_recoverable()
        );
    }

    #[test]
    fn diagnostics_carry_phase_specific_codes() {
        let parse = BehaviorError::from(ParseError {
            found: Some("=".into()),
            line: 2,
            column: 3,
        });
        let diag = parse.diagnostic();
        assert_eq!(diag.phase, DiagnosticPhase::Parser);
        assert_eq!(diag.code, "parser.unexpected-token");
        assert_eq!(diag.message, "syntax error at '='");
        assert_eq!(diag.position, Some(SourcePosition::new(2, 3)));

        let eof = BehaviorError::from(ParseError {
            found: None,
            line: 1,
            column: 1,
        });
        assert_eq!(eof.diagnostic().code, "parser.unexpected-eof");
        assert_eq!(eof.to_string(), "parser error: syntax error at EOF");
    }
}
