//! Streaming tokenizer for instruction behavior pseudocode.
//!
//! Rules are tried in a fixed order at each position and the first one that matches wins:
//! `*EA`, `EA`, reserved words, registers (with an optional bit-extractor suffix), immediates,
//! then operators and delimiters by longest match.

use crate::error::{LexError, LexErrorKind};

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    Register,
    EffectiveAddress,
    MemoryAccess,
    BitExtractor,
    /// Already normalized: every literal is read as hexadecimal.
    Immediate(u64),
    If,
    Else,
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
    Equals,
    TimesEqual,
    DivEqual,
    PlusEqual,
    MinusEqual,
    LShiftEqual,
    RShiftEqual,
    AndEqual,
    OrEqual,
    XorEqual,
    PlusPlus,
    MinusMinus,
    CondOp,
    LParen,
    RParen,
    LBrace,
    RBrace,
    Comma,
    Period,
    Semi,
    Colon,
    EOF,
}

/// Operator and delimiter spellings, longest first so maximal munch falls out of a linear scan.
const PUNCTUATION: &[(&str, TokenKind)] = &[
    ("<<=", TokenKind::LShiftEqual),
    (">>=", TokenKind::RShiftEqual),
    ("++", TokenKind::PlusPlus),
    ("--", TokenKind::MinusMinus),
    ("<<", TokenKind::LShift),
    (">>", TokenKind::RShift),
    ("<=", TokenKind::Le),
    (">=", TokenKind::Ge),
    ("==", TokenKind::Eq),
    ("!=", TokenKind::Ne),
    ("*=", TokenKind::TimesEqual),
    ("/=", TokenKind::DivEqual),
    ("+=", TokenKind::PlusEqual),
    ("-=", TokenKind::MinusEqual),
    ("&=", TokenKind::AndEqual),
    ("|=", TokenKind::OrEqual),
    ("^=", TokenKind::XorEqual),
    ("+", TokenKind::Plus),
    ("-", TokenKind::Minus),
    ("*", TokenKind::Times),
    ("/", TokenKind::Divide),
    ("|", TokenKind::Or),
    ("&", TokenKind::And),
    ("!", TokenKind::Not),
    ("^", TokenKind::Xor),
    ("~", TokenKind::LogNot),
    ("<", TokenKind::Lt),
    (">", TokenKind::Gt),
    ("=", TokenKind::Equals),
    ("?", TokenKind::CondOp),
    ("(", TokenKind::LParen),
    (")", TokenKind::RParen),
    ("{", TokenKind::LBrace),
    ("}", TokenKind::RBrace),
    (",", TokenKind::Comma),
    (".", TokenKind::Period),
    (";", TokenKind::Semi),
    (":", TokenKind::Colon),
];

const RESERVED: &[(&str, TokenKind)] = &[("if", TokenKind::If), ("else", TokenKind::Else)];

/// Leading letters of the general, predicate, new-value, modifier and control register files.
pub(crate) const REGISTER_CLASSES: &[char] = &['R', 'P', 'N', 'M', 'C'];

pub struct Lexer<'src> {
    src: &'src str,
    offset: usize,
    line: usize,
    column: usize,
}

impl<'src> Lexer<'src> {
    pub fn new(src: &'src str) -> Self {
        Self {
            src,
            offset: 0,
            line: 1,
            column: 0,
        }
    }

    /// Produces the next token.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_ignorable();
        let (line, column) = self.position();
        if self.is_eof() {
            return Ok(self.make_token(TokenKind::EOF, "", line, column));
        }

        if self.rest().starts_with("*EA") {
            self.advance_bytes(3);
            return Ok(self.make_token(TokenKind::MemoryAccess, "EA", line, column));
        }
        if self.rest().starts_with("EA") {
            return Ok(self.consume_fixed(TokenKind::EffectiveAddress, 2));
        }
        if let Some(token) = self.consume_reserved() {
            return Ok(token);
        }
        if let Some(token) = self.consume_register() {
            return Ok(token);
        }
        if self.peek_char().is_some_and(|ch| ch.is_ascii_hexdigit()) {
            return self.consume_immediate();
        }
        for (spelling, kind) in PUNCTUATION {
            if self.rest().starts_with(spelling) {
                return Ok(self.consume_fixed(kind.clone(), spelling.len()));
            }
        }

        let ch = self.peek_char().unwrap_or('\0');
        Err(LexError {
            kind: LexErrorKind::IllegalCharacter(ch),
            lexeme: self.rest().to_string(),
            line,
            column,
        })
    }

    /// Drains the lexer up to and including the end-of-input token.
    pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token.kind == TokenKind::EOF;
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }

    fn consume_reserved(&mut self) -> Option<Token> {
        for (word, kind) in RESERVED {
            if self.rest().starts_with(word) {
                let boundary = self.rest()[word.len()..].chars().next();
                if !boundary.is_some_and(is_word_char) {
                    return Some(self.consume_fixed(kind.clone(), word.len()));
                }
            }
        }
        None
    }

    /// `[RPNMC]\w{1,2}(\.new)?`, optionally followed by `[digits]` which turns the whole match
    /// into a bit extractor such as `Pu[0]`.
    fn consume_register(&mut self) -> Option<Token> {
        let rest = self.rest();
        let mut chars = rest.char_indices();
        let (_, first) = chars.next()?;
        if !REGISTER_CLASSES.contains(&first) {
            return None;
        }
        let mut end = first.len_utf8();
        let mut word_chars = 0;
        for (idx, ch) in chars {
            if word_chars == 2 || !is_word_char(ch) {
                break;
            }
            word_chars += 1;
            end = idx + ch.len_utf8();
        }
        if word_chars == 0 {
            return None;
        }
        if rest[end..].starts_with(".new") {
            end += ".new".len();
        }

        let mut kind = TokenKind::Register;
        if let Some(index) = rest[end..].strip_prefix('[') {
            let digits = index.chars().take_while(|ch| ch.is_ascii_digit()).count();
            if digits > 0 && index[digits..].starts_with(']') {
                end += digits + 2;
                kind = TokenKind::BitExtractor;
            }
        }
        Some(self.consume_fixed(kind, end))
    }

    /// `(0x)?[a-fA-F0-9]+`, always read as base 16.
    fn consume_immediate(&mut self) -> Result<Token, LexError> {
        let (line, column) = self.position();
        let rest = self.rest();
        let prefixed = rest.starts_with("0x")
            && rest[2..].chars().next().is_some_and(|ch| ch.is_ascii_hexdigit());
        let digits_start = if prefixed { 2 } else { 0 };
        let digits_len = rest[digits_start..]
            .chars()
            .take_while(|ch| ch.is_ascii_hexdigit())
            .count();
        let end = digits_start + digits_len;
        let lexeme = rest[..end].to_string();
        // TODO: confirm whether unprefixed literals in the reference manual are ever decimal.
        let value = u64::from_str_radix(&rest[digits_start..end], 16).map_err(|_| LexError {
            kind: LexErrorKind::ImmediateOverflow,
            lexeme: lexeme.clone(),
            line,
            column,
        })?;
        self.advance_bytes(end);
        Ok(self.make_token(TokenKind::Immediate(value), &lexeme, line, column))
    }

    fn consume_fixed(&mut self, kind: TokenKind, len: usize) -> Token {
        let start = self.offset;
        let (line, column) = self.position();
        self.advance_bytes(len);
        self.make_token(kind, &self.src[start..self.offset], line, column)
    }

    /// Spaces, tabs and form feeds are dropped; newline runs only bump the line counter.
    fn skip_ignorable(&mut self) {
        while let Some(ch) = self.peek_char() {
            if matches!(ch, ' ' | '\t' | '\x0c' | '\n') {
                self.advance_char();
            } else {
                break;
            }
        }
    }

    fn rest(&self) -> &'src str {
        &self.src[self.offset..]
    }

    fn peek_char(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn advance_char(&mut self) {
        if let Some(ch) = self.peek_char() {
            self.offset += ch.len_utf8();
            if ch == '\n' {
                self.line += 1;
                self.column = 0;
            } else {
                self.column += 1;
            }
        } else {
            self.offset = self.src.len();
        }
    }

    /// Tokens never span a newline, so only the column moves.
    fn advance_bytes(&mut self, len: usize) {
        let end = (self.offset + len).min(self.src.len());
        self.column += self.src[self.offset..end].chars().count();
        self.offset = end;
    }

    fn is_eof(&self) -> bool {
        self.offset >= self.src.len()
    }

    fn position(&self) -> (usize, usize) {
        (self.line, self.column + 1)
    }

    fn make_token(&self, kind: TokenKind, lexeme: &str, line: usize, column: usize) -> Token {
        Token {
            kind,
            lexeme: lexeme.to_string(),
            line,
            column,
        }
    }
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

#[cfg(test)]
mod tests {
    use super::{Lexer, Token, TokenKind};
    use crate::error::LexErrorKind;

    fn tokens(src: &str) -> Vec<Token> {
        Lexer::new(src).tokenize().expect("tokenize")
    }

    fn kinds(src: &str) -> Vec<TokenKind> {
        tokens(src).into_iter().map(|token| token.kind).collect()
    }

    #[test]
    fn lexes_basic_assignment() {
        assert_eq!(
            kinds("Rd=Rs+Rt;"),
            vec![
                TokenKind::Register,
                TokenKind::Equals,
                TokenKind::Register,
                TokenKind::Plus,
                TokenKind::Register,
                TokenKind::Semi,
                TokenKind::EOF
            ]
        );
    }

    #[test]
    fn register_pattern_takes_at_most_two_word_chars() {
        let stream = tokens("Rdd Rss32 Rx.new");
        let lexemes: Vec<&str> = stream.iter().map(|t| t.lexeme.as_str()).collect();
        assert_eq!(lexemes, vec!["Rdd", "Rss", "32", "Rx.new", ""]);
        assert_eq!(stream[1].kind, TokenKind::Register);
        assert_eq!(stream[2].kind, TokenKind::Immediate(0x32));
    }

    #[test]
    fn immediates_are_always_hexadecimal() {
        assert_eq!(kinds("0x1F")[0], TokenKind::Immediate(31));
        assert_eq!(kinds("1F")[0], TokenKind::Immediate(31));
        assert_eq!(kinds("10")[0], TokenKind::Immediate(16));
    }

    #[test]
    fn bare_hex_prefix_leaves_x_unmatched() {
        let err = Lexer::new("0x").tokenize().unwrap_err();
        assert_eq!(err.kind, LexErrorKind::IllegalCharacter('x'));
        assert_eq!(err.column, 2);
    }

    #[test]
    fn rejects_overflowing_immediate() {
        let err = Lexer::new("0x10000000000000000").tokenize().unwrap_err();
        assert_eq!(err.kind, LexErrorKind::ImmediateOverflow);
        assert_eq!(err.lexeme, "0x10000000000000000");
    }

    #[test]
    fn effective_address_rules_win_over_hex() {
        let stream = tokens("*EA EA EAB");
        assert_eq!(stream[0].kind, TokenKind::MemoryAccess);
        assert_eq!(stream[0].lexeme, "EA");
        assert_eq!(stream[1].kind, TokenKind::EffectiveAddress);
        assert_eq!(stream[2].kind, TokenKind::EffectiveAddress);
        assert_eq!(stream[3].kind, TokenKind::Immediate(0xB));
    }

    #[test]
    fn single_letters_outside_register_classes_are_immediates() {
        assert_eq!(
            kinds("A=B"),
            vec![
                TokenKind::Immediate(0xA),
                TokenKind::Equals,
                TokenKind::Immediate(0xB),
                TokenKind::EOF
            ]
        );
    }

    #[test]
    fn recognizes_bit_extractor_shape() {
        let stream = tokens("Pu[0]");
        assert_eq!(stream[0].kind, TokenKind::BitExtractor);
        assert_eq!(stream[0].lexeme, "Pu[0]");

        let err = Lexer::new("Pu[").tokenize().unwrap_err();
        assert_eq!(err.kind, LexErrorKind::IllegalCharacter('['));
    }

    #[test]
    fn reserved_words_need_a_boundary() {
        assert_eq!(
            kinds("if (Pu) else"),
            vec![
                TokenKind::If,
                TokenKind::LParen,
                TokenKind::Register,
                TokenKind::RParen,
                TokenKind::Else,
                TokenKind::EOF
            ]
        );
        let err = Lexer::new("elsewhere").tokenize().unwrap_err();
        assert_eq!(err.kind, LexErrorKind::IllegalCharacter('l'));
    }

    #[test]
    fn operators_use_longest_match() {
        assert_eq!(
            kinds("<<= << <= < +++ != !"),
            vec![
                TokenKind::LShiftEqual,
                TokenKind::LShift,
                TokenKind::Le,
                TokenKind::Lt,
                TokenKind::PlusPlus,
                TokenKind::Plus,
                TokenKind::Ne,
                TokenKind::Not,
                TokenKind::EOF
            ]
        );
    }

    #[test]
    fn tracks_lines_across_newline_runs() {
        let stream = tokens("Rd=Rs;\n\n\tRe=Rt;");
        let re = stream
            .iter()
            .find(|t| t.lexeme == "Re")
            .expect("second statement");
        assert_eq!(re.line, 3);
        assert_eq!(re.column, 2);
    }

    #[test]
    fn illegal_character_reports_remainder() {
        let err = Lexer::new("Rd=Rs@Rt;").tokenize().unwrap_err();
        assert_eq!(err.character(), Some('@'));
        assert_eq!(err.lexeme, "@Rt;");
        assert_eq!((err.line, err.column), (1, 6));
        assert!(err.to_string().contains("'@'"));
    }

    #[test]
    fn carriage_return_is_not_whitespace() {
        let err = Lexer::new("Rd=Rs;\r\n").tokenize().unwrap_err();
        assert_eq!(err.character(), Some('\r'));
    }
}
