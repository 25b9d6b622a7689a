use std::fmt;
use std::sync::Arc;

use jcheck_core::Location;
use serde::Serialize;

use crate::keywords::DeclaredType;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Identifier,
    Keyword,
    Number,
    Float,
    String,
    Char,
    Operator,
    Semicolon,
    LParen,
    RParen,
    LBrace,
    RBrace,
    Comma,
    Dot,
    Error(LexError),
    Unknown,
}

impl TokenKind {
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Identifier => "identifier",
            TokenKind::Keyword => "keyword",
            TokenKind::Number => "number",
            TokenKind::Float => "float",
            TokenKind::String => "string",
            TokenKind::Char => "char",
            TokenKind::Operator => "operator",
            TokenKind::Semicolon => "semicolon",
            TokenKind::LParen => "lparen",
            TokenKind::RParen => "rparen",
            TokenKind::LBrace => "lbrace",
            TokenKind::RBrace => "rbrace",
            TokenKind::Comma => "comma",
            TokenKind::Dot => "dot",
            TokenKind::Error(_) => "error",
            TokenKind::Unknown => "unknown",
        }
    }

    /// Literal or name tokens that can stand as a single value.
    pub fn is_value(&self) -> bool {
        matches!(
            self,
            TokenKind::Identifier
                | TokenKind::Number
                | TokenKind::Float
                | TokenKind::String
                | TokenKind::Char
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum LexError {
    UnterminatedString,
    EmptyChar,
    InvalidChar,
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexError::UnterminatedString => f.write_str("unterminated string literal"),
            LexError::EmptyChar => f.write_str("empty char literal"),
            LexError::InvalidChar => f.write_str("invalid char literal"),
        }
    }
}

/// A classified lexeme. Immutable once produced by the lexer.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: Arc<str>,
    pub location: Location,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: Arc<str>, location: Location) -> Self {
        Self {
            kind,
            lexeme,
            location,
        }
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn lexeme(&self) -> &str {
        &self.lexeme
    }

    pub fn line(&self) -> usize {
        self.location.line
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    pub fn is_operator(&self, op: &str) -> bool {
        self.kind == TokenKind::Operator && &*self.lexeme == op
    }

    /// The declared type named by this token, if it is a type keyword.
    pub fn declared_type(&self) -> Option<DeclaredType> {
        match self.kind {
            TokenKind::Keyword => DeclaredType::from_keyword(&self.lexeme),
            _ => None,
        }
    }
}

/// Read-only view over the ordered token sequence shared by every validator.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(transparent)]
pub struct Tokens {
    inner: Vec<Token>,
}

impl Tokens {
    pub fn new(inner: Vec<Token>) -> Self {
        Self { inner }
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Token> {
        self.inner.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.inner.iter()
    }

    pub fn as_slice(&self) -> &[Token] {
        &self.inner
    }

    pub fn kind_at(&self, index: usize) -> Option<TokenKind> {
        self.inner.get(index).map(Token::kind)
    }

    pub fn is_kind(&self, index: usize, kind: TokenKind) -> bool {
        self.kind_at(index) == Some(kind)
    }

    pub fn is_operator_at(&self, index: usize, op: &str) -> bool {
        self.inner.get(index).is_some_and(|t| t.is_operator(op))
    }

    /// Index of the `)` closing the `(` at `open`, found by depth counting.
    pub fn matching_paren(&self, open: usize) -> Option<usize> {
        if !self.is_kind(open, TokenKind::LParen) {
            return None;
        }

        let mut depth = 0usize;
        for (index, token) in self.inner.iter().enumerate().skip(open) {
            match token.kind {
                TokenKind::LParen => depth += 1,
                TokenKind::RParen => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(index);
                    }
                }
                _ => {}
            }
        }

        None
    }

    /// Indices of the semicolons strictly between `start` and `end`.
    pub fn semicolons_between(&self, start: usize, end: usize) -> Vec<usize> {
        (start + 1..end)
            .filter(|&index| self.is_kind(index, TokenKind::Semicolon))
            .collect()
    }
}

impl<'a> IntoIterator for &'a Tokens {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}

impl From<Vec<Token>> for Tokens {
    fn from(inner: Vec<Token>) -> Self {
        Self { inner }
    }
}
