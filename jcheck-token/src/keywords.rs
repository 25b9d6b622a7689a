use std::fmt;

use serde::Serialize;

use crate::token::TokenKind;

/// The closed keyword vocabulary. Any identifier-shaped word in this list lexes as
/// [`TokenKind::Keyword`].
pub const KEYWORDS: [&str; 44] = [
    "abstract",
    "boolean",
    "break",
    "byte",
    "case",
    "catch",
    "char",
    "class",
    "const",
    "continue",
    "default",
    "do",
    "double",
    "else",
    "enum",
    "extends",
    "final",
    "finally",
    "float",
    "for",
    "if",
    "implements",
    "import",
    "instanceof",
    "int",
    "interface",
    "long",
    "new",
    "package",
    "private",
    "protected",
    "public",
    "return",
    "short",
    "static",
    "String",
    "super",
    "switch",
    "this",
    "throw",
    "throws",
    "try",
    "void",
    "while",
];

/// Literal words. They lex as identifiers but never name a variable.
pub const LITERAL_WORDS: [&str; 3] = ["true", "false", "null"];

/// Names of the standard output path. Usage checks skip them.
pub const WELL_KNOWN_NAMES: [&str; 4] = ["System", "out", "print", "println"];

pub fn is_keyword(word: &str) -> bool {
    KEYWORDS.contains(&word)
}

/// Identifiers that usage checks must never report as undeclared.
pub fn is_reserved_name(word: &str) -> bool {
    LITERAL_WORDS.contains(&word) || WELL_KNOWN_NAMES.contains(&word)
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DeclaredType {
    Int,
    Char,
    Float,
    Double,
    String,
    Boolean,
    Byte,
    Short,
    Long,
}

impl DeclaredType {
    pub fn from_keyword(word: &str) -> Option<Self> {
        let declared = match word {
            "int" => DeclaredType::Int,
            "char" => DeclaredType::Char,
            "float" => DeclaredType::Float,
            "double" => DeclaredType::Double,
            "String" => DeclaredType::String,
            "boolean" => DeclaredType::Boolean,
            "byte" => DeclaredType::Byte,
            "short" => DeclaredType::Short,
            "long" => DeclaredType::Long,
            _ => return None,
        };

        Some(declared)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DeclaredType::Int => "int",
            DeclaredType::Char => "char",
            DeclaredType::Float => "float",
            DeclaredType::Double => "double",
            DeclaredType::String => "String",
            DeclaredType::Boolean => "boolean",
            DeclaredType::Byte => "byte",
            DeclaredType::Short => "short",
            DeclaredType::Long => "long",
        }
    }

    /// Token kind a right-hand value must have to initialize this type.
    pub fn literal_kind(&self) -> TokenKind {
        match self {
            DeclaredType::Int | DeclaredType::Byte | DeclaredType::Short | DeclaredType::Long => {
                TokenKind::Number
            }
            DeclaredType::Float | DeclaredType::Double => TokenKind::Float,
            DeclaredType::Char => TokenKind::Char,
            DeclaredType::String => TokenKind::String,
            DeclaredType::Boolean => TokenKind::Identifier,
        }
    }

    pub fn is_integral(&self) -> bool {
        self.literal_kind() == TokenKind::Number
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self.literal_kind(), TokenKind::Number | TokenKind::Float)
    }
}

impl fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_declared_type_is_a_keyword() {
        for word in ["int", "char", "float", "double", "String", "boolean", "byte", "short", "long"] {
            let declared = DeclaredType::from_keyword(word).unwrap();
            assert!(is_keyword(word));
            assert_eq!(declared.as_str(), word);
        }
    }

    #[test]
    fn test_literal_words_are_not_keywords() {
        for word in LITERAL_WORDS {
            assert!(!is_keyword(word));
            assert!(is_reserved_name(word));
        }
    }

    #[test]
    fn test_non_type_keywords_have_no_declared_type() {
        assert_eq!(DeclaredType::from_keyword("for"), None);
        assert_eq!(DeclaredType::from_keyword("void"), None);
    }
}
