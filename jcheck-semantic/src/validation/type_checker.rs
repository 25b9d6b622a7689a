use jcheck_token::{DeclaredType, Token, TokenKind};

use crate::symbol_table::{Literal, Variable};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TypeError {
    #[error("cannot assign {found} '{value}' to {declared} variable '{name}'")]
    Mismatch {
        name: String,
        declared: DeclaredType,
        found: TokenKind,
        value: String,
    },
    #[error("value '{value}' is not a valid {declared}")]
    Malformed { declared: DeclaredType, value: String },
    #[error("expected true or false for boolean variable '{name}', found '{value}'")]
    NotBoolean { name: String, value: String },
    #[error("cannot assign {source_type} variable '{source_name}' to {declared} variable '{name}'")]
    IncompatibleVariable {
        name: String,
        declared: DeclaredType,
        source_name: String,
        source_type: DeclaredType,
    },
}

/// The rule table mapping a declared type to the value tokens it accepts.
pub struct TypeChecker;

impl TypeChecker {
    /// Checks `value` as the initializer or assigned value of `name`.
    pub fn check(name: &str, declared: DeclaredType, value: &Token) -> Result<Literal, TypeError> {
        let text = value.lexeme();
        let malformed = || TypeError::Malformed {
            declared,
            value: text.to_string(),
        };

        match (declared, value.kind) {
            (DeclaredType::Boolean, TokenKind::Identifier) if matches!(text, "true" | "false") => {
                Ok(Literal::Bool(text == "true"))
            }
            (DeclaredType::Boolean, _) => Err(TypeError::NotBoolean {
                name: name.to_string(),
                value: text.to_string(),
            }),
            (declared, TokenKind::Number) if declared.is_integral() => {
                text.parse::<i64>().map(Literal::Int).map_err(|_| malformed())
            }
            (DeclaredType::Float | DeclaredType::Double, TokenKind::Float) => {
                text.parse::<f64>().map(Literal::Float).map_err(|_| malformed())
            }
            (DeclaredType::Char, TokenKind::Char) => {
                let mut chars = text.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(Literal::Char(c)),
                    _ => Err(malformed()),
                }
            }
            (DeclaredType::String, TokenKind::String) => Ok(Literal::Str(text.to_string())),
            (declared, found) => Err(TypeError::Mismatch {
                name: name.to_string(),
                declared,
                found,
                value: text.to_string(),
            }),
        }
    }

    /// Whether `value` names another variable rather than being a literal.
    pub fn is_variable_reference(value: &Token) -> bool {
        value.is(TokenKind::Identifier) && !jcheck_token::is_reserved_name(value.lexeme())
    }

    /// Checks the variable `source` as the value assigned to `name`.
    pub fn check_variable(name: &str, declared: DeclaredType, source: &Variable) -> Result<(), TypeError> {
        if Self::assignable(declared, source.declared_type) {
            return Ok(());
        }

        Err(TypeError::IncompatibleVariable {
            name: name.to_string(),
            declared,
            source_name: source.name.clone(),
            source_type: source.declared_type,
        })
    }

    /// Whether a `source` variable may be stored in a `target` variable. Numbers
    /// only widen.
    pub fn assignable(target: DeclaredType, source: DeclaredType) -> bool {
        match (numeric_rank(target), numeric_rank(source)) {
            (Some(target), Some(source)) => source <= target,
            _ => target == source,
        }
    }

    /// Whether two declared types can be compared with a relational operator.
    pub fn comparable(lhs: DeclaredType, rhs: DeclaredType) -> bool {
        lhs == rhs || (lhs.is_numeric() && rhs.is_numeric())
    }
}

fn numeric_rank(declared: DeclaredType) -> Option<u8> {
    match declared {
        DeclaredType::Byte => Some(0),
        DeclaredType::Short => Some(1),
        DeclaredType::Int => Some(2),
        DeclaredType::Long => Some(3),
        DeclaredType::Float => Some(4),
        DeclaredType::Double => Some(5),
        DeclaredType::Char | DeclaredType::String | DeclaredType::Boolean => None,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use jcheck_core::Location;

    use super::*;

    fn token(kind: TokenKind, lexeme: &str) -> Token {
        Token::new(kind, Arc::from(lexeme), Location::start())
    }

    #[test]
    fn test_integral_types_accept_numbers() {
        for declared in [
            DeclaredType::Int,
            DeclaredType::Byte,
            DeclaredType::Short,
            DeclaredType::Long,
        ] {
            assert_eq!(
                TypeChecker::check("x", declared, &token(TokenKind::Number, "300")),
                Ok(Literal::Int(300))
            );
        }
    }

    #[test]
    fn test_int_rejects_other_kinds() {
        let error = TypeChecker::check("x", DeclaredType::Int, &token(TokenKind::String, "hi"))
            .unwrap_err();
        assert_eq!(error.to_string(), "cannot assign string 'hi' to int variable 'x'");

        let error = TypeChecker::check("x", DeclaredType::Int, &token(TokenKind::Float, "1.5"))
            .unwrap_err();
        assert_eq!(error.to_string(), "cannot assign float '1.5' to int variable 'x'");
    }

    #[test]
    fn test_int_overflow_is_malformed() {
        let error = TypeChecker::check(
            "x",
            DeclaredType::Int,
            &token(TokenKind::Number, "99999999999999999999"),
        )
        .unwrap_err();
        assert_eq!(error.to_string(), "value '99999999999999999999' is not a valid int");
    }

    #[test]
    fn test_decimal_types_require_float_tokens() {
        assert_eq!(
            TypeChecker::check("f", DeclaredType::Double, &token(TokenKind::Float, "2.5")),
            Ok(Literal::Float(2.5))
        );
        assert!(TypeChecker::check("f", DeclaredType::Float, &token(TokenKind::Number, "2")).is_err());
    }

    #[test]
    fn test_char_and_string() {
        assert_eq!(
            TypeChecker::check("c", DeclaredType::Char, &token(TokenKind::Char, "q")),
            Ok(Literal::Char('q'))
        );
        assert_eq!(
            TypeChecker::check("s", DeclaredType::String, &token(TokenKind::String, "hi")),
            Ok(Literal::Str("hi".into()))
        );
    }

    #[test]
    fn test_boolean_words() {
        assert_eq!(
            TypeChecker::check("b", DeclaredType::Boolean, &token(TokenKind::Identifier, "true")),
            Ok(Literal::Bool(true))
        );
        let error = TypeChecker::check("b", DeclaredType::Boolean, &token(TokenKind::Number, "1"))
            .unwrap_err();
        assert_eq!(
            error.to_string(),
            "expected true or false for boolean variable 'b', found '1'"
        );
    }

    #[test]
    fn test_comparable_types() {
        assert!(TypeChecker::comparable(DeclaredType::Int, DeclaredType::Double));
        assert!(TypeChecker::comparable(DeclaredType::Char, DeclaredType::Char));
        assert!(!TypeChecker::comparable(DeclaredType::Int, DeclaredType::String));
    }

    #[test]
    fn test_variable_assignment_widens_numbers() {
        assert!(TypeChecker::assignable(DeclaredType::Long, DeclaredType::Int));
        assert!(TypeChecker::assignable(DeclaredType::Double, DeclaredType::Short));
        assert!(!TypeChecker::assignable(DeclaredType::Int, DeclaredType::Double));
        assert!(!TypeChecker::assignable(DeclaredType::String, DeclaredType::Char));
    }

    #[test]
    fn test_incompatible_variable() {
        let source = Variable {
            name: "s".into(),
            declared_type: DeclaredType::String,
            value: None,
            line: 1,
        };
        let error = TypeChecker::check_variable("n", DeclaredType::Int, &source).unwrap_err();
        assert_eq!(error.to_string(), "cannot assign String variable 's' to int variable 'n'");
    }
}
