pub mod char_range;
pub mod declarations;
pub mod loops;
pub mod methods;
pub mod usage;

use jcheck_core::Diagnostics;
use jcheck_token::{DeclaredType, TokenKind, Tokens};

use crate::symbol_table::{Literal, SymbolTable};
use crate::validation::TypeChecker;

/// State shared by the read-only passes that run after declarations are collected.
#[derive(Debug)]
pub struct AnalysisCtx<'a> {
    pub tokens: &'a Tokens,
    pub symbol_table: &'a SymbolTable,
    pub diagnostics: &'a mut Diagnostics,
}

/// The identifier at `index` directly follows a type keyword.
pub(crate) fn is_declaration_site(tokens: &Tokens, index: usize) -> bool {
    index > 0
        && tokens
            .get(index - 1)
            .is_some_and(|prev| prev.declared_type().is_some())
}

/// The identifier at `index` is the member part of `a.b`.
pub(crate) fn is_member_name(tokens: &Tokens, index: usize) -> bool {
    index > 0 && tokens.is_kind(index - 1, TokenKind::Dot)
}

/// Checks the value token at `index` assigned to `name`, returning the literal it
/// holds.
///
/// A plain variable is checked by its declared type; method calls such as
/// `s.length()` and names missing from `symbol_table` are left alone.
pub(crate) fn check_assigned_value(
    tokens: &Tokens,
    index: usize,
    name: &str,
    declared: DeclaredType,
    symbol_table: &SymbolTable,
    diagnostics: &mut Diagnostics,
) -> Option<Literal> {
    let value = tokens.get(index)?;

    // malformed literals were already reported by the lexer
    if matches!(value.kind, TokenKind::Error(_)) {
        return None;
    }

    if TypeChecker::is_variable_reference(value) {
        let is_call = tokens.is_kind(index + 1, TokenKind::Dot)
            || tokens.is_kind(index + 1, TokenKind::LParen);
        if is_call {
            return None;
        }

        let source = symbol_table.lookup_symbol(value.lexeme())?;
        if let Err(error) = TypeChecker::check_variable(name, declared, source) {
            diagnostics.error(value.location, error.to_string());
        }
        return None;
    }

    match TypeChecker::check(name, declared, value) {
        Ok(literal) => Some(literal),
        Err(error) => {
            diagnostics.error(value.location, error.to_string());
            None
        }
    }
}
