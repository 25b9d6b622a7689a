use jcheck_core::Diagnostics;
use jcheck_token::{TokenKind, Tokens};

use super::check_assigned_value;
use crate::symbol_table::{SymbolTable, Variable};

/// Registers every `type identifier` pair, validating `= value` initializers.
///
/// A variable whose initializer fails the rule table is still registered, with no
/// value, so later passes never call it undeclared.
pub fn collect_declarations(
    tokens: &Tokens,
    symbol_table: &mut SymbolTable,
    diagnostics: &mut Diagnostics,
) {
    for (index, token) in tokens.iter().enumerate() {
        let Some(declared_type) = token.declared_type() else {
            continue;
        };
        let Some(name) = tokens
            .get(index + 1)
            .filter(|next| next.is(TokenKind::Identifier))
        else {
            continue;
        };

        if let Some(existing) = symbol_table.lookup_symbol(name.lexeme()) {
            diagnostics.error(
                name.location,
                format!(
                    "variable '{}' is already declared (first declared at line {})",
                    name.lexeme(),
                    existing.line
                ),
            );
            continue;
        }

        let value = if tokens.is_operator_at(index + 2, "=") {
            check_assigned_value(
                tokens,
                index + 3,
                name.lexeme(),
                declared_type,
                symbol_table,
                diagnostics,
            )
        } else {
            None
        };

        _ = symbol_table.declare_symbol(Variable {
            name: name.lexeme().to_string(),
            declared_type,
            value,
            line: name.line(),
        });
    }
}
