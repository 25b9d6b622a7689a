use jcheck_token::{TokenKind, is_reserved_name};

use super::{AnalysisCtx, check_assigned_value, is_declaration_site, is_member_name};

/// Reports identifiers missing from the symbol table and checks `name = value`
/// assignments against the declared type of `name`.
///
/// Assignment checks look at the right-hand token only; the stored value is never
/// updated.
pub fn check_usage(ctx: &mut AnalysisCtx<'_>) {
    let tokens = ctx.tokens;

    for (index, token) in tokens.iter().enumerate() {
        if !token.is(TokenKind::Identifier) || is_reserved_name(token.lexeme()) {
            continue;
        }

        if is_declaration_site(tokens, index) || is_member_name(tokens, index) {
            continue;
        }

        let name = token.lexeme();
        let Some(variable) = ctx.symbol_table.lookup_symbol(name) else {
            ctx.diagnostics
                .error(token.location, format!("variable '{name}' used without declaring"));
            continue;
        };

        if tokens.is_operator_at(index + 1, "=") {
            check_assigned_value(
                tokens,
                index + 2,
                name,
                variable.declared_type,
                ctx.symbol_table,
                ctx.diagnostics,
            );
        }
    }
}
