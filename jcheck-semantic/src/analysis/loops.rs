use jcheck_syntax::ForHeader;
use jcheck_syntax::for_loop::for_keywords;
use jcheck_token::{DeclaredType, Token, TokenKind};

use super::AnalysisCtx;
use crate::validation::{TypeChecker, TypeError};

#[derive(Debug, Clone, Copy)]
struct LoopVariable<'a> {
    name: &'a str,
    declared_type: DeclaredType,
}

/// Checks each `for` header for a consistent loop variable. Headers that do not
/// split into three parts are left to the statement validator.
pub fn check_loops(ctx: &mut AnalysisCtx<'_>) {
    let tokens = ctx.tokens;

    for keyword in for_keywords(tokens) {
        if let Ok(header) = ForHeader::parse(tokens, keyword) {
            check_loop(ctx, &header);
        }
    }
}

fn check_loop(ctx: &mut AnalysisCtx<'_>, header: &ForHeader) {
    let tokens = ctx.tokens;
    let tokens = tokens.as_slice();
    let init = &tokens[header.init.clone()];

    let variable = match init {
        [ty, name, ..] if ty.declared_type().is_some() && name.is(TokenKind::Identifier) => {
            ty.declared_type().map(|declared_type| LoopVariable {
                name: name.lexeme(),
                declared_type,
            })
        }
        [name, ..] if name.is(TokenKind::Identifier) => {
            let Some(declared) = ctx.symbol_table.lookup_symbol(name.lexeme()) else {
                ctx.diagnostics.error(
                    name.location,
                    format!("loop variable '{}' is not declared", name.lexeme()),
                );
                return;
            };
            Some(LoopVariable {
                name: name.lexeme(),
                declared_type: declared.declared_type,
            })
        }
        _ => None,
    };

    let Some(variable) = variable else { return };

    let condition = &tokens[header.condition.clone()];
    let increment = &tokens[header.increment.clone()];

    if let Some(first) = condition.first() {
        check_same_variable(ctx, "condition", first, variable);
    }

    if let Some(first) = increment.first() {
        check_same_variable(ctx, "increment", first, variable);
    }

    if let [_, _, value, ..] = condition {
        check_compared_value(ctx, variable, value);
    }
}

fn check_same_variable(ctx: &mut AnalysisCtx<'_>, part: &str, token: &Token, variable: LoopVariable<'_>) {
    if token.is(TokenKind::Identifier) && token.lexeme() != variable.name {
        ctx.diagnostics.error(
            token.location,
            format!(
                "{part} variable '{}' does not match loop variable '{}'",
                token.lexeme(),
                variable.name
            ),
        );
    }
}

fn check_compared_value(ctx: &mut AnalysisCtx<'_>, variable: LoopVariable<'_>, value: &Token) {
    if matches!(value.kind, TokenKind::Error(_)) {
        return;
    }

    let LoopVariable { name, declared_type } = variable;

    if TypeChecker::is_variable_reference(value) {
        // undeclared names are reported by the usage pass
        let Some(other) = ctx.symbol_table.lookup_symbol(value.lexeme()) else {
            return;
        };

        if !TypeChecker::comparable(declared_type, other.declared_type) {
            ctx.diagnostics.error(
                value.location,
                format!(
                    "cannot compare {declared_type} loop variable '{name}' with {} variable '{}'",
                    other.declared_type,
                    value.lexeme()
                ),
            );
        }
        return;
    }

    let message = match TypeChecker::check(name, declared_type, value) {
        Ok(_) => return,
        Err(error @ (TypeError::Malformed { .. } | TypeError::IncompatibleVariable { .. })) => {
            error.to_string()
        }
        Err(TypeError::Mismatch { found, .. }) => format!(
            "cannot compare {declared_type} loop variable '{name}' with {found} '{}'",
            value.lexeme()
        ),
        Err(TypeError::NotBoolean { .. }) => format!(
            "cannot compare {declared_type} loop variable '{name}' with {} '{}'",
            value.kind,
            value.lexeme()
        ),
    };

    ctx.diagnostics.error(value.location, message);
}
