use jcheck_strings::MethodRegistry;
use jcheck_token::{DeclaredType, TokenKind};

use super::AnalysisCtx;

/// Reports `s.name` where `s` is a String variable and `name` is not a String method.
pub fn check_string_methods(ctx: &mut AnalysisCtx<'_>) {
    let tokens = ctx.tokens;
    let registry = MethodRegistry::global();

    for window in tokens.as_slice().windows(3) {
        let [receiver, dot, method] = window else {
            continue;
        };

        if !receiver.is(TokenKind::Identifier)
            || !dot.is(TokenKind::Dot)
            || !method.is(TokenKind::Identifier)
        {
            continue;
        }

        let is_string = ctx
            .symbol_table
            .lookup_symbol(receiver.lexeme())
            .is_some_and(|variable| variable.declared_type == DeclaredType::String);

        if is_string && !registry.contains(method.lexeme()) {
            ctx.diagnostics.error(
                method.location,
                format!("'{}' is not a valid String method", method.lexeme()),
            );
        }
    }
}
