use std::ops::RangeInclusive;

use jcheck_token::TokenKind;

use super::AnalysisCtx;

/// Reports single-character `char` literals outside `range`.
pub fn check_char_range(ctx: &mut AnalysisCtx<'_>, range: &RangeInclusive<char>) {
    let tokens = ctx.tokens;

    for token in tokens.iter().filter(|t| t.is(TokenKind::Char)) {
        let mut chars = token.lexeme().chars();
        let (Some(c), None) = (chars.next(), chars.next()) else {
            continue;
        };

        if !range.contains(&c) {
            ctx.diagnostics.error(
                token.location,
                format!(
                    "char '{c}' is outside the permitted range ({}-{})",
                    range.start(),
                    range.end()
                ),
            );
        }
    }
}
