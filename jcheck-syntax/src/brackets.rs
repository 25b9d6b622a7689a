use jcheck_core::Diagnostics;
use jcheck_token::{Token, TokenKind, Tokens};

/// Matches `(`/`)` and `{`/`}` with two independent stacks.
///
/// Closers with an empty stack are reported as they are met; openers still on a
/// stack after the pass are reported at their own line.
pub fn check_brackets(tokens: &Tokens, diagnostics: &mut Diagnostics) {
    let mut parens: Vec<&Token> = Vec::new();
    let mut braces: Vec<&Token> = Vec::new();

    for token in tokens {
        match token.kind {
            TokenKind::LParen => parens.push(token),
            TokenKind::LBrace => braces.push(token),
            TokenKind::RParen => {
                if parens.pop().is_none() {
                    diagnostics.error(token.location, "unmatched closing ')'");
                }
            }
            TokenKind::RBrace => {
                if braces.pop().is_none() {
                    diagnostics.error(token.location, "unmatched closing '}'");
                }
            }
            _ => {}
        }
    }

    for token in parens {
        diagnostics.error(token.location, "unmatched opening '('");
    }

    for token in braces {
        diagnostics.error(token.location, "unmatched opening '{'");
    }
}
