use jcheck_core::Diagnostics;
use jcheck_token::{TokenKind, Tokens};

use crate::print::PrintCall;

/// Where a statement scan stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Boundary {
    Semicolon,
    /// A keyword or brace started something new before any `;`.
    Interrupted,
    EndOfInput,
}

/// Scans forward from `from` to the first `;`, keyword, `{` or `}`.
/// Returns `None` when there is nothing to scan.
fn statement_boundary(tokens: &Tokens, from: usize) -> Option<Boundary> {
    if from >= tokens.len() {
        return None;
    }

    let boundary = tokens
        .iter()
        .skip(from)
        .find_map(|token| match token.kind {
            TokenKind::Semicolon => Some(Boundary::Semicolon),
            TokenKind::Keyword | TokenKind::LBrace | TokenKind::RBrace => {
                Some(Boundary::Interrupted)
            }
            _ => None,
        })
        .unwrap_or(Boundary::EndOfInput);

    Some(boundary)
}

/// Requires a `;` after print calls, variable declarations and assignments.
pub fn check_terminators(tokens: &Tokens, diagnostics: &mut Diagnostics) {
    for (index, token) in tokens.iter().enumerate() {
        if let Some(call) = PrintCall::recognize(tokens, index) {
            check_print_terminator(tokens, call, diagnostics);
        }

        if token.declared_type().is_some() {
            if let Some(Boundary::Interrupted | Boundary::EndOfInput) =
                statement_boundary(tokens, index + 1)
            {
                diagnostics.error(token.location, "missing ';' after variable declaration");
            }
            continue;
        }

        let is_assignment = token.is(TokenKind::Identifier) && tokens.is_operator_at(index + 1, "=");
        let is_declaration_site = index > 0
            && tokens
                .get(index - 1)
                .is_some_and(|prev| prev.declared_type().is_some());

        if is_assignment && !is_declaration_site {
            if let Some(Boundary::Interrupted | Boundary::EndOfInput) =
                statement_boundary(tokens, index + 2)
            {
                diagnostics.error(
                    token.location,
                    format!("missing ';' after assignment to '{}'", token.lexeme()),
                );
            }
        }
    }
}

fn check_print_terminator(tokens: &Tokens, call: PrintCall, diagnostics: &mut Diagnostics) {
    let Some(close) = call.close else { return };

    if !tokens.is_kind(close + 1, TokenKind::Semicolon) {
        let location = tokens
            .get(call.method)
            .map(|t| t.location)
            .unwrap_or_default();

        diagnostics.error(
            location,
            format!("missing ';' after {} statement", call.name(tokens)),
        );
    }
}

#[cfg(test)]
mod tests {
    use jcheck_strings::StringLibrary;
    use jcheck_token::Lexer;

    use super::*;

    fn check(source: &str) -> Vec<String> {
        let mut strings = StringLibrary::default();
        let tokens = Lexer::new(source, &mut strings).tokenize().tokens;
        let mut diagnostics = Diagnostics::new();
        check_terminators(&tokens, &mut diagnostics);
        diagnostics.iter().map(|d| d.to_string()).collect()
    }

    #[test]
    fn test_terminated_statements() {
        let source = r#"
int x = 5;
String s = "a";
x = 7;
System.out.println(x);
print(s);
"#;
        assert!(check(source).is_empty());
    }

    #[test]
    fn test_declaration_at_end_of_input() {
        assert_eq!(check("int x = 5"), vec!["line 1: missing ';' after variable declaration"]);
    }

    #[test]
    fn test_declaration_interrupted_by_next_declaration() {
        assert_eq!(
            check("int x = 5\nint y = 6;"),
            vec!["line 1: missing ';' after variable declaration"]
        );
    }

    #[test]
    fn test_assignment_interrupted_by_brace() {
        assert_eq!(
            check("{ x = 5 }"),
            vec!["line 1: missing ';' after assignment to 'x'"]
        );
    }

    #[test]
    fn test_print_without_semicolon() {
        insta::assert_debug_snapshot!(check("System.out.println(\"a\")\nprintln(b)"), @r#"
        [
            "line 1: missing ';' after System.out.println statement",
            "line 2: missing ';' after println statement",
        ]
        "#);
    }

    #[test]
    fn test_lone_type_keyword_is_not_reported() {
        assert!(check("int").is_empty());
    }
}
