use std::ops::Range;

use jcheck_core::{Diagnostics, Location};
use jcheck_token::{Token, TokenKind, Tokens};

const RELATIONAL_OPERATORS: [&str; 6] = ["<", "<=", ">", ">=", "==", "!="];

/// The three `;`-separated parts of a well-formed `for (...)` header, as token
/// index ranges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForHeader {
    pub keyword: usize,
    pub open: usize,
    pub close: usize,
    pub init: Range<usize>,
    pub condition: Range<usize>,
    pub increment: Range<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderError {
    MissingOpenParen,
    MissingCloseParen,
    SemicolonCount(usize),
}

impl ForHeader {
    /// Splits the header of the `for` keyword at `keyword`.
    pub fn parse(tokens: &Tokens, keyword: usize) -> Result<ForHeader, HeaderError> {
        let open = keyword + 1;
        if !tokens.is_kind(open, TokenKind::LParen) {
            return Err(HeaderError::MissingOpenParen);
        }

        let close = tokens
            .matching_paren(open)
            .ok_or(HeaderError::MissingCloseParen)?;

        let semicolons = tokens.semicolons_between(open, close);
        let [first, second] = semicolons[..] else {
            return Err(HeaderError::SemicolonCount(semicolons.len()));
        };

        Ok(ForHeader {
            keyword,
            open,
            close,
            init: open + 1..first,
            condition: first + 1..second,
            increment: second + 1..close,
        })
    }
}

/// Indices of every `for` keyword.
pub fn for_keywords(tokens: &Tokens) -> impl Iterator<Item = usize> + '_ {
    tokens
        .iter()
        .enumerate()
        .filter(|(_, token)| token.is(TokenKind::Keyword) && token.lexeme() == "for")
        .map(|(index, _)| index)
}

pub fn check_for_loops(tokens: &Tokens, diagnostics: &mut Diagnostics) {
    for keyword in for_keywords(tokens) {
        ForLoopValidator {
            tokens,
            keyword,
            diagnostics: &mut *diagnostics,
        }
        .validate();
    }
}

struct ForLoopValidator<'a> {
    tokens: &'a Tokens,
    keyword: usize,
    diagnostics: &'a mut Diagnostics,
}

impl<'a> ForLoopValidator<'a> {
    fn validate(mut self) {
        let header = match ForHeader::parse(self.tokens, self.keyword) {
            Ok(header) => header,
            Err(HeaderError::MissingOpenParen) => {
                return self.error(self.keyword_location(), "expected '(' after 'for'");
            }
            Err(HeaderError::MissingCloseParen) => {
                return self.error(self.keyword_location(), "missing ')' to close the 'for' header");
            }
            Err(HeaderError::SemicolonCount(count)) => {
                self.error(
                    self.keyword_location(),
                    format!("'for' header must contain exactly 2 ';', found {count}"),
                );
                if let Some(close) = self.tokens.matching_paren(self.keyword + 1) {
                    self.check_body(close);
                }
                return;
            }
        };

        self.check_init(header.init.clone());
        self.check_condition(header.condition.clone());
        self.check_increment(header.increment.clone());
        self.check_body(header.close);
    }

    fn check_init(&mut self, span: Range<usize>) {
        let tokens = self.tokens;
        let Some(first) = tokens.get(span.start).filter(|_| !span.is_empty()) else {
            return self.error(self.keyword_location(), "empty for-loop initialization");
        };

        if let Some(declared) = first.declared_type()
            && span.len() >= 4
        {
            let name = self.token(span.start + 1);
            if !name.is(TokenKind::Identifier) {
                return self.error(
                    name.location,
                    format!("expected identifier after '{declared}' in for-loop initialization"),
                );
            }

            let equals = self.token(span.start + 2);
            if !equals.is_operator("=") {
                return self.error(equals.location, "expected '=' in for-loop initialization");
            }

            let value = self.token(span.start + 3);
            let expected = declared.literal_kind();
            if value.kind != expected {
                self.error(
                    value.location,
                    format!(
                        "expected {expected} value for {declared} loop variable '{}', found {} '{}'",
                        name.lexeme(),
                        value.kind,
                        value.lexeme()
                    ),
                );
            }
            return;
        }

        if span.len() == 1 && first.is(TokenKind::Identifier) {
            return;
        }

        if span.len() >= 3 && first.is(TokenKind::Identifier) && self.token(span.start + 1).is_operator("=") {
            let value = self.token(span.start + 2);
            if !value.kind.is_value() {
                self.error(
                    value.location,
                    format!("invalid value '{}' in for-loop initialization", value.lexeme()),
                );
            }
            return;
        }

        self.error(first.location, "invalid for-loop initialization");
    }

    fn check_condition(&mut self, span: Range<usize>) {
        if span.is_empty() {
            return self.error(self.keyword_location(), "empty for-loop condition");
        }

        if span.len() < 3 {
            let location = self.token(span.start).location;
            return self.error(location, "incomplete for-loop condition");
        }

        let variable = self.token(span.start);
        if !variable.is(TokenKind::Identifier) {
            self.error(
                variable.location,
                format!("expected variable in for-loop condition, found '{}'", variable.lexeme()),
            );
        }

        let operator = self.token(span.start + 1);
        let is_relational = operator.is(TokenKind::Operator)
            && RELATIONAL_OPERATORS.contains(&operator.lexeme());
        if !is_relational {
            self.error(
                operator.location,
                format!("invalid operator '{}' in for-loop condition", operator.lexeme()),
            );
        }

        let value = self.token(span.start + 2);
        if !value.kind.is_value() {
            self.error(
                value.location,
                format!("invalid value '{}' in for-loop condition", value.lexeme()),
            );
        }
    }

    fn check_increment(&mut self, span: Range<usize>) {
        if span.is_empty() {
            return self.error(self.keyword_location(), "empty for-loop increment");
        }

        let variable = self.token(span.start);
        if span.len() < 2 {
            return self.error(variable.location, "incomplete for-loop increment");
        }

        if !variable.is(TokenKind::Identifier) {
            return self.error(
                variable.location,
                format!("expected variable in for-loop increment, found '{}'", variable.lexeme()),
            );
        }

        let operator = self.token(span.start + 1);
        let op = if operator.is(TokenKind::Operator) { operator.lexeme() } else { "" };

        match op {
            "++" | "--" if span.len() > 2 => {
                let extra = self.token(span.start + 2);
                let message = match extra.kind {
                    TokenKind::Operator => format!(
                        "invalid compound operator '{op}{}' in for-loop increment",
                        extra.lexeme()
                    ),
                    _ => format!("unexpected '{}' after '{op}' in for-loop increment", extra.lexeme()),
                };
                self.error(extra.location, message);
            }
            "++" | "--" => {}
            "+=" | "-=" if span.len() != 3 => self.error(
                operator.location,
                format!("expected exactly one value after '{op}' in for-loop increment"),
            ),
            "+=" | "-=" => {
                let value = self.token(span.start + 2);
                if !value.kind.is_value() {
                    self.error(
                        value.location,
                        format!("invalid value '{}' after '{op}' in for-loop increment", value.lexeme()),
                    );
                }
            }
            _ => self.error(
                operator.location,
                format!("invalid increment operator '{}' in for-loop", operator.lexeme()),
            ),
        }
    }

    fn check_body(&mut self, close: usize) {
        if !self.tokens.is_kind(close + 1, TokenKind::LBrace) {
            let location = self.token(close).location;
            self.error(location, "expected '{' after the for-loop header");
        }
    }

    /// Token inside a header span; span bounds are always in range.
    fn token(&self, index: usize) -> &'a Token {
        &self.tokens.as_slice()[index]
    }

    fn keyword_location(&self) -> Location {
        self.token(self.keyword).location
    }

    fn error(&mut self, location: Location, message: impl Into<String>) {
        self.diagnostics.error(location, message);
    }
}

#[cfg(test)]
mod tests {
    use jcheck_strings::StringLibrary;
    use jcheck_token::Lexer;

    use super::*;

    fn tokens(source: &str) -> Tokens {
        let mut strings = StringLibrary::default();
        Lexer::new(source, &mut strings).tokenize().tokens
    }

    fn check(source: &str) -> Vec<String> {
        let mut diagnostics = Diagnostics::new();
        check_for_loops(&tokens(source), &mut diagnostics);
        diagnostics.iter().map(|d| d.message.clone()).collect()
    }

    #[test]
    fn test_header_spans() {
        let tokens = tokens("for (int i = 0; i < 10; i++) { }");
        let header = ForHeader::parse(&tokens, 0).unwrap();

        assert_eq!(header.init, 2..6);
        assert_eq!(header.condition, 7..10);
        assert_eq!(header.increment, 11..13);
        assert_eq!(header.close, 13);
    }

    #[test]
    fn test_valid_loops() {
        assert!(check("for (int i = 0; i < 10; i++) { }").is_empty());
        assert!(check("for (i = 0; i != n; i += 2) { }").is_empty());
        assert!(check("for (i; i >= 0; i--) { }").is_empty());
        assert!(check("for (char c = 'a'; c <= 'z'; c++) { }").is_empty());
    }

    #[test]
    fn test_chained_increment_operator() {
        assert_eq!(
            check("for (int c = 0; c < 5; c+++) { }"),
            vec!["invalid compound operator '+++' in for-loop increment"]
        );
    }

    #[test]
    fn test_missing_paren_and_brace() {
        assert_eq!(check("for int i = 0;"), vec!["expected '(' after 'for'"]);
        assert_eq!(
            check("for (int i = 0; i < 3; i++) i = 1;"),
            vec!["expected '{' after the for-loop header"]
        );
        assert_eq!(check("for (int i = 0; i < 3"), vec!["missing ')' to close the 'for' header"]);
    }

    #[test]
    fn test_wrong_semicolon_count() {
        assert_eq!(
            check("for (int i = 0; i < 3) { }"),
            vec!["'for' header must contain exactly 2 ';', found 1"]
        );
    }

    #[test]
    fn test_header_part_errors() {
        insta::assert_debug_snapshot!(check("for (int i = \"a\"; i; i *= 2) { }"), @r#"
        [
            "expected number value for int loop variable 'i', found string 'a'",
            "incomplete for-loop condition",
            "invalid increment operator '*=' in for-loop",
        ]
        "#);
    }

    #[test]
    fn test_empty_parts() {
        assert_eq!(
            check("for (;;) { }"),
            vec![
                "empty for-loop initialization",
                "empty for-loop condition",
                "empty for-loop increment",
            ]
        );
    }

    #[test]
    fn test_invalid_initialization_shapes() {
        assert_eq!(check("for (int i; i < 3; i++) { }"), vec!["invalid for-loop initialization"]);
        assert_eq!(
            check("for (i = ; i < 3; i++) { }"),
            vec!["invalid for-loop initialization"]
        );
    }

    #[test]
    fn test_compound_assignment_needs_one_value() {
        assert_eq!(
            check("for (i = 0; i < 9; i += 1 2) { }"),
            vec!["expected exactly one value after '+=' in for-loop increment"]
        );
    }
}
