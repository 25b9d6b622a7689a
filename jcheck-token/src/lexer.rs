use std::iter::Peekable;
use std::str::CharIndices;

use jcheck_core::{Diagnostics, Location};
use jcheck_strings::StringLibrary;

use crate::keywords::is_keyword;
use crate::token::{LexError, Token, TokenKind, Tokens};

/// Output of a full lexing pass.
#[derive(Debug, Default)]
pub struct Lexed {
    pub tokens: Tokens,
    pub diagnostics: Diagnostics,
}

/// Single left-to-right pass over the source text.
///
/// Lexical problems never stop the pass. Malformed literals become
/// [`TokenKind::Error`] tokens, stray characters become [`TokenKind::Unknown`]
/// tokens, and each one is also recorded as a diagnostic.
pub struct Lexer<'lex> {
    chars: Peekable<CharIndices<'lex>>,
    content: &'lex str,
    location: Location,
    strings: &'lex mut StringLibrary,
    pending: Option<Token>,
    diagnostics: Diagnostics,
}

impl<'lex> Lexer<'lex> {
    pub fn new(content: &'lex str, strings: &'lex mut StringLibrary) -> Self {
        Self {
            chars: content.char_indices().peekable(),
            content,
            location: Location::start(),
            strings,
            pending: None,
            diagnostics: Diagnostics::new(),
        }
    }

    pub fn tokenize(mut self) -> Lexed {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token() {
            tokens.push(token);
        }

        Lexed {
            tokens: Tokens::new(tokens),
            diagnostics: self.diagnostics,
        }
    }

    fn next_token(&mut self) -> Option<Token> {
        if let Some(pending) = self.pending.take() {
            return Some(pending);
        }

        self.skip_whitespace();

        let start = self.location;
        let (index, curr) = self.bump()?;
        let next = self.peek_char();

        let token = match (curr, next) {
            ('+', Some('+')) | ('-', Some('-')) => self.lex_increment(curr, index, start),
            ('+' | '-' | '*' | '/' | '<' | '>' | '=' | '!', Some('=')) => {
                self.bump();
                self.make(TokenKind::Operator, index, start)
            }
            ('&', Some('&')) | ('|', Some('|')) => {
                self.bump();
                self.make(TokenKind::Operator, index, start)
            }
            ('+' | '-' | '*' | '/' | '<' | '>' | '=' | '!' | '&' | '|', _) => {
                self.make(TokenKind::Operator, index, start)
            }

            (';', _) => self.make(TokenKind::Semicolon, index, start),
            ('(', _) => self.make(TokenKind::LParen, index, start),
            (')', _) => self.make(TokenKind::RParen, index, start),
            ('{', _) => self.make(TokenKind::LBrace, index, start),
            ('}', _) => self.make(TokenKind::RBrace, index, start),
            (',', _) => self.make(TokenKind::Comma, index, start),
            ('.', _) => self.make(TokenKind::Dot, index, start),

            ('"', _) => self.lex_string(index, start),
            ('\'', _) => self.lex_char(index, start),
            (c, _) if c.is_alphabetic() || c == '_' => self.lex_identifier(index, start),
            (c, _) if c.is_ascii_digit() => self.lex_number(index, start),
            (c, _) => {
                self.diagnostics
                    .error(start, format!("unrecognized character '{c}'"));
                self.make(TokenKind::Unknown, index, start)
            }
        };

        Some(token)
    }

    fn bump(&mut self) -> Option<(usize, char)> {
        let (index, c) = self.chars.next()?;
        match c {
            '\n' => self.location.newline(),
            _ => self.location.advance(),
        }
        Some((index, c))
    }

    fn peek_char(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    /// Byte offset of the next unread character.
    fn offset(&mut self) -> usize {
        self.chars
            .peek()
            .map(|(index, _)| *index)
            .unwrap_or(self.content.len())
    }

    fn skip_whitespace(&mut self) {
        while self.peek_char().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    /// Builds a token whose lexeme runs from `start_byte` up to the cursor.
    fn make(&mut self, kind: TokenKind, start_byte: usize, location: Location) -> Token {
        let source = self.content;
        let end_byte = self.offset();
        let lexeme = self.strings.intern(&source[start_byte..end_byte]);
        Token::new(kind, lexeme, location)
    }

    fn lex_increment(&mut self, op: char, start_byte: usize, start: Location) -> Token {
        self.bump();
        let token = self.make(TokenKind::Operator, start_byte, start);

        // `+++` is `++` followed by a lone `+`, never `+` `++`
        if self.peek_char() == Some(op) {
            let single_start = self.location;
            if let Some((index, _)) = self.bump() {
                self.pending = Some(self.make(TokenKind::Operator, index, single_start));
            }
        }

        token
    }

    fn lex_identifier(&mut self, start_byte: usize, start: Location) -> Token {
        while self
            .peek_char()
            .is_some_and(|c| c.is_alphanumeric() || c == '_')
        {
            self.bump();
        }

        let end_byte = self.offset();
        let kind = match is_keyword(&self.content[start_byte..end_byte]) {
            true => TokenKind::Keyword,
            false => TokenKind::Identifier,
        };

        self.make(kind, start_byte, start)
    }

    fn lex_number(&mut self, start_byte: usize, start: Location) -> Token {
        self.eat_digits();

        // a single `.` only belongs to the literal when digits follow it,
        // so `1.2.3` lexes as `1.2` `.` `3` and `5.` as `5` `.`
        let mut lookahead = self.chars.clone();
        let is_float = matches!(lookahead.next(), Some((_, '.')))
            && matches!(lookahead.next(), Some((_, c)) if c.is_ascii_digit());

        let kind = match is_float {
            true => {
                self.bump();
                self.eat_digits();
                TokenKind::Float
            }
            false => TokenKind::Number,
        };

        self.make(kind, start_byte, start)
    }

    fn eat_digits(&mut self) {
        while self.peek_char().is_some_and(|c| c.is_ascii_digit()) {
            self.bump();
        }
    }

    fn lex_string(&mut self, start_byte: usize, start: Location) -> Token {
        let close_byte = loop {
            match self.bump() {
                Some((close_byte, '"')) => break close_byte,
                Some((_, '\\')) => {
                    // whatever follows a backslash is part of the escape, including a quote
                    if self.bump().is_none() {
                        return self.unterminated_string(start_byte, start);
                    }
                }
                Some(_) => {}
                None => return self.unterminated_string(start_byte, start),
            }
        };

        let source = self.content;
        let literal = &source[start_byte + 1..close_byte];
        for illegal in self.strings.illegal_escapes(literal) {
            self.diagnostics.error(
                start,
                format!(
                    "illegal escape sequence '{}' in string literal",
                    illegal.sequence()
                ),
            );
        }

        let lexeme = self.strings.intern(literal);
        Token::new(TokenKind::String, lexeme, start)
    }

    fn unterminated_string(&mut self, start_byte: usize, start: Location) -> Token {
        self.diagnostics
            .error(start, "unterminated string literal, missing closing '\"'");
        self.make(
            TokenKind::Error(LexError::UnterminatedString),
            start_byte,
            start,
        )
    }

    fn lex_char(&mut self, start_byte: usize, start: Location) -> Token {
        let mut closed = false;

        loop {
            match self.peek_char() {
                None | Some('\n') => break,
                Some('\'') => {
                    self.bump();
                    closed = true;
                    break;
                }
                Some('\\') => {
                    self.bump();
                    if self.peek_char().is_some_and(|c| c != '\n') {
                        self.bump();
                    }
                }
                Some(_) => {
                    self.bump();
                }
            }
        }

        let source = self.content;
        let end_byte = self.offset();
        let raw = &source[start_byte..end_byte];
        let content_end = if closed { end_byte - 1 } else { end_byte };
        let content = &source[start_byte + 1..content_end];

        match (closed, content.chars().count()) {
            (true, 0) => {
                self.diagnostics.error(start, "empty char literal");
                self.make(TokenKind::Error(LexError::EmptyChar), start_byte, start)
            }
            (true, 1) => {
                let lexeme = self.strings.intern(content);
                Token::new(TokenKind::Char, lexeme, start)
            }
            _ => {
                self.diagnostics.error(
                    start,
                    format!("invalid char literal {raw}, expected exactly one character"),
                );
                self.make(TokenKind::Error(LexError::InvalidChar), start_byte, start)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(source: &str) -> Lexed {
        let mut strings = StringLibrary::default();
        Lexer::new(source, &mut strings).tokenize()
    }

    fn kinds_and_lexemes(source: &str) -> Vec<(TokenKind, String)> {
        lex(source)
            .tokens
            .iter()
            .map(|t| (t.kind, t.lexeme().to_string()))
            .collect()
    }

    fn messages(lexed: &Lexed) -> Vec<String> {
        lexed.diagnostics.iter().map(|d| d.to_string()).collect()
    }

    #[test]
    fn test_simple_declaration() {
        let tokens = kinds_and_lexemes("int x = 5;");
        assert_eq!(
            tokens,
            vec![
                (TokenKind::Keyword, "int".into()),
                (TokenKind::Identifier, "x".into()),
                (TokenKind::Operator, "=".into()),
                (TokenKind::Number, "5".into()),
                (TokenKind::Semicolon, ";".into()),
            ]
        );
    }

    #[test]
    fn test_positions_are_one_based() {
        let lexed = lex("int a;\n  a = 10;");
        let locations = lexed
            .tokens
            .iter()
            .map(|t| (t.line(), t.location.column))
            .collect::<Vec<_>>();

        assert_eq!(
            locations,
            vec![(1, 1), (1, 5), (1, 6), (2, 3), (2, 5), (2, 7), (2, 9)]
        );
    }

    #[test]
    fn test_triple_plus_is_increment_then_plus() {
        let lexed = lex("c+++");
        let tokens = lexed
            .tokens
            .iter()
            .map(|t| (t.lexeme().to_string(), t.location.column))
            .collect::<Vec<_>>();

        assert_eq!(
            tokens,
            vec![("c".into(), 1), ("++".into(), 2), ("+".into(), 4)]
        );
        assert!(lexed.diagnostics.is_empty());
    }

    #[test]
    fn test_triple_minus_is_decrement_then_minus() {
        let tokens = kinds_and_lexemes("c---");
        assert_eq!(tokens[1], (TokenKind::Operator, "--".into()));
        assert_eq!(tokens[2], (TokenKind::Operator, "-".into()));
        assert_eq!(tokens.len(), 3);
    }

    #[test]
    fn test_two_character_operators() {
        let lexemes = kinds_and_lexemes("+= -= *= /= <= >= == != && || ++ --")
            .into_iter()
            .map(|(kind, lexeme)| {
                assert_eq!(kind, TokenKind::Operator);
                lexeme
            })
            .collect::<Vec<_>>();

        assert_eq!(
            lexemes,
            ["+=", "-=", "*=", "/=", "<=", ">=", "==", "!=", "&&", "||", "++", "--"]
        );
    }

    #[test]
    fn test_numbers_and_floats() {
        let tokens = kinds_and_lexemes("42 3.14 1.2.3 5.");
        assert_eq!(
            tokens,
            vec![
                (TokenKind::Number, "42".into()),
                (TokenKind::Float, "3.14".into()),
                (TokenKind::Float, "1.2".into()),
                (TokenKind::Dot, ".".into()),
                (TokenKind::Number, "3".into()),
                (TokenKind::Number, "5".into()),
                (TokenKind::Dot, ".".into()),
            ]
        );
    }

    #[test]
    fn test_string_lexeme_excludes_quotes() {
        let tokens = kinds_and_lexemes(r#"String s = "hello world";"#);
        assert_eq!(tokens[3], (TokenKind::String, "hello world".into()));
    }

    #[test]
    fn test_escaped_quote_does_not_terminate_string() {
        let lexed = lex(r#""say \"hi\"" ;"#);
        assert_eq!(lexed.tokens.len(), 2);
        assert_eq!(lexed.tokens.as_slice()[0].lexeme(), r#"say \"hi\""#);
        assert!(lexed.diagnostics.is_empty());
    }

    #[test]
    fn test_illegal_escape_keeps_string_token() {
        let lexed = lex(r#"String s = "a\qb";"#);

        assert_eq!(lexed.tokens.kind_at(3), Some(TokenKind::String));
        assert_eq!(lexed.tokens.len(), 5);
        insta::assert_debug_snapshot!(messages(&lexed), @r#"
        [
            "line 1: illegal escape sequence '\\q' in string literal",
        ]
        "#);
    }

    #[test]
    fn test_unterminated_string() {
        let lexed = lex("String s = \"abc;\nint y;");

        assert_eq!(
            lexed.tokens.kind_at(3),
            Some(TokenKind::Error(LexError::UnterminatedString))
        );
        assert_eq!(lexed.tokens.len(), 4);
        assert_eq!(lexed.diagnostics.len(), 1);
        assert_eq!(lexed.diagnostics.as_slice()[0].line(), 1);
    }

    #[test]
    fn test_char_literals() {
        let lexed = lex("'a' '' 'ab'");
        let kinds = lexed.tokens.iter().map(Token::kind).collect::<Vec<_>>();

        assert_eq!(
            kinds,
            vec![
                TokenKind::Char,
                TokenKind::Error(LexError::EmptyChar),
                TokenKind::Error(LexError::InvalidChar),
            ]
        );
        insta::assert_debug_snapshot!(messages(&lexed), @r#"
        [
            "line 1: empty char literal",
            "line 1: invalid char literal 'ab', expected exactly one character",
        ]
        "#);
    }

    #[test]
    fn test_unknown_character() {
        let lexed = lex("int x = 5 # 3;");
        assert_eq!(lexed.tokens.kind_at(4), Some(TokenKind::Unknown));
        assert_eq!(lexed.tokens.as_slice()[4].lexeme(), "#");
        assert_eq!(messages(&lexed), vec!["line 1: unrecognized character '#'"]);
    }

    #[test]
    fn test_keywords_and_literal_words() {
        let tokens = kinds_and_lexemes("for boolean true String str_1");
        assert_eq!(
            tokens,
            vec![
                (TokenKind::Keyword, "for".into()),
                (TokenKind::Keyword, "boolean".into()),
                (TokenKind::Identifier, "true".into()),
                (TokenKind::Keyword, "String".into()),
                (TokenKind::Identifier, "str_1".into()),
            ]
        );
    }

    #[test]
    fn test_interning_does_not_change_tokens() {
        let source = "int x = 1; x = x + 1; String s = \"x\";";

        let mut cached = StringLibrary::new(true);
        let mut uncached = StringLibrary::new(false);
        let with_cache = Lexer::new(source, &mut cached).tokenize();
        let without_cache = Lexer::new(source, &mut uncached).tokenize();

        assert_eq!(with_cache.tokens, without_cache.tokens);
        assert!(cached.interned_count() > 0);
    }
}
