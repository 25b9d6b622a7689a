use jcheck_core::Diagnostics;
use jcheck_token::{Token, TokenKind, Tokens};

/// A recognized `System.out.println(...)`, `System.out.print(...)`, `println(...)`
/// or `print(...)` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrintCall {
    /// Index of the `println`/`print` token.
    pub method: usize,
    pub qualified: bool,
    pub open: usize,
    /// Index of the matching `)`, absent when the call never closes.
    pub close: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    System,
    SystemDot,
    Out,
    OutDot,
}

impl PrintCall {
    /// Runs the recognizer from `start`. Running out of tokens in the middle of the
    /// pattern is a non-match, like any other unexpected token.
    pub fn recognize(tokens: &Tokens, start: usize) -> Option<PrintCall> {
        // `println` right after a `.` belongs to a qualified call that starts earlier
        if start > 0 && tokens.is_kind(start - 1, TokenKind::Dot) {
            return None;
        }

        let mut state = State::Start;
        let mut index = start;

        loop {
            let token = tokens.get(index)?;

            state = match (state, token.kind) {
                (State::Start, TokenKind::Identifier) if token.lexeme() == "System" => {
                    State::System
                }
                (State::Start, TokenKind::Identifier) if is_print_method(token) => {
                    return Self::finish(tokens, index, false);
                }
                (State::System, TokenKind::Dot) => State::SystemDot,
                (State::SystemDot, TokenKind::Identifier) if token.lexeme() == "out" => State::Out,
                (State::Out, TokenKind::Dot) => State::OutDot,
                (State::OutDot, TokenKind::Identifier) if is_print_method(token) => {
                    return Self::finish(tokens, index, true);
                }
                _ => return None,
            };

            index += 1;
        }
    }

    fn finish(tokens: &Tokens, method: usize, qualified: bool) -> Option<Self> {
        let open = method + 1;
        if !tokens.is_kind(open, TokenKind::LParen) {
            return None;
        }

        Some(PrintCall {
            method,
            qualified,
            open,
            close: tokens.matching_paren(open),
        })
    }

    /// Display name used in diagnostics, such as `System.out.println`.
    pub fn name(&self, tokens: &Tokens) -> String {
        let method = tokens.get(self.method).map(Token::lexeme).unwrap_or_default();
        match self.qualified {
            true => format!("System.out.{method}"),
            false => method.to_string(),
        }
    }
}

fn is_print_method(token: &Token) -> bool {
    matches!(token.lexeme(), "println" | "print")
}

/// All print calls in source order.
pub fn print_calls(tokens: &Tokens) -> Vec<PrintCall> {
    let mut calls = Vec::new();
    let mut index = 0;

    while index < tokens.len() {
        match PrintCall::recognize(tokens, index) {
            Some(call) => {
                calls.push(call);
                index = call.open;
            }
            None => index += 1,
        }
    }

    calls
}

/// Flags `++` used for string concatenation inside print arguments.
pub fn check_print_contents(tokens: &Tokens, diagnostics: &mut Diagnostics) {
    for call in print_calls(tokens) {
        // an unclosed call is already an unmatched bracket
        let Some(close) = call.close else { continue };
        check_concatenation(tokens, call.open, close, diagnostics);
    }
}

fn check_concatenation(tokens: &Tokens, open: usize, close: usize, diagnostics: &mut Diagnostics) {
    let is_operand = |index: usize| {
        index > open
            && index < close
            && matches!(
                tokens.kind_at(index),
                Some(TokenKind::String | TokenKind::Identifier)
            )
    };

    for index in open + 1..close {
        let Some(token) = tokens.get(index) else { break };

        let misused = if token.is_operator("++") {
            is_operand(index - 1) || is_operand(index + 1)
        } else if token.is_operator("+") {
            // leftover of `+++`, or the spaced `+ +` form
            let after_increment = index - 1 > open && tokens.is_operator_at(index - 1, "++");
            let spaced = index + 1 < close && tokens.is_operator_at(index + 1, "+");

            (after_increment && is_operand(index + 1)) || (spaced && is_operand(index + 2))
        } else {
            false
        };

        if misused {
            diagnostics.error(token.location, "use '+', not '++', to concatenate");
        }
    }
}
