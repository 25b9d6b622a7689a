//! Token-stream validators: bracket balance, statement termination, `for` header
//! grammar and print-call content. Every check reads the same immutable tokens and
//! only ever appends diagnostics, so one malformed construct never hides another.

pub mod brackets;
pub mod for_loop;
pub mod print;
pub mod termination;


use jcheck_core::Diagnostics;
use jcheck_token::Tokens;

pub use for_loop::{ForHeader, HeaderError};
pub use print::PrintCall;

#[derive(Debug)]
pub struct Validator<'tok> {
    tokens: &'tok Tokens,
}

impl<'tok> Validator<'tok> {
    pub fn new(tokens: &'tok Tokens) -> Self {
        Self { tokens }
    }

    pub fn validate(self) -> Diagnostics {
        let mut diagnostics = Diagnostics::new();

        brackets::check_brackets(self.tokens, &mut diagnostics);
        termination::check_terminators(self.tokens, &mut diagnostics);
        for_loop::check_for_loops(self.tokens, &mut diagnostics);
        print::check_print_contents(self.tokens, &mut diagnostics);

        diagnostics
    }
}
