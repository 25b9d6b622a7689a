//! Static checker for a small C-family teaching language: variable declarations,
//! assignments, `for` loops, print calls and `String` methods.
//!
//! Source text goes through the lexer, the syntax validators and the semantic
//! analyzer. Every stage only collects diagnostics; none of them stops the run.

pub mod error;
pub mod logging;
pub mod report;


use std::time::Instant;

use jcheck_core::Diagnostic;
use jcheck_semantic::{AnalyzerOptions, SemanticAnalyzer};
use jcheck_strings::{MethodRegistry, StringLibrary};
use jcheck_syntax::Validator;
use jcheck_token::{Lexed, Lexer, Tokens};
use serde::Serialize;

pub use error::{Error, Result};
pub use jcheck_config::Config;

/// Result of a full analysis.
///
/// The flags only summarize the lists: `syntax_ok` is `syntax_diagnostics.is_empty()`
/// and likewise for the semantic side.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Analysis {
    pub tokens: Tokens,
    pub syntax_ok: bool,
    pub syntax_diagnostics: Vec<Diagnostic>,
    pub semantic_ok: bool,
    pub semantic_diagnostics: Vec<Diagnostic>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SyntaxReport {
    pub tokens: Tokens,
    pub syntax_ok: bool,
    pub syntax_diagnostics: Vec<Diagnostic>,
}

/// Owns the per-session string caches. Each analysis builds its own symbol table,
/// so nothing but cached literal text carries over between runs.
#[derive(Debug)]
pub struct Session {
    config: Config,
    analyzer: SemanticAnalyzer,
    strings: StringLibrary,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl Session {
    pub fn new(config: Config) -> Self {
        Self {
            analyzer: SemanticAnalyzer::new(AnalyzerOptions::from(&config)),
            strings: StringLibrary::new(config.intern_literals),
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Tokenizer plus the bracket and statement validators.
    pub fn check_syntax_only(&mut self, source: &str) -> Result<SyntaxReport> {
        if source.is_empty() {
            return Err(Error::EmptySource);
        }

        let started = Instant::now();
        let Lexed {
            tokens,
            mut diagnostics,
        } = Lexer::new(source, &mut self.strings).tokenize();
        tracing::info!(
            tokens = tokens.len(),
            lexical = diagnostics.len(),
            interned = self.strings.interned_count(),
            elapsed = ?started.elapsed(),
            "lexed source"
        );

        diagnostics.append(Validator::new(&tokens).validate());
        tracing::info!(
            diagnostics = diagnostics.len(),
            elapsed = ?started.elapsed(),
            "syntax checks finished"
        );

        Ok(SyntaxReport {
            tokens,
            syntax_ok: diagnostics.is_empty(),
            syntax_diagnostics: diagnostics.items(),
        })
    }

    pub fn analyze(&mut self, source: &str) -> Result<Analysis> {
        let started = Instant::now();
        let SyntaxReport {
            tokens,
            syntax_ok,
            syntax_diagnostics,
        } = self.check_syntax_only(source)?;

        let semantic = self.analyzer.analyze(&tokens);
        tracing::info!(
            variables = semantic.symbol_table.len(),
            diagnostics = semantic.diagnostics.len(),
            elapsed = ?started.elapsed(),
            "semantic analysis finished"
        );

        Ok(Analysis {
            tokens,
            syntax_ok,
            syntax_diagnostics,
            semantic_ok: semantic.diagnostics.is_empty(),
            semantic_diagnostics: semantic.diagnostics.items(),
        })
    }
}

/// Runs every stage with the default configuration.
pub fn analyze(source: &str) -> Result<Analysis> {
    Session::default().analyze(source)
}

pub fn check_syntax_only(source: &str) -> Result<SyntaxReport> {
    Session::default().check_syntax_only(source)
}

/// The `String` method names, queryable without running an analysis.
pub fn string_methods() -> &'static MethodRegistry {
    MethodRegistry::global()
}
