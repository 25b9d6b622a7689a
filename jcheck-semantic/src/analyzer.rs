use std::ops::RangeInclusive;

use jcheck_config::Config;
use jcheck_core::Diagnostics;
use jcheck_token::Tokens;

use crate::analysis::{AnalysisCtx, char_range, declarations, loops, methods, usage};
use crate::symbol_table::SymbolTable;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzerOptions {
    /// Permitted `char` literals; `None` disables the range pass.
    pub char_range: Option<RangeInclusive<char>>,
    pub check_string_methods: bool,
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for AnalyzerOptions {
    fn from(config: &Config) -> Self {
        Self {
            char_range: config
                .check_char_range
                .then(|| config.char_range_start..=config.char_range_end),
            check_string_methods: config.check_string_methods,
        }
    }
}

#[derive(Debug)]
pub struct SemanticInfo {
    pub symbol_table: SymbolTable,
    pub diagnostics: Diagnostics,
}

#[derive(Debug, Default)]
pub struct SemanticAnalyzer {
    options: AnalyzerOptions,
}

impl SemanticAnalyzer {
    pub fn new(options: AnalyzerOptions) -> Self {
        Self { options }
    }

    /// Builds the symbol table, then runs the read-only passes over it in order:
    /// usage, loop consistency, char range and String methods.
    pub fn analyze(&self, tokens: &Tokens) -> SemanticInfo {
        let mut symbol_table = SymbolTable::new();
        let mut diagnostics = Diagnostics::new();

        declarations::collect_declarations(tokens, &mut symbol_table, &mut diagnostics);
        tracing::debug!(
            variables = symbol_table.len(),
            diagnostics = diagnostics.len(),
            "declaration pass finished"
        );

        let mut ctx = AnalysisCtx {
            tokens,
            symbol_table: &symbol_table,
            diagnostics: &mut diagnostics,
        };

        usage::check_usage(&mut ctx);
        tracing::debug!(diagnostics = ctx.diagnostics.len(), "usage pass finished");

        loops::check_loops(&mut ctx);
        tracing::debug!(diagnostics = ctx.diagnostics.len(), "loop pass finished");

        if let Some(range) = &self.options.char_range {
            char_range::check_char_range(&mut ctx, range);
            tracing::debug!(diagnostics = ctx.diagnostics.len(), "char range pass finished");
        }

        if self.options.check_string_methods {
            methods::check_string_methods(&mut ctx);
            tracing::debug!(diagnostics = ctx.diagnostics.len(), "string method pass finished");
        }

        SemanticInfo {
            symbol_table,
            diagnostics,
        }
    }
}
