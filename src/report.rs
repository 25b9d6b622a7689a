use std::fmt::Write;

use jcheck_core::Diagnostic;
use serde::Serialize;

use crate::{Analysis, Result, SyntaxReport};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
    #[default]
    Text,
    Json,
}

/// Something the CLI can print: named groups of diagnostics.
pub trait Report: Serialize {
    fn sections(&self) -> Vec<(&'static str, &[Diagnostic])>;

    fn is_clean(&self) -> bool {
        self.sections()
            .iter()
            .all(|(_, diagnostics)| diagnostics.is_empty())
    }
}

impl Report for Analysis {
    fn sections(&self) -> Vec<(&'static str, &[Diagnostic])> {
        vec![
            ("syntax", self.syntax_diagnostics.as_slice()),
            ("semantic", self.semantic_diagnostics.as_slice()),
        ]
    }
}

impl Report for SyntaxReport {
    fn sections(&self) -> Vec<(&'static str, &[Diagnostic])> {
        vec![("syntax", self.syntax_diagnostics.as_slice())]
    }
}

pub fn render<R: Report>(report: &R, format: Format) -> Result<String> {
    match format {
        Format::Text => Ok(render_text(report)),
        Format::Json => Ok(serde_json::to_string_pretty(report)?),
    }
}

fn render_text<R: Report>(report: &R) -> String {
    let mut out = String::new();

    for (heading, diagnostics) in report.sections() {
        match diagnostics.len() {
            0 => _ = writeln!(out, "{heading}: ok"),
            1 => _ = writeln!(out, "{heading}: 1 problem"),
            n => _ = writeln!(out, "{heading}: {n} problems"),
        }

        for diagnostic in diagnostics {
            _ = writeln!(out, "  {diagnostic}");
        }
    }

    out
}
