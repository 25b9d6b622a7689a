use std::fmt;

use serde::Serialize;

use crate::Location;

/// A single non-fatal problem found in the source text.
#[derive(Debug, Clone, Serialize, PartialEq, Eq, PartialOrd, Ord)]
pub struct Diagnostic {
    pub location: Location,
    pub message: String,
}

impl Diagnostic {
    pub fn error(location: Location, message: impl Into<String>) -> Self {
        Self {
            location,
            message: message.into(),
        }
    }

    pub fn line(&self) -> usize {
        self.location.line
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.location.line, self.message)
    }
}

/// Append-only collector. Every pass owns one and never aborts on a finding.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn items(self) -> Vec<Diagnostic> {
        self.0
    }

    pub fn as_slice(&self) -> &[Diagnostic] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn error(&mut self, location: Location, message: impl Into<String>) {
        self.0.push(Diagnostic::error(location, message));
    }

    pub fn append(&mut self, other: Diagnostics) {
        self.0.extend(other.0);
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_prefixes_line() {
        let diagnostic = Diagnostic::error(Location::new(4, 2), "variable 'y' used without declaring");
        assert_eq!(diagnostic.to_string(), "line 4: variable 'y' used without declaring");
    }

    #[test]
    fn test_append_keeps_order() {
        let mut first = Diagnostics::new();
        first.error(Location::new(1, 1), "a");

        let mut second = Diagnostics::new();
        second.error(Location::new(3, 1), "b");
        second.error(Location::new(2, 1), "c");

        first.append(second);
        let messages = first.iter().map(|d| d.message.as_str()).collect::<Vec<_>>();
        assert_eq!(messages, ["a", "b", "c"]);
    }
}
