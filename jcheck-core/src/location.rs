use std::fmt;

use serde::Serialize;

/// A 1-based position in the analyzed source text.
///
/// Columns count characters, not bytes, so a tab or a multi-byte letter each
/// advance the column by one.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl Location {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    pub fn start() -> Self {
        Self { line: 1, column: 1 }
    }

    /// Moves one character forward on the same line.
    pub fn advance(&mut self) {
        self.column += 1;
    }

    /// Moves to the first column of the next line.
    pub fn newline(&mut self) {
        self.line += 1;
        self.column = 1;
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::start()
    }
}

impl From<(usize, usize)> for Location {
    fn from((line, column): (usize, usize)) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locations_order_by_line_then_column() {
        let a = Location::new(1, 9);
        let b = Location::new(2, 1);
        let c = Location::new(2, 4);

        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn test_advance_and_newline() {
        let mut location = Location::start();
        location.advance();
        location.advance();
        assert_eq!(location, Location::new(1, 3));

        location.newline();
        assert_eq!(location, Location::new(2, 1));
    }
}
