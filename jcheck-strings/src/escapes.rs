use std::collections::HashMap;

/// Escapes accepted inside string literals, by the character after the backslash.
pub const LEGAL_ESCAPES: [char; 6] = ['n', 't', 'r', '\\', '"', '\''];

/// An escape sequence that is not part of [`LEGAL_ESCAPES`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IllegalEscape {
    /// Character following the backslash.
    pub escaped: char,
    /// Character offset of the backslash inside the literal content.
    pub offset: usize,
}

impl IllegalEscape {
    pub fn sequence(&self) -> String {
        format!("\\{}", self.escaped)
    }
}

#[derive(Debug)]
pub struct EscapeValidator {
    cache: HashMap<String, Vec<IllegalEscape>>,
    enabled: bool,
}

impl Default for EscapeValidator {
    fn default() -> Self {
        Self::new(true)
    }
}

impl EscapeValidator {
    pub fn new(enabled: bool) -> Self {
        Self {
            cache: HashMap::new(),
            enabled,
        }
    }

    /// Returns every illegal escape in `literal`, the string content without quotes.
    pub fn illegal_escapes(&mut self, literal: &str) -> Vec<IllegalEscape> {
        if !self.enabled {
            return scan(literal);
        }

        if let Some(cached) = self.cache.get(literal) {
            return cached.clone();
        }

        let result = scan(literal);
        self.cache.insert(literal.to_string(), result.clone());
        result
    }
}

fn scan(literal: &str) -> Vec<IllegalEscape> {
    let mut illegal = Vec::new();
    let mut chars = literal.chars().enumerate();

    while let Some((offset, c)) = chars.next() {
        if c != '\\' {
            continue;
        }

        // a trailing backslash cannot occur, the closing quote would be escaped
        let Some((_, escaped)) = chars.next() else { break };

        if !LEGAL_ESCAPES.contains(&escaped) {
            illegal.push(IllegalEscape { escaped, offset });
        }
    }

    illegal
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legal_escapes_pass() {
        let mut validator = EscapeValidator::default();
        assert!(validator.illegal_escapes(r#"tab\there\nquote\"single\'back\\cr\r"#).is_empty());
    }

    #[test]
    fn test_illegal_escape_is_reported_with_offset() {
        let mut validator = EscapeValidator::default();
        let illegal = validator.illegal_escapes(r"a\qb");

        assert_eq!(illegal, vec![IllegalEscape { escaped: 'q', offset: 1 }]);
        assert_eq!(illegal[0].sequence(), r"\q");
    }

    #[test]
    fn test_escaped_backslash_does_not_start_new_escape() {
        let mut validator = EscapeValidator::default();
        assert!(validator.illegal_escapes(r"\\q").is_empty());
    }

    #[test]
    fn test_cache_and_no_cache_agree() {
        let mut cached = EscapeValidator::new(true);
        let mut uncached = EscapeValidator::new(false);

        for literal in [r"\x\y", r"ok", r"\x\y"] {
            assert_eq!(cached.illegal_escapes(literal), uncached.illegal_escapes(literal));
        }
    }
}
