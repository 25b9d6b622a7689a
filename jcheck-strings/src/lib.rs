pub mod escapes;
pub mod interner;
pub mod methods;

pub use escapes::{EscapeValidator, IllegalEscape};
pub use interner::Interner;
pub use methods::{MethodRegistry, STRING_METHODS};

/// Per-session string support: lexeme interning plus memoized escape validation.
///
/// Both caches only ever save work. Turning caching off must produce exactly the
/// same tokens and diagnostics. A library is not shared between threads; give each
/// session its own instance.
#[derive(Debug, Default)]
pub struct StringLibrary {
    interner: Interner,
    escapes: EscapeValidator,
}

impl StringLibrary {
    pub fn new(caching: bool) -> Self {
        Self {
            interner: Interner::new(caching),
            escapes: EscapeValidator::new(caching),
        }
    }

    pub fn intern(&mut self, text: &str) -> std::sync::Arc<str> {
        self.interner.intern(text)
    }

    pub fn illegal_escapes(&mut self, literal: &str) -> Vec<IllegalEscape> {
        self.escapes.illegal_escapes(literal)
    }

    pub fn interned_count(&self) -> usize {
        self.interner.len()
    }
}
