use std::collections::HashSet;
use std::sync::Arc;

/// Deduplicates lexeme text so identical lexemes share one allocation.
#[derive(Debug)]
pub struct Interner {
    pool: HashSet<Arc<str>>,
    enabled: bool,
}

impl Default for Interner {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Interner {
    pub fn new(enabled: bool) -> Self {
        Self {
            pool: HashSet::new(),
            enabled,
        }
    }

    pub fn intern(&mut self, text: &str) -> Arc<str> {
        if !self.enabled {
            return Arc::from(text);
        }

        if let Some(interned) = self.pool.get(text) {
            return Arc::clone(interned);
        }

        let interned: Arc<str> = Arc::from(text);
        self.pool.insert(Arc::clone(&interned));
        interned
    }

    pub fn len(&self) -> usize {
        self.pool.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }
}
