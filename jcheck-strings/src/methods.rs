use std::collections::HashSet;
use std::sync::OnceLock;

/// Method names accepted on `String` receivers.
pub const STRING_METHODS: [&str; 20] = [
    "length",
    "charAt",
    "substring",
    "indexOf",
    "lastIndexOf",
    "equals",
    "equalsIgnoreCase",
    "compareTo",
    "compareToIgnoreCase",
    "startsWith",
    "endsWith",
    "contains",
    "toUpperCase",
    "toLowerCase",
    "trim",
    "replace",
    "replaceAll",
    "split",
    "valueOf",
    "toString",
];

/// Read-only membership index over [`STRING_METHODS`].
#[derive(Debug)]
pub struct MethodRegistry {
    names: HashSet<&'static str>,
}

impl MethodRegistry {
    fn new() -> Self {
        Self {
            names: STRING_METHODS.into_iter().collect(),
        }
    }

    pub fn global() -> &'static MethodRegistry {
        static REGISTRY: OnceLock<MethodRegistry> = OnceLock::new();
        REGISTRY.get_or_init(MethodRegistry::new)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Names in their declaration order.
    pub fn methods(&self) -> &'static [&'static str] {
        &STRING_METHODS
    }
}
