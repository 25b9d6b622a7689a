use std::collections::HashMap;
use std::fmt;

use jcheck_token::DeclaredType;
use serde::Serialize;

/// A typed initializer value recovered from a declaration.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum Literal {
    Int(i64),
    Float(f64),
    Char(char),
    Str(String),
    Bool(bool),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Int(value) => write!(f, "{value}"),
            Literal::Float(value) => write!(f, "{value}"),
            Literal::Char(value) => write!(f, "'{value}'"),
            Literal::Str(value) => write!(f, "\"{value}\""),
            Literal::Bool(value) => write!(f, "{value}"),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Variable {
    pub name: String,
    pub declared_type: DeclaredType,
    /// Absent when there was no initializer or it failed the type rules.
    pub value: Option<Literal>,
    pub line: usize,
}

/// The single flat scope of one analysis run.
#[derive(Debug, Default, Serialize)]
pub struct SymbolTable {
    symbols: HashMap<String, Variable>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `variable` unless its name is taken. On a duplicate the table is
    /// left untouched and the first declaration is returned.
    pub fn declare_symbol(&mut self, variable: Variable) -> Result<(), &Variable> {
        use std::collections::hash_map::Entry;

        match self.symbols.entry(variable.name.clone()) {
            Entry::Occupied(existing) => Err(existing.into_mut()),
            Entry::Vacant(slot) => {
                slot.insert(variable);
                Ok(())
            }
        }
    }

    pub fn lookup_symbol(&self, name: &str) -> Option<&Variable> {
        self.symbols.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.symbols.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Variables ordered by declaration line, then name.
    pub fn variables(&self) -> Vec<&Variable> {
        let mut variables = self.symbols.values().collect::<Vec<_>>();
        variables.sort_by(|a, b| a.line.cmp(&b.line).then_with(|| a.name.cmp(&b.name)));
        variables
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn variable(name: &str, declared_type: DeclaredType, line: usize) -> Variable {
        Variable {
            name: name.into(),
            declared_type,
            value: None,
            line,
        }
    }

    #[test]
    fn test_first_declaration_wins() {
        let mut table = SymbolTable::new();
        assert!(table.declare_symbol(variable("x", DeclaredType::Int, 1)).is_ok());

        let existing = table
            .declare_symbol(variable("x", DeclaredType::String, 4))
            .unwrap_err();
        assert_eq!(existing.line, 1);

        let x = table.lookup_symbol("x").unwrap();
        assert_eq!(x.declared_type, DeclaredType::Int);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_variables_sorted_by_line() {
        let mut table = SymbolTable::new();
        table.declare_symbol(variable("b", DeclaredType::Int, 2)).unwrap();
        table.declare_symbol(variable("a", DeclaredType::Char, 3)).unwrap();
        table.declare_symbol(variable("c", DeclaredType::Long, 2)).unwrap();

        let names = table
            .variables()
            .into_iter()
            .map(|v| v.name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["b", "c", "a"]);
    }
}
