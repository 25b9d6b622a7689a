pub mod analysis;
pub mod analyzer;
pub mod symbol_table;
pub mod validation;


pub use analyzer::{AnalyzerOptions, SemanticAnalyzer, SemanticInfo};
pub use symbol_table::{Literal, SymbolTable, Variable};
pub use validation::{TypeChecker, TypeError};
