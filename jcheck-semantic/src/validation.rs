pub mod type_checker;

pub use type_checker::{TypeChecker, TypeError};
