pub mod keywords;
pub mod lexer;
pub mod token;

pub use keywords::{DeclaredType, is_keyword, is_reserved_name};
pub use lexer::{Lexed, Lexer};
pub use token::*;
