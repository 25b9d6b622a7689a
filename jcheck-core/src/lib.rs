pub mod diagnostics;
pub mod location;

pub use diagnostics::{Diagnostic, Diagnostics};
pub use location::Location;
