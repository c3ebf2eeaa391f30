mod categories;
mod expense;
mod summary;

pub use categories::*;
pub use expense::*;
pub use summary::*;
