pub mod categories;
pub mod error;
pub mod facade;
pub mod service;

pub use categories::*;
pub use error::*;
pub use service::*;
