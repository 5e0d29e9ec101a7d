//! Rows, request bodies, and response representations.

pub mod comparison;
pub mod pagination;
pub mod product;

pub use comparison::*;
pub use pagination::*;
pub use product::*;
