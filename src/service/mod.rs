//! Storage services. Each write opens one transaction, commits on success, and
//! rolls back when the transaction is dropped on an error path.

mod comparison;
mod product;
mod product_type;

pub use comparison::ComparisonService;
pub use product::ProductService;
pub use product_type::ProductTypeService;
