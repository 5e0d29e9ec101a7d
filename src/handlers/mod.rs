//! HTTP handlers for comparisons, products, and product types.

pub mod comparison;
pub mod product;
pub mod product_type;
