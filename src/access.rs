//! Scalar values and field data types.
//!
//! - **GenericValue**: a literal carried by a predicate leaf
//! - **DataType**: the storage type of a schema field

pub mod value;

pub use value::{DataType, GenericValue, ValueKind};
