pub mod access;
pub mod error;
pub mod expression;
pub mod plan;
pub mod schema;

pub use error::{PlanError, PlanResult};
