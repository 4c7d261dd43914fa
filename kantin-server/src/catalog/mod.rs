//! Catalog domain logic
//!
//! Pure functions and query descriptions shared by the route handlers and
//! both store adapters. Nothing here touches I/O.

pub mod category;
pub mod hours;
pub mod query;
pub mod sales;
pub mod window;

pub use category::CategoryFilter;
pub use query::{CanteenFilter, MenuQuery, SortKey, resolve_limit};
pub use window::Period;
