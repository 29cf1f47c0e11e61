//! Calculator engine — the economics core and the report built around it.

pub mod economics;
pub mod summary;

pub use economics::compute;
pub use summary::{evaluate, Report};
