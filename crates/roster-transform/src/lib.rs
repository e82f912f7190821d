//! Transformation stage: validated rows become candidate records.

pub mod normalize;
pub mod transformer;

pub use normalize::{parse_active, resolve_role};
pub use transformer::{transform_row, transform_rows};
