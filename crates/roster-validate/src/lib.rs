//! Data validation stage: per-row semantic checks over mapped columns.

pub mod validator;

pub use validator::validate_data;
