//! Shared data model for the roster import pipeline.
//!
//! Two representations flow through the pipeline and never leak into each
//! other: pre-mapping data is string-keyed ([`TabularDocument`] rows keyed
//! by header name), post-mapping data is schema-keyed ([`TargetField`] and
//! [`CandidateRecord`]). The [`ColumnMapping`] is the only bridge.

pub mod document;
pub mod error;
pub mod field;
pub mod mapping;
pub mod record;

pub use document::{Row, TabularDocument};
pub use error::{ImportError, Result};
pub use field::TargetField;
pub use mapping::{ColumnMapping, MappingEntry};
pub use record::{CandidateRecord, UserRole};
