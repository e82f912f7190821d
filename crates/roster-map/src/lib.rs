//! Column-to-field mapping: the auto-map heuristic plus the structural
//! check that required fields are covered.

pub mod engine;
pub mod validate;

pub use engine::auto_map;
pub use validate::validate_mapping;
