//! Upload boundary for the roster importer: the delimited-text parser, the
//! `.csv` name check, and the downloadable template.

pub mod delimited;
pub mod template;
pub mod upload;

pub use delimited::parse_delimited;
pub use template::{TEMPLATE_CSV, write_template};
pub use upload::is_supported_upload;
