//! Upload form: file validation, selection and status tracking

mod rules;
mod selection;
mod size;

pub use rules::*;
pub use selection::*;
pub use size::format_file_size;
