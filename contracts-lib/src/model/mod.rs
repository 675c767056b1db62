//! Row models

mod contract;
mod record;
mod row;
mod value;

pub use contract::*;
pub use record::*;
pub use row::*;
pub use value::Value;
