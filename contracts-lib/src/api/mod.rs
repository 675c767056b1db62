//! REST API operations
//!
//! Each submodule adds methods to [`ContractsClient`](crate::ContractsClient)
//! for one area of the API along with its request and response types.

mod auth;
mod contracts;
mod query;
mod upload;

pub use contracts::*;
pub use query::*;
pub use upload::*;
