//! Contract dashboard client library
//!
//! A tabular view engine for contract listings (search, filter, sort,
//! paginate, format) plus an async client for the contract management API,
//! a session store and upload validation.

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod model;
pub mod stats;
pub mod upload;
pub mod view;

mod client;

pub use client::*;
