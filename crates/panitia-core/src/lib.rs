//! Core types and trait definitions for the Panitia committee-data service.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it.

pub mod directory;
pub mod employee;
pub mod error;
pub mod form;
pub mod stats;
pub mod store;
pub mod submission;

pub use error::{Error, Result};
