//! Downloads index-constituent holdings files from vendor sites, normalizes
//! each into a common tabular schema, and merges the per-index tables into a
//! master table of every distinct symbol across indices.

pub mod error;
pub mod fetch;
pub mod master;
pub mod process;
pub mod symbols;

pub use error::{Error, Result};
