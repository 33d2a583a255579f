//! Common utilities and types shared across DocVault crates.
//!
//! This crate holds the document identifier and the error taxonomy that every
//! layer (cipher, blob store, repository, service) reports through.

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::DocumentId;
