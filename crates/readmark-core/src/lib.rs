//! Core types and trait definitions for the readmark reading-status service.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it.

pub mod error;
pub mod service;
pub mod status;
pub mod store;

pub use error::{Error, Result};
pub use service::{ServiceError, StatusService};
pub use status::{ReadingStatus, Status};
pub use store::StatusStore;
