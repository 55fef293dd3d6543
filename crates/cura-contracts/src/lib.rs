//! # cura-contracts
//!
//! Shared types, schemas, and contracts for the CURA clinical text runtime.
//!
//! All crates in the workspace import from here. No business logic lives in
//! this crate — only data definitions and error types.

pub mod error;
pub mod feedback;
pub mod insight;
pub mod pipeline;
