//! # HTTP Handlers
//!
//! Request handlers grouped by resource: orders, the laboratory registry,
//! and the label catalog.

pub mod laboratories;
pub mod labels;
pub mod prosthesis;
