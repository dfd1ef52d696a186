//! # Data Layer
//!
//! SQLx-backed models for the order store. Each model owns its queries as
//! async associated functions taking the pool.

pub mod laboratory;
pub mod label;
pub mod prosthesis_order;

// Re-export core models for easy access
pub use laboratory::{Laboratory, LaboratoryUpdate, NewLaboratory};
pub use label::{Label, NewLabel};
pub use prosthesis_order::{NewProsthesisOrder, ProsthesisOrder, ProsthesisOrderUpdate};
