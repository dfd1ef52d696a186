//! # Order State Machine
//!
//! The fixed legal-transition table for order statuses together with the
//! date side effects each transition implies. All functions here are
//! pure; persistence and I/O happen at the caller.

pub mod errors;
pub mod states;
pub mod transitions;

// Re-export main types for convenient access
pub use errors::StateMachineError;
pub use states::OrderStatus;
pub use transitions::{allowed_targets, can_transition, plan_transition, DateEffect};
