#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Prosthesis Core
//!
//! Lifecycle engine for dental prosthesis work orders moving between a
//! clinic and external laboratories.
//!
//! ## Overview
//!
//! Every order travels through an explicit state machine (`pending ->
//! sent -> returned -> completed -> archived`, with cancel and rollback
//! edges) where each move is validated against a legal-transition table
//! and carries deterministic side effects on the shipment dates. Around
//! that core sit a delay calculator, a tenant-scoped laboratory registry
//! with resolve-or-create semantics, a persisted label catalog with
//! restorable defaults, a pure board projection with filter intersection,
//! and an async client controller that reconciles optimistic local moves
//! with the authoritative server state.
//!
//! ## Module Organization
//!
//! - [`state_machine`] - Order statuses, the transition table, and date effects
//! - [`models`] - SQLx data layer: orders, laboratories, labels
//! - [`sla`] - Delay and due-date arithmetic
//! - [`board`] - Bucket projection and filters
//! - [`web`] - Axum HTTP surface
//! - [`client`] - API client and board controller
//! - [`config`] - Environment-driven configuration
//! - [`error`] - Structured error handling
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use prosthesis_core::state_machine::{can_transition, OrderStatus};
//!
//! assert!(can_transition(OrderStatus::Pending, OrderStatus::Sent));
//! assert!(!can_transition(OrderStatus::Archived, OrderStatus::Sent));
//! ```

pub mod board;
pub mod client;
pub mod config;
pub mod constants;
pub mod database;
pub mod error;
pub mod logging;
pub mod models;
pub mod sla;
pub mod state_machine;
pub mod web;

pub use board::{project, Board, BoardFilters};
pub use config::ProsthesisConfig;
pub use constants::{DEFAULT_LABELS, PROSTHESIS_TYPES};
pub use error::{ProsthesisError, Result};
pub use models::{Label, Laboratory, NewProsthesisOrder, ProsthesisOrder, ProsthesisOrderUpdate};
pub use state_machine::{
    allowed_targets, can_transition, plan_transition, DateEffect, OrderStatus, StateMachineError,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
