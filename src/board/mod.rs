//! # Board Projection
//!
//! Pure projection of the canonical order list into the five pipeline
//! buckets, with filter intersection. Nothing in here touches the
//! database or mutates its input; the controller recomputes the
//! projection whenever the order list or the filter set changes.

pub mod filters;
pub mod projection;

pub use filters::BoardFilters;
pub use projection::{project, Board, BOARD_STATUSES};
