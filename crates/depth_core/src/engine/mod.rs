//! Depth chart ordering engine.
//!
//! Stateless: each operation reads a roster snapshot and returns the
//! [`PlayerUpdate`]s that keep every position densely ordered.

pub mod density;
pub mod ordering;

pub use density::{apply_updates, check_dense, is_dense, normalize_orders, DensityViolation};
pub use ordering::{
    append_order, count_at, move_to_position, reorder_within_position, swap, PlayerUpdate,
};
