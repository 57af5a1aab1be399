//! Slice averaging along one axis of a volume
//!
//! - [`sliding`]: overlapping, centered windows (one output slice per input slice)
//! - [`block`]: non-overlapping blocks (one output slice per block)

pub mod block;
pub mod sliding;

pub use block::block_average;
pub use sliding::{average_per_bscan, window_offset};
