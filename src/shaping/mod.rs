//! Changing the layout of volumes without changing their samples
//!
//! - [`shape_spec`]: typed reshape descriptors (`(-1,3,:,:)`)
//! - [`reshape`]: reshape by descriptor
//! - [`split`]: uniform split into sub-volumes
//! - [`stack`]: stack an ordered list of volumes

pub mod reshape;
pub mod shape_spec;
pub mod split;
pub mod stack;

pub use reshape::reshape_volume;
pub use shape_spec::{ShapeSpec, ShapeToken};
pub use split::split_volume;
pub use stack::stack_arrays;
