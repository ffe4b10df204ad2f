//! Component pool assembly for uiconf.
//!
//! This crate handles:
//! - Instance naming (explicit names and stable anonymous names)
//! - Schema/descriptor merging for attributes and arguments
//! - Depth-first construction of the arena-backed pool

mod builder;
mod naming;

pub use builder::{build_pool, TreeBuilder};
pub use naming::{anonymous_name, instance_name, ANONYMOUS_PREFIX};
