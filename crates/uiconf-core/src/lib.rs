//! Core types and contracts for assembling UI component configuration.
//!
//! This crate provides the foundational pieces shared by every other uiconf crate:
//! - The configuration value model and its typed deep merge
//! - Raw descriptors as read from a descriptor source
//! - The arena-backed component pool
//! - Collaborator traits (descriptor source, evaluator, cache store, override store)
//! - Error types

pub mod descriptor;
pub mod errors;
pub mod merge;
pub mod pool;
pub mod traits;
pub mod value;

pub use descriptor::*;
pub use errors::*;
pub use merge::{deep_merge, merged};
pub use pool::*;
pub use traits::*;
pub use value::*;

/// Attribute holding the explicit instance name of a component.
pub const NAME_ATTRIBUTE: &str = "name";

/// Attribute injected by schema-aware descriptor sources; never part of configuration.
pub const SCHEMA_LOCATION_ATTRIBUTE: &str = "noNamespaceSchemaLocation";
