//! Per-request passes over a component pool.
//!
//! This crate applies:
//! - User-scoped overrides onto `arguments.data.config`
//! - Argument resolution through an expression evaluator
//!
//! Both passes run after the pool has been built or restored from cache and
//! their results are never cached.

mod arguments;
mod evaluators;
mod overrides;

pub use arguments::resolve_arguments;
pub use evaluators::{PassthroughEvaluator, TokenEvaluator};
pub use overrides::{apply_overrides, override_set_from_map, MemoryOverrideStore, CONFIG_PATH};
