//! Descriptor sources for uiconf.
//!
//! This crate provides:
//! - An in-memory source for embedding and tests
//! - A JSON directory source (`<surface>.json` plus `definition.json`)
//! - The reader registry that creates one reader per surface on first use

mod json;
mod memory;
mod registry;

pub use json::{parse_graph, parse_schemas, JsonDirectorySource, JsonFileReader, DEFINITION_FILE};
pub use memory::MemorySource;
pub use registry::ReaderRegistry;
