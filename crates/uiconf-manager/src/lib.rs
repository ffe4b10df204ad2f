//! Preparation of resolved UI component configuration.
//!
//! This crate ties the pipeline together:
//! - [`Manager`] owns the descriptor source, cache, override store and evaluator
//! - [`SessionContext`] holds what one request has prepared
//! - [`ManagerOptions`] configures caching and overrides, in code or from TOML
//!
//! ```no_run
//! use uiconf_manager::{ManagerBuilder, SessionContext};
//! use uiconf_source::JsonDirectorySource;
//!
//! let manager = ManagerBuilder::from_source(JsonDirectorySource::open("ui")?).build();
//! let mut ctx = SessionContext::new();
//! manager.prepare_data(&mut ctx, "cms_page_listing")?;
//! let pool = manager.get_data(&ctx, "cms_page_listing");
//! # Ok::<(), uiconf_core::UiConfigError>(())
//! ```

mod context;
mod manager;
mod options;

pub use context::SessionContext;
pub use manager::{Manager, ManagerBuilder};
pub use options::{ManagerOptions, OptionsError};

pub use uiconf_cache::CacheStatus;
