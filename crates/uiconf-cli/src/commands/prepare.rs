//! `uiconf prepare`.

use std::path::PathBuf;

use tracing::info;
use uiconf_cache::FileCacheStore;
use uiconf_manager::{ManagerBuilder, SessionContext};
use uiconf_resolver::{override_set_from_map, MemoryOverrideStore, TokenEvaluator};
use uiconf_source::JsonDirectorySource;

use super::{load_options, read_json_map};
use crate::render::pool_to_json;

pub struct PrepareArgs {
    pub surface: String,
    pub source: PathBuf,
    pub cache_dir: Option<PathBuf>,
    pub overrides: Option<PathBuf>,
    pub tokens: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub pretty: bool,
}

/// Prepare the surface and return its tree as JSON text.
pub fn run(args: &PrepareArgs) -> Result<String, Box<dyn std::error::Error>> {
    let options = load_options(args.config.as_deref())?;
    let domain = options.override_domain_for(&args.surface).to_string();

    let mut builder = ManagerBuilder::from_source(JsonDirectorySource::open(&args.source)?)
        .options(options);
    if let Some(dir) = &args.cache_dir {
        builder = builder.cache_store(FileCacheStore::new(dir));
    }
    if let Some(path) = &args.overrides {
        let set = override_set_from_map(&read_json_map(path)?);
        builder = builder.override_store(MemoryOverrideStore::new().with_domain(&domain, set));
    }
    if let Some(path) = &args.tokens {
        builder = builder.evaluator(TokenEvaluator::from_map(&read_json_map(path)?));
    }
    let manager = builder.build();

    let mut ctx = SessionContext::new();
    let status = manager.prepare_data(&mut ctx, &args.surface)?;
    let pool = manager
        .get_data(&ctx, &args.surface)
        .ok_or("prepared surface is missing from the session")?;
    info!(surface = %args.surface, nodes = pool.len(), cache = ?status, "done");

    let json = pool_to_json(pool);
    let text = if args.pretty {
        serde_json::to_string_pretty(&json)?
    } else {
        serde_json::to_string(&json)?
    };
    Ok(text)
}
