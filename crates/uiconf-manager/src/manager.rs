//! The preparation pipeline.

use std::rc::Rc;

use tracing::{debug, info};
use uiconf_builder::build_pool;
use uiconf_cache::{CacheStatus, MemoryCacheStore, PoolCache};
use uiconf_core::{
    CacheStore, ComponentPool, ComponentSchema, ExpressionEvaluator, OverrideStore, PrepareError,
    ReaderFactory, SchemaProvider, UiConfigError,
};
use uiconf_resolver::{apply_overrides, resolve_arguments, MemoryOverrideStore, PassthroughEvaluator};

use crate::context::SessionContext;
use crate::options::ManagerOptions;

/// Prepares the resolved configuration of UI surfaces.
///
/// A manager owns its collaborators and holds no per-request state; the
/// prepared pools live in the [`SessionContext`] passed to each call. Every
/// preparation runs:
/// 1. Pool resolution (cache, or read and build on a miss)
/// 2. The override overlay
/// 3. Argument resolution
///
/// Steps 2 and 3 never touch the cache.
pub struct Manager {
    readers: Box<dyn ReaderFactory>,
    schemas: Box<dyn SchemaProvider>,
    cache: PoolCache,
    overrides: Box<dyn OverrideStore>,
    evaluator: Box<dyn ExpressionEvaluator>,
    options: ManagerOptions,
}

impl Manager {
    /// Start building a manager over a descriptor source.
    pub fn builder(
        readers: impl ReaderFactory + 'static,
        schemas: impl SchemaProvider + 'static,
    ) -> ManagerBuilder {
        ManagerBuilder::new(readers, schemas)
    }

    pub fn options(&self) -> &ManagerOptions {
        &self.options
    }

    pub fn cache(&self) -> &PoolCache {
        &self.cache
    }

    /// Prepare `surface` and store its resolved pool in `ctx`.
    ///
    /// Fails without touching `ctx` when the name is empty or already
    /// prepared in `ctx`. Collaborator errors propagate unchanged and leave
    /// no entry behind.
    pub fn prepare_data(
        &self,
        ctx: &mut SessionContext,
        surface: &str,
    ) -> Result<CacheStatus, UiConfigError> {
        if surface.is_empty() {
            return Err(PrepareError::EmptySurfaceName.into());
        }
        if ctx.has_data(surface) {
            return Err(PrepareError::DuplicatePreparation {
                surface: surface.to_string(),
            }
            .into());
        }

        let registry = &mut ctx.readers;
        let (mut pool, status) =
            self.cache
                .resolve_pool(surface, || -> Result<ComponentPool, UiConfigError> {
                    let reader = registry.get_or_create(surface, self.readers.as_ref())?;
                    let graph = reader.read()?;
                    debug!(surface, "building component pool");
                    Ok(build_pool(surface, &graph, self.schemas.as_ref())?)
                })?;

        if self.options.apply_overrides {
            let domain = self.options.override_domain_for(surface);
            let set = self.overrides.overrides_for(domain)?;
            let applied = apply_overrides(&mut pool, &set);
            debug!(surface, domain, applied, "applied overrides");
        }

        resolve_arguments(&mut pool, self.evaluator.as_ref())?;

        info!(surface, nodes = pool.len(), cache = ?status, "prepared component configuration");
        ctx.insert(surface, pool);
        Ok(status)
    }

    /// The resolved pool of `surface` in `ctx`, or `None` if not prepared.
    pub fn get_data<'c>(&self, ctx: &'c SessionContext, surface: &str) -> Option<&'c ComponentPool> {
        ctx.get_data(surface)
    }

    /// Drop the cached pool of `surface`. Returns whether one was stored.
    pub fn invalidate(&self, surface: &str) -> Result<bool, UiConfigError> {
        Ok(self.cache.invalidate(surface)?)
    }

    /// The schema of a component type, with its arguments resolved when
    /// `evaluated` is set.
    pub fn raw_component_data(
        &self,
        component_type: &str,
        evaluated: bool,
    ) -> Result<ComponentSchema, UiConfigError> {
        let mut schema = self.schemas.component_data(component_type)?;
        if evaluated {
            for value in schema.arguments.values_mut() {
                *value = self.evaluator.evaluate(value)?;
            }
        }
        Ok(schema)
    }
}

impl std::fmt::Debug for Manager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Manager")
            .field("cache", &self.cache)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// Assembles a [`Manager`].
///
/// Collaborators left unset default to an in-memory cache store, an empty
/// override store and an evaluator that returns arguments unchanged.
pub struct ManagerBuilder {
    readers: Box<dyn ReaderFactory>,
    schemas: Box<dyn SchemaProvider>,
    cache_store: Box<dyn CacheStore>,
    overrides: Box<dyn OverrideStore>,
    evaluator: Box<dyn ExpressionEvaluator>,
    options: ManagerOptions,
}

impl ManagerBuilder {
    pub fn new(
        readers: impl ReaderFactory + 'static,
        schemas: impl SchemaProvider + 'static,
    ) -> Self {
        Self {
            readers: Box::new(readers),
            schemas: Box::new(schemas),
            cache_store: Box::new(MemoryCacheStore::new()),
            overrides: Box::new(MemoryOverrideStore::new()),
            evaluator: Box::new(PassthroughEvaluator),
            options: ManagerOptions::default(),
        }
    }

    /// Use one source for both readers and schemas.
    pub fn from_source<S>(source: S) -> Self
    where
        S: ReaderFactory + SchemaProvider + 'static,
    {
        let source = Rc::new(source);
        Self::new(Rc::clone(&source), source)
    }

    pub fn cache_store(mut self, store: impl CacheStore + 'static) -> Self {
        self.cache_store = Box::new(store);
        self
    }

    pub fn override_store(mut self, store: impl OverrideStore + 'static) -> Self {
        self.overrides = Box::new(store);
        self
    }

    pub fn evaluator(mut self, evaluator: impl ExpressionEvaluator + 'static) -> Self {
        self.evaluator = Box::new(evaluator);
        self
    }

    pub fn options(mut self, options: ManagerOptions) -> Self {
        self.options = options;
        self
    }

    pub fn build(self) -> Manager {
        let cache = PoolCache::from_boxed(self.cache_store)
            .with_namespace(self.options.cache_namespace.clone())
            .with_enabled(self.options.cache_enabled);
        Manager {
            readers: self.readers,
            schemas: self.schemas,
            cache,
            overrides: self.overrides,
            evaluator: self.evaluator,
            options: self.options,
        }
    }
}
