//! User-scoped override overlay.
//!
//! An override set maps a parent instance name to the fragments of its
//! children. The fragment of child `C` under parent `P` is deep-merged into
//! `C`'s `arguments.data.config`, override values winning. Non-map fragments
//! are ignored and existing keys are never removed.

use std::collections::HashMap;

use tracing::debug;
use uiconf_core::{
    deep_merge, ensure_map, ComponentPool, ConfigMap, NodeId, OverrideError, OverrideSet,
    OverrideStore, Value,
};

/// Argument path receiving override fragments.
pub const CONFIG_PATH: [&str; 2] = ["data", "config"];

/// Merge matching fragments into the pool. Returns the number of nodes changed.
pub fn apply_overrides(pool: &mut ComponentPool, overrides: &OverrideSet) -> usize {
    if overrides.is_empty() {
        return 0;
    }

    let mut applied = 0;
    for id in pool.preorder() {
        let Some(fragment) = matching_fragment(pool, id, overrides).and_then(Value::as_map) else {
            continue;
        };
        if let Some(node) = pool.get_mut(id) {
            deep_merge(ensure_map(&mut node.arguments, &CONFIG_PATH), fragment);
            debug!(instance = %node.instance_name, keys = fragment.len(), "applied override");
            applied += 1;
        }
    }
    applied
}

fn matching_fragment<'a>(
    pool: &ComponentPool,
    id: NodeId,
    overrides: &'a OverrideSet,
) -> Option<&'a Value> {
    let parent_name = pool.parent(id)?.name_attribute()?;
    let child_name = pool.get(id)?.name_attribute()?;
    overrides.get(&parent_name)?.get(&child_name)
}

/// Read an override set from a plain map of `parent -> {child -> fragment}`.
///
/// Entries whose value is not a map are skipped.
pub fn override_set_from_map(map: &ConfigMap) -> OverrideSet {
    map.iter()
        .filter_map(|(parent, children)| {
            children
                .as_map()
                .map(|children| (parent.clone(), children.clone()))
        })
        .collect()
}

/// Override sets held in memory, keyed by domain.
#[derive(Debug, Clone, Default)]
pub struct MemoryOverrideStore {
    domains: HashMap<String, OverrideSet>,
}

impl MemoryOverrideStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole set of a domain.
    pub fn with_domain(mut self, domain: &str, set: OverrideSet) -> Self {
        self.domains.insert(domain.to_string(), set);
        self
    }

    /// Add one fragment.
    pub fn with_fragment(mut self, domain: &str, parent: &str, child: &str, fragment: ConfigMap) -> Self {
        self.domains
            .entry(domain.to_string())
            .or_default()
            .entry(parent.to_string())
            .or_default()
            .insert(child.to_string(), Value::Map(fragment));
        self
    }
}

impl OverrideStore for MemoryOverrideStore {
    fn overrides_for(&self, domain: &str) -> Result<OverrideSet, OverrideError> {
        Ok(self.domains.get(domain).cloned().unwrap_or_default())
    }
}
