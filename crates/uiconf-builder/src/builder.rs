//! Tree construction.
//!
//! Builds a pool depth-first, pre-order:
//! 1. Look up the schema of the group's component type
//! 2. For every descriptor in the group, derive its instance name
//! 3. Deep-merge schema arguments and attributes with the descriptor's own
//! 4. Insert the node, then recurse into each nested child group

use std::collections::HashMap;

use tracing::debug;
use uiconf_core::{
    merged, BuildError, ComponentNode, ComponentPool, ComponentSchema, ConfigMap, Descriptor,
    DescriptorGraph, DescriptorGroup, NodeId, SchemaProvider, Value, NAME_ATTRIBUTE,
    SCHEMA_LOCATION_ATTRIBUTE,
};

use crate::naming::instance_name;

/// Build the pool of a surface from its descriptor graph.
///
/// The root is the first entry of the first top-level group. When the root
/// declares no `name` attribute, the surface name is used.
///
/// Anonymous names only encode the component type and the position within
/// the group, not the parent. Two parents that each hold an unnamed child of
/// the same type at the same position therefore fail with
/// [`BuildError::DuplicateInstanceName`]; name one of the children to build
/// such a tree.
pub fn build_pool(
    surface: &str,
    graph: &DescriptorGraph,
    schemas: &dyn SchemaProvider,
) -> Result<ComponentPool, BuildError> {
    let mut builder = TreeBuilder::new(schemas);
    builder.build(surface, graph)?;
    Ok(builder.finish())
}

/// Pool builder state.
pub struct TreeBuilder<'a> {
    schemas: &'a dyn SchemaProvider,
    /// Schemas already fetched during this build.
    schema_cache: HashMap<String, ComponentSchema>,
    pool: ComponentPool,
}

impl<'a> TreeBuilder<'a> {
    pub fn new(schemas: &'a dyn SchemaProvider) -> Self {
        Self {
            schemas,
            schema_cache: HashMap::new(),
            pool: ComponentPool::new(),
        }
    }

    /// Add the tree of `graph` to the pool.
    pub fn build(&mut self, surface: &str, graph: &DescriptorGraph) -> Result<NodeId, BuildError> {
        let (root_type, root) = graph.root().ok_or_else(|| BuildError::EmptyDescriptor {
            surface: surface.to_string(),
        })?;

        let mut root = root.clone();
        root.attributes = with_default_name(surface, root.attributes);

        let group: DescriptorGroup = std::iter::once(root).collect();
        let created = self.build_group(root_type, &group, None)?;
        debug!(
            surface,
            root_type,
            nodes = self.pool.len(),
            "built component pool"
        );
        created
            .first()
            .copied()
            .ok_or_else(|| BuildError::EmptyDescriptor {
                surface: surface.to_string(),
            })
    }

    /// Take the finished pool.
    pub fn finish(self) -> ComponentPool {
        self.pool
    }

    fn build_group(
        &mut self,
        component_type: &str,
        group: &DescriptorGroup,
        parent: Option<NodeId>,
    ) -> Result<Vec<NodeId>, BuildError> {
        if group.is_empty() {
            return Ok(Vec::new());
        }

        let schema = self.schema(component_type)?;
        let mut created = Vec::with_capacity(group.len());

        for (position_key, descriptor) in group.iter() {
            let node = ComponentNode::new(
                instance_name(descriptor, component_type, position_key),
                component_type,
            )
            .with_arguments(merged(&schema.arguments, &descriptor.arguments))
            .with_attributes(merge_attributes(&schema, descriptor));

            let id = match parent {
                Some(parent) => self.pool.add_child(parent, node)?,
                None => self.pool.add_root(node)?,
            };

            for (child_type, child_group) in &descriptor.children {
                self.build_group(child_type, child_group, Some(id))?;
            }
            created.push(id);
        }

        Ok(created)
    }

    fn schema(&mut self, component_type: &str) -> Result<ComponentSchema, BuildError> {
        if let Some(schema) = self.schema_cache.get(component_type) {
            return Ok(schema.clone());
        }
        let schema = self.schemas.component_data(component_type)?;
        self.schema_cache
            .insert(component_type.to_string(), schema.clone());
        Ok(schema)
    }
}

fn merge_attributes(schema: &ComponentSchema, descriptor: &Descriptor) -> ConfigMap {
    let mut own = descriptor.attributes.clone();
    own.shift_remove(SCHEMA_LOCATION_ATTRIBUTE);
    merged(&schema.attributes, &own)
}

/// Put `name = surface` first, keeping any explicitly declared name.
fn with_default_name(surface: &str, attributes: ConfigMap) -> ConfigMap {
    let mut result = ConfigMap::with_capacity(attributes.len() + 1);
    result.insert(NAME_ATTRIBUTE.to_string(), Value::from(surface));
    result.extend(attributes);
    result
}
