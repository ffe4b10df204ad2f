//! The component pool: a flat, insertion-ordered node table.
//!
//! Every node of a surface lives in one table keyed by its instance name.
//! Nesting is expressed only through index-based child references, so a pool
//! can be serialized and restored without any pointer fix-ups.

use crate::errors::BuildError;
use crate::value::{lookup, ConfigMap, Value};
use crate::NAME_ATTRIBUTE;
use indexmap::IndexMap;

/// Position of a node in its pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct NodeId(pub usize);

/// One assembled component instance.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComponentNode {
    /// Unique name within the pool
    pub instance_name: String,
    /// Component type this node instantiates
    pub component_type: String,
    /// Schema attributes overlaid with the descriptor's own
    pub attributes: ConfigMap,
    /// Schema arguments deep-merged with the descriptor's own
    pub arguments: ConfigMap,
    /// Parent node (None for the root)
    pub parent: Option<NodeId>,
    /// Child nodes in declaration order
    pub children: Vec<NodeId>,
}

impl ComponentNode {
    /// Create a node with empty configuration.
    pub fn new(instance_name: impl Into<String>, component_type: impl Into<String>) -> Self {
        Self {
            instance_name: instance_name.into(),
            component_type: component_type.into(),
            attributes: ConfigMap::new(),
            arguments: ConfigMap::new(),
            parent: None,
            children: Vec::new(),
        }
    }

    /// Set the attributes.
    pub fn with_attributes(mut self, attributes: ConfigMap) -> Self {
        self.attributes = attributes;
        self
    }

    /// Set the arguments.
    pub fn with_arguments(mut self, arguments: ConfigMap) -> Self {
        self.arguments = arguments;
        self
    }

    /// The `name` attribute as plain text, if any.
    pub fn name_attribute(&self) -> Option<String> {
        self.attributes
            .get(NAME_ATTRIBUTE)
            .and_then(Value::to_scalar_string)
    }

    /// The `data.config` region of the arguments, if present.
    pub fn config(&self) -> Option<&ConfigMap> {
        lookup(&self.arguments, &["data", "config"]).and_then(Value::as_map)
    }
}

/// All nodes of one surface, before or after resolution.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComponentPool {
    nodes: IndexMap<String, ComponentNode>,
    root: Option<NodeId>,
}

impl ComponentPool {
    /// Create an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the root node. A pool holds at most one root.
    pub fn add_root(&mut self, mut node: ComponentNode) -> Result<NodeId, BuildError> {
        if let Some(existing) = self.root_node() {
            return Err(BuildError::MultipleRoots {
                existing: existing.instance_name.clone(),
                rejected: node.instance_name,
            });
        }
        node.parent = None;
        let id = self.insert(node)?;
        self.root = Some(id);
        Ok(id)
    }

    /// Add a node as the last child of `parent`.
    pub fn add_child(
        &mut self,
        parent: NodeId,
        mut node: ComponentNode,
    ) -> Result<NodeId, BuildError> {
        if self.get(parent).is_none() {
            return Err(BuildError::UnknownParent { parent: parent.0 });
        }
        node.parent = Some(parent);
        let id = self.insert(node)?;
        if let Some(parent) = self.get_mut(parent) {
            parent.children.push(id);
        }
        Ok(id)
    }

    fn insert(&mut self, node: ComponentNode) -> Result<NodeId, BuildError> {
        if self.nodes.contains_key(&node.instance_name) {
            return Err(BuildError::DuplicateInstanceName {
                name: node.instance_name,
            });
        }
        let (index, _) = self.nodes.insert_full(node.instance_name.clone(), node);
        Ok(NodeId(index))
    }

    /// Get a node by ID.
    pub fn get(&self, id: NodeId) -> Option<&ComponentNode> {
        self.nodes.get_index(id.0).map(|(_, node)| node)
    }

    /// Get a mutable node by ID.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut ComponentNode> {
        self.nodes.get_index_mut(id.0).map(|(_, node)| node)
    }

    /// Get a node by instance name.
    pub fn get_by_name(&self, instance_name: &str) -> Option<&ComponentNode> {
        self.nodes.get(instance_name)
    }

    /// Get the ID of a node by instance name.
    pub fn id_of(&self, instance_name: &str) -> Option<NodeId> {
        self.nodes.get_index_of(instance_name).map(NodeId)
    }

    /// Check whether an instance name is present.
    pub fn contains(&self, instance_name: &str) -> bool {
        self.nodes.contains_key(instance_name)
    }

    /// The root node ID.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// The root node.
    pub fn root_node(&self) -> Option<&ComponentNode> {
        self.root.and_then(|id| self.get(id))
    }

    /// Children of a node, in declaration order.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = &ComponentNode> {
        self.get(id)
            .into_iter()
            .flat_map(|node| node.children.iter())
            .filter_map(|child| self.get(*child))
    }

    /// Parent of a node.
    pub fn parent(&self, id: NodeId) -> Option<&ComponentNode> {
        self.get(id)?.parent.and_then(|parent| self.get(parent))
    }

    /// Iterate all nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &ComponentNode> {
        self.nodes.values()
    }

    /// Iterate all instance names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    /// Node IDs in depth-first pre-order starting at the root.
    pub fn preorder(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<NodeId> = self.root.into_iter().collect();
        while let Some(id) = stack.pop() {
            if let Some(node) = self.get(id) {
                order.push(id);
                stack.extend(node.children.iter().rev().copied());
            }
        }
        order
    }

    /// Depth of the deepest node (a lone root has depth 1).
    pub fn depth(&self) -> usize {
        fn walk(pool: &ComponentPool, id: NodeId) -> usize {
            1 + pool
                .get(id)
                .map(|node| node.children.iter().map(|c| walk(pool, *c)).max().unwrap_or(0))
                .unwrap_or(0)
        }
        self.root.map(|root| walk(self, root)).unwrap_or(0)
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the pool is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Check the structural invariants of a pool restored from outside.
    ///
    /// Every reference must point inside the table, every key must match its
    /// node's instance name, parent and child links must agree, and every
    /// node must be reachable exactly once from the root.
    pub fn is_consistent(&self) -> bool {
        let in_range = |id: NodeId| id.0 < self.nodes.len();

        if self.nodes.is_empty() {
            return self.root.is_none();
        }
        let Some(root) = self.root else {
            return false;
        };
        if !in_range(root) {
            return false;
        }

        for (index, (name, node)) in self.nodes.iter().enumerate() {
            if *name != node.instance_name {
                return false;
            }
            match node.parent {
                None if NodeId(index) != root => return false,
                Some(_) if NodeId(index) == root => return false,
                Some(parent) => {
                    if !in_range(parent) || !self.nodes[parent.0].children.contains(&NodeId(index)) {
                        return false;
                    }
                }
                None => {}
            }
            if node.children.iter().any(|child| {
                !in_range(*child) || self.nodes[child.0].parent != Some(NodeId(index))
            }) {
                return false;
            }
        }

        let mut seen = vec![false; self.nodes.len()];
        for id in self.preorder() {
            if std::mem::replace(&mut seen[id.0], true) {
                return false;
            }
        }
        seen.into_iter().all(|visited| visited)
    }
}
