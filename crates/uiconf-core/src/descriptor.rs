//! Raw component descriptors as produced by a descriptor source.

use crate::value::{ConfigMap, Value};
use crate::NAME_ATTRIBUTE;
use indexmap::IndexMap;

/// One unresolved component instance.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Descriptor {
    pub attributes: ConfigMap,
    pub arguments: ConfigMap,
    /// Nested groups keyed by component type, in declaration order.
    pub children: IndexMap<String, DescriptorGroup>,
}

impl Descriptor {
    pub fn new() -> Self {
        Self::default()
    }

    /// The explicit `name` attribute, if declared.
    pub fn name(&self) -> Option<&Value> {
        self.attributes.get(NAME_ATTRIBUTE)
    }

    /// Set an attribute.
    pub fn with_attribute(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.to_string(), value.into());
        self
    }

    /// Set the `name` attribute.
    pub fn named(self, name: &str) -> Self {
        self.with_attribute(NAME_ATTRIBUTE, name)
    }

    /// Set a raw argument.
    pub fn with_argument(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.arguments.insert(key.to_string(), value.into());
        self
    }

    /// Append a child of the given component type at the next position.
    pub fn with_child(mut self, component_type: &str, child: Descriptor) -> Self {
        self.children
            .entry(component_type.to_string())
            .or_default()
            .push(child);
        self
    }

    /// Replace the whole child group of a component type.
    pub fn with_group(mut self, component_type: &str, group: DescriptorGroup) -> Self {
        self.children.insert(component_type.to_string(), group);
        self
    }
}

/// The instances of one component type declared at one place.
///
/// Entries are keyed by their position key: an auto-assigned index for
/// appended entries, or the key they were declared under.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DescriptorGroup {
    entries: IndexMap<String, Descriptor>,
    next_index: usize,
}

impl DescriptorGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry under the next free index.
    pub fn push(&mut self, descriptor: Descriptor) {
        while self.entries.contains_key(&self.next_index.to_string()) {
            self.next_index += 1;
        }
        self.entries.insert(self.next_index.to_string(), descriptor);
        self.next_index += 1;
    }

    /// Insert an entry under a declared key, replacing any previous entry.
    pub fn insert(&mut self, key: impl Into<String>, descriptor: Descriptor) {
        self.entries.insert(key.into(), descriptor);
    }

    pub fn get(&self, key: &str) -> Option<&Descriptor> {
        self.entries.get(key)
    }

    /// The first declared entry.
    pub fn first(&self) -> Option<(&str, &Descriptor)> {
        self.entries.first().map(|(k, d)| (k.as_str(), d))
    }

    /// Iterate `(position key, descriptor)` in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Descriptor)> {
        self.entries.iter().map(|(k, d)| (k.as_str(), d))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<Descriptor> for DescriptorGroup {
    fn from_iter<T: IntoIterator<Item = Descriptor>>(iter: T) -> Self {
        let mut group = DescriptorGroup::new();
        for descriptor in iter {
            group.push(descriptor);
        }
        group
    }
}

/// Everything a descriptor source returns for one surface: top-level groups
/// keyed by component type.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DescriptorGraph {
    groups: IndexMap<String, DescriptorGroup>,
}

impl DescriptorGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// A graph holding a single root descriptor of the given type.
    pub fn with_root(component_type: &str, root: Descriptor) -> Self {
        let mut graph = Self::new();
        graph.insert_group(component_type, std::iter::once(root).collect());
        graph
    }

    pub fn insert_group(&mut self, component_type: &str, group: DescriptorGroup) {
        self.groups.insert(component_type.to_string(), group);
    }

    /// The tree root: the first entry of the first top-level group.
    ///
    /// Callers are expected to supply exactly one root; anything after the
    /// first entry is ignored.
    pub fn root(&self) -> Option<(&str, &Descriptor)> {
        let (component_type, group) = self.groups.first()?;
        group.first().map(|(_, root)| (component_type.as_str(), root))
    }

    pub fn groups(&self) -> impl Iterator<Item = (&str, &DescriptorGroup)> {
        self.groups.iter().map(|(k, g)| (k.as_str(), g))
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// The schema of a component type: its default attributes and arguments.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComponentSchema {
    #[cfg_attr(feature = "serde", serde(default))]
    pub attributes: ConfigMap,
    #[cfg_attr(feature = "serde", serde(default))]
    pub arguments: ConfigMap,
}

impl ComponentSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attribute(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.to_string(), value.into());
        self
    }

    pub fn with_argument(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.arguments.insert(key.to_string(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_push_assigns_indices() {
        let group: DescriptorGroup = vec![Descriptor::new(), Descriptor::new().named("b")]
            .into_iter()
            .collect();

        let keys: Vec<_> = group.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["0", "1"]);
    }

    #[test]
    fn test_group_push_skips_declared_keys() {
        let mut group = DescriptorGroup::new();
        group.insert("0", Descriptor::new().named("declared"));
        group.push(Descriptor::new());

        let keys: Vec<_> = group.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["0", "1"]);
    }

    #[test]
    fn test_graph_root_takes_first_entry() {
        let mut graph = DescriptorGraph::new();
        graph.insert_group(
            "listing",
            vec![Descriptor::new().named("first"), Descriptor::new().named("second")]
                .into_iter()
                .collect(),
        );

        let (component_type, root) = graph.root().unwrap();
        assert_eq!(component_type, "listing");
        assert_eq!(root.name(), Some(&Value::from("first")));
    }

    #[test]
    fn test_empty_graph_has_no_root() {
        assert!(DescriptorGraph::new().root().is_none());

        let mut graph = DescriptorGraph::new();
        graph.insert_group("listing", DescriptorGroup::new());
        graph.insert_group("form", std::iter::once(Descriptor::new()).collect());
        assert!(graph.root().is_none());
    }

    #[test]
    fn test_descriptor_children_keep_declaration_order() {
        let descriptor = Descriptor::new()
            .with_child("columns", Descriptor::new())
            .with_child("filters", Descriptor::new())
            .with_child("columns", Descriptor::new());

        let types: Vec<_> = descriptor.children.keys().map(String::as_str).collect();
        assert_eq!(types, vec!["columns", "filters"]);
        assert_eq!(descriptor.children["columns"].len(), 2);
    }
}
