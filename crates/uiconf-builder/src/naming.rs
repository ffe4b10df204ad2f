//! Instance naming.

use uiconf_core::Descriptor;

/// Prefix of synthesized instance names.
pub const ANONYMOUS_PREFIX: &str = "anonymous";

/// Name of a descriptor instance within its pool.
///
/// An explicit scalar `name` attribute is used verbatim. Anything else gets
/// `anonymous_<component type>_<position key>`, which stays the same across
/// rebuilds of the same input.
pub fn instance_name(descriptor: &Descriptor, component_type: &str, position_key: &str) -> String {
    descriptor
        .name()
        .and_then(|name| name.to_scalar_string())
        .unwrap_or_else(|| anonymous_name(component_type, position_key))
}

/// Synthesized name for an unnamed descriptor.
pub fn anonymous_name(component_type: &str, position_key: &str) -> String {
    format!("{ANONYMOUS_PREFIX}_{component_type}_{position_key}")
}
