//! Typed deep merge for configuration maps.
//!
//! Precedence is always "later argument wins": keys of the overlay replace keys
//! of the base, except that two maps under the same key are merged recursively.
//! Lists are replaced as a whole.

use crate::value::{ConfigMap, Value};

/// Merge `overlay` into `base` in place.
pub fn deep_merge(base: &mut ConfigMap, overlay: &ConfigMap) {
    for (key, incoming) in overlay {
        if let (Some(Value::Map(existing)), Value::Map(incoming)) = (base.get_mut(key), incoming) {
            deep_merge(existing, incoming);
            continue;
        }
        base.insert(key.clone(), incoming.clone());
    }
}

/// Merge `overlay` over a copy of `base`.
pub fn merged(base: &ConfigMap, overlay: &ConfigMap) -> ConfigMap {
    let mut result = base.clone();
    deep_merge(&mut result, overlay);
    result
}
