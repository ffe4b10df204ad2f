//! JSON rendering of a resolved pool.

use serde_json::{Map, Value as Json};
use uiconf_core::{ComponentPool, ConfigMap, NodeId, Value};

/// Render the pool as a nested tree starting at the root.
///
/// Each node becomes `{name, type, attributes, arguments, children}`. An empty
/// pool renders as `null`.
pub fn pool_to_json(pool: &ComponentPool) -> Json {
    pool.root()
        .map(|root| node_to_json(pool, root))
        .unwrap_or(Json::Null)
}

fn node_to_json(pool: &ComponentPool, id: NodeId) -> Json {
    let Some(node) = pool.get(id) else {
        return Json::Null;
    };
    let mut object = Map::new();
    object.insert("name".into(), node.instance_name.clone().into());
    object.insert("type".into(), node.component_type.clone().into());
    object.insert("attributes".into(), map_to_json(&node.attributes));
    object.insert("arguments".into(), map_to_json(&node.arguments));
    object.insert(
        "children".into(),
        Json::Array(
            node.children
                .iter()
                .map(|child| node_to_json(pool, *child))
                .collect(),
        ),
    );
    Json::Object(object)
}

fn map_to_json(map: &ConfigMap) -> Json {
    Json::from(Value::Map(map.clone()))
}
