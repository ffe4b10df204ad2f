//! Argument resolution.

use tracing::trace;
use uiconf_core::{ComponentPool, EvaluateError, ExpressionEvaluator};

/// Replace every top-level argument of every node with its evaluated value.
///
/// Nodes are visited in pre-order. The first evaluation error aborts the pass;
/// nodes visited before it keep their resolved arguments.
pub fn resolve_arguments(
    pool: &mut ComponentPool,
    evaluator: &dyn ExpressionEvaluator,
) -> Result<(), EvaluateError> {
    for id in pool.preorder() {
        let Some(node) = pool.get_mut(id) else {
            continue;
        };
        for (key, value) in node.arguments.iter_mut() {
            *value = evaluator.evaluate(value)?;
            trace!(instance = %node.instance_name, argument = %key, "resolved argument");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluators::{PassthroughEvaluator, TokenEvaluator};
    use std::cell::RefCell;
    use uiconf_core::{ComponentNode, ConfigMap, Value};

    fn pool_with_arguments() -> ComponentPool {
        let arguments = |entries: Vec<(&str, Value)>| -> ConfigMap {
            entries.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
        };
        let mut pool = ComponentPool::new();
        let root = pool
            .add_root(ComponentNode::new("listing", "listing").with_arguments(arguments(vec![
                ("data", Value::map([("url", "$urls.listing")])),
            ])))
            .unwrap();
        pool.add_child(
            root,
            ComponentNode::new("grid", "columns").with_arguments(arguments(vec![
                ("data", Value::map([("config", Value::map([("size", "$size")]))])),
                ("label", Value::from("Grid")),
            ])),
        )
        .unwrap();
        pool
    }

    struct RecordingEvaluator {
        seen: RefCell<Vec<Value>>,
    }

    impl ExpressionEvaluator for RecordingEvaluator {
        fn evaluate(&self, raw: &Value) -> Result<Value, EvaluateError> {
            self.seen.borrow_mut().push(raw.clone());
            Ok(raw.clone())
        }
    }

    #[test]
    fn test_resolves_all_nodes() {
        let mut pool = pool_with_arguments();
        let evaluator = TokenEvaluator::new()
            .with_token("urls.listing", "mui/index/render")
            .with_token("size", 20);

        resolve_arguments(&mut pool, &evaluator).unwrap();

        assert_eq!(
            pool.get_by_name("listing").unwrap().arguments["data"],
            Value::map([("url", "mui/index/render")])
        );
        assert_eq!(
            pool.get_by_name("grid").unwrap().config(),
            Some(&[("size".to_string(), Value::from(20))].into_iter().collect::<ConfigMap>())
        );
    }

    #[test]
    fn test_each_top_level_argument_evaluated_once_in_preorder() {
        let mut pool = pool_with_arguments();
        let evaluator = RecordingEvaluator {
            seen: RefCell::new(Vec::new()),
        };

        resolve_arguments(&mut pool, &evaluator).unwrap();

        let seen = evaluator.seen.into_inner();
        assert_eq!(seen.len(), 3);
        assert_eq!(seen[0], Value::map([("url", "$urls.listing")]));
        assert_eq!(seen[2], Value::from("Grid"));
    }

    #[test]
    fn test_passthrough_leaves_pool_unchanged() {
        let mut pool = pool_with_arguments();
        let before = pool.clone();
        resolve_arguments(&mut pool, &PassthroughEvaluator).unwrap();
        assert_eq!(pool, before);
    }

    #[test]
    fn test_error_propagates() {
        let mut pool = pool_with_arguments();
        let err = resolve_arguments(&mut pool, &TokenEvaluator::new()).unwrap_err();
        assert!(matches!(err, EvaluateError::UndefinedToken { path } if path == "urls.listing"));
    }
}
