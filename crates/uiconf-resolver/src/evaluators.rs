//! Built-in expression evaluators.

use indexmap::IndexMap;
use uiconf_core::{ConfigMap, EvaluateError, ExpressionEvaluator, Value};

/// Returns every argument unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughEvaluator;

impl ExpressionEvaluator for PassthroughEvaluator {
    fn evaluate(&self, raw: &Value) -> Result<Value, EvaluateError> {
        Ok(raw.clone())
    }
}

/// Substitutes `$dotted.path` strings from a token table.
///
/// A string is a token reference when it is `$` followed by a letter or `_`
/// and then only letters, digits, `_`, `.` or `-`. Anything else, including
/// strings that merely contain a `$`, passes through. Lists and maps are
/// resolved element by element.
#[derive(Debug, Clone, Default)]
pub struct TokenEvaluator {
    tokens: IndexMap<String, Value>,
}

impl TokenEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from a nested map.
    ///
    /// Every map level is addressable: `{"store": {"code": "en"}}` defines
    /// both `store` and `store.code`.
    pub fn from_map(map: &ConfigMap) -> Self {
        let mut evaluator = Self::new();
        evaluator.flatten("", map);
        evaluator
    }

    fn flatten(&mut self, prefix: &str, map: &ConfigMap) {
        for (key, value) in map {
            let path = if prefix.is_empty() {
                key.clone()
            } else {
                format!("{prefix}.{key}")
            };
            if let Value::Map(nested) = value {
                self.flatten(&path, nested);
            }
            self.tokens.insert(path, value.clone());
        }
    }

    /// Define a token.
    pub fn with_token(mut self, path: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(path, value);
        self
    }

    /// Define a token, replacing any previous value.
    pub fn insert(&mut self, path: impl Into<String>, value: impl Into<Value>) {
        self.tokens.insert(path.into(), value.into());
    }

    pub fn get(&self, path: &str) -> Option<&Value> {
        self.tokens.get(path)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl ExpressionEvaluator for TokenEvaluator {
    fn evaluate(&self, raw: &Value) -> Result<Value, EvaluateError> {
        match raw {
            Value::String(text) => match token_path(text) {
                Some(path) => self
                    .tokens
                    .get(path)
                    .cloned()
                    .ok_or_else(|| EvaluateError::UndefinedToken {
                        path: path.to_string(),
                    }),
                None => Ok(raw.clone()),
            },
            Value::List(items) => items
                .iter()
                .map(|item| self.evaluate(item))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::List),
            Value::Map(entries) => entries
                .iter()
                .map(|(key, value)| Ok((key.clone(), self.evaluate(value)?)))
                .collect::<Result<ConfigMap, EvaluateError>>()
                .map(Value::Map),
            _ => Ok(raw.clone()),
        }
    }
}

/// The path of a `$path` token reference.
fn token_path(text: &str) -> Option<&str> {
    let path = text.strip_prefix('$')?;
    let mut chars = path.chars();
    let first = chars.next()?;
    if !(first.is_ascii_alphabetic() || first == '_') {
        return None;
    }
    chars
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .then_some(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passthrough() {
        let raw = Value::map([("url", "$store.url")]);
        assert_eq!(PassthroughEvaluator.evaluate(&raw).unwrap(), raw);
    }

    #[test]
    fn test_token_path() {
        assert_eq!(token_path("$store.code"), Some("store.code"));
        assert_eq!(token_path("$_private-1"), Some("_private-1"));
        assert_eq!(token_path("$"), None);
        assert_eq!(token_path("$5"), None);
        assert_eq!(token_path("price: $5"), None);
        assert_eq!(token_path("$store code"), None);
        assert_eq!(token_path("store"), None);
    }

    #[test]
    fn test_resolves_nested_values() {
        let evaluator = TokenEvaluator::new()
            .with_token("urls.render", "mui/index/render")
            .with_token("page_size", 20);

        let raw = Value::map([
            ("update_url", Value::from("$urls.render")),
            (
                "paging",
                Value::map([
                    ("size", Value::from("$page_size")),
                    ("options", Value::List(vec!["$page_size".into(), 50.into()])),
                ]),
            ),
            ("label", Value::from("Costs $5")),
            ("enabled", Value::Bool(true)),
        ]);

        let resolved = evaluator.evaluate(&raw).unwrap();
        assert_eq!(
            resolved,
            Value::map([
                ("update_url", Value::from("mui/index/render")),
                (
                    "paging",
                    Value::map([
                        ("size", Value::from(20)),
                        ("options", Value::List(vec![20.into(), 50.into()])),
                    ]),
                ),
                ("label", Value::from("Costs $5")),
                ("enabled", Value::Bool(true)),
            ])
        );
    }

    #[test]
    fn test_undefined_token() {
        let evaluator = TokenEvaluator::new();
        let err = evaluator
            .evaluate(&Value::List(vec!["$missing.path".into()]))
            .unwrap_err();
        assert!(matches!(err, EvaluateError::UndefinedToken { path } if path == "missing.path"));
    }

    #[test]
    fn test_from_map_flattens_every_level() {
        let tokens: ConfigMap = [(
            "store".to_string(),
            Value::map([("code", "default"), ("locale", "en_US")]),
        )]
        .into_iter()
        .collect();
        let evaluator = TokenEvaluator::from_map(&tokens);

        assert_eq!(evaluator.len(), 3);
        assert_eq!(evaluator.get("store.code"), Some(&Value::from("default")));
        assert!(evaluator.get("store").is_some_and(Value::is_map));
    }
}
