//! Data context for previews: the JSON data object plus a stack of loop
//! variables.

use serde_json::{Map, Value};

use crate::error::PreviewError;

/// Resolves binding paths against preview data.
///
/// Loop variables shadow keys of the data object and inner loops shadow
/// outer ones.
pub struct Context<'d> {
    root: &'d Map<String, Value>,
    locals: Vec<(String, Value)>,
}

impl<'d> Context<'d> {
    /// Create a context over a data object.
    ///
    /// # Errors
    ///
    /// Returns [`PreviewError::RootNotObject`] unless `data` is an object.
    pub fn new(data: &'d Value) -> Result<Self, PreviewError> {
        match data {
            Value::Object(root) => Ok(Self {
                root,
                locals: Vec::new(),
            }),
            _ => Err(PreviewError::RootNotObject),
        }
    }

    /// Resolve a single name: loop variables innermost first, then the data
    /// object.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&Value> {
        self.locals
            .iter()
            .rev()
            .find(|(local, _)| local == name)
            .map(|(_, value)| value)
            .or_else(|| self.root.get(name))
    }

    /// Resolve a path such as `["user", "name"]`. Numeric components index
    /// into lists.
    #[must_use]
    pub fn resolve(&self, path: &[String]) -> Option<&Value> {
        let (first, rest) = path.split_first()?;
        rest.iter()
            .try_fold(self.lookup(first)?, |value, key| access(value, key))
    }

    /// Bind a loop variable.
    pub fn push(&mut self, name: String, value: Value) {
        self.locals.push((name, value));
    }

    /// Drop the innermost loop variable.
    pub fn pop(&mut self) {
        let _ = self.locals.pop();
    }
}

fn access<'v>(value: &'v Value, key: &str) -> Option<&'v Value> {
    match value {
        Value::Object(map) => map.get(key),
        Value::Array(items) => key.parse::<usize>().ok().and_then(|index| items.get(index)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn path(s: &str) -> Vec<String> {
        s.split('.').map(ToString::to_string).collect()
    }

    #[test]
    fn test_root_must_be_object() {
        assert_eq!(
            Context::new(&json!([1, 2])).err(),
            Some(PreviewError::RootNotObject)
        );
    }

    #[test]
    fn test_resolve_nested_and_indexed() {
        let data = json!({"user": {"name": "Ann", "tags": ["a", "b"]}});
        let context = Context::new(&data).expect("object");
        assert_eq!(context.resolve(&path("user.name")), Some(&json!("Ann")));
        assert_eq!(context.resolve(&path("user.tags.1")), Some(&json!("b")));
        assert_eq!(context.resolve(&path("user.missing")), None);
        assert_eq!(context.resolve(&path("nobody")), None);
    }

    #[test]
    fn test_locals_shadow_root() {
        let data = json!({"item": "outer"});
        let mut context = Context::new(&data).expect("object");
        context.push("item".to_string(), json!("inner"));
        assert_eq!(context.lookup("item"), Some(&json!("inner")));
        context.pop();
        assert_eq!(context.lookup("item"), Some(&json!("outer")));
    }
}
