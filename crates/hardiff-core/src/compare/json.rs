//! Structural JSON comparison
//!
//! A recursive walk over two `serde_json::Value` trees. Objects are compared
//! over the union of their keys (sorted), arrays element by index. Each
//! difference carries its rendered path and the name used for exemption
//! lookup: the nearest enclosing object key, or the section name at the root.

use std::collections::BTreeSet;

use serde_json::Value;

use super::report::{DifferenceKind, KeyDifference};

pub(crate) struct JsonWalk<'a, F>
where
    F: Fn(&str) -> bool,
{
    root_name: &'a str,
    keys_only: bool,
    is_exempt: F,
    differences: Vec<KeyDifference>,
}

impl<'a, F> JsonWalk<'a, F>
where
    F: Fn(&str) -> bool,
{
    /// `is_exempt` is asked about object key names; a key it accepts exempts
    /// every difference beneath it.
    pub(crate) fn new(root_name: &'a str, keys_only: bool, is_exempt: F) -> Self {
        Self {
            root_name,
            keys_only,
            is_exempt,
            differences: Vec::new(),
        }
    }

    pub(crate) fn run(mut self, left: &Value, right: &Value) -> Vec<KeyDifference> {
        let exempt = (self.is_exempt)(self.root_name);
        self.walk(left, right, "", self.root_name, exempt);
        self.differences
    }

    fn walk(&mut self, left: &Value, right: &Value, path: &str, name: &str, exempt: bool) {
        match (left, right) {
            (Value::Object(l), Value::Object(r)) => {
                let keys: BTreeSet<&String> = l.keys().chain(r.keys()).collect();
                for key in keys {
                    let child_path = join_key(path, key);
                    let child_exempt = exempt || (self.is_exempt)(key);
                    match (l.get(key), r.get(key)) {
                        (Some(lv), Some(rv)) => {
                            self.walk(lv, rv, &child_path, key, child_exempt)
                        }
                        (Some(lv), None) => self.push(
                            child_path,
                            key,
                            DifferenceKind::Removed,
                            Some(lv),
                            None,
                            child_exempt,
                        ),
                        (None, Some(rv)) => self.push(
                            child_path,
                            key,
                            DifferenceKind::Added,
                            None,
                            Some(rv),
                            child_exempt,
                        ),
                        (None, None) => {}
                    }
                }
            }
            (Value::Array(l), Value::Array(r)) => {
                for i in 0..l.len().max(r.len()) {
                    let child_path = format!("{}[{}]", path, i);
                    match (l.get(i), r.get(i)) {
                        (Some(lv), Some(rv)) => self.walk(lv, rv, &child_path, name, exempt),
                        (Some(lv), None) => self.push(
                            child_path,
                            name,
                            DifferenceKind::Removed,
                            Some(lv),
                            None,
                            exempt,
                        ),
                        (None, Some(rv)) => self.push(
                            child_path,
                            name,
                            DifferenceKind::Added,
                            None,
                            Some(rv),
                            exempt,
                        ),
                        (None, None) => {}
                    }
                }
            }
            (l, r) => {
                let differs = if self.keys_only {
                    shape(l) != shape(r)
                } else {
                    l != r
                };
                if differs {
                    self.push(
                        path.to_string(),
                        name,
                        DifferenceKind::Changed,
                        Some(l),
                        Some(r),
                        exempt,
                    );
                }
            }
        }
    }

    fn push(
        &mut self,
        path: String,
        name: &str,
        kind: DifferenceKind,
        left: Option<&Value>,
        right: Option<&Value>,
        exempted: bool,
    ) {
        let path = if path.is_empty() {
            self.root_name.to_string()
        } else {
            path
        };
        let keys_only = self.keys_only;
        let render = |v: &Value| {
            if keys_only {
                shape(v).to_string()
            } else {
                v.to_string()
            }
        };
        self.differences.push(KeyDifference {
            path,
            key: name.to_string(),
            kind,
            left: left.map(render),
            right: right.map(render),
            exempted,
        });
    }
}

/// Key structure only: containers are distinct, all scalars look alike
pub(crate) fn shape(value: &Value) -> &'static str {
    match value {
        Value::Object(_) => "object",
        Value::Array(_) => "array",
        _ => "value",
    }
}

fn join_key(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", path, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn diff(left: Value, right: Value, keys_only: bool, exempt: &[&str]) -> Vec<KeyDifference> {
        JsonWalk::new("payload", keys_only, |k: &str| exempt.iter().any(|e| *e == k)).run(&left, &right)
    }

    #[test]
    fn test_equal_documents_have_no_differences() {
        let doc = json!({"a": [1, {"b": null}], "c": "x"});
        assert!(diff(doc.clone(), doc, false, &[]).is_empty());
    }

    #[test]
    fn test_paths_render_objects_and_arrays() {
        let differences = diff(
            json!({"a": {"b": [0, 1, {"c": 1}]}}),
            json!({"a": {"b": [0, 1, {"c": 2}]}}),
            false,
            &[],
        );
        assert_eq!(differences.len(), 1);
        assert_eq!(differences[0].path, "a.b[2].c");
        assert_eq!(differences[0].key, "c");
        assert_eq!(differences[0].kind, DifferenceKind::Changed);
        assert_eq!(differences[0].left.as_deref(), Some("1"));
    }

    #[test]
    fn test_array_elements_inherit_holding_key() {
        let differences = diff(json!({"tags": [1]}), json!({"tags": [1, 2]}), false, &[]);
        assert_eq!(differences[0].path, "tags[1]");
        assert_eq!(differences[0].key, "tags");
        assert_eq!(differences[0].kind, DifferenceKind::Added);
    }

    #[test]
    fn test_added_and_removed_keys() {
        let differences = diff(json!({"a": 1, "b": 2}), json!({"b": 2, "c": 3}), false, &[]);
        let kinds: Vec<_> = differences.iter().map(|d| (d.path.as_str(), d.kind)).collect();
        assert_eq!(
            kinds,
            vec![("a", DifferenceKind::Removed), ("c", DifferenceKind::Added)]
        );
    }

    #[test]
    fn test_keys_only_ignores_scalar_values() {
        assert!(diff(json!({"a": 1, "b": [true]}), json!({"a": "x", "b": [false]}), true, &[]).is_empty());
        let differences = diff(json!({"a": 1}), json!({"a": {"x": 1}}), true, &[]);
        assert_eq!(differences.len(), 1);
        assert_eq!(differences[0].right.as_deref(), Some("object"));
    }

    #[test]
    fn test_exempt_key_exempts_its_subtree() {
        let differences = diff(
            json!({"meta": {"ts": 1, "trace": [1]}, "id": 1}),
            json!({"meta": {"ts": 2, "trace": [2]}, "id": 2}),
            false,
            &["meta"],
        );
        assert_eq!(differences.len(), 3);
        assert!(differences.iter().filter(|d| d.path.starts_with("meta")).all(|d| d.exempted));
        assert!(differences.iter().any(|d| d.path == "id" && !d.exempted));
    }

    #[test]
    fn test_root_difference_uses_section_name() {
        let differences = diff(json!([1]), json!({"a": 1}), false, &[]);
        assert_eq!(differences.len(), 1);
        assert_eq!(differences[0].path, "payload");
        assert_eq!(differences[0].key, "payload");
    }
}
