use super::actions::unpack_action_list;
use super::matches::unpack_match;
use super::unpack::{self, Object};
use crate::diagnostics::Diagnostics;
use crate::error::SchemaError;
use crate::rules::keys;
use crate::rules::Node;
use serde_json::Value;

/// Unpack a list of rule objects, skipping the ones that fail to load.
pub fn unpack_node_list(diag: &mut Diagnostics, raw: &[Value]) -> Vec<Node> {
    raw.iter()
        .enumerate()
        .filter_map(|(idx, value)| {
            diag.with_index(idx, |diag| {
                let obj = unpack::as_object(diag, value)?;
                unpack_node(diag, obj)
            })
        })
        .collect()
}

/// Unpack a rule object.
///
/// A rule whose `match` is present but broken is dropped rather than loaded
/// as an always-matching rule.
pub fn unpack_node(diag: &mut Diagnostics, obj: &Object) -> Option<Node> {
    let declares_match = obj.contains_key(keys::MATCH);
    let raw_match = unpack::optional_object(diag, obj, keys::MATCH);
    let raw_actions = unpack::optional_array(diag, obj, keys::ACTIONS);
    let raw_children = unpack::optional_array(diag, obj, keys::CHILDREN);

    let matcher =
        raw_match.and_then(|raw| diag.with_key(keys::MATCH, |diag| unpack_match(diag, raw)));
    let actions = raw_actions
        .map(|raw| diag.with_key(keys::ACTIONS, |diag| unpack_action_list(diag, raw)))
        .unwrap_or_default();
    let children = raw_children
        .map(|raw| diag.with_key(keys::CHILDREN, |diag| unpack_node_list(diag, raw)))
        .unwrap_or_default();

    if declares_match && matcher.is_none() {
        return None;
    }

    let node = Node {
        matcher,
        actions,
        children,
    };
    if node.is_empty() {
        diag.error(SchemaError::EmptyNode);
        return None;
    }
    Some(node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn load(value: Value) -> (Option<Node>, Vec<String>) {
        let obj = match value {
            Value::Object(obj) => obj,
            _ => panic!("not an object"),
        };
        let mut diag = Diagnostics::new("doc", None);
        let node = unpack_node(&mut diag, &obj);
        let errors: Vec<String> = diag
            .finish()
            .map(|e| e.errors.iter().map(|e| e.to_string()).collect())
            .unwrap_or_default();
        (node, errors)
    }

    #[test]
    fn test_match_only_node_loads() {
        let (node, errors) = load(json!({"match": {"type": "tag", "value": "items"}}));
        assert!(errors.is_empty());
        let node = node.unwrap();
        assert!(node.matcher.is_some());
        assert!(node.actions.is_empty());
        assert!(node.children.is_empty());
    }

    #[test]
    fn test_empty_node_rejected() {
        let (node, errors) = load(json!({}));
        assert!(node.is_none());
        assert_eq!(
            errors,
            vec!["doc:(root): node requires at least one of \"match\", \"actions\", or \"children\""]
        );
    }

    #[test]
    fn test_node_with_only_empty_lists_rejected() {
        let (node, errors) = load(json!({"actions": [], "children": []}));
        assert!(node.is_none());
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_broken_match_drops_node() {
        let (node, errors) = load(json!({
            "match": {"type": "attr"},
            "actions": [{"type": "remove-attr", "name": "x"}]
        }));
        assert!(node.is_none());
        assert_eq!(errors, vec!["doc:match: missing required key \"name\""]);
    }

    #[test]
    fn test_wrong_field_types() {
        let (node, errors) = load(json!({"match": [], "actions": {}, "children": "x"}));
        assert!(node.is_none());
        assert_eq!(
            errors,
            vec![
                "doc:match: expected object, got array",
                "doc:actions: expected array, got object",
                "doc:children: expected array, got string",
            ]
        );
    }

    #[test]
    fn test_nested_children_paths() {
        let (node, errors) = load(json!({
            "children": [
                {"actions": [{"type": "remove-attr", "name": "a"}]},
                {"children": [{"match": {"type": "nope"}}]}
            ]
        }));
        let node = node.unwrap();
        assert_eq!(node.children.len(), 1);
        assert_eq!(
            errors,
            vec![
                "doc:children[1].children[0].match.type: invalid value \"nope\", expected one of tag, attr, all-of, any-of, one-of, not",
                "doc:children[1]: node requires at least one of \"match\", \"actions\", or \"children\"",
            ]
        );
    }
}
