use super::matches::unpack_condition;
use super::unpack::{self, Object};
use crate::diagnostics::Diagnostics;
use crate::error::SchemaError;
use crate::rules::keys;
use crate::rules::{Action, NumberAction};
use serde_json::Value;

/// Unpack every action in `raw`, skipping the ones that fail to load.
pub fn unpack_action_list(diag: &mut Diagnostics, raw: &[Value]) -> Vec<Action> {
    raw.iter()
        .enumerate()
        .filter_map(|(idx, value)| {
            diag.with_index(idx, |diag| {
                let obj = unpack::as_object(diag, value)?;
                unpack_action(diag, obj)
            })
        })
        .collect()
}

/// Unpack a single action object.
///
/// The element actions are part of the vocabulary but have no effect yet, so
/// they load without error and produce nothing. `require_enum` has already
/// rejected any other type name.
pub fn unpack_action(diag: &mut Diagnostics, obj: &Object) -> Option<Action> {
    match unpack::require_enum(diag, obj, keys::TYPE, keys::ACTION_TYPES)? {
        keys::ACTION_NUMBER => unpack_number(diag, obj),
        keys::ACTION_INSERT_ATTR => unpack_insert_attr(diag, obj),
        keys::ACTION_REMOVE_ATTR => unpack_remove_attr(diag, obj),
        // insert-element, remove-element
        _ => None,
    }
}

fn unpack_number(diag: &mut Diagnostics, obj: &Object) -> Option<Action> {
    let attribute = unpack::require_name(diag, obj, keys::ATTR);
    let defaults = NumberAction::new("");
    let mult = unpack::optional_number(diag, obj, keys::MULT, defaults.mult);
    let add = unpack::optional_number(diag, obj, keys::ADD, defaults.add);
    let min = unpack::optional_number(diag, obj, keys::MIN, defaults.min);
    let max = unpack::optional_number(diag, obj, keys::MAX, defaults.max);
    let precision = unpack_precision(diag, obj);
    let condition = unpack_condition(diag, obj);

    if min > max {
        diag.error(SchemaError::InvalidRange { min, max });
        return None;
    }

    Some(Action::Number(NumberAction {
        attribute: attribute?.to_string(),
        mult,
        add,
        min,
        max,
        precision: precision?,
        condition: condition?,
    }))
}

/// `Some(None)` when unset or negative, `None` when out of range.
fn unpack_precision(diag: &mut Diagnostics, obj: &Object) -> Option<Option<usize>> {
    let Some(precision) = unpack::optional_integer(diag, obj, keys::PRECISION) else {
        return Some(None);
    };
    let Ok(precision) = usize::try_from(precision) else {
        return Some(None);
    };
    if precision > NumberAction::MAX_PRECISION {
        diag.error_at_key(
            keys::PRECISION,
            SchemaError::PrecisionTooLarge {
                precision,
                max: NumberAction::MAX_PRECISION,
            },
        );
        return None;
    }
    Some(Some(precision))
}

fn unpack_insert_attr(diag: &mut Diagnostics, obj: &Object) -> Option<Action> {
    let attribute = unpack::require_name(diag, obj, keys::NAME);
    let value = unpack::require_string(diag, obj, keys::VALUE);
    let condition = unpack_condition(diag, obj);

    Some(Action::InsertAttr {
        attribute: attribute?.to_string(),
        value: value?.to_string(),
        condition: condition?,
    })
}

fn unpack_remove_attr(diag: &mut Diagnostics, obj: &Object) -> Option<Action> {
    let attribute = unpack::require_name(diag, obj, keys::NAME);
    let condition = unpack_condition(diag, obj);

    Some(Action::RemoveAttr {
        attribute: attribute?.to_string(),
        condition: condition?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn load(value: Value) -> (Vec<Action>, Vec<String>) {
        let raw = match value {
            Value::Array(raw) => raw,
            _ => panic!("not an array"),
        };
        let mut diag = Diagnostics::new("doc", None);
        let actions = unpack_action_list(&mut diag, &raw);
        let errors: Vec<String> = diag
            .finish()
            .map(|e| e.errors.iter().map(|e| e.to_string()).collect())
            .unwrap_or_default();
        (actions, errors)
    }

    #[test]
    fn test_number_defaults() {
        let (actions, errors) = load(json!([{"type": "update-number", "attr": "value"}]));
        assert!(errors.is_empty());
        match &actions[..] {
            [Action::Number(n)] => {
                assert_eq!(n.attribute, "value");
                assert_eq!(n.mult, 1.0);
                assert_eq!(n.add, 0.0);
                assert_eq!(n.min, f64::MIN);
                assert_eq!(n.max, f64::MAX);
                assert_eq!(n.precision, None);
                assert!(n.condition.is_none());
            }
            other => panic!("unexpected actions: {:?}", other),
        }
    }

    #[test]
    fn test_number_parameters() {
        let (actions, errors) = load(json!([{
            "type": "update-number",
            "attr": "value",
            "mult": 1.5,
            "add": -2,
            "min": 0,
            "max": 10,
            "precision": 1,
            "if": {"type": "tag", "value": "item"}
        }]));
        assert!(errors.is_empty());
        let Action::Number(n) = &actions[0] else {
            panic!("expected a number action");
        };
        assert_eq!((n.mult, n.add, n.min, n.max), (1.5, -2.0, 0.0, 10.0));
        assert_eq!(n.precision, Some(1));
        assert!(n.condition.is_some());
    }

    #[test]
    fn test_negative_precision_is_unset() {
        let (actions, errors) = load(json!([{"type": "update-number", "attr": "v", "precision": -1}]));
        assert!(errors.is_empty());
        let Action::Number(n) = &actions[0] else {
            panic!("expected a number action");
        };
        assert_eq!(n.precision, None);
    }

    #[test]
    fn test_precision_above_maximum_rejected() {
        let (actions, errors) = load(json!([
            {"type": "update-number", "attr": "v", "precision": 100000},
            {"type": "update-number", "attr": "v", "precision": 1074}
        ]));
        assert_eq!(
            errors,
            vec!["doc:[0].precision: precision 100000 is greater than the maximum of 1074"]
        );
        assert_eq!(actions.len(), 1);
        let Action::Number(n) = &actions[0] else {
            panic!("expected a number action");
        };
        assert_eq!(n.precision, Some(NumberAction::MAX_PRECISION));

        let mut element = crate::element::Element::new("e").with_attr("v", "1.5");
        assert!(!actions[0].apply(&mut element));
    }

    #[test]
    fn test_bad_entries_are_skipped() {
        let (actions, errors) = load(json!([
            {"type": "remove-attr", "name": "a"},
            {"type": "insert-attr", "name": "b"},
            42,
            {"type": "update-number", "attr": "c", "min": 5, "max": 1},
            {"type": "remove-attr", "name": "d", "if": {"type": "attr"}},
            {"type": "insert-attr", "name": "e", "value": ""}
        ]));
        assert_eq!(actions.len(), 2);
        assert_eq!(
            errors,
            vec![
                "doc:[1]: missing required key \"value\"",
                "doc:[2]: expected object, got number",
                "doc:[3]: min (5) is greater than max (1)",
                "doc:[4].if: missing required key \"name\"",
            ]
        );
    }

    #[test]
    fn test_element_actions_are_inert() {
        let (actions, errors) = load(json!([
            {"type": "insert-element", "anything": true},
            {"type": "remove-element"}
        ]));
        assert!(actions.is_empty());
        assert!(errors.is_empty());
    }

    #[test]
    fn test_empty_attribute_name_rejected() {
        let (actions, errors) = load(json!([{"type": "update-number", "attr": ""}]));
        assert!(actions.is_empty());
        assert_eq!(errors, vec!["doc:[0].attr: value must not be empty"]);
    }
}
