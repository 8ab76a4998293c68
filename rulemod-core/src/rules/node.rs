use super::action::Action;
use super::keys;
use super::matcher::Match;
use crate::element::ElementTree;
use log::trace;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// A rule: an optional predicate, actions for the matched element, and child
/// rules applied to the matched element's direct children.
#[derive(Debug, Clone, Default)]
pub struct Node {
    pub matcher: Option<Match>,
    pub actions: Vec<Action>,
    pub children: Vec<Node>,
}

impl Node {
    /// Apply this rule to `element`, returning whether anything changed.
    ///
    /// Child rules run before this node's own actions, so an action can never
    /// change the outcome of a match already made further down the tree in the
    /// same pass.
    pub fn apply<E: ElementTree>(&self, element: &mut E) -> bool {
        if let Some(matcher) = &self.matcher {
            if !matcher.check(element) {
                return false;
            }
        }

        let mut updated = false;
        if !self.children.is_empty() {
            for child_element in element.child_elements_mut() {
                for child in &self.children {
                    updated |= child.apply(&mut *child_element);
                }
            }
        }

        for action in &self.actions {
            if action.apply(element) {
                trace!("{} changed <{}>", action.type_name(), element.tag());
                updated = true;
            }
        }
        updated
    }

    /// Whether the node carries anything at all
    pub fn is_empty(&self) -> bool {
        self.matcher.is_none() && self.actions.is_empty() && self.children.is_empty()
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        if let Some(matcher) = &self.matcher {
            map.serialize_entry(keys::MATCH, matcher)?;
        }
        if !self.actions.is_empty() {
            map.serialize_entry(keys::ACTIONS, &self.actions)?;
        }
        if !self.children.is_empty() {
            map.serialize_entry(keys::CHILDREN, &self.children)?;
        }
        map.end()
    }
}
