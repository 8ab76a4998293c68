use super::keys;
use super::matcher::Match;
use crate::element::ElementTree;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// Multiply, add, clamp and reformat a numeric attribute.
///
/// The attribute may hold a single number or a comma-separated list; each
/// entry is transformed independently. If any entry fails to parse the
/// attribute is left untouched.
#[derive(Debug, Clone)]
pub struct NumberAction {
    pub attribute: String,
    pub mult: f64,
    pub add: f64,
    pub min: f64,
    pub max: f64,
    /// Decimal places to render; `None` renders the shortest exact form
    pub precision: Option<usize>,
    pub condition: Option<Match>,
}

impl NumberAction {
    /// Enough decimal places to render any `f64` exactly.
    pub const MAX_PRECISION: usize = 1074;

    /// An action which leaves canonical values of `attribute` unchanged.
    pub fn new(attribute: impl Into<String>) -> Self {
        Self {
            attribute: attribute.into(),
            mult: 1.0,
            add: 0.0,
            min: f64::MIN,
            max: f64::MAX,
            precision: None,
            condition: None,
        }
    }

    fn apply<E: ElementTree>(&self, element: &mut E) -> bool {
        let Some(original) = element.attribute(&self.attribute) else {
            return false;
        };

        let mut updated = Vec::new();
        for part in original.split(',') {
            match self.update(part) {
                Some(value) => updated.push(value),
                None => return false,
            }
        }
        let updated = updated.join(",");
        if updated == original {
            return false;
        }
        element.set_attribute(&self.attribute, &updated);
        true
    }

    /// Transform a single numeric token, or `None` if it does not parse.
    fn update(&self, token: &str) -> Option<String> {
        let v: f64 = token.parse().ok()?;
        if !v.is_finite() {
            return None;
        }
        let v = (self.mult * v + self.add).min(self.max).max(self.min);
        if v.is_nan() {
            return None;
        }
        let rendered = match self.precision {
            Some(precision) => format!("{:.*}", precision.min(Self::MAX_PRECISION), v),
            None => format!("{}", v),
        };
        Some(trim_number(rendered))
    }
}

/// Strip trailing fractional zeros and a dangling decimal point.
fn trim_number(mut s: String) -> String {
    if s.contains('.') {
        let trimmed = s.trim_end_matches('0').trim_end_matches('.').len();
        s.truncate(trimmed);
    }
    match s.as_str() {
        "" | "-" | "-0" => "0".to_string(),
        _ => s,
    }
}

/// An element mutation, optionally gated by a condition.
#[derive(Debug, Clone)]
pub enum Action {
    Number(NumberAction),
    InsertAttr {
        attribute: String,
        value: String,
        condition: Option<Match>,
    },
    RemoveAttr {
        attribute: String,
        condition: Option<Match>,
    },
}

impl Action {
    /// Apply to `element`, returning whether it was observably changed.
    pub fn apply<E: ElementTree>(&self, element: &mut E) -> bool {
        if let Some(condition) = self.condition() {
            if !condition.check(element) {
                return false;
            }
        }
        match self {
            Action::Number(number) => number.apply(element),
            Action::InsertAttr {
                attribute, value, ..
            } => {
                element.set_attribute(attribute, value);
                true
            }
            Action::RemoveAttr { attribute, .. } => element.remove_attribute(attribute),
        }
    }

    pub fn condition(&self) -> Option<&Match> {
        match self {
            Action::Number(number) => number.condition.as_ref(),
            Action::InsertAttr { condition, .. } | Action::RemoveAttr { condition, .. } => {
                condition.as_ref()
            }
        }
    }

    /// Discriminant used in rule documents
    pub fn type_name(&self) -> &'static str {
        match self {
            Action::Number(_) => keys::ACTION_NUMBER,
            Action::InsertAttr { .. } => keys::ACTION_INSERT_ATTR,
            Action::RemoveAttr { .. } => keys::ACTION_REMOVE_ATTR,
        }
    }
}

impl Serialize for Action {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry(keys::TYPE, self.type_name())?;
        match self {
            Action::Number(number) => {
                map.serialize_entry(keys::ATTR, &number.attribute)?;
                if number.mult != 1.0 {
                    map.serialize_entry(keys::MULT, &number.mult)?;
                }
                if number.add != 0.0 {
                    map.serialize_entry(keys::ADD, &number.add)?;
                }
                if number.min != f64::MIN {
                    map.serialize_entry(keys::MIN, &number.min)?;
                }
                if number.max != f64::MAX {
                    map.serialize_entry(keys::MAX, &number.max)?;
                }
                if let Some(precision) = number.precision {
                    map.serialize_entry(keys::PRECISION, &precision)?;
                }
            }
            Action::InsertAttr {
                attribute, value, ..
            } => {
                map.serialize_entry(keys::NAME, attribute)?;
                map.serialize_entry(keys::VALUE, value)?;
            }
            Action::RemoveAttr { attribute, .. } => {
                map.serialize_entry(keys::NAME, attribute)?;
            }
        }
        if let Some(condition) = self.condition() {
            map.serialize_entry(keys::COND, condition)?;
        }
        map.end()
    }
}
