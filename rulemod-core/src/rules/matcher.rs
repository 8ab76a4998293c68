use super::keys;
use crate::element::ElementTree;
use regex::Regex;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// Conjunctive string constraints shared by tag and attribute matches.
///
/// Every field that is set must hold; unset fields impose no constraint.
#[derive(Debug, Clone, Default)]
pub struct TextMatch {
    pub value: Option<String>,
    pub prefix: Option<String>,
    pub suffix: Option<String>,
    pub regex: Option<Regex>,
}

impl TextMatch {
    /// Constraint requiring the text to equal `value` exactly
    pub fn exact(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn matches(&self, text: &str) -> bool {
        if let Some(value) = &self.value {
            if text != value {
                return false;
            }
        }
        if let Some(regex) = &self.regex {
            if !regex.is_match(text) {
                return false;
            }
        }
        if let Some(suffix) = &self.suffix {
            if !text.ends_with(suffix.as_str()) {
                return false;
            }
        }
        if let Some(prefix) = &self.prefix {
            if !text.starts_with(prefix.as_str()) {
                return false;
            }
        }
        true
    }

    fn serialize_fields<M: SerializeMap>(&self, map: &mut M) -> Result<(), M::Error> {
        if let Some(value) = &self.value {
            map.serialize_entry(keys::VALUE, value)?;
        }
        if let Some(regex) = &self.regex {
            map.serialize_entry(keys::REGEX, regex.as_str())?;
        }
        if let Some(prefix) = &self.prefix {
            map.serialize_entry(keys::PREFIX, prefix)?;
        }
        if let Some(suffix) = &self.suffix {
            map.serialize_entry(keys::SUFFIX, suffix)?;
        }
        Ok(())
    }
}

/// A pure predicate over a single element.
#[derive(Debug, Clone)]
pub enum Match {
    /// Constraints on the element's tag name
    Tag(TextMatch),
    /// Constraints on an attribute value; never matches if the attribute is absent
    Attr { attribute: String, text: TextMatch },
    /// Every child matches
    AllOf(Vec<Match>),
    /// At least one child matches
    AnyOf(Vec<Match>),
    /// Exactly one child matches
    OneOf(Vec<Match>),
    /// The child does not match
    Not(Box<Match>),
}

impl Match {
    pub fn check<E: ElementTree>(&self, element: &E) -> bool {
        match self {
            Match::Tag(text) => text.matches(element.tag()),
            Match::Attr { attribute, text } => match element.attribute(attribute) {
                Some(value) => text.matches(value),
                None => false,
            },
            Match::AllOf(matches) => matches.iter().all(|m| m.check(element)),
            Match::AnyOf(matches) => matches.iter().any(|m| m.check(element)),
            Match::OneOf(matches) => {
                let mut found = 0;
                for m in matches {
                    if m.check(element) {
                        found += 1;
                        if found > 1 {
                            return false;
                        }
                    }
                }
                found == 1
            }
            Match::Not(child) => !child.check(element),
        }
    }

    /// Discriminant used in rule documents
    pub fn type_name(&self) -> &'static str {
        match self {
            Match::Tag(_) => keys::MATCH_TAG,
            Match::Attr { .. } => keys::MATCH_ATTR,
            Match::AllOf(_) => keys::MATCH_ALL_OF,
            Match::AnyOf(_) => keys::MATCH_ANY_OF,
            Match::OneOf(_) => keys::MATCH_ONE_OF,
            Match::Not(_) => keys::MATCH_NOT,
        }
    }
}

impl Serialize for Match {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry(keys::TYPE, self.type_name())?;
        match self {
            Match::Tag(text) => text.serialize_fields(&mut map)?,
            Match::Attr { attribute, text } => {
                map.serialize_entry(keys::NAME, attribute)?;
                text.serialize_fields(&mut map)?;
            }
            Match::AllOf(matches) | Match::AnyOf(matches) | Match::OneOf(matches) => {
                map.serialize_entry(keys::MATCHES, matches)?;
            }
            Match::Not(child) => map.serialize_entry(keys::MATCH, child)?,
        }
        map.end()
    }
}
