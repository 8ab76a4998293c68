use super::unpack::{self, Object};
use crate::diagnostics::Diagnostics;
use crate::error::SchemaError;
use crate::rules::keys;
use crate::rules::{Match, TextMatch};
use regex::Regex;

/// Unpack a match object. Unknown or missing `type` drops the match.
pub fn unpack_match(diag: &mut Diagnostics, obj: &Object) -> Option<Match> {
    match unpack::require_enum(diag, obj, keys::TYPE, keys::MATCH_TYPES)? {
        keys::MATCH_TAG => unpack_text(diag, obj).map(Match::Tag),
        keys::MATCH_ATTR => unpack_attr(diag, obj),
        keys::MATCH_ALL_OF => unpack_match_array(diag, obj).map(Match::AllOf),
        keys::MATCH_ANY_OF => unpack_match_array(diag, obj).map(Match::AnyOf),
        keys::MATCH_ONE_OF => unpack_match_array(diag, obj).map(Match::OneOf),
        keys::MATCH_NOT => unpack_not(diag, obj),
        _ => None,
    }
}

/// Unpack the optional `if` condition of an action.
///
/// The outer `Option` is `None` when the condition was declared but could not
/// be loaded, in which case the action must be dropped.
pub fn unpack_condition(diag: &mut Diagnostics, obj: &Object) -> Option<Option<Match>> {
    if !obj.contains_key(keys::COND) {
        return Some(None);
    }
    let raw = unpack::optional_object(diag, obj, keys::COND)?;
    diag.with_key(keys::COND, |diag| unpack_match(diag, raw)).map(Some)
}

fn unpack_text(diag: &mut Diagnostics, obj: &Object) -> Option<TextMatch> {
    let errors = diag.error_count();
    let text = TextMatch {
        value: unpack::optional_string(diag, obj, keys::VALUE).map(str::to_string),
        prefix: unpack::optional_string(diag, obj, keys::PREFIX).map(str::to_string),
        suffix: unpack::optional_string(diag, obj, keys::SUFFIX).map(str::to_string),
        regex: unpack_regex(diag, obj),
    };
    // Any bad constraint drops the whole match.
    if diag.error_count() != errors {
        return None;
    }
    Some(text)
}

fn unpack_regex(diag: &mut Diagnostics, obj: &Object) -> Option<Regex> {
    let raw = unpack::optional_string(diag, obj, keys::REGEX)?;
    match Regex::new(raw) {
        Ok(regex) => Some(regex),
        Err(err) => {
            diag.error_at_key(keys::REGEX, SchemaError::InvalidRegex(err));
            None
        }
    }
}

fn unpack_attr(diag: &mut Diagnostics, obj: &Object) -> Option<Match> {
    let attribute = unpack::require_name(diag, obj, keys::NAME);
    let text = unpack_text(diag, obj);
    Some(Match::Attr {
        attribute: attribute?.to_string(),
        text: text?,
    })
}

fn unpack_match_array(diag: &mut Diagnostics, obj: &Object) -> Option<Vec<Match>> {
    let raw = unpack::require_array(diag, obj, keys::MATCHES)?;
    if raw.is_empty() {
        diag.error_at_key(keys::MATCHES, SchemaError::EmptyList);
        return None;
    }

    let matches: Vec<Match> = diag.with_key(keys::MATCHES, |diag| {
        raw.iter()
            .enumerate()
            .filter_map(|(idx, value)| {
                diag.with_index(idx, |diag| {
                    let obj = unpack::as_object(diag, value)?;
                    unpack_match(diag, obj)
                })
            })
            .collect()
    });
    if matches.is_empty() {
        return None;
    }
    Some(matches)
}

fn unpack_not(diag: &mut Diagnostics, obj: &Object) -> Option<Match> {
    let raw = unpack::require_object(diag, obj, keys::MATCH)?;
    let child = diag.with_key(keys::MATCH, |diag| unpack_match(diag, raw))?;
    Some(Match::Not(Box::new(child)))
}
