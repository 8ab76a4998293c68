// Rule document vocabulary

pub const ACTIONS: &str = "actions";
pub const ADD: &str = "add";
pub const ATTR: &str = "attr";
pub const CHILDREN: &str = "children";
pub const COND: &str = "if";
pub const MATCH: &str = "match";
pub const MATCHES: &str = "matches";
pub const MAX: &str = "max";
pub const MIN: &str = "min";
pub const MULT: &str = "mult";
pub const NAME: &str = "name";
pub const PRECISION: &str = "precision";
pub const PREFIX: &str = "prefix";
pub const REGEX: &str = "regex";
pub const SUFFIX: &str = "suffix";
pub const TYPE: &str = "type";
pub const VALUE: &str = "value";

pub const MATCH_TAG: &str = "tag";
pub const MATCH_ATTR: &str = "attr";
pub const MATCH_ALL_OF: &str = "all-of";
pub const MATCH_ANY_OF: &str = "any-of";
pub const MATCH_ONE_OF: &str = "one-of";
pub const MATCH_NOT: &str = "not";

pub const ACTION_NUMBER: &str = "update-number";
pub const ACTION_INSERT_ATTR: &str = "insert-attr";
pub const ACTION_INSERT_ELEMENT: &str = "insert-element";
pub const ACTION_REMOVE_ATTR: &str = "remove-attr";
pub const ACTION_REMOVE_ELEMENT: &str = "remove-element";

pub const MATCH_TYPES: &[&str] = &[
    MATCH_TAG,
    MATCH_ATTR,
    MATCH_ALL_OF,
    MATCH_ANY_OF,
    MATCH_ONE_OF,
    MATCH_NOT,
];

pub const ACTION_TYPES: &[&str] = &[
    ACTION_NUMBER,
    ACTION_INSERT_ATTR,
    ACTION_INSERT_ELEMENT,
    ACTION_REMOVE_ATTR,
    ACTION_REMOVE_ELEMENT,
];
