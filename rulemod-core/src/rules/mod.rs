// Rule model
// - keys.rs: rule document vocabulary
// - matcher.rs: Match predicates
// - action.rs: Action mutators
// - node.rs: Node, the recursive apply algorithm

pub mod action;
pub mod keys;
pub mod matcher;
pub mod node;

pub use action::{Action, NumberAction};
pub use matcher::{Match, TextMatch};
pub use node::Node;
