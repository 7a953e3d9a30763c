//! Domain layer for the issue tracker: identifier and timestamp types, the
//! error taxonomy, and field validation shared by the store and HTTP layers.

pub mod error;
pub mod fields;
pub mod issue;
pub mod types;
