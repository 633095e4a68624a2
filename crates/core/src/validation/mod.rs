//! Deck legality: rule violation types and the pure validator.

pub mod rules;
pub mod validator;

pub use rules::{RuleViolation, ValidationReport};
pub use validator::validate;
