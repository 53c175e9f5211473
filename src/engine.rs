//! Rule compilation and the classifying traversal

pub mod rules;
pub mod traversal;

pub use rules::{RuleSet, compile_own, compile_target};
pub use traversal::{Classifier, ScanSummary, Traversal, TraversalEntry, TraversalError};
