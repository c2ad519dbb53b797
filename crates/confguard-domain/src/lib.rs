//! Pure audit evaluation (no IO).
//!
//! Input: parsed device configuration trees supplied through [`TreeSource`].
//! Output: check outcomes, findings, verdict, and summary data.

#![forbid(unsafe_code)]

pub mod checks;
pub mod matrix;
pub mod policy;
pub mod report;
pub mod tree;

mod engine;
mod eval;
mod fingerprint;
mod query;
mod source;

pub use engine::evaluate;
pub use source::TreeSource;
pub use tree::{ConfigTree, Node, NodeId, ParseError, ParseOptions};
