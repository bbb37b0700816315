//! Semantic comparison of XML trees.

pub mod engine;
pub mod options;
pub mod result;
pub mod trace;

pub use engine::{compare, compare_nodes, compare_with_options, CompareError, Comparator, Input};
pub use options::{CompareOptions, DEFAULT_MAX_DEPTH};
pub use result::{ComparisonResult, ContractError, Reason};
pub use trace::{LogTrace, NoTrace, Trace};
