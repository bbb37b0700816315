//! Semantic equivalence checks for XML documents.
//!
//! Two documents are compared node by node: names, text content, and the set
//! and order of significant children. The first divergence stops the walk and
//! is reported with a [`Reason`] and the exact node pair involved.
//!
//! ```
//! use xml_compare_core::{compare, compare_with_options, CompareOptions, Reason};
//!
//! let result = compare("<a><b/><c/></a>", "<a><c/><b/></a>").unwrap();
//! assert_eq!(result.reason(), Reason::DifferentOrderingOfChildNodes);
//!
//! let opts = CompareOptions { element_order: false, ..CompareOptions::default() };
//! assert!(compare_with_options("<a><b/><c/></a>", "<a><c/><b/></a>", &opts).unwrap().succeeded());
//! ```

pub mod compare;
pub mod format;
pub mod parser;
pub mod tree;

pub use compare::{
    compare, compare_nodes, compare_with_options, CompareError, CompareOptions, Comparator,
    ComparisonResult, ContractError, Input, LogTrace, NoTrace, Reason, Trace, DEFAULT_MAX_DEPTH,
};
pub use format::{format_json, format_summary, format_text};
pub use parser::{parse, parse_file, parse_str, parse_with_limit, ParseError};
pub use tree::{CompareNode, NodeKind, XmlNode};
