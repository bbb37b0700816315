use std::fmt::Display;

use serde::Serialize;

use crate::compare::{ComparisonResult, Reason};

#[derive(Serialize)]
struct Report {
    succeeded: bool,
    reason: Reason,
    details: String,
    lhs_node: Option<String>,
    rhs_node: Option<String>,
}

/// Format a result as pretty-printed JSON, nodes rendered as markup.
pub fn format_json<N: Clone + Display>(result: &ComparisonResult<'_, N>) -> String {
    let report = Report {
        succeeded: result.succeeded(),
        reason: result.reason(),
        details: result.details(),
        lhs_node: result.lhs_node().map(ToString::to_string),
        rhs_node: result.rhs_node().map(ToString::to_string),
    };
    serde_json::to_string_pretty(&report).unwrap_or_else(|_| "{}".to_string())
}
