use std::fmt::Display;

use crate::compare::ComparisonResult;

/// Format a result as plain text.
pub fn format_text<N: Clone + Display>(result: &ComparisonResult<'_, N>) -> String {
    if result.succeeded() {
        "equivalent".to_string()
    } else {
        format!("not equivalent: {}", result.details())
    }
}

/// Format a one-line `key=value` summary.
pub fn format_summary<N: Clone>(result: &ComparisonResult<'_, N>) -> String {
    let reason = if result.reason().is_mismatch() {
        result.reason().as_str()
    } else {
        "none"
    };
    format!("succeeded={} reason={reason}", result.succeeded())
}

#[cfg(test)]
mod tests {
    use super::{format_summary, format_text};
    use crate::compare::{ComparisonResult, Reason};
    use crate::XmlNode;

    #[test]
    fn text_and_summary_for_failure() {
        let lhs = XmlNode::element("x");
        let rhs = XmlNode::element("y");
        let result = ComparisonResult::different(Reason::DifferentNodeNames, Some(&lhs), Some(&rhs));

        assert_eq!(
            format_text(&result),
            "not equivalent: different node names: lhs-node=<x/>; rhs-node=<y/>"
        );
        assert_eq!(
            format_summary(&result),
            "succeeded=false reason=different_node_names"
        );
    }

    #[test]
    fn text_and_summary_for_success() {
        let result = ComparisonResult::<XmlNode>::same();
        assert_eq!(format_text(&result), "equivalent");
        assert_eq!(format_summary(&result), "succeeded=true reason=none");
    }
}
