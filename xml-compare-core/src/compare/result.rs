use std::borrow::Cow;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::XmlNode;

/// Why a comparison failed.
///
/// [`Reason::None`] is the empty sentinel carried by successful results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Reason {
    #[default]
    None,
    DifferentChildNodes,
    DifferentNumberOfChildNodes,
    DifferentOrderingOfChildNodes,
    DifferentNodeNames,
    DifferentNodeContents,
    ParameterIsNil,
}

impl Reason {
    /// Every reason, sentinel first.
    pub const ALL: [Reason; 7] = [
        Reason::None,
        Reason::DifferentChildNodes,
        Reason::DifferentNumberOfChildNodes,
        Reason::DifferentOrderingOfChildNodes,
        Reason::DifferentNodeNames,
        Reason::DifferentNodeContents,
        Reason::ParameterIsNil,
    ];

    /// Symbolic name of the reason; empty for [`Reason::None`].
    pub fn as_str(self) -> &'static str {
        match self {
            Reason::None => "",
            Reason::DifferentChildNodes => "different_child_nodes",
            Reason::DifferentNumberOfChildNodes => "different_number_of_child_nodes",
            Reason::DifferentOrderingOfChildNodes => "different_ordering_of_child_nodes",
            Reason::DifferentNodeNames => "different_node_names",
            Reason::DifferentNodeContents => "different_node_contents",
            Reason::ParameterIsNil => "parameter_is_nil",
        }
    }

    /// True for every reason a failed comparison may carry.
    pub fn is_mismatch(self) -> bool {
        self != Reason::None
    }
}

impl Display for Reason {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Reason {
    type Err = ContractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Reason::ALL
            .into_iter()
            .find(|reason| reason.as_str() == s)
            .ok_or_else(|| ContractError::UnknownReason(s.to_string()))
    }
}

impl Serialize for Reason {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Violations of the result model's construction rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractError {
    /// A symbol outside the closed set of reasons.
    #[error("unknown comparison reason `{0}`")]
    UnknownReason(String),
    /// A failed result was constructed without a mismatch reason.
    #[error("a failed comparison requires a mismatch reason")]
    MissingReason,
}

/// Outcome of comparing two trees.
///
/// A failed result names the exact node pair where the trees diverge, when
/// the divergence is tied to nodes at all. Those nodes are borrowed from the
/// compared trees, or owned copies when the trees did not outlive the call.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonResult<'a, N: Clone = XmlNode> {
    succeeded: bool,
    reason: Reason,
    lhs_node: Option<Cow<'a, N>>,
    rhs_node: Option<Cow<'a, N>>,
}

impl<'a, N: Clone> ComparisonResult<'a, N> {
    /// Checked constructor.
    pub fn new(
        succeeded: bool,
        reason: Reason,
        lhs_node: Option<&'a N>,
        rhs_node: Option<&'a N>,
    ) -> Result<Self, ContractError> {
        if !succeeded && !reason.is_mismatch() {
            return Err(ContractError::MissingReason);
        }

        Ok(Self {
            succeeded,
            reason,
            lhs_node: lhs_node.map(Cow::Borrowed),
            rhs_node: rhs_node.map(Cow::Borrowed),
        })
    }

    /// A successful result.
    pub fn same() -> Self {
        Self::same_because(Reason::None)
    }

    /// A successful result tagged with an informational reason.
    pub fn same_because(reason: Reason) -> Self {
        Self {
            succeeded: true,
            reason,
            lhs_node: None,
            rhs_node: None,
        }
    }

    /// A failed result.
    ///
    /// # Panics
    ///
    /// Panics if `reason` is [`Reason::None`].
    pub fn different(reason: Reason, lhs_node: Option<&'a N>, rhs_node: Option<&'a N>) -> Self {
        assert!(
            reason.is_mismatch(),
            "{}",
            ContractError::MissingReason
        );

        Self {
            succeeded: false,
            reason,
            lhs_node: lhs_node.map(Cow::Borrowed),
            rhs_node: rhs_node.map(Cow::Borrowed),
        }
    }

    pub fn succeeded(&self) -> bool {
        self.succeeded
    }

    pub fn reason(&self) -> Reason {
        self.reason
    }

    /// Left-hand node where the trees diverge.
    pub fn lhs_node(&self) -> Option<&N> {
        self.lhs_node.as_deref()
    }

    /// Right-hand node where the trees diverge.
    pub fn rhs_node(&self) -> Option<&N> {
        self.rhs_node.as_deref()
    }

    /// Detach the result from the compared trees, cloning any borrowed nodes.
    pub fn into_owned<'b>(self) -> ComparisonResult<'b, N> {
        ComparisonResult {
            succeeded: self.succeeded,
            reason: self.reason,
            lhs_node: self.lhs_node.map(|node| Cow::Owned(node.into_owned())),
            rhs_node: self.rhs_node.map(|node| Cow::Owned(node.into_owned())),
        }
    }
}

impl<N: Clone + Display> ComparisonResult<'_, N> {
    /// Human-readable description: the reason with `_` turned into spaces,
    /// followed by the divergent nodes rendered as markup.
    pub fn details(&self) -> String {
        let reason = self.reason.as_str().replace('_', " ");

        let mut qualifying = Vec::new();
        if let Some(lhs) = &self.lhs_node {
            qualifying.push(format!("lhs-node={lhs}"));
        }
        if let Some(rhs) = &self.rhs_node {
            qualifying.push(format!("rhs-node={rhs}"));
        }

        if qualifying.is_empty() {
            reason
        } else {
            format!("{reason}: {}", qualifying.join("; "))
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{ComparisonResult, ContractError, Reason};
    use crate::XmlNode;

    #[test]
    fn reason_symbols_round_trip() {
        for reason in Reason::ALL {
            assert_eq!(reason.as_str().parse::<Reason>(), Ok(reason));
        }
        assert_eq!(
            "parameter_is_empty".parse::<Reason>(),
            Err(ContractError::UnknownReason("parameter_is_empty".to_string()))
        );
    }

    #[test]
    fn checked_constructor_rejects_failure_without_reason() {
        let result = ComparisonResult::<XmlNode>::new(false, Reason::None, None, None);
        assert_eq!(result, Err(ContractError::MissingReason));

        let ok = ComparisonResult::<XmlNode>::new(true, Reason::DifferentNodeNames, None, None)
            .expect("success may carry any reason");
        assert!(ok.succeeded());
    }

    #[test]
    #[should_panic(expected = "requires a mismatch reason")]
    fn different_without_reason_panics() {
        let _ = ComparisonResult::<XmlNode>::different(Reason::None, None, None);
    }

    #[test]
    fn details_without_nodes_is_spaced_reason() {
        let result = ComparisonResult::<XmlNode>::different(Reason::ParameterIsNil, None, None);
        assert_eq!(result.details(), "parameter is nil");
        assert_eq!(ComparisonResult::<XmlNode>::same().details(), "");
    }

    #[test]
    fn details_lists_both_nodes() {
        let lhs = XmlNode::element("a").with_child(XmlNode::text("1"));
        let rhs = XmlNode::element("b");
        let result =
            ComparisonResult::different(Reason::DifferentNodeNames, Some(&lhs), Some(&rhs));

        assert_eq!(
            result.details(),
            "different node names: lhs-node=<a>1</a>; rhs-node=<b/>"
        );
    }

    #[test]
    fn into_owned_keeps_nodes() {
        let result = {
            let lhs = XmlNode::element("a");
            let rhs = XmlNode::element("b");
            ComparisonResult::different(Reason::DifferentNodeNames, Some(&lhs), Some(&rhs))
                .into_owned()
        };

        assert_eq!(result.lhs_node().map(|n| n.name.as_str()), Some("a"));
        assert_eq!(result.rhs_node().map(|n| n.name.as_str()), Some("b"));
    }
}
