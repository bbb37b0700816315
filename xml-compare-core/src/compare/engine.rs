use std::borrow::Cow;

use thiserror::Error;

use crate::compare::options::CompareOptions;
use crate::compare::result::{ComparisonResult, Reason};
use crate::compare::trace::{LogTrace, Trace};
use crate::parser::{parse_with_limit, ParseError};
use crate::tree::{CompareNode, NodeKind, XmlNode};

/// Failures that stop a comparison before it reaches a verdict.
#[derive(Debug, Error)]
pub enum CompareError {
    /// Text input was not well-formed XML.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// The trees nest deeper than [`CompareOptions::max_depth`].
    #[error("tree depth exceeds the limit of {limit}")]
    DepthLimitExceeded { limit: usize },
}

/// One side of a comparison.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Input<'a> {
    /// No document at all.
    Nil,
    /// Raw markup, parsed before comparing.
    Text(&'a str),
    /// An already parsed tree.
    Node(&'a XmlNode),
}

impl<'a> Input<'a> {
    /// The node a side is compared from: the root element of a document
    /// that has one, otherwise the node itself. Text is parsed with the
    /// same depth limit the comparator walks with.
    fn resolve(self, max_depth: Option<usize>) -> Result<Cow<'a, XmlNode>, CompareError> {
        match self {
            Input::Nil => Ok(Cow::Owned(XmlNode::document())),
            Input::Text(text) => match parse_with_limit(text.as_bytes(), max_depth) {
                Ok(document) => Ok(Cow::Owned(into_root(document))),
                Err(ParseError::DepthLimitExceeded { limit }) => {
                    Err(CompareError::DepthLimitExceeded { limit })
                }
                Err(err) => Err(err.into()),
            },
            Input::Node(node) => Ok(Cow::Borrowed(node.root_element().unwrap_or(node))),
        }
    }
}

fn into_root(mut document: XmlNode) -> XmlNode {
    match document
        .children
        .iter()
        .position(|child| child.kind == NodeKind::Element)
    {
        Some(index) => document.children.swap_remove(index),
        None => document,
    }
}

impl<'a> From<&'a str> for Input<'a> {
    fn from(text: &'a str) -> Self {
        Input::Text(text)
    }
}

impl<'a> From<&'a String> for Input<'a> {
    fn from(text: &'a String) -> Self {
        Input::Text(text)
    }
}

impl<'a> From<&'a XmlNode> for Input<'a> {
    fn from(node: &'a XmlNode) -> Self {
        Input::Node(node)
    }
}

impl<'a, T: Into<Input<'a>>> From<Option<T>> for Input<'a> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Input::Nil, Into::into)
    }
}

/// Compare two inputs with default options.
pub fn compare<'a>(
    lhs: impl Into<Input<'a>>,
    rhs: impl Into<Input<'a>>,
) -> Result<ComparisonResult<'a>, CompareError> {
    Comparator::default().compare(lhs, rhs)
}

/// Compare two inputs with custom options.
pub fn compare_with_options<'a>(
    lhs: impl Into<Input<'a>>,
    rhs: impl Into<Input<'a>>,
    opts: &CompareOptions,
) -> Result<ComparisonResult<'a>, CompareError> {
    Comparator::new(opts.clone()).compare(lhs, rhs)
}

/// Compare two parsed trees of any [`CompareNode`] type.
pub fn compare_nodes<'a, N>(
    lhs: &'a N,
    rhs: &'a N,
    opts: &CompareOptions,
) -> Result<ComparisonResult<'a, N>, CompareError>
where
    N: CompareNode + Clone,
{
    Comparator::new(opts.clone()).compare_nodes(lhs, rhs)
}

/// Options plus the trace hook notified while comparing.
pub struct Comparator<'t> {
    options: CompareOptions,
    trace: &'t dyn Trace,
}

impl Default for Comparator<'static> {
    fn default() -> Self {
        Self::new(CompareOptions::default())
    }
}

impl Comparator<'static> {
    /// A comparator that reports through [`LogTrace`].
    pub fn new(options: CompareOptions) -> Self {
        Self {
            options,
            trace: &LogTrace,
        }
    }
}

impl<'t> Comparator<'t> {
    /// Replace the trace hook.
    pub fn with_trace<'u>(self, trace: &'u dyn Trace) -> Comparator<'u> {
        Comparator {
            options: self.options,
            trace,
        }
    }

    pub fn options(&self) -> &CompareOptions {
        &self.options
    }

    /// Compare two inputs, parsing text sides first.
    ///
    /// A nil side only matches another nil side, or empty text when
    /// `equate_nil_and_empty` is set. Documents are compared from their root
    /// element. When either side is parsed here, the result owns copies of
    /// the divergent nodes.
    pub fn compare<'a>(
        &self,
        lhs: impl Into<Input<'a>>,
        rhs: impl Into<Input<'a>>,
    ) -> Result<ComparisonResult<'a>, CompareError> {
        let (lhs, rhs) = match (lhs.into(), rhs.into()) {
            (Input::Nil, Input::Nil) => return Ok(ComparisonResult::same()),
            (Input::Nil, other) | (other, Input::Nil) => return Ok(self.compare_with_nil(other)),
            (lhs, rhs) => {
                let limit = self.options.depth_limit();
                (lhs.resolve(limit)?, rhs.resolve(limit)?)
            }
        };

        match (&lhs, &rhs) {
            (Cow::Borrowed(lhs), Cow::Borrowed(rhs)) => self.compare_nodes(*lhs, *rhs),
            _ => self
                .compare_nodes(&*lhs, &*rhs)
                .map(ComparisonResult::into_owned),
        }
    }

    /// Compare two parsed trees.
    pub fn compare_nodes<'a, N>(
        &self,
        lhs: &'a N,
        rhs: &'a N,
    ) -> Result<ComparisonResult<'a, N>, CompareError>
    where
        N: CompareNode + Clone,
    {
        self.compare_at(lhs, rhs, 0)
    }

    fn compare_with_nil<'a>(&self, other: Input<'_>) -> ComparisonResult<'a> {
        if self.options.equate_nil_and_empty && matches!(other, Input::Text("")) {
            return ComparisonResult::same();
        }

        self.trace.mismatch(0, Reason::ParameterIsNil);
        ComparisonResult::different(Reason::ParameterIsNil, None, None)
    }

    fn compare_at<'a, N>(
        &self,
        lhs: &'a N,
        rhs: &'a N,
        depth: usize,
    ) -> Result<ComparisonResult<'a, N>, CompareError>
    where
        N: CompareNode + Clone,
    {
        if let Some(limit) = self.options.depth_limit() {
            if depth > limit {
                return Err(CompareError::DepthLimitExceeded { limit });
            }
        }

        self.trace.enter(depth, lhs.name(), rhs.name());

        if lhs.name() != rhs.name() {
            return Ok(self.different(Reason::DifferentNodeNames, lhs, rhs, depth));
        }

        if !self.same_content(&lhs.content(), &rhs.content()) {
            return Ok(self.different(Reason::DifferentNodeContents, lhs, rhs, depth));
        }

        let mut lhs_children = significant_children(lhs);
        let mut rhs_children = significant_children(rhs);

        if lhs_children.len() != rhs_children.len() {
            return Ok(self.different(Reason::DifferentNumberOfChildNodes, lhs, rhs, depth));
        }

        if !same_names(&lhs_children, &rhs_children) {
            // Sorting separates a reordering from genuinely different children.
            lhs_children.sort_by(|a, b| a.name().cmp(b.name()));
            rhs_children.sort_by(|a, b| a.name().cmp(b.name()));

            if !same_names(&lhs_children, &rhs_children) {
                return Ok(self.different(Reason::DifferentChildNodes, lhs, rhs, depth));
            }
            if self.options.element_order {
                return Ok(self.different(
                    Reason::DifferentOrderingOfChildNodes,
                    lhs,
                    rhs,
                    depth,
                ));
            }
        }

        for (lhs_child, rhs_child) in lhs_children.into_iter().zip(rhs_children) {
            let result = self.compare_at(lhs_child, rhs_child, depth + 1)?;
            if !result.succeeded() {
                return Ok(result);
            }
        }

        Ok(ComparisonResult::same())
    }

    fn same_content(&self, lhs: &str, rhs: &str) -> bool {
        if self.options.normalize_whitespace {
            normalize_whitespace(lhs) == normalize_whitespace(rhs)
        } else {
            lhs == rhs
        }
    }

    fn different<'a, N: Clone>(
        &self,
        reason: Reason,
        lhs: &'a N,
        rhs: &'a N,
        depth: usize,
    ) -> ComparisonResult<'a, N> {
        self.trace.mismatch(depth, reason);
        ComparisonResult::different(reason, Some(lhs), Some(rhs))
    }
}

/// Children that take part in structural comparison: everything except
/// text nodes made only of whitespace.
fn significant_children<N: CompareNode>(node: &N) -> Vec<&N> {
    node.children()
        .filter(|child| !(child.is_text() && is_blank(&child.content())))
        .collect()
}

fn same_names<N: CompareNode>(lhs: &[&N], rhs: &[&N]) -> bool {
    lhs.iter().map(|n| n.name()).eq(rhs.iter().map(|n| n.name()))
}

fn is_blank(text: &str) -> bool {
    text.bytes().all(|b| b.is_ascii_whitespace())
}

fn normalize_whitespace(text: &str) -> String {
    text.split_ascii_whitespace().collect::<Vec<_>>().join(" ")
}
