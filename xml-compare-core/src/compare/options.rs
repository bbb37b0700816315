use serde::{Deserialize, Serialize};

/// Default bound on the nesting depth visited by the comparator.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Equivalence rules applied by the comparator.
///
/// Deserializes from a table where every key is optional; unknown keys are
/// ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareOptions {
    /// Collapse whitespace runs to one space and trim before comparing content.
    #[serde(alias = "normalise_whitespace")]
    pub normalize_whitespace: bool,
    /// Whether sibling order is significant.
    pub element_order: bool,
    /// Treat a missing input as equal to empty text.
    pub equate_nil_and_empty: bool,
    /// Maximum nesting depth visited; `None` or `Some(0)` disables the limit.
    pub max_depth: Option<usize>,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            normalize_whitespace: false,
            element_order: true,
            equate_nil_and_empty: false,
            max_depth: Some(DEFAULT_MAX_DEPTH),
        }
    }
}

impl CompareOptions {
    /// Effective depth limit, if any.
    pub fn depth_limit(&self) -> Option<usize> {
        self.max_depth.filter(|limit| *limit > 0)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde::Deserialize;

    use super::{CompareOptions, DEFAULT_MAX_DEPTH};

    #[derive(Deserialize)]
    struct Wrapper {
        compare: CompareOptions,
    }

    fn from_json(raw: &str) -> CompareOptions {
        serde_json::from_str::<Wrapper>(raw)
            .expect("options should deserialize")
            .compare
    }

    #[test]
    fn missing_keys_take_defaults() {
        assert_eq!(from_json(r#"{"compare": {}}"#), CompareOptions::default());
        assert_eq!(CompareOptions::default().depth_limit(), Some(DEFAULT_MAX_DEPTH));
    }

    #[test]
    fn british_spelling_and_unknown_keys_are_accepted() {
        let opts = from_json(
            r#"{"compare": {"normalise_whitespace": true, "element_order": false, "debug": true}}"#,
        );
        assert!(opts.normalize_whitespace);
        assert!(!opts.element_order);
        assert!(!opts.equate_nil_and_empty);
    }

    #[test]
    fn zero_depth_disables_limit() {
        let opts = CompareOptions {
            max_depth: Some(0),
            ..CompareOptions::default()
        };
        assert_eq!(opts.depth_limit(), None);
    }
}
