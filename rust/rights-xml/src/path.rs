//! Location paths.
//!
//! A deliberately small subset of XPath location paths, enough to walk a
//! rights document:
//!
//! ```text
//! path  = ['.'] step*
//! step  = '/' test      → child axis
//!       | '//' test     → descendant axis
//!       | test          → child axis (first step of a relative path)
//! test  = name | '*'
//! ```
//!
//! Predicates are not part of the dialect. Callers select candidate nodes
//! with a path and filter them with [`crate::Query::attribute`] and friends.
//!
//! Every string is a valid path. Empty name tests are skipped, so `"//"` on
//! its own selects nothing and `"./"` selects the context node.

use std::fmt;

/// The direction a [`Step`] walks from its context node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Direct children of the context node.
    Child,
    /// All descendants of the context node, in document order.
    Descendant,
}

/// Which elements a [`Step`] keeps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameTest {
    /// Any element (`*`).
    Any,
    /// Elements whose local name equals this string.
    Named(String),
}

impl NameTest {
    /// Returns `true` if an element with the given local name passes this test.
    pub fn matches(&self, name: &str) -> bool {
        match self {
            NameTest::Any => true,
            NameTest::Named(expected) => expected == name,
        }
    }
}

/// One step of a [`Path`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// Axis the step walks along.
    pub axis: Axis,
    /// Name test applied to every candidate on the axis.
    pub test: NameTest,
}

/// A parsed location path.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Path {
    steps: Vec<Step>,
}

impl Path {
    /// Parses a location path. Never fails; see the module docs.
    pub fn new(source: &str) -> Self {
        let source = source.strip_prefix('.').unwrap_or(source);
        let mut steps = Vec::new();
        let mut axis = Axis::Child;

        for segment in source.split('/') {
            if segment.is_empty() {
                // An empty segment between two slashes is the `//` shorthand.
                axis = Axis::Descendant;
                continue;
            }
            let test = match segment {
                "*" => NameTest::Any,
                name => NameTest::Named(name.to_string()),
            };
            steps.push(Step { axis, test });
            axis = Axis::Child;
        }

        // A single leading slash only marks the path as absolute; the
        // document root is always the context node for such paths.
        if source.starts_with('/') && !source.starts_with("//") {
            if let Some(first) = steps.first_mut() {
                first.axis = Axis::Child;
            }
        }

        Self { steps }
    }

    /// The steps of this path, in evaluation order.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Returns `true` if this path selects the context node itself.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl From<&str> for Path {
    fn from(source: &str) -> Self {
        Path::new(source)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.steps.is_empty() {
            return write!(f, ".");
        }
        for (index, step) in self.steps.iter().enumerate() {
            match (index, step.axis) {
                (0, Axis::Child) => {}
                (_, Axis::Child) => write!(f, "/")?,
                (_, Axis::Descendant) => write!(f, "//")?,
            }
            match &step.test {
                NameTest::Any => write!(f, "*")?,
                NameTest::Named(name) => write!(f, "{name}")?,
            }
        }
        Ok(())
    }
}
