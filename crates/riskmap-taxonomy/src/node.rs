//! Weighted hierarchy nodes and structural paths.

use crate::TaxonomyError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Structural identity of a node: the names from the true root down to it.
///
/// The root itself is the empty path. Paths survive hierarchy rebuilds,
/// which is how navigation re-finds the node it was anchored to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodePath(Vec<String>);

impl NodePath {
    /// The path of the true root.
    #[must_use]
    pub const fn root() -> Self {
        Self(Vec::new())
    }

    /// Build a path from name segments.
    #[must_use]
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    /// Path of the child called `name`.
    #[must_use]
    pub fn child(&self, name: &str) -> Self {
        let mut segments = self.0.clone();
        segments.push(name.to_string());
        Self(segments)
    }

    /// Path of the parent, or `None` for the root.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        self.0
            .split_last()
            .map(|(_, rest)| Self(rest.to_vec()))
    }

    /// Depth below the true root.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// Whether this is the root path.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Name segments.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Last segment, if any.
    #[must_use]
    pub fn last(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    /// Whether `self` is `other` or one of its ancestors.
    #[must_use]
    pub fn is_prefix_of(&self, other: &Self) -> bool {
        other.0.starts_with(&self.0)
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            write!(f, "(root)")
        } else {
            write!(f, "{}", self.0.join(" / "))
        }
    }
}

/// A node in the weighted taxonomy hierarchy.
///
/// Leaves carry their own weight; every internal node's `value` equals the
/// sum of its children's values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedNode {
    /// Display name, unique among siblings.
    pub name: String,
    /// Aggregated weight.
    pub value: f64,
    /// Child nodes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Self>,
}

impl WeightedNode {
    /// Create a unit-weight leaf.
    #[must_use]
    pub fn leaf(name: &str) -> Self {
        Self::weighted_leaf(name, 1.0)
    }

    /// Create a leaf with an explicit weight.
    #[must_use]
    pub fn weighted_leaf(name: &str, value: f64) -> Self {
        Self {
            name: name.to_string(),
            value,
            children: Vec::new(),
        }
    }

    /// Create a branch whose value is the sum of its children.
    #[must_use]
    pub fn branch(name: &str, children: Vec<Self>) -> Self {
        let value = children.iter().map(|c| c.value).sum();
        Self {
            name: name.to_string(),
            value,
            children,
        }
    }

    /// Check if this is a leaf node.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Whether every internal value equals the sum of its children.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        if self.children.is_empty() {
            return true;
        }
        let sum: f64 = self.children.iter().map(|c| c.value).sum();
        (self.value - sum).abs() <= f64::EPSILON * sum.abs().max(1.0)
            && self.children.iter().all(Self::is_consistent)
    }

    /// Number of leaves below (or at) this node.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        if self.children.is_empty() {
            1
        } else {
            self.children.iter().map(Self::leaf_count).sum()
        }
    }

    /// Distance to the deepest descendant; zero for a leaf.
    #[must_use]
    pub fn height(&self) -> usize {
        self.children
            .iter()
            .map(|c| c.height() + 1)
            .max()
            .unwrap_or(0)
    }

    /// Direct child by name.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&Self> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Follow a structural path from this node.
    ///
    /// Lookup walks one tier per segment, so it costs O(depth × siblings)
    /// rather than a full tree search.
    #[must_use]
    pub fn resolve(&self, path: &NodePath) -> Option<&Self> {
        path.segments()
            .iter()
            .try_fold(self, |node, name| node.child(name))
    }

    /// Visit every node depth-first (pre-order) with its path.
    pub fn visit<F>(&self, mut f: F)
    where
        F: FnMut(&NodePath, &Self),
    {
        fn walk<F: FnMut(&NodePath, &WeightedNode)>(
            node: &WeightedNode,
            path: &NodePath,
            f: &mut F,
        ) {
            f(path, node);
            for child in &node.children {
                walk(child, &path.child(&child.name), f);
            }
        }
        walk(self, &NodePath::root(), &mut f);
    }

    /// Parse and validate an externally produced hierarchy from JSON.
    pub fn from_json(json: &str) -> Result<Self, TaxonomyError> {
        let input: InputNode = serde_json::from_str(json)?;
        Self::try_from(input)
    }
}

/// Hierarchy shape accepted from external producers:
/// `{ name, value?, children? }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputNode {
    /// Display name
    pub name: String,
    /// Optional weight; only meaningful on leaves.
    #[serde(default)]
    pub value: Option<f64>,
    /// Child nodes
    #[serde(default)]
    pub children: Vec<InputNode>,
}

impl TryFrom<InputNode> for WeightedNode {
    type Error = TaxonomyError;

    /// Validate weights and sibling names, then aggregate.
    ///
    /// A leaf without a value weighs zero. An internal node's own value is
    /// ignored in favour of its children's sum.
    fn try_from(input: InputNode) -> Result<Self, Self::Error> {
        fn convert(input: InputNode, path: &NodePath) -> Result<WeightedNode, TaxonomyError> {
            if let Some(value) = input.value {
                if !value.is_finite() || value < 0.0 {
                    return Err(TaxonomyError::InvalidValue {
                        path: path.clone(),
                        value,
                    });
                }
            }
            if input.children.is_empty() {
                return Ok(WeightedNode::weighted_leaf(
                    &input.name,
                    input.value.unwrap_or(0.0),
                ));
            }

            let mut seen = HashSet::new();
            let mut children = Vec::with_capacity(input.children.len());
            for child in input.children {
                if !seen.insert(child.name.clone()) {
                    return Err(TaxonomyError::DuplicateName {
                        path: path.clone(),
                        name: child.name,
                    });
                }
                let child_path = path.child(&child.name);
                children.push(convert(child, &child_path)?);
            }
            Ok(WeightedNode::branch(&input.name, children))
        }

        convert(input, &NodePath::root())
    }
}
