//! Positions the visible part of a weighted hierarchy inside a viewport.
//!
//! A pass works on the subtree under the current root. Children are sorted
//! by value (largest first), tiled into their parent's padded interior, and
//! cut off `max_depth` tiers below the current root. Depth is always
//! measured from the true root so colours and categories stay stable while
//! zooming.

use crate::config::LayoutOptions;
use crate::navigation::{breadcrumb_for, Crumb};
use riskmap_core::{Rect, Size};
use riskmap_taxonomy::{NodePath, WeightedNode};
use serde::Serialize;
use std::cmp::Ordering;
use tracing::warn;

/// One positioned node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutNode {
    /// Structural path from the true root
    pub path: NodePath,
    /// Node name
    pub name: String,
    /// Aggregate value
    pub value: f64,
    /// Distance from the true root
    pub depth: usize,
    /// Distance to the deepest descendant leaf
    pub height: usize,
    /// Bounds in viewport units
    pub rect: Rect,
    /// Whether the node has children in the hierarchy
    pub has_children: bool,
    /// Whether this node sits exactly on the depth cutoff
    pub at_cutoff: bool,
}

impl LayoutNode {
    /// Leaf of the hierarchy (not merely of the visible window).
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        !self.has_children
    }
}

/// Output of a layout pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutResult {
    /// The current root, spanning the viewport
    pub frame: LayoutNode,
    /// Visible, non-degenerate descendants in paint order (parents first)
    pub rects: Vec<LayoutNode>,
    /// Trail from the true root to the current root
    pub breadcrumb: Vec<Crumb>,
    /// Viewport the pass was computed for
    pub viewport: Size,
}

impl LayoutResult {
    /// Nothing to draw: the current root aggregates to zero.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frame.value <= 0.0
    }

    /// Visible leaves of the hierarchy.
    pub fn leaves(&self) -> impl Iterator<Item = &LayoutNode> {
        self.rects.iter().filter(|n| n.is_leaf())
    }

    /// Node at `path`, if visible.
    #[must_use]
    pub fn find(&self, path: &NodePath) -> Option<&LayoutNode> {
        self.rects.iter().find(|n| &n.path == path)
    }
}

/// Runs layout passes with fixed options.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutEngine {
    options: LayoutOptions,
}

/// A node with its recomputed aggregate and sorted children.
struct Measured<'a> {
    node: &'a WeightedNode,
    value: f64,
    height: usize,
    children: Vec<Measured<'a>>,
}

impl<'a> Measured<'a> {
    fn new(node: &'a WeightedNode) -> Self {
        if node.is_leaf() {
            return Self {
                node,
                value: node.value,
                height: 0,
                children: Vec::new(),
            };
        }
        let mut children: Vec<Measured<'a>> = node.children.iter().map(Self::new).collect();
        children.sort_by(|a, b| b.value.partial_cmp(&a.value).unwrap_or(Ordering::Equal));
        Self {
            node,
            value: children.iter().map(|c| c.value).sum(),
            height: children.iter().map(|c| c.height + 1).max().unwrap_or(0),
            children,
        }
    }
}

impl LayoutEngine {
    /// Create an engine.
    #[must_use]
    pub fn new(options: LayoutOptions) -> Self {
        Self { options }
    }

    /// Lay out the subtree at `current_root`.
    ///
    /// A `current_root` missing from `tree` falls back to the true root.
    /// Never fails: degenerate rectangles are dropped and an all-zero
    /// subtree yields an empty result.
    #[must_use]
    pub fn layout(
        &self,
        tree: &WeightedNode,
        current_root: &NodePath,
        viewport: Size,
        max_depth: Option<usize>,
    ) -> LayoutResult {
        let (root_path, root) = match tree.resolve(current_root) {
            Some(node) => (current_root.clone(), node),
            None => {
                warn!(path = %current_root, "layout root not in tree, using true root");
                (NodePath::root(), tree)
            }
        };
        let breadcrumb = breadcrumb_for(tree, &root_path).unwrap_or_default();
        let measured = Measured::new(root);

        let pi = self.options.padding_inner;
        let bounds = Rect::new(-pi, -pi, viewport.width + pi, viewport.height + pi);
        let mut pass = Pass {
            options: &self.options,
            base_depth: root_path.depth(),
            max_depth,
            out: Vec::new(),
        };
        let frame = pass.node(&measured, root_path, bounds, 0);
        if frame.value > 0.0 {
            pass.descend(&measured, &frame.path, bounds, 0);
        }

        LayoutResult {
            frame,
            rects: pass.out,
            breadcrumb,
            viewport,
        }
    }
}

struct Pass<'o> {
    options: &'o LayoutOptions,
    base_depth: usize,
    max_depth: Option<usize>,
    out: Vec<LayoutNode>,
}

impl Pass<'_> {
    fn node(
        &self,
        node: &Measured<'_>,
        path: NodePath,
        rect: Rect,
        relative_depth: usize,
    ) -> LayoutNode {
        LayoutNode {
            name: node.node.name.clone(),
            value: node.value,
            depth: self.base_depth + relative_depth,
            height: node.height,
            rect: if self.options.round { rect.round() } else { rect },
            has_children: !node.children.is_empty(),
            at_cutoff: self.max_depth == Some(relative_depth),
            path,
        }
    }

    /// Position a non-root node inside the rectangle its parent allotted,
    /// then its children. Output is pre-order, so parents paint first.
    fn position(&mut self, node: &Measured<'_>, path: NodePath, allotted: Rect, relative_depth: usize) {
        let rect = allotted.inset(self.options.padding_inner / 2.0);
        let laid = self.node(node, path, rect, relative_depth);
        let path = laid.path.clone();
        if !laid.rect.is_degenerate() {
            self.out.push(laid);
        }
        self.descend(node, &path, rect, relative_depth);
    }

    /// Tile the padded interior of `rect` among the node's children.
    fn descend(&mut self, node: &Measured<'_>, path: &NodePath, rect: Rect, relative_depth: usize) {
        if node.children.is_empty() || self.max_depth.is_some_and(|max| relative_depth >= max) {
            return;
        }
        let o = self.options;
        let p = o.padding_inner / 2.0;
        let interior = rect.shrink(
            o.padding_outer - p,
            o.padding_top - p,
            o.padding_outer - p,
            o.padding_outer - p,
        );
        let values: Vec<f64> = node.children.iter().map(|c| c.value).collect();
        let tiles = o.tile.tile(&values, interior, relative_depth);
        for (child, tile) in node.children.iter().zip(tiles) {
            self.position(child, path.child(&child.node.name), tile, relative_depth + 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::TileStrategy;

    fn chain() -> WeightedNode {
        let mut node = WeightedNode::leaf("Head-on");
        for name in ["Vehicle to person", "Light Vehicles", "Passenger", "Surface"] {
            node = WeightedNode::branch(name, vec![node]);
        }
        WeightedNode::branch("Vehicle Incident", vec![node])
    }

    fn sample() -> WeightedNode {
        WeightedNode::branch(
            "root",
            vec![
                WeightedNode::branch(
                    "a",
                    vec![WeightedNode::leaf("a1"), WeightedNode::leaf("a2")],
                ),
                WeightedNode::branch(
                    "b",
                    vec![
                        WeightedNode::leaf("b1"),
                        WeightedNode::leaf("b2"),
                        WeightedNode::leaf("b3"),
                    ],
                ),
            ],
        )
    }

    fn engine() -> LayoutEngine {
        LayoutEngine::default()
    }

    const VIEWPORT: Size = Size {
        width: 800.0,
        height: 600.0,
    };

    #[test]
    fn test_chain_yields_leaf_and_four_ancestors() {
        let result = engine().layout(&chain(), &NodePath::root(), VIEWPORT, None);
        assert_eq!(result.rects.len(), 5);
        assert_eq!(result.leaves().count(), 1);
        let leaf_area = result.leaves().map(|n| n.rect.area()).sum::<f64>();
        assert!(leaf_area > 0.0);
        for node in &result.rects {
            assert!(node.rect.area() >= leaf_area, "{} smaller than leaf", node.name);
        }
    }

    #[test]
    fn test_frame_spans_viewport() {
        let result = engine().layout(&sample(), &NodePath::root(), VIEWPORT, None);
        assert_eq!(result.frame.rect, Rect::new(-1.0, -1.0, 801.0, 601.0));
        assert_eq!(result.frame.depth, 0);
        assert_eq!(result.frame.height, 2);
        assert!(!result.is_empty());
    }

    #[test]
    fn test_first_child_respects_padding() {
        let result = engine().layout(&sample(), &NodePath::root(), VIEWPORT, None);
        let first = &result.rects[0];
        // larger child first
        assert_eq!(first.name, "b");
        assert!(first.rect.x0 >= 2.0);
        assert!(first.rect.y0 >= 18.0);
        for node in &result.rects {
            assert!(node.rect.x1 <= 798.0 && node.rect.y1 <= 598.0);
        }
    }

    #[test]
    fn test_children_inside_parents() {
        let result = engine().layout(&sample(), &NodePath::root(), VIEWPORT, None);
        for node in &result.rects {
            if let Some(parent) = node.path.parent().and_then(|p| result.find(&p)) {
                assert!(parent.rect.contains_rect(&node.rect));
            }
        }
    }

    #[test]
    fn test_max_depth_cutoff() {
        let result = engine().layout(&sample(), &NodePath::root(), VIEWPORT, Some(1));
        assert_eq!(result.rects.len(), 2);
        assert!(result.rects.iter().all(|n| n.depth == 1 && n.at_cutoff));
        assert!(result.rects.iter().all(|n| n.has_children));
    }

    #[test]
    fn test_depth_is_absolute_when_zoomed() {
        let tree = sample();
        let path = NodePath::from_segments(["b"]);
        let result = engine().layout(&tree, &path, VIEWPORT, Some(1));
        assert_eq!(result.frame.depth, 1);
        assert_eq!(result.rects.len(), 3);
        assert!(result.rects.iter().all(|n| n.depth == 2));
        assert_eq!(result.breadcrumb.len(), 2);
    }

    #[test]
    fn test_zoomed_frame_fills_viewport() {
        let tree = sample();
        let result = engine().layout(&tree, &NodePath::from_segments(["a"]), VIEWPORT, None);
        assert_eq!(result.frame.rect, Rect::new(-1.0, -1.0, 801.0, 601.0));
    }

    #[test]
    fn test_empty_root() {
        let tree = WeightedNode::branch("root", Vec::new());
        let result = engine().layout(&tree, &NodePath::root(), VIEWPORT, None);
        assert!(result.is_empty());
        assert!(result.rects.is_empty());
    }

    #[test]
    fn test_zero_valued_leaves_are_empty() {
        let tree = WeightedNode::branch(
            "root",
            vec![WeightedNode::weighted_leaf("z", 0.0)],
        );
        let result = engine().layout(&tree, &NodePath::root(), VIEWPORT, None);
        assert!(result.is_empty());
        assert!(result.rects.is_empty());
    }

    #[test]
    fn test_missing_root_falls_back() {
        let tree = sample();
        let result = engine().layout(&tree, &NodePath::from_segments(["zz"]), VIEWPORT, None);
        assert_eq!(result.frame.depth, 0);
        assert_eq!(result.breadcrumb.len(), 1);
    }

    #[test]
    fn test_tiny_viewport_drops_degenerate() {
        let result = engine().layout(&chain(), &NodePath::root(), Size::new(20.0, 20.0), None);
        assert!(result.rects.iter().all(|n| !n.rect.is_degenerate()));
        assert!(result.rects.len() < 5);
    }

    #[test]
    fn test_unrounded_option() {
        let options = LayoutOptions {
            round: false,
            ..LayoutOptions::default()
        };
        let result = LayoutEngine::new(options).layout(
            &sample(),
            &NodePath::root(),
            Size::new(333.3, 211.7),
            None,
        );
        assert!(result
            .rects
            .iter()
            .any(|n| n.rect.x1.fract() != 0.0 || n.rect.y1.fract() != 0.0));
    }

    #[test]
    fn test_slice_dice_strategy() {
        let options = LayoutOptions {
            tile: TileStrategy::SliceDice,
            ..LayoutOptions::default()
        };
        let result = LayoutEngine::new(options).layout(&sample(), &NodePath::root(), VIEWPORT, Some(1));
        let (b, a) = (&result.rects[0], &result.rects[1]);
        assert_eq!(b.rect.y0, a.rect.y0);
        assert!(b.rect.x1 <= a.rect.x0);
    }

    #[test]
    fn test_deterministic() {
        let tree = sample();
        let a = engine().layout(&tree, &NodePath::root(), VIEWPORT, Some(2));
        let b = engine().layout(&tree, &NodePath::root(), VIEWPORT, Some(2));
        assert_eq!(a, b);
    }
}
