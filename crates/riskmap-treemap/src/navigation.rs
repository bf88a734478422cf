//! Zoom state and the breadcrumb trail.
//!
//! Nodes are addressed by [`NodePath`], so a zoom target survives a rebuild
//! of the hierarchy whenever a node with the same names still exists.
//! Every transition builds a fresh [`NavigationState`] and swaps it in whole.

use riskmap_taxonomy::{NodePath, WeightedNode};
use serde::Serialize;
use tracing::{debug, info};

/// Where the view is anchored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Anchor {
    /// Showing the whole hierarchy
    AtTrueRoot,
    /// Zoomed into the node at this path
    ZoomedIn(NodePath),
}

/// One breadcrumb entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Crumb {
    /// Node name
    pub name: String,
    /// Node path
    pub path: NodePath,
}

/// The anchor plus the trail from the true root down to it.
///
/// `breadcrumb[0]` is always the true root and `breadcrumb.last()` is always
/// the current root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationState {
    anchor: Anchor,
    breadcrumb: Vec<Crumb>,
}

impl NavigationState {
    fn at_root(tree: &WeightedNode) -> Self {
        Self {
            anchor: Anchor::AtTrueRoot,
            breadcrumb: vec![Crumb {
                name: tree.name.clone(),
                path: NodePath::root(),
            }],
        }
    }

    fn anchored(tree: &WeightedNode, path: &NodePath) -> Option<Self> {
        if path.is_root() {
            return Some(Self::at_root(tree));
        }
        Some(Self {
            anchor: Anchor::ZoomedIn(path.clone()),
            breadcrumb: breadcrumb_for(tree, path)?,
        })
    }

    /// Current anchor.
    #[must_use]
    pub fn anchor(&self) -> &Anchor {
        &self.anchor
    }

    /// Trail from the true root to the current root.
    #[must_use]
    pub fn breadcrumb(&self) -> &[Crumb] {
        &self.breadcrumb
    }

    /// Path of the current root.
    #[must_use]
    pub fn current_root(&self) -> &NodePath {
        match &self.anchor {
            Anchor::ZoomedIn(path) => path,
            Anchor::AtTrueRoot => &self.breadcrumb[0].path,
        }
    }
}

/// Resolve every prefix of `path` against `tree`.
///
/// Returns `None` if any segment is missing. Cost is proportional to the
/// path length times the sibling fan-out.
#[must_use]
pub fn breadcrumb_for(tree: &WeightedNode, path: &NodePath) -> Option<Vec<Crumb>> {
    let mut node = tree;
    let mut crumbs = Vec::with_capacity(path.depth() + 1);
    crumbs.push(Crumb {
        name: tree.name.clone(),
        path: NodePath::root(),
    });
    let mut prefix = NodePath::root();
    for segment in path.segments() {
        node = node.child(segment)?;
        prefix = prefix.child(segment);
        crumbs.push(Crumb {
            name: node.name.clone(),
            path: prefix.clone(),
        });
    }
    Some(crumbs)
}

/// What [`NavigationController::on_hierarchy_rebuilt`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reanchor {
    /// Already at the true root; nothing to resolve
    Unchanged,
    /// The zoomed path still exists in the new tree
    Kept,
    /// The zoomed path vanished; back at the true root
    Reset,
}

/// Owns the current root and reacts to zoom, breadcrumb and rebuild events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationController {
    state: NavigationState,
}

impl NavigationController {
    /// Start at the true root of `tree`.
    #[must_use]
    pub fn new(tree: &WeightedNode) -> Self {
        Self {
            state: NavigationState::at_root(tree),
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    /// Path of the current root.
    #[must_use]
    pub fn current_root(&self) -> &NodePath {
        self.state.current_root()
    }

    /// Trail from the true root to the current root.
    #[must_use]
    pub fn breadcrumb(&self) -> &[Crumb] {
        self.state.breadcrumb()
    }

    /// Whether the view shows the whole hierarchy.
    #[must_use]
    pub fn is_at_true_root(&self) -> bool {
        self.state.anchor == Anchor::AtTrueRoot
    }

    /// Zoom into the node at `path`.
    ///
    /// Only nodes with children are valid targets; anything else (a leaf,
    /// a path missing from `tree`, the current root) leaves the state as is.
    /// Returns whether the current root changed.
    pub fn zoom_into(&mut self, tree: &WeightedNode, path: &NodePath) -> bool {
        if path == self.current_root() {
            return false;
        }
        let Some(node) = tree.resolve(path) else {
            debug!(%path, "zoom target not in tree");
            return false;
        };
        if node.is_leaf() {
            debug!(%path, "zoom target is a leaf");
            return false;
        }
        self.transition(tree, path)
    }

    /// Zoom out to the breadcrumb entry at `index`.
    ///
    /// The last entry is the current root, so clicking it does nothing.
    pub fn zoom_to(&mut self, tree: &WeightedNode, index: usize) -> bool {
        let crumbs = self.state.breadcrumb();
        if index >= crumbs.len().saturating_sub(1) {
            return false;
        }
        let path = crumbs[index].path.clone();
        self.transition(tree, &path)
    }

    /// Zoom out to `ancestor`, which must be on the breadcrumb trail above
    /// the current root.
    pub fn zoom_to_ancestor(&mut self, tree: &WeightedNode, ancestor: &NodePath) -> bool {
        let index = self
            .state
            .breadcrumb()
            .iter()
            .position(|crumb| &crumb.path == ancestor);
        index.is_some_and(|i| self.zoom_to(tree, i))
    }

    /// Re-resolve the current root in a freshly built tree.
    ///
    /// The breadcrumb is always rebuilt, since names along it may belong to a
    /// tree whose root label changed. A zoomed node that no longer exists, or
    /// that lost all its children, resets the view to the new true root.
    pub fn on_hierarchy_rebuilt(&mut self, tree: &WeightedNode) -> Reanchor {
        let Anchor::ZoomedIn(path) = &self.state.anchor else {
            self.state = NavigationState::at_root(tree);
            return Reanchor::Unchanged;
        };
        let still_zoomable = tree.resolve(path).is_some_and(|n| !n.is_leaf());
        match NavigationState::anchored(tree, path).filter(|_| still_zoomable) {
            Some(state) => {
                self.state = state;
                Reanchor::Kept
            }
            None => {
                info!(%path, "zoomed node missing after rebuild, resetting to root");
                self.state = NavigationState::at_root(tree);
                Reanchor::Reset
            }
        }
    }

    fn transition(&mut self, tree: &WeightedNode, path: &NodePath) -> bool {
        match NavigationState::anchored(tree, path) {
            Some(state) => {
                debug!(%path, "zoom");
                self.state = state;
                true
            }
            None => {
                debug!(%path, "zoom target not in tree");
                false
            }
        }
    }
}
