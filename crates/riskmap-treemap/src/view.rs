//! The interactive treemap: hierarchy, navigation and viewport in one place.
//!
//! Events are applied one at a time. Each event that changes anything runs
//! a complete layout pass before `handle` returns, so a caller never sees a
//! half-updated view.

use crate::config::TreemapConfig;
use crate::label::{LabelFitter, LabelMetrics, MonospaceMeasure};
use crate::layout::{LayoutEngine, LayoutResult};
use crate::navigation::{NavigationController, Reanchor};
use crate::palette::DepthPalette;
use crate::render::{hit_test, render_items, Body, Frame, Header, RenderItem, EMPTY_MESSAGE};
use riskmap_core::{Point, Size};
use riskmap_taxonomy::{Catalog, HierarchyBuilder, NodePath, SelectionState, WeightedNode};
use tracing::{debug, debug_span};

/// User and host events.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    /// A rectangle was clicked
    NodeClicked(NodePath),
    /// A breadcrumb segment was clicked (index into the trail)
    BreadcrumbClicked(usize),
    /// The host resized the map area
    ViewportResized {
        /// New width
        width: f64,
        /// New height
        height: f64,
    },
    /// Raw pointer press in map coordinates
    PointerDown(Point),
}

/// Zoomable treemap over a weighted hierarchy.
pub struct TreemapView {
    config: TreemapConfig,
    engine: LayoutEngine,
    palette: DepthPalette,
    measure: MonospaceMeasure,
    tree: WeightedNode,
    navigation: NavigationController,
    viewport: Size,
    layout: LayoutResult,
    items: Vec<RenderItem>,
    selection: Option<SelectionState>,
}

impl std::fmt::Debug for TreemapView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TreemapView")
            .field("config", &self.config)
            .field("current_root", self.navigation.current_root())
            .field("viewport", &self.viewport)
            .field("items", &self.items.len())
            .finish_non_exhaustive()
    }
}

impl TreemapView {
    /// Create a view at the true root of `tree`.
    #[must_use]
    pub fn new(config: TreemapConfig, tree: WeightedNode, viewport: Size) -> Self {
        let engine = LayoutEngine::new(config.layout.clone());
        let viewport = viewport.at_least(config.layout.min_viewport);
        let navigation = NavigationController::new(&tree);
        let layout = engine.layout(&tree, navigation.current_root(), viewport, config.max_depth);
        let mut view = Self {
            config,
            engine,
            palette: DepthPalette::default(),
            measure: MonospaceMeasure::default(),
            tree,
            navigation,
            viewport,
            layout,
            items: Vec::new(),
            selection: None,
        };
        view.refresh_items();
        view
    }

    /// Create a view from a catalog and selection.
    #[must_use]
    pub fn from_selection(
        config: TreemapConfig,
        catalog: &Catalog,
        selection: &SelectionState,
        viewport: Size,
    ) -> Self {
        let tree = HierarchyBuilder::new(catalog).build_from(&config.title, selection);
        let mut view = Self::new(config, tree, viewport);
        view.selection = Some(selection.clone());
        view
    }

    /// Configuration.
    #[must_use]
    pub fn config(&self) -> &TreemapConfig {
        &self.config
    }

    /// Current hierarchy.
    #[must_use]
    pub fn tree(&self) -> &WeightedNode {
        &self.tree
    }

    /// Navigation state.
    #[must_use]
    pub fn navigation(&self) -> &NavigationController {
        &self.navigation
    }

    /// Map area size.
    #[must_use]
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Result of the latest layout pass.
    #[must_use]
    pub fn layout(&self) -> &LayoutResult {
        &self.layout
    }

    /// Render items of the latest pass, in paint order.
    #[must_use]
    pub fn items(&self) -> &[RenderItem] {
        &self.items
    }

    /// Swap in a rebuilt hierarchy and re-anchor navigation.
    pub fn set_tree(&mut self, tree: WeightedNode) -> Reanchor {
        self.tree = tree;
        let outcome = self.navigation.on_hierarchy_rebuilt(&self.tree);
        self.relayout();
        outcome
    }

    /// Rebuild from a selection if it differs from the last one applied.
    ///
    /// Returns whether a rebuild happened.
    pub fn set_selection(&mut self, catalog: &Catalog, selection: &SelectionState) -> bool {
        let unchanged = self
            .selection
            .as_ref()
            .is_some_and(|s| s.version() == selection.version() && s == selection);
        if unchanged {
            return false;
        }
        let tree = HierarchyBuilder::new(catalog).build_from(&self.config.title, selection);
        self.selection = Some(selection.clone());
        self.set_tree(tree);
        true
    }

    /// Apply one event. Returns whether the view changed.
    pub fn handle(&mut self, event: ViewEvent) -> bool {
        let changed = match event {
            ViewEvent::NodeClicked(path) => self.navigation.zoom_into(&self.tree, &path),
            ViewEvent::BreadcrumbClicked(index) => self.navigation.zoom_to(&self.tree, index),
            ViewEvent::ViewportResized { width, height }
                if !(width.is_finite() && height.is_finite()) =>
            {
                debug!(width, height, "ignoring non-finite viewport");
                false
            }
            ViewEvent::ViewportResized { width, height } => {
                let viewport = Size::new(width, height).at_least(self.config.layout.min_viewport);
                let changed = viewport != self.viewport;
                self.viewport = viewport;
                changed
            }
            ViewEvent::PointerDown(point) => {
                let target = hit_test(&self.items, point).map(|item| item.path.clone());
                target.is_some_and(|path| self.navigation.zoom_into(&self.tree, &path))
            }
        };
        if changed {
            self.relayout();
        }
        changed
    }

    /// Compose the current picture.
    #[must_use]
    pub fn frame(&self) -> Frame {
        let header = if self.navigation.is_at_true_root() {
            Header::Hint
        } else {
            let crumbs = self.navigation.breadcrumb();
            Header::Breadcrumb(crumbs[..crumbs.len() - 1].to_vec())
        };
        let body = if self.layout.is_empty() {
            Body::Empty {
                message: EMPTY_MESSAGE.to_string(),
            }
        } else {
            Body::Map(self.items.clone())
        };
        Frame {
            title: self.config.title.clone(),
            viewport: self.viewport,
            header_height: self.config.layout.header_height,
            header,
            body,
        }
    }

    fn relayout(&mut self) {
        let root = self.navigation.current_root();
        let _span = debug_span!(
            "layout_pass",
            root = %root,
            width = self.viewport.width,
            height = self.viewport.height
        )
        .entered();
        self.layout = self
            .engine
            .layout(&self.tree, root, self.viewport, self.config.max_depth);
        self.refresh_items();
    }

    fn refresh_items(&mut self) {
        let fitter = LabelFitter::new(&self.measure, LabelMetrics::default());
        self.items = render_items(&self.layout, &fitter, &self.palette);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view() -> TreemapView {
        let catalog = Catalog::vehicle_incident();
        TreemapView::from_selection(
            TreemapConfig::default().with_max_depth(3),
            &catalog,
            &SelectionState::everything(&catalog),
            Size::new(1200.0, 800.0),
        )
    }

    #[test]
    fn test_initial_frame() {
        let view = view();
        let frame = view.frame();
        assert_eq!(frame.title, "Vehicle Incident");
        assert_eq!(frame.header, Header::Hint);
        assert!(!frame.items().is_empty());
        assert!(frame.items().iter().all(|i| i.depth <= 3));
    }

    #[test]
    fn test_viewport_clamped() {
        let mut view = view();
        assert!(view.handle(ViewEvent::ViewportResized {
            width: 40.0,
            height: 10.0
        }));
        assert_eq!(view.viewport(), Size::new(100.0, 100.0));
        assert!(!view.handle(ViewEvent::ViewportResized {
            width: 90.0,
            height: 100.0
        }));
    }

    #[test]
    fn test_non_finite_viewport_ignored() {
        let mut view = view();
        assert!(!view.handle(ViewEvent::ViewportResized {
            width: 800.0,
            height: f64::INFINITY
        }));
        assert!(!view.handle(ViewEvent::ViewportResized {
            width: f64::NAN,
            height: 600.0
        }));
        assert_eq!(view.viewport(), Size::new(1200.0, 800.0));
    }

    #[test]
    fn test_click_zooms_and_breadcrumb_returns() {
        let mut view = view();
        let surface = NodePath::from_segments(["Surface"]);
        assert!(view.handle(ViewEvent::NodeClicked(surface.clone())));
        assert_eq!(view.navigation().current_root(), &surface);
        match view.frame().header {
            Header::Breadcrumb(crumbs) => {
                assert_eq!(crumbs.len(), 1);
                assert_eq!(crumbs[0].name, "Vehicle Incident");
            }
            Header::Hint => panic!("expected breadcrumb"),
        }
        assert!(view.layout().rects.iter().all(|n| n.depth <= 4));
        assert!(view.handle(ViewEvent::BreadcrumbClicked(0)));
        assert!(view.navigation().is_at_true_root());
    }

    #[test]
    fn test_pointer_down_hits_interactive() {
        let mut view = view();
        let target = view.items().iter().find(|i| i.depth == 1).cloned().unwrap();
        let point = Point::new(target.x + 5.0, target.y + 5.0);
        assert!(view.handle(ViewEvent::PointerDown(point)));
        assert_eq!(view.navigation().current_root(), &target.path);
    }

    #[test]
    fn test_pointer_down_on_leaf_is_noop() {
        let mut view = TreemapView::from_selection(
            TreemapConfig::default(),
            &Catalog::vehicle_incident(),
            &SelectionState::everything(&Catalog::vehicle_incident()),
            Size::new(1200.0, 800.0),
        );
        let leaf = view.items().iter().find(|i| i.is_leaf).cloned().unwrap();
        let centre = Point::new(leaf.x + leaf.width / 2.0, leaf.y + leaf.height / 2.0);
        assert!(!view.handle(ViewEvent::PointerDown(centre)));
        assert!(view.navigation().is_at_true_root());
    }

    #[test]
    fn test_pointer_down_on_current_root_band_is_noop() {
        let mut view = view();
        assert!(!view.handle(ViewEvent::PointerDown(Point::new(5.0, 5.0))));
        assert!(view.navigation().is_at_true_root());
    }

    #[test]
    fn test_zoomed_frame_labels_current_root() {
        let mut view = view();
        let surface = NodePath::from_segments(["Surface"]);
        view.handle(ViewEvent::NodeClicked(surface.clone()));
        let frame = view.frame();
        let first = &frame.items()[0];
        assert_eq!(first.path, surface);
        assert_eq!(first.label, vec!["Surface (105)"]);
    }

    #[test]
    fn test_set_selection_same_state_is_noop() {
        let catalog = Catalog::vehicle_incident();
        let mut view = view();
        assert!(!view.set_selection(&catalog, &SelectionState::everything(&catalog)));
    }

    #[test]
    fn test_set_selection_resets_lost_zoom() {
        let catalog = Catalog::vehicle_incident();
        let mut view = view();
        view.handle(ViewEvent::NodeClicked(NodePath::from_segments(["Offsite"])));

        let mut selection = SelectionState::everything(&catalog);
        selection.remove_context("Offsite");
        assert!(view.set_selection(&catalog, &selection));
        assert!(view.navigation().is_at_true_root());
        assert_eq!(view.tree().value, 315.0);
    }

    #[test]
    fn test_empty_selection_frame() {
        let catalog = Catalog::vehicle_incident();
        let view = TreemapView::from_selection(
            TreemapConfig::default(),
            &catalog,
            &SelectionState::empty(&catalog),
            Size::new(800.0, 600.0),
        );
        assert_eq!(
            view.frame().body,
            Body::Empty {
                message: EMPTY_MESSAGE.to_string()
            }
        );
    }
}
