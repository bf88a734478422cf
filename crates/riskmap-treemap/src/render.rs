//! Render items, frame composition and painting onto a [`Canvas`].

use crate::label::{LabelFitter, LabelMode, TextMeasure};
use crate::layout::{LayoutNode, LayoutResult};
use crate::navigation::Crumb;
use crate::palette::{muted_color, title_color, DepthPalette};
use riskmap_core::{Canvas, Color, Point, Rect, Shadow, Size, TextStyle};
use riskmap_taxonomy::{category_label, NodePath};
use serde::Serialize;

/// Header text shown at the true root.
pub const HINT: &str =
    "Click on a node to navigate the model or hover on the node to show its category";

/// Body text shown when nothing is selected.
pub const EMPTY_MESSAGE: &str =
    "Add at least one scenarios, operating context, and equipment to display the interactive model.";

const BREADCRUMB_SEPARATOR: &str = " / ";
const TITLE_SIZE: f64 = 16.0;
const HEADER_SIZE: f64 = 12.0;
const EMPTY_SIZE: f64 = 14.0;

/// Everything a render adapter needs to draw one node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderItem {
    /// Structural path (click target)
    pub path: NodePath,
    /// Left edge
    pub x: f64,
    /// Top edge
    pub y: f64,
    /// Width
    pub width: f64,
    /// Height
    pub height: f64,
    /// Distance from the true root
    pub depth: usize,
    /// Colour ramp index (the node height)
    pub fill_color_index: usize,
    /// Fill colour
    pub fill: Color,
    /// Label lines, top to bottom
    pub label: Vec<String>,
    /// Render the label in bold
    pub bold: bool,
    /// Leaf of the hierarchy
    pub is_leaf: bool,
    /// Clicking zooms into this node
    pub is_interactive: bool,
    /// Tooltip category for the depth
    pub category: &'static str,
}

impl RenderItem {
    /// Bounds as a rectangle.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    /// The current root: labelled in its top band, not clickable.
    fn from_frame(node: &LayoutNode, fitter: &LabelFitter<'_>, palette: &DepthPalette) -> Self {
        Self {
            is_interactive: false,
            ..Self::build(node, true, LabelMode::SingleLine, fitter, palette)
        }
    }

    fn from_layout(node: &LayoutNode, fitter: &LabelFitter<'_>, palette: &DepthPalette) -> Self {
        // Leaves and cutoff nodes may wrap; other parents get one line.
        let (show_value, mode) = if node.is_leaf() {
            (false, LabelMode::Wrap)
        } else if node.at_cutoff {
            (true, LabelMode::Wrap)
        } else {
            (true, LabelMode::SingleLine)
        };
        Self::build(node, show_value, mode, fitter, palette)
    }

    fn build(
        node: &LayoutNode,
        show_value: bool,
        mode: LabelMode,
        fitter: &LabelFitter<'_>,
        palette: &DepthPalette,
    ) -> Self {
        let rect = node.rect;
        Self {
            path: node.path.clone(),
            x: rect.x0,
            y: rect.y0,
            width: rect.width(),
            height: rect.height(),
            depth: node.depth,
            fill_color_index: node.height,
            fill: palette.fill(node.height),
            label: fitter.fit(
                &node.name,
                node.value,
                show_value,
                mode,
                rect.width(),
                rect.height(),
            ),
            bold: node.has_children,
            is_leaf: node.is_leaf(),
            is_interactive: node.has_children,
            category: category_label(node.depth),
        }
    }
}

/// Build render items from a layout pass, shallowest first.
///
/// The current root comes first and carries its label in the top band.
/// The sort is stable, so items of equal depth keep their layout order.
/// An empty pass yields no items.
#[must_use]
pub fn render_items(
    layout: &LayoutResult,
    fitter: &LabelFitter<'_>,
    palette: &DepthPalette,
) -> Vec<RenderItem> {
    if layout.is_empty() {
        return Vec::new();
    }
    let mut items = Vec::with_capacity(layout.rects.len() + 1);
    if !layout.frame.rect.is_degenerate() {
        items.push(RenderItem::from_frame(&layout.frame, fitter, palette));
    }
    items.extend(
        layout
            .rects
            .iter()
            .map(|node| RenderItem::from_layout(node, fitter, palette)),
    );
    items.sort_by_key(|item| item.depth);
    items
}

/// Topmost item under `point`, interactive or not.
///
/// A press on a leaf lands on the leaf, never on its parent.
/// `items` must be in paint order, as returned by [`render_items`].
#[must_use]
pub fn hit_test(items: &[RenderItem], point: Point) -> Option<&RenderItem> {
    items
        .iter()
        .rev()
        .find(|item| item.bounds().contains_point(&point))
}

/// The band above the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Header {
    /// Usage hint, shown at the true root
    Hint,
    /// Clickable ancestors of the current root, true root first
    Breadcrumb(Vec<Crumb>),
}

/// The map area.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Body {
    /// Nothing selected
    Empty {
        /// Placeholder text
        message: String,
    },
    /// Render items in paint order
    Map(Vec<RenderItem>),
}

/// One complete picture of the view.
///
/// Map coordinates start at the top-left of the map area; the header sits
/// at negative `y`, `header_height` tall.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    /// Chart title
    pub title: String,
    /// Map area size
    pub viewport: Size,
    /// Height of the title and breadcrumb band
    pub header_height: f64,
    /// Hint or breadcrumb
    pub header: Header,
    /// Empty state or map
    pub body: Body,
}

impl Frame {
    /// Render items, empty in the empty state.
    #[must_use]
    pub fn items(&self) -> &[RenderItem] {
        match &self.body {
            Body::Map(items) => items,
            Body::Empty { .. } => &[],
        }
    }
}

/// Emit draw calls for `frame`.
///
/// `measure` positions breadcrumb segments and centres the empty-state
/// message.
pub fn paint(frame: &Frame, canvas: &mut dyn Canvas, measure: &dyn TextMeasure) {
    let top = -frame.header_height;
    canvas.draw_text(
        &frame.title,
        Point::new(0.0, top + 15.0),
        &TextStyle::sized(TITLE_SIZE, title_color()).bold(),
    );

    let header_baseline = top + 35.0;
    match &frame.header {
        Header::Hint => canvas.draw_text(
            HINT,
            Point::new(0.0, header_baseline),
            &TextStyle::sized(HEADER_SIZE, muted_color()).italic(),
        ),
        Header::Breadcrumb(crumbs) => {
            let link = TextStyle::sized(HEADER_SIZE, title_color());
            let separator = TextStyle::sized(HEADER_SIZE, muted_color());
            let mut x = 0.0;
            for (i, crumb) in crumbs.iter().enumerate() {
                if i > 0 {
                    canvas.draw_text(
                        BREADCRUMB_SEPARATOR,
                        Point::new(x, header_baseline),
                        &separator,
                    );
                    x += measure.width(BREADCRUMB_SEPARATOR, HEADER_SIZE);
                }
                canvas.draw_text(&crumb.name, Point::new(x, header_baseline), &link);
                x += measure.width(&crumb.name, HEADER_SIZE);
            }
        }
    }

    match &frame.body {
        Body::Empty { message } => {
            let width = measure.width(message, EMPTY_SIZE);
            let origin = Point::new(
                (frame.viewport.width - width).max(0.0) / 2.0,
                frame.viewport.height / 2.0,
            );
            canvas.draw_text(message, origin, &TextStyle::sized(EMPTY_SIZE, muted_color()));
        }
        Body::Map(items) => {
            let shadow = Shadow::default();
            for item in items {
                paint_item(item, canvas, &shadow);
            }
        }
    }
}

fn paint_item(item: &RenderItem, canvas: &mut dyn Canvas, shadow: &Shadow) {
    let bounds = item.bounds();
    canvas.fill_rect_shadowed(bounds, item.fill, shadow);
    if item.label.is_empty() {
        return;
    }
    let mut style = TextStyle::sized(10.0, DepthPalette::text_on(item.fill));
    if item.bold {
        style = style.bold();
    }
    canvas.push_clip(bounds);
    for (i, line) in item.label.iter().enumerate() {
        let baseline = item.y + 13.0 + 11.0 * i as f64;
        canvas.draw_text(line, Point::new(item.x + 3.0, baseline), &style);
    }
    canvas.pop_clip();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::{LabelMetrics, MonospaceMeasure};
    use crate::layout::LayoutEngine;
    use riskmap_core::{DrawCommand, RecordingCanvas};
    use riskmap_taxonomy::WeightedNode;

    fn tree() -> WeightedNode {
        WeightedNode::branch(
            "Risk",
            vec![
                WeightedNode::branch(
                    "Surface",
                    vec![WeightedNode::leaf("a"), WeightedNode::leaf("b")],
                ),
                WeightedNode::branch("Offsite", vec![WeightedNode::leaf("c")]),
            ],
        )
    }

    fn items_for(max_depth: Option<usize>) -> Vec<RenderItem> {
        let layout = LayoutEngine::default().layout(
            &tree(),
            &NodePath::root(),
            Size::new(600.0, 400.0),
            max_depth,
        );
        let measure = MonospaceMeasure::default();
        let fitter = LabelFitter::new(&measure, LabelMetrics::default());
        render_items(&layout, &fitter, &DepthPalette::default())
    }

    #[test]
    fn test_items_shallowest_first() {
        let items = items_for(None);
        assert_eq!(items.len(), 6);
        assert!(items.windows(2).all(|w| w[0].depth <= w[1].depth));
    }

    #[test]
    fn test_current_root_item_leads() {
        let items = items_for(None);
        let root = &items[0];
        assert!(root.path.is_root());
        assert_eq!(root.label, vec!["Risk (3)"]);
        assert_eq!(root.fill_color_index, 2);
        assert!(root.bold && !root.is_interactive);
        assert_eq!(root.bounds(), Rect::new(-1.0, -1.0, 601.0, 401.0));
    }

    #[test]
    fn test_empty_layout_has_no_items() {
        let layout = LayoutEngine::default().layout(
            &WeightedNode::branch("Risk", Vec::new()),
            &NodePath::root(),
            Size::new(600.0, 400.0),
            None,
        );
        let measure = MonospaceMeasure::default();
        let fitter = LabelFitter::new(&measure, LabelMetrics::default());
        assert!(render_items(&layout, &fitter, &DepthPalette::default()).is_empty());
    }

    #[test]
    fn test_item_fields() {
        let items = items_for(None);
        let surface = items.iter().find(|i| i.path.last() == Some("Surface")).unwrap();
        assert!(surface.is_interactive && surface.bold && !surface.is_leaf);
        assert_eq!(surface.category, "Operating Context");
        assert_eq!(surface.fill_color_index, 1);
        assert_eq!(surface.label, vec!["Surface (2)"]);

        let leaf = items.iter().find(|i| i.path.last() == Some("a")).unwrap();
        assert!(leaf.is_leaf && !leaf.is_interactive && !leaf.bold);
        assert_eq!(leaf.label, vec!["a"]);
        assert_eq!(leaf.category, "Equipment Level 1");
    }

    #[test]
    fn test_cutoff_label_carries_value() {
        let items = items_for(Some(1));
        assert_eq!(items.len(), 3);
        let offsite = items.iter().find(|i| i.path.last() == Some("Offsite")).unwrap();
        assert_eq!(offsite.label, vec!["Offsite (1)"]);
    }

    #[test]
    fn test_hit_test_lands_on_leaf() {
        let items = items_for(None);
        let leaf = items.iter().find(|i| i.path.last() == Some("a")).unwrap();
        let centre = Point::new(leaf.x + leaf.width / 2.0, leaf.y + leaf.height / 2.0);
        let hit = hit_test(&items, centre).map(|i| i.path.to_string());
        assert_eq!(hit.as_deref(), Some("Surface / a"));
        assert!(hit_test(&items, Point::new(-50.0, -50.0)).is_none());
    }

    #[test]
    fn test_hit_test_parent_band() {
        let items = items_for(None);
        let surface = items.iter().find(|i| i.path.last() == Some("Surface")).unwrap();
        let band = Point::new(surface.x + 5.0, surface.y + 5.0);
        assert_eq!(hit_test(&items, band).map(|i| &i.path), Some(&surface.path));
    }

    #[test]
    fn test_paint_map() {
        let items = items_for(None);
        let count = items.len();
        let frame = Frame {
            title: "Vehicle Incident".into(),
            viewport: Size::new(600.0, 400.0),
            header_height: 45.0,
            header: Header::Hint,
            body: Body::Map(items),
        };
        let mut canvas = RecordingCanvas::new();
        paint(&frame, &mut canvas, &MonospaceMeasure::default());
        assert_eq!(canvas.rect_count(), count);
        assert_eq!(canvas.clip_depth(), 0);
        let texts = canvas.texts();
        assert_eq!(texts[0], "Vehicle Incident");
        assert_eq!(texts[1], HINT);
        assert_eq!(texts[2], "Risk (3)");
        assert!(texts.contains(&"Surface (2)"));
        match &canvas.commands()[0] {
            DrawCommand::Text { position, .. } => assert_eq!(position.y, -30.0),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_paint_breadcrumb_and_empty() {
        let frame = Frame {
            title: "T".into(),
            viewport: Size::new(600.0, 400.0),
            header_height: 45.0,
            header: Header::Breadcrumb(vec![
                Crumb {
                    name: "Risk".into(),
                    path: NodePath::root(),
                },
                Crumb {
                    name: "Surface".into(),
                    path: NodePath::from_segments(["Surface"]),
                },
            ]),
            body: Body::Empty {
                message: EMPTY_MESSAGE.into(),
            },
        };
        let mut canvas = RecordingCanvas::new();
        paint(&frame, &mut canvas, &MonospaceMeasure::default());
        assert_eq!(canvas.rect_count(), 0);
        assert_eq!(
            canvas.texts(),
            vec!["T", "Risk", " / ", "Surface", EMPTY_MESSAGE]
        );
        assert!(frame.items().is_empty());
    }
}
