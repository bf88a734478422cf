#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::doc_markdown)]
//! Zoomable treemap for the risk taxonomy.
//!
//! - [`LayoutEngine`] positions the subtree under the current root with
//!   squarified tiling, padding and a depth cutoff.
//! - [`NavigationController`] tracks the zoom target and breadcrumb trail
//!   by structural path, re-anchoring when the hierarchy is rebuilt.
//! - [`render_items`] and [`paint`] turn a layout into labelled, coloured
//!   draw calls for any [`riskmap_core::Canvas`].
//! - [`TreemapView`] applies user events one at a time and recomputes the
//!   layout after each.
//!
//! ```
//! use riskmap_core::Size;
//! use riskmap_taxonomy::{Catalog, NodePath, SelectionState};
//! use riskmap_treemap::{TreemapConfig, TreemapView, ViewEvent};
//!
//! let catalog = Catalog::vehicle_incident();
//! let selection = SelectionState::everything(&catalog);
//! let mut view = TreemapView::from_selection(
//!     TreemapConfig::default().with_max_depth(3),
//!     &catalog,
//!     &selection,
//!     Size::new(1200.0, 800.0),
//! );
//! assert!(view.handle(ViewEvent::NodeClicked(NodePath::from_segments(["Surface"]))));
//! assert_eq!(view.navigation().breadcrumb().len(), 2);
//! ```

mod config;
mod error;
mod label;
mod layout;
mod navigation;
mod palette;
mod render;
mod tile;
mod view;

pub use config::{LayoutOptions, TreemapConfig};
pub use error::ConfigError;
pub use label::{format_value, LabelFitter, LabelMetrics, LabelMode, MonospaceMeasure, TextMeasure};
pub use layout::{LayoutEngine, LayoutNode, LayoutResult};
pub use navigation::{breadcrumb_for, Anchor, Crumb, NavigationController, NavigationState, Reanchor};
pub use palette::{muted_color, title_color, DepthPalette, HEIGHT_DOMAIN_MAX};
pub use render::{
    hit_test, paint, render_items, Body, Frame, Header, RenderItem, EMPTY_MESSAGE, HINT,
};
pub use tile::{dice, slice, squarify, TileStrategy, GOLDEN_RATIO};
pub use view::{TreemapView, ViewEvent};
