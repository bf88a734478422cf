//! Risk taxonomy and weighted hierarchy construction.
//!
//! The picker widgets write into a [`SelectionState`]; [`HierarchyBuilder`]
//! turns it into a [`WeightedNode`] tree over a [`Catalog`], pruning every
//! branch without a selected scenario. Nodes are identified across rebuilds
//! by their [`NodePath`].
//!
//! ```
//! use riskmap_taxonomy::{Catalog, HierarchyBuilder, SelectionState};
//!
//! let catalog = Catalog::vehicle_incident();
//! let selection = SelectionState::everything(&catalog);
//! let tree = HierarchyBuilder::new(&catalog).build_from("Vehicle Incident", &selection);
//! assert_eq!(tree.value, 420.0);
//! ```

mod builder;
mod catalog;
mod error;
mod node;
mod selection;
mod tier;

pub use builder::HierarchyBuilder;
pub use catalog::{Catalog, EquipmentGroup, Mechanism};
pub use error::TaxonomyError;
pub use node::{InputNode, NodePath, WeightedNode};
pub use selection::{EquipmentSelection, GroupSelection, ItemSelection, SelectionState};
pub use tier::{category_label, Tier, FALLBACK_CATEGORY};
