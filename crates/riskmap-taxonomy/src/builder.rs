//! Derives the weighted hierarchy from the selection sets.

use crate::{Catalog, EquipmentSelection, SelectionState, WeightedNode};
use std::collections::BTreeSet;
use tracing::debug;

/// Builds the weighted tree `root → context → equipment L1 → equipment L2 →
/// mechanism → scenario` from a catalog and a selection.
///
/// Every branch without a selected scenario beneath it is pruned, so an empty
/// selection in any one tier yields a bare root with value 0. The tree grows
/// as `contexts × equipment pairs × scenarios`; callers must not assume it is
/// small.
#[derive(Debug, Clone, Copy)]
pub struct HierarchyBuilder<'a> {
    catalog: &'a Catalog,
}

impl<'a> HierarchyBuilder<'a> {
    /// Create a builder over a catalog.
    #[must_use]
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Build from a [`SelectionState`].
    #[must_use]
    pub fn build_from(&self, root_label: &str, selection: &SelectionState) -> WeightedNode {
        self.build(
            root_label,
            selection.contexts(),
            selection.equipment(),
            selection.scenarios(),
        )
    }

    /// Build from the individual selection sets.
    #[must_use]
    pub fn build(
        &self,
        root_label: &str,
        contexts: &BTreeSet<String>,
        equipment: &EquipmentSelection,
        scenarios: &BTreeSet<String>,
    ) -> WeightedNode {
        // Every equipment slot receives the same mechanism subtree.
        let mechanisms = self.mechanism_nodes(scenarios);

        let children: Vec<WeightedNode> = if mechanisms.is_empty() {
            Vec::new()
        } else {
            self.catalog
                .contexts
                .iter()
                .filter(|c| contexts.contains(c.as_str()))
                .filter_map(|context| {
                    let groups = self.equipment_nodes(equipment, &mechanisms);
                    non_empty(context, groups)
                })
                .collect()
        };

        let root = WeightedNode::branch(root_label, children);
        debug!(
            leaves = if root.value > 0.0 { root.leaf_count() } else { 0 },
            total = root.value,
            "hierarchy rebuilt"
        );
        root
    }

    fn equipment_nodes(
        &self,
        equipment: &EquipmentSelection,
        mechanisms: &[WeightedNode],
    ) -> Vec<WeightedNode> {
        self.catalog
            .equipment
            .iter()
            .filter(|g| equipment.is_group_selected(&g.name))
            .filter_map(|group| {
                if group.items.is_empty() {
                    // A childless group carries the mechanisms itself.
                    return non_empty(&group.name, mechanisms.to_vec());
                }
                let items = group
                    .items
                    .iter()
                    .filter(|item| equipment.is_item_selected(&group.name, item))
                    .filter_map(|item| non_empty(item, mechanisms.to_vec()))
                    .collect();
                non_empty(&group.name, items)
            })
            .collect()
    }

    fn mechanism_nodes(&self, scenarios: &BTreeSet<String>) -> Vec<WeightedNode> {
        self.catalog
            .mechanisms
            .iter()
            .filter(|m| {
                scenarios.contains(&m.name) || m.scenarios.iter().any(|s| scenarios.contains(s))
            })
            .filter_map(|m| {
                let leaves = m
                    .scenarios
                    .iter()
                    .filter(|s| scenarios.contains(s.as_str()))
                    .map(|s| WeightedNode::leaf(s))
                    .collect();
                non_empty(&m.name, leaves)
            })
            .collect()
    }
}

fn non_empty(name: &str, children: Vec<WeightedNode>) -> Option<WeightedNode> {
    (!children.is_empty()).then(|| WeightedNode::branch(name, children))
}
