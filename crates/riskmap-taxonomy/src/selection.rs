//! Selection state produced by the picker widgets.
//!
//! The three pickers (contexts, equipment, scenarios) write into one
//! versioned [`SelectionState`]. Every effective mutation bumps the version,
//! and consumers rebuild the hierarchy wholesale when it changes.

use crate::Catalog;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Selection flag of a second-level equipment item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSelection {
    /// Level 2 name
    pub name: String,
    /// Whether the item is selected
    pub selected: bool,
}

/// Selection flags of a first-level equipment group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupSelection {
    /// Level 1 name
    pub name: String,
    /// Derived flag: any item selected, or own flag when childless
    pub selected: bool,
    /// Item flags
    pub items: Vec<ItemSelection>,
}

impl GroupSelection {
    fn derive_flag(&mut self) {
        self.selected = self.items.iter().any(|i| i.selected)
            || (self.items.is_empty() && self.selected);
    }

    fn item_mut(&mut self, name: &str) -> Option<&mut ItemSelection> {
        self.items.iter_mut().find(|i| i.name == name)
    }
}

/// Two-level equipment selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentSelection {
    groups: Vec<GroupSelection>,
}

impl EquipmentSelection {
    /// Mirror the catalog's equipment tree with every flag set to `selected`.
    #[must_use]
    pub fn from_catalog(catalog: &Catalog, selected: bool) -> Self {
        let groups = catalog
            .equipment
            .iter()
            .map(|g| GroupSelection {
                name: g.name.clone(),
                selected,
                items: g
                    .items
                    .iter()
                    .map(|name| ItemSelection {
                        name: name.clone(),
                        selected,
                    })
                    .collect(),
            })
            .collect();
        Self { groups }
    }

    /// Group flags in catalog order.
    #[must_use]
    pub fn groups(&self) -> &[GroupSelection] {
        &self.groups
    }

    /// Whether a group is selected.
    #[must_use]
    pub fn is_group_selected(&self, group: &str) -> bool {
        self.group(group).is_some_and(|g| g.selected)
    }

    /// Whether an item under `group` is selected.
    ///
    /// This reads the item flag only; the group flag is checked separately.
    #[must_use]
    pub fn is_item_selected(&self, group: &str, item: &str) -> bool {
        self.group(group)
            .is_some_and(|g| g.items.iter().any(|i| i.name == item && i.selected))
    }

    /// Flip an item, then re-derive every group flag.
    ///
    /// Returns false when the group or item is unknown.
    pub fn toggle_item(&mut self, group: &str, item: &str) -> bool {
        let Some(entry) = self.group_mut(group).and_then(|g| g.item_mut(item)) else {
            return false;
        };
        entry.selected = !entry.selected;
        self.groups.iter_mut().for_each(GroupSelection::derive_flag);
        true
    }

    /// Set an item flag, then re-derive every group flag.
    ///
    /// Returns whether the flag changed.
    pub fn set_item(&mut self, group: &str, item: &str, selected: bool) -> bool {
        match self.group_mut(group).and_then(|g| g.item_mut(item)) {
            Some(entry) if entry.selected != selected => {
                entry.selected = selected;
                self.groups.iter_mut().for_each(GroupSelection::derive_flag);
                true
            }
            _ => false,
        }
    }

    /// Flip a childless group's own flag.
    ///
    /// Groups with items are derived from them and cannot be toggled.
    pub fn toggle_group(&mut self, group: &str) -> bool {
        match self.group_mut(group) {
            Some(g) if g.items.is_empty() => {
                g.selected = !g.selected;
                true
            }
            _ => false,
        }
    }

    /// Tag removal: clear an item and set its group to "any item left".
    pub fn remove_item(&mut self, group: &str, item: &str) -> bool {
        let Some(g) = self.group_mut(group) else {
            return false;
        };
        let Some(entry) = g.item_mut(item) else {
            return false;
        };
        if !entry.selected {
            return false;
        }
        entry.selected = false;
        g.selected = g.items.iter().any(|i| i.selected);
        true
    }

    /// Groups that are selected with at least one selected item, paired
    /// with those items.
    #[must_use]
    pub fn selected_pairs(&self) -> Vec<(&str, Vec<&str>)> {
        self.groups
            .iter()
            .filter(|g| g.selected)
            .filter_map(|g| {
                let items: Vec<&str> = g
                    .items
                    .iter()
                    .filter(|i| i.selected)
                    .map(|i| i.name.as_str())
                    .collect();
                (!items.is_empty()).then(|| (g.name.as_str(), items))
            })
            .collect()
    }

    fn group(&self, name: &str) -> Option<&GroupSelection> {
        self.groups.iter().find(|g| g.name == name)
    }

    fn group_mut(&mut self, name: &str) -> Option<&mut GroupSelection> {
        self.groups.iter_mut().find(|g| g.name == name)
    }
}

/// Everything the hierarchy builder consumes, with a change counter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    version: u64,
    contexts: BTreeSet<String>,
    equipment: EquipmentSelection,
    scenarios: BTreeSet<String>,
}

impl SelectionState {
    /// Nothing selected; equipment flags mirror the catalog.
    #[must_use]
    pub fn empty(catalog: &Catalog) -> Self {
        Self {
            version: 0,
            contexts: BTreeSet::new(),
            equipment: EquipmentSelection::from_catalog(catalog, false),
            scenarios: BTreeSet::new(),
        }
    }

    /// Every context, equipment item and scenario selected.
    #[must_use]
    pub fn everything(catalog: &Catalog) -> Self {
        Self {
            version: 0,
            contexts: catalog.contexts.iter().cloned().collect(),
            equipment: EquipmentSelection::from_catalog(catalog, true),
            scenarios: catalog.scenarios().map(str::to_string).collect(),
        }
    }

    /// Change counter; bumped by every effective mutation.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Selected operating contexts.
    #[must_use]
    pub fn contexts(&self) -> &BTreeSet<String> {
        &self.contexts
    }

    /// Equipment selection.
    #[must_use]
    pub fn equipment(&self) -> &EquipmentSelection {
        &self.equipment
    }

    /// Selected scenarios (and possibly bare mechanism labels).
    #[must_use]
    pub fn scenarios(&self) -> &BTreeSet<String> {
        &self.scenarios
    }

    fn bump(&mut self, changed: bool) -> bool {
        if changed {
            self.version += 1;
        }
        changed
    }

    /// Toggle a context tag.
    pub fn toggle_context(&mut self, context: &str) -> bool {
        if !self.contexts.remove(context) {
            self.contexts.insert(context.to_string());
        }
        self.bump(true)
    }

    /// Select a context.
    pub fn select_context(&mut self, context: &str) -> bool {
        let changed = self.contexts.insert(context.to_string());
        self.bump(changed)
    }

    /// Remove a context tag.
    pub fn remove_context(&mut self, context: &str) -> bool {
        let changed = self.contexts.remove(context);
        self.bump(changed)
    }

    /// Toggle a level 2 equipment item.
    pub fn toggle_equipment_item(&mut self, group: &str, item: &str) -> bool {
        let changed = self.equipment.toggle_item(group, item);
        self.bump(changed)
    }

    /// Select or clear a level 2 equipment item.
    pub fn set_equipment_item(&mut self, group: &str, item: &str, selected: bool) -> bool {
        let changed = self.equipment.set_item(group, item, selected);
        self.bump(changed)
    }

    /// Toggle a childless level 1 equipment group.
    pub fn toggle_equipment_group(&mut self, group: &str) -> bool {
        let changed = self.equipment.toggle_group(group);
        self.bump(changed)
    }

    /// Remove a level 2 equipment tag.
    pub fn remove_equipment_item(&mut self, group: &str, item: &str) -> bool {
        let changed = self.equipment.remove_item(group, item);
        self.bump(changed)
    }

    /// Toggle a scenario checkbox.
    pub fn toggle_scenario(&mut self, scenario: &str) -> bool {
        if !self.scenarios.remove(scenario) {
            self.scenarios.insert(scenario.to_string());
        }
        self.bump(true)
    }

    /// Select a scenario.
    pub fn select_scenario(&mut self, scenario: &str) -> bool {
        let changed = self.scenarios.insert(scenario.to_string());
        self.bump(changed)
    }

    /// Remove a scenario tag.
    pub fn remove_scenario(&mut self, scenario: &str) -> bool {
        let changed = self.scenarios.remove(scenario);
        self.bump(changed)
    }

    /// Add a bare mechanism label to the scenario set.
    ///
    /// The label alone qualifies the mechanism for aggregation, but it still
    /// contributes no leaves until one of its scenarios is selected.
    pub fn select_mechanism(&mut self, mechanism: &str) -> bool {
        self.select_scenario(mechanism)
    }

    /// Selected scenarios grouped under their mechanism, in catalog order.
    ///
    /// Bare mechanism labels and scenarios unknown to the catalog are
    /// skipped; mechanisms with nothing selected are omitted.
    #[must_use]
    pub fn grouped_by_mechanism<'c>(&self, catalog: &'c Catalog) -> Vec<(&'c str, Vec<&'c str>)> {
        catalog
            .mechanisms
            .iter()
            .filter_map(|m| {
                let picked: Vec<&str> = m
                    .scenarios
                    .iter()
                    .filter(|s| self.scenarios.contains(s.as_str()))
                    .map(String::as_str)
                    .collect();
                (!picked.is_empty()).then(|| (m.name.as_str(), picked))
            })
            .collect()
    }
}
