//! The taxonomy catalog: every entity a selection can refer to.

use crate::{NodePath, TaxonomyError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A first-level equipment entry and its second-level items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentGroup {
    /// Level 1 name
    pub name: String,
    /// Level 2 names
    #[serde(default)]
    pub items: Vec<String>,
}

/// A damaging-energy mechanism and the scenarios it groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mechanism {
    /// Mechanism name
    pub name: String,
    /// Scenario names
    pub scenarios: Vec<String>,
}

/// Static taxonomy data.
///
/// Every operating context offers the same equipment tree, and every
/// equipment slot offers the same mechanisms. Builder output follows the
/// order of these lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    /// Operating contexts
    pub contexts: Vec<String>,
    /// Equipment tree
    pub equipment: Vec<EquipmentGroup>,
    /// Damaging-energy mechanisms
    pub mechanisms: Vec<Mechanism>,
}

const V2P_SCENARIOS: [&str; 6] = [
    "Vehicle in control contacts person involved in the task",
    "Vehicle in control contacts person not involved in the task",
    "Vehicle not in control / moves unexpectedly contacting person including rollaway",
    "Person in footprint of vehicle including rollaway",
    "Merging, overtaking, path crossover, junction, intersection crossover",
    "Head-on, dove tailing, rear end, blind approach",
];

const V2V_SCENARIOS: [&str; 5] = [
    "Collision between two vehicles at an intersection or junction",
    "Rear-end collision due to sudden braking or inattention",
    "Side-swipe collision while merging or changing lanes",
    "Head-on collision due to wrong-way entry or overtaking misjudgment",
    "T-bone collision at a crossroad or stop sign violation",
];

const V2E_SCENARIOS: [&str; 4] = [
    "Vehicle impacts stationary object (barrier, bollard, tree, pole)",
    "Vehicle collides with building or site infrastructure",
    "Vehicle leaves the roadway and enters an exclusion zone",
    "Vehicle skids or loses control due to environmental conditions",
];

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

impl Catalog {
    /// The built-in vehicle incident taxonomy.
    #[must_use]
    pub fn vehicle_incident() -> Self {
        let group = |name: &str, items: &[&str]| EquipmentGroup {
            name: name.to_string(),
            items: strings(items),
        };
        let mechanism = |name: &str, scenarios: &[&str]| Mechanism {
            name: name.to_string(),
            scenarios: strings(scenarios),
        };

        Self {
            contexts: strings(&["Non-mining onsite", "Offsite", "Surface", "Underground"]),
            equipment: vec![
                group("Passenger", &["Light Vehicles", "High Occupancy Vehicles"]),
                group("Highway Goods Vehicle", &["Road going and road used"]),
                group(
                    "Non Heavy Mobile Equipment",
                    &["Road going but not normally road used", "Operational Vehicles"],
                ),
                group(
                    "Heavy Mobile Equipment",
                    &["Rubber Tyre Heavy Vehicle", "Tracked Heavy Vehicle"],
                ),
            ],
            mechanisms: vec![
                mechanism("Vehicle to person", &V2P_SCENARIOS[..]),
                mechanism("Vehicle to vehicle", &V2V_SCENARIOS[..]),
                mechanism("Vehicle to environment", &V2E_SCENARIOS[..]),
            ],
        }
    }

    /// Load and validate a catalog from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self, TaxonomyError> {
        let catalog: Self = serde_yaml_ng::from_str(yaml)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> Result<String, TaxonomyError> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Reject duplicate names within any one tier list, and scenario names
    /// that appear under two mechanisms or match a mechanism name.
    pub fn validate(&self) -> Result<(), TaxonomyError> {
        unique(&NodePath::root(), self.contexts.iter())?;
        unique(&NodePath::root(), self.equipment.iter().map(|g| &g.name))?;
        for group in &self.equipment {
            unique(&NodePath::from_segments([group.name.as_str()]), group.items.iter())?;
        }
        unique(&NodePath::root(), self.mechanisms.iter().map(|m| &m.name))?;
        for mechanism in &self.mechanisms {
            unique(
                &NodePath::from_segments([mechanism.name.as_str()]),
                mechanism.scenarios.iter(),
            )?;
        }
        let mut seen: HashSet<&str> = self.mechanisms.iter().map(|m| m.name.as_str()).collect();
        for scenario in self.scenarios() {
            if !seen.insert(scenario) {
                return Err(TaxonomyError::AmbiguousScenario {
                    name: scenario.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Equipment group by name.
    #[must_use]
    pub fn equipment_group(&self, name: &str) -> Option<&EquipmentGroup> {
        self.equipment.iter().find(|g| g.name == name)
    }

    /// Mechanism by name.
    #[must_use]
    pub fn mechanism(&self, name: &str) -> Option<&Mechanism> {
        self.mechanisms.iter().find(|m| m.name == name)
    }

    /// Mechanism that owns a scenario.
    #[must_use]
    pub fn mechanism_of(&self, scenario: &str) -> Option<&Mechanism> {
        self.mechanisms
            .iter()
            .find(|m| m.scenarios.iter().any(|s| s == scenario))
    }

    /// Whether `name` is a mechanism label rather than a scenario.
    #[must_use]
    pub fn is_mechanism(&self, name: &str) -> bool {
        self.mechanism(name).is_some()
    }

    /// Every scenario in catalog order.
    pub fn scenarios(&self) -> impl Iterator<Item = &str> {
        self.mechanisms
            .iter()
            .flat_map(|m| m.scenarios.iter().map(String::as_str))
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::vehicle_incident()
    }
}

fn unique<'a>(
    path: &NodePath,
    names: impl Iterator<Item = &'a String>,
) -> Result<(), TaxonomyError> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name.as_str()) {
            return Err(TaxonomyError::DuplicateName {
                path: path.clone(),
                name: name.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vehicle_incident_shape() {
        let catalog = Catalog::vehicle_incident();
        assert_eq!(catalog.contexts.len(), 4);
        assert_eq!(catalog.equipment.len(), 4);
        let items: usize = catalog.equipment.iter().map(|g| g.items.len()).sum();
        assert_eq!(items, 7);
        assert_eq!(catalog.scenarios().count(), 15);
        assert!(catalog.validate().is_ok());
    }

    #[test]
    fn test_mechanism_lookup() {
        let catalog = Catalog::vehicle_incident();
        let owner = catalog
            .mechanism_of("Head-on, dove tailing, rear end, blind approach")
            .map(|m| m.name.as_str());
        assert_eq!(owner, Some("Vehicle to person"));
        assert!(catalog.is_mechanism("Vehicle to vehicle"));
        assert!(!catalog.is_mechanism("Surface"));
        assert!(catalog.mechanism_of("unknown").is_none());
    }

    #[test]
    fn test_yaml_roundtrip() {
        let catalog = Catalog::vehicle_incident();
        let yaml = catalog.to_yaml().unwrap();
        assert_eq!(Catalog::from_yaml(&yaml).unwrap(), catalog);
    }

    #[test]
    fn test_from_yaml_childless_group() {
        let yaml = r"
contexts: [Yard]
equipment:
  - name: Forklift
mechanisms:
  - name: Crush
    scenarios: [Pinned against racking]
";
        let catalog = Catalog::from_yaml(yaml).unwrap();
        assert!(catalog.equipment[0].items.is_empty());
    }

    #[test]
    fn test_from_yaml_rejects_duplicates() {
        let yaml = r"
contexts: [Yard, Yard]
equipment: []
mechanisms: []
";
        assert!(matches!(
            Catalog::from_yaml(yaml),
            Err(TaxonomyError::DuplicateName { .. })
        ));
    }

    #[test]
    fn test_from_yaml_rejects_scenario_under_two_mechanisms() {
        let yaml = r"
contexts: [Yard]
equipment: []
mechanisms:
  - name: Crush
    scenarios: [Pinned against racking]
  - name: Impact
    scenarios: [Pinned against racking]
";
        match Catalog::from_yaml(yaml) {
            Err(TaxonomyError::AmbiguousScenario { name }) => {
                assert_eq!(name, "Pinned against racking");
            }
            other => panic!("expected ambiguous scenario, got {other:?}"),
        }
    }

    #[test]
    fn test_from_yaml_rejects_scenario_named_like_mechanism() {
        let yaml = r"
contexts: [Yard]
equipment: []
mechanisms:
  - name: Crush
    scenarios: [Impact]
  - name: Impact
    scenarios: [Struck by load]
";
        assert!(matches!(
            Catalog::from_yaml(yaml),
            Err(TaxonomyError::AmbiguousScenario { .. })
        ));
    }
}
