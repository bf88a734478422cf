//! Selection manifests: a YAML description of one treemap screen.

use riskmap_taxonomy::{Catalog, SelectionState, TaxonomyError};
use riskmap_treemap::{ConfigError, LayoutOptions, TreemapConfig};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors from loading a manifest or acting on it.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Taxonomy(#[from] TaxonomyError),

    #[error("unknown {tier} '{name}'")]
    UnknownName { tier: &'static str, name: String },

    #[error("cannot zoom into '{0}': not a branch of the hierarchy")]
    BadZoom(String),
}

/// One screen: title, depth limit and the three selection lists.
///
/// ```yaml
/// title: Vehicle Incident
/// max_depth: 3
/// contexts: [Surface, Underground]
/// equipment:
///   Passenger: [Light Vehicles]
///   Heavy Mobile Equipment: []     # every item of the group
/// scenarios:
///   - Head-on, dove tailing, rear end, blind approach
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct Manifest {
    #[serde(default = "default_title")]
    pub(crate) title: String,
    #[serde(default)]
    pub(crate) max_depth: Option<usize>,
    #[serde(default)]
    pub(crate) layout: LayoutOptions,
    #[serde(default)]
    pub(crate) contexts: Vec<String>,
    #[serde(default)]
    pub(crate) equipment: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub(crate) scenarios: Vec<String>,
}

fn default_title() -> String {
    TreemapConfig::default().title
}

impl Manifest {
    pub(crate) fn from_yaml(yaml: &str) -> Result<Self, CliError> {
        Ok(serde_yaml_ng::from_str(yaml)?)
    }

    /// View configuration carried by the manifest.
    pub(crate) fn config(&self) -> Result<TreemapConfig, CliError> {
        let config = TreemapConfig {
            title: self.title.clone(),
            max_depth: self.max_depth,
            layout: self.layout.clone(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Apply the lists to an empty selection, rejecting names the catalog
    /// does not know.
    ///
    /// An empty item list selects every item of the group, or the group
    /// itself when it has no items. A mechanism name in `scenarios` selects
    /// the bare label.
    pub(crate) fn selection(&self, catalog: &Catalog) -> Result<SelectionState, CliError> {
        let mut state = SelectionState::empty(catalog);

        for context in &self.contexts {
            if !catalog.contexts.contains(context) {
                return Err(unknown("operating context", context));
            }
            state.select_context(context);
        }

        for (group_name, items) in &self.equipment {
            let group = catalog
                .equipment_group(group_name)
                .ok_or_else(|| unknown("equipment group", group_name))?;
            if group.items.is_empty() {
                if !state.equipment().is_group_selected(group_name) {
                    state.toggle_equipment_group(group_name);
                }
                continue;
            }
            let chosen = if items.is_empty() { &group.items } else { items };
            for item in chosen {
                if !group.items.contains(item) {
                    return Err(unknown("equipment item", item));
                }
                state.set_equipment_item(group_name, item, true);
            }
        }

        for scenario in &self.scenarios {
            if catalog.is_mechanism(scenario) {
                state.select_mechanism(scenario);
            } else if catalog.mechanism_of(scenario).is_some() {
                state.select_scenario(scenario);
            } else {
                return Err(unknown("scenario", scenario));
            }
        }

        Ok(state)
    }
}

fn unknown(tier: &'static str, name: &str) -> CliError {
    CliError::UnknownName {
        tier,
        name: name.to_string(),
    }
}
