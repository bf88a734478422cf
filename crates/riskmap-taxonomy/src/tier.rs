//! The fixed depth schema of the risk taxonomy.

use serde::{Deserialize, Serialize};

/// One tier of the taxonomy, indexed by absolute depth from the true root.
///
/// The table labels nodes for tooltips; it never validates structure, so a
/// shorter tree (for example one built from a childless equipment group) is
/// still valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tier {
    /// The risk title at the true root.
    Risk,
    /// Operating context / work location.
    OperatingContext,
    /// First equipment level.
    EquipmentLevel1,
    /// Second equipment level.
    EquipmentLevel2,
    /// Damaging-energy mechanism grouping scenarios.
    DamagingEnergyMechanism,
    /// A single risk event.
    Scenario,
}

/// Label used for depths past the end of the table.
pub const FALLBACK_CATEGORY: &str = "Category";

impl Tier {
    /// Every tier in depth order.
    pub const ALL: [Self; 6] = [
        Self::Risk,
        Self::OperatingContext,
        Self::EquipmentLevel1,
        Self::EquipmentLevel2,
        Self::DamagingEnergyMechanism,
        Self::Scenario,
    ];

    /// Tier at an absolute depth.
    #[must_use]
    pub fn from_depth(depth: usize) -> Option<Self> {
        Self::ALL.get(depth).copied()
    }

    /// Absolute depth of this tier.
    #[must_use]
    pub fn depth(self) -> usize {
        self as usize
    }

    /// Human-readable category label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Risk => "Risk",
            Self::OperatingContext => "Operating Context",
            Self::EquipmentLevel1 => "Equipment Level 1",
            Self::EquipmentLevel2 => "Equipment Level 2",
            Self::DamagingEnergyMechanism => "Damaging Energy Mechanism",
            Self::Scenario => "Scenario",
        }
    }
}

/// Category label for an absolute depth, falling back to [`FALLBACK_CATEGORY`].
#[must_use]
pub fn category_label(depth: usize) -> &'static str {
    Tier::from_depth(depth).map_or(FALLBACK_CATEGORY, Tier::label)
}
