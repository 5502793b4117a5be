//! Travel profile catalog

use serde::{Deserialize, Serialize};
use std::fmt;

/// A named travel mode used to select routing parameters and cost tables.
///
/// The serialized form is the stable profile id passed to adapters
/// ("driving-car", "cycling-regular", ...). The catalog is fixed at compile
/// time and safe for concurrent reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TravelProfile {
    /// Regular passenger car
    DrivingCar,
    /// Regular bicycle
    CyclingRegular,
    /// Pedestrian
    FootWalking,
    /// Heavy goods vehicle
    DrivingHgv,
}

impl TravelProfile {
    /// All profiles the app knows about, in catalog order
    pub const ALL: [Self; 4] = [
        Self::DrivingCar,
        Self::CyclingRegular,
        Self::FootWalking,
        Self::DrivingHgv,
    ];

    /// Stable profile id, the key adapters and cost tables are driven by
    #[must_use]
    pub const fn id(&self) -> &'static str {
        match self {
            Self::DrivingCar => "driving-car",
            Self::CyclingRegular => "cycling-regular",
            Self::FootWalking => "foot-walking",
            Self::DrivingHgv => "driving-hgv",
        }
    }

    /// Resolve a stable id back to a profile
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "driving-car" => Some(Self::DrivingCar),
            "cycling-regular" => Some(Self::CyclingRegular),
            "foot-walking" => Some(Self::FootWalking),
            "driving-hgv" => Some(Self::DrivingHgv),
            _ => None,
        }
    }

    /// Human-readable name for pickers
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::DrivingCar => "Car",
            Self::CyclingRegular => "Bike",
            Self::FootWalking => "Walk",
            Self::DrivingHgv => "Truck",
        }
    }

    /// Icon-font glyph name used by the mobile shell
    #[must_use]
    pub const fn icon(&self) -> &'static str {
        match self {
            Self::DrivingCar => "directions-car",
            Self::CyclingRegular => "directions-bike",
            Self::FootWalking => "directions-walk",
            Self::DrivingHgv => "local-shipping",
        }
    }

    /// One-line description shown under the picker entry
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::DrivingCar => "Fastest route by car",
            Self::CyclingRegular => "Bicycle-friendly streets",
            Self::FootWalking => "Sidewalks and footpaths",
            Self::DrivingHgv => "Roads suitable for heavy vehicles",
        }
    }

    /// Catalog entry for this profile
    #[must_use]
    pub fn catalog_entry(&self) -> RouteProfile {
        RouteProfile {
            id: self.id().to_string(),
            display_name: self.display_name().to_string(),
            icon: self.icon().to_string(),
            description: self.description().to_string(),
        }
    }
}

impl fmt::Display for TravelProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Immutable catalog entry describing one travel profile to the UI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteProfile {
    /// Stable key passed to adapters
    pub id: String,
    /// Picker label
    pub display_name: String,
    /// Icon-font glyph name
    pub icon: String,
    /// One-line picker description
    pub description: String,
}

impl RouteProfile {
    /// The full catalog, in fixed order
    #[must_use]
    pub fn catalog() -> Vec<Self> {
        TravelProfile::ALL
            .iter()
            .map(TravelProfile::catalog_entry)
            .collect()
    }
}
