//! Restaurant (place of interest) model

use crate::value_objects::GeoPoint;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Key under which adapters keep a non-numeric provider id (Google place id)
pub const PLACE_ID_TAG: &str = "place_id";

/// Tag key carrying the cuisine classification
pub const CUISINE_TAG: &str = "cuisine";

/// A restaurant returned by a place search.
///
/// `id` is the provider-native id when the provider uses numeric ids (OSM
/// node ids) and a stable hash of the provider's string id otherwise, so UI
/// lists keyed by id never flicker between refreshes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    /// Stable numeric id
    pub id: u64,
    /// Display name
    pub name: String,
    /// Position
    pub location: GeoPoint,
    /// Provider tags (cuisine, address, opening hours, ...)
    pub tags: HashMap<String, String>,
}

impl Restaurant {
    /// Cuisine tag, if the provider supplied or derived one
    #[must_use]
    pub fn cuisine(&self) -> Option<&str> {
        self.tags.get(CUISINE_TAG).map(String::as_str)
    }

    /// Provider-native reference usable for a detail lookup.
    ///
    /// Google results carry their string place id under [`PLACE_ID_TAG`];
    /// OSM results are addressed by their numeric node id.
    #[must_use]
    pub fn provider_ref(&self) -> String {
        self.tags
            .get(PLACE_ID_TAG)
            .cloned()
            .unwrap_or_else(|| self.id.to_string())
    }
}

/// Fold a provider string id into the numeric id space.
///
/// FNV-1a, 64 bit. Stable across calls and releases (same string always
/// yields the same id) but deliberately not collision-free; it only has to
/// look like the numeric ids of the other provider family.
#[must_use]
pub fn stable_place_id(raw: &str) -> u64 {
    const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

    let mut hash = FNV_OFFSET;
    for byte in raw.bytes() {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}
