// ABOUTME: Delivery zone lookup for the Monterrey metropolitan area
// ABOUTME: Longest matching postal code prefix wins; each zone has its own exclusions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Postal code zoning.
//!
//! A code is deliverable when one of the zone prefixes matches it and the
//! matching zone does not exclude it. The zone label lookup never fails and
//! is independent of deliverability, so callers must check
//! [`ZoneTable::is_valid_postal_code`] before trusting a label.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use serde::Serialize;

/// Label returned when no zone prefix matches
pub const DEFAULT_ZONE_LABEL: &str = "Área Metropolitana de Monterrey";

/// Named delivery zone
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeliveryZone {
    /// Human-readable zone name
    pub name: String,
    /// Postal code prefixes that belong to the zone
    pub prefixes: Vec<String>,
    /// Individual codes inside the prefixes that are not served
    pub excluded: BTreeSet<String>,
}

impl DeliveryZone {
    /// Zone with no exclusions
    #[must_use]
    pub fn new(name: &str, prefixes: &[&str]) -> Self {
        Self {
            name: name.to_owned(),
            prefixes: prefixes.iter().map(|p| (*p).to_owned()).collect(),
            excluded: BTreeSet::new(),
        }
    }

    /// Length of the longest prefix of this zone matching `cp`
    fn match_len(&self, cp: &str) -> Option<usize> {
        self.prefixes
            .iter()
            .filter(|prefix| cp.starts_with(prefix.as_str()))
            .map(String::len)
            .max()
    }
}

static DEFAULT_ZONES: LazyLock<ZoneTable> = LazyLock::new(ZoneTable::monterrey);

/// Ordered set of delivery zones
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ZoneTable {
    zones: Vec<DeliveryZone>,
}

impl Default for ZoneTable {
    fn default() -> Self {
        DEFAULT_ZONES.clone()
    }
}

impl ZoneTable {
    /// Build a table from zones in priority order
    #[must_use]
    pub const fn new(zones: Vec<DeliveryZone>) -> Self {
        Self { zones }
    }

    /// Service area of the Monterrey kitchen
    #[must_use]
    pub fn monterrey() -> Self {
        Self::new(vec![
            DeliveryZone::new("Monterrey", &["64"]),
            DeliveryZone::new("San Pedro Garza García", &["662", "663"]),
            DeliveryZone::new("San Nicolás de los Garza", &["664"]),
            DeliveryZone::new("Guadalupe", &["671"]),
            DeliveryZone::new("Santiago", &["673"]),
            DeliveryZone::new("Apodaca", &["666"]),
            DeliveryZone::new("Santa Catarina", &["661"]),
            DeliveryZone::new("Escobedo", &["660"]),
        ])
    }

    /// Exclude individual codes, each attached to the zone it falls in
    ///
    /// Codes that match no zone are ignored since they are already
    /// outside the service area.
    #[must_use]
    pub fn with_exclusions<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for code in codes {
            let code = code.as_ref().trim();
            if code.is_empty() {
                continue;
            }
            if let Some(index) = self.find_index(code) {
                self.zones[index].excluded.insert(code.to_owned());
            }
        }
        self
    }

    /// Zones in priority order
    #[must_use]
    pub fn zones(&self) -> &[DeliveryZone] {
        &self.zones
    }

    fn find_index(&self, cp: &str) -> Option<usize> {
        // Longest prefix wins; ties go to the zone listed first
        let mut best: Option<(usize, usize)> = None;
        for (index, zone) in self.zones.iter().enumerate() {
            if let Some(len) = zone.match_len(cp) {
                if best.is_none_or(|(_, best_len)| len > best_len) {
                    best = Some((index, len));
                }
            }
        }
        best.map(|(index, _)| index)
    }

    /// Zone whose prefix matches `cp`, ignoring exclusions
    #[must_use]
    pub fn find_zone(&self, cp: &str) -> Option<&DeliveryZone> {
        self.find_index(cp.trim()).map(|index| &self.zones[index])
    }

    /// Whether the code lies inside a zone and is not excluded by it
    #[must_use]
    pub fn is_valid_postal_code(&self, cp: &str) -> bool {
        let cp = cp.trim();
        self.find_zone(cp)
            .is_some_and(|zone| !zone.excluded.contains(cp))
    }

    /// Zone label for a code, falling back to [`DEFAULT_ZONE_LABEL`]
    #[must_use]
    pub fn zone_by_postal_code(&self, cp: &str) -> &str {
        self.find_zone(cp)
            .map_or(DEFAULT_ZONE_LABEL, |zone| zone.name.as_str())
    }
}

/// [`ZoneTable::is_valid_postal_code`] against the default table
#[must_use]
pub fn is_valid_postal_code(cp: &str) -> bool {
    DEFAULT_ZONES.is_valid_postal_code(cp)
}

/// [`ZoneTable::zone_by_postal_code`] against the default table
#[must_use]
pub fn zone_by_postal_code(cp: &str) -> &'static str {
    DEFAULT_ZONES.zone_by_postal_code(cp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_matches() {
        assert!(is_valid_postal_code("64999"));
        assert!(is_valid_postal_code(" 66250 "));
        assert!(!is_valid_postal_code("00000"));
        assert_eq!(zone_by_postal_code("64000"), "Monterrey");
        assert_eq!(zone_by_postal_code("66600"), "Apodaca");
        assert_eq!(zone_by_postal_code("66320"), "San Pedro Garza García");
        assert_eq!(zone_by_postal_code("00000"), DEFAULT_ZONE_LABEL);
    }

    #[test]
    fn test_longest_prefix_wins() {
        let table = ZoneTable::new(vec![
            DeliveryZone::new("Wide", &["66"]),
            DeliveryZone::new("Narrow", &["664"]),
        ]);
        assert_eq!(table.zone_by_postal_code("66450"), "Narrow");
        assert_eq!(table.zone_by_postal_code("66050"), "Wide");
    }

    #[test]
    fn test_exclusions_only_affect_validity() {
        let table = ZoneTable::monterrey().with_exclusions(["67300", "00001", ""]);
        assert!(!table.is_valid_postal_code("67300"));
        assert!(table.is_valid_postal_code("67301"));
        assert_eq!(table.zone_by_postal_code("67300"), "Santiago");
        assert_eq!(table.zones()[4].excluded.len(), 1);
    }
}
