//! Declarative capability request policy.
//!
//! Which capabilities to ask for, and from which host version onward,
//! is policy data rather than logic. A [`CapabilityTable`] holds one
//! [`CapabilityRule`] per capability; the coordinator walks it in table
//! order and stays version-agnostic itself.
//!
//! # Default Table
//!
//! | Capability | Minimum host | Required |
//! |------------|--------------|----------|
//! | `bluetooth` | api-1 | yes |
//! | `bluetooth_scan` | api-31 | yes |
//! | `bluetooth_connect` | api-31 | yes |
//! | `fine_location` | api-23 | yes |
//!
//! # TOML Form
//!
//! ```toml
//! [[rules]]
//! capability = "bluetooth_scan"
//! min_host_version = 31
//! required = true
//! ```

use crate::{Capability, CapabilitySet};
use gio_types::HostVersion;
use serde::{Deserialize, Serialize};

/// Request policy for one capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CapabilityRule {
    /// The capability this rule governs.
    pub capability: Capability,
    /// Hosts below this version cannot evaluate the capability.
    #[serde(default = "default_min_host_version")]
    pub min_host_version: HostVersion,
    /// Whether the application cannot work without it.
    #[serde(default = "default_required")]
    pub required: bool,
}

fn default_min_host_version() -> HostVersion {
    HostVersion::BASE
}

fn default_required() -> bool {
    true
}

impl CapabilityRule {
    /// A required rule applying to every host version.
    #[must_use]
    pub fn new(capability: Capability) -> Self {
        Self {
            capability,
            min_host_version: HostVersion::BASE,
            required: true,
        }
    }

    /// Sets the minimum host version.
    #[must_use]
    pub fn since(mut self, version: HostVersion) -> Self {
        self.min_host_version = version;
        self
    }

    /// Marks the capability as optional.
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Returns `true` if a host at `version` can evaluate the capability.
    #[must_use]
    pub fn applies_to(&self, version: HostVersion) -> bool {
        version.at_least(self.min_host_version)
    }
}

/// Ordered set of [`CapabilityRule`]s, at most one per capability.
///
/// # Example
///
/// ```
/// use gio_auth::{Capability, CapabilityRule, CapabilityTable};
/// use gio_types::HostVersion;
///
/// let table = CapabilityTable::default();
/// let on_api_30: Vec<Capability> = table
///     .applicable(HostVersion::new(30))
///     .map(|rule| rule.capability)
///     .collect();
/// assert_eq!(on_api_30, vec![Capability::Bluetooth, Capability::FineLocation]);
///
/// let custom = CapabilityTable::new(vec![
///     CapabilityRule::new(Capability::FineLocation).optional(),
/// ]);
/// assert!(custom.required().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<CapabilityRule>", into = "Vec<CapabilityRule>")]
pub struct CapabilityTable {
    rules: Vec<CapabilityRule>,
}

impl CapabilityTable {
    /// Builds a table from rules in the given order.
    ///
    /// A later rule for an already listed capability replaces the
    /// earlier one's settings but keeps the earlier position.
    #[must_use]
    pub fn new(rules: Vec<CapabilityRule>) -> Self {
        let mut table = Self { rules: Vec::new() };
        for rule in rules {
            table.upsert(rule);
        }
        table
    }

    /// Inserts a rule or replaces the rule for the same capability.
    pub fn upsert(&mut self, rule: CapabilityRule) {
        match self
            .rules
            .iter_mut()
            .find(|existing| existing.capability == rule.capability)
        {
            Some(existing) => *existing = rule,
            None => self.rules.push(rule),
        }
    }

    /// Returns the rule for `capability`, if listed.
    #[must_use]
    pub fn rule_for(&self, capability: Capability) -> Option<&CapabilityRule> {
        self.rules.iter().find(|r| r.capability == capability)
    }

    /// Iterates all rules in table order.
    pub fn iter(&self) -> impl Iterator<Item = &CapabilityRule> {
        self.rules.iter()
    }

    /// Iterates the rules a host at `version` can evaluate.
    pub fn applicable(&self, version: HostVersion) -> impl Iterator<Item = &CapabilityRule> {
        self.rules.iter().filter(move |r| r.applies_to(version))
    }

    /// All listed capabilities.
    #[must_use]
    pub fn capabilities(&self) -> CapabilitySet {
        self.rules.iter().map(|r| r.capability).collect()
    }

    /// Capabilities marked as required.
    #[must_use]
    pub fn required(&self) -> CapabilitySet {
        self.rules
            .iter()
            .filter(|r| r.required)
            .map(|r| r.capability)
            .collect()
    }

    /// Number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` if the table has no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl From<Vec<CapabilityRule>> for CapabilityTable {
    fn from(rules: Vec<CapabilityRule>) -> Self {
        Self::new(rules)
    }
}

impl From<CapabilityTable> for Vec<CapabilityRule> {
    fn from(table: CapabilityTable) -> Self {
        table.rules
    }
}

impl Default for CapabilityTable {
    fn default() -> Self {
        Self::new(vec![
            CapabilityRule::new(Capability::Bluetooth),
            CapabilityRule::new(Capability::BluetoothScan).since(HostVersion::S),
            CapabilityRule::new(Capability::BluetoothConnect).since(HostVersion::S),
            CapabilityRule::new(Capability::FineLocation).since(HostVersion::M),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_matches_declaration_order() {
        let order: Vec<Capability> = CapabilityTable::default()
            .iter()
            .map(|r| r.capability)
            .collect();
        assert_eq!(order, Capability::ALL.to_vec());
    }

    #[test]
    fn version_gating() {
        let table = CapabilityTable::default();
        assert_eq!(table.applicable(HostVersion::new(22)).count(), 1);
        assert_eq!(table.applicable(HostVersion::new(23)).count(), 2);
        assert_eq!(table.applicable(HostVersion::S).count(), 4);
    }

    #[test]
    fn upsert_keeps_position() {
        let mut table = CapabilityTable::default();
        table.upsert(CapabilityRule::new(Capability::BluetoothScan).optional());
        let order: Vec<Capability> = table.iter().map(|r| r.capability).collect();
        assert_eq!(order, Capability::ALL.to_vec());
        assert!(!table.rule_for(Capability::BluetoothScan).map_or(true, |r| r.required));
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn new_deduplicates() {
        let table = CapabilityTable::new(vec![
            CapabilityRule::new(Capability::FineLocation),
            CapabilityRule::new(Capability::Bluetooth),
            CapabilityRule::new(Capability::FineLocation).since(HostVersion::S),
        ]);
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.iter().next().map(|r| r.min_host_version),
            Some(HostVersion::S)
        );
    }

    #[test]
    fn required_set() {
        let table = CapabilityTable::new(vec![
            CapabilityRule::new(Capability::Bluetooth),
            CapabilityRule::new(Capability::FineLocation).optional(),
        ]);
        assert_eq!(table.required(), CapabilitySet::BLUETOOTH);
        assert_eq!(
            table.capabilities(),
            CapabilitySet::BLUETOOTH | CapabilitySet::FINE_LOCATION
        );
    }

    #[test]
    fn toml_rules_fill_defaults() {
        #[derive(Deserialize)]
        struct Doc {
            rules: CapabilityTable,
        }

        let doc: Doc = toml::from_str(
            r#"
[[rules]]
capability = "scan"
min_host_version = 31

[[rules]]
capability = "fine_location"
required = false
"#,
        )
        .expect("parse");

        let scan = doc.rules.rule_for(Capability::BluetoothScan).copied();
        assert_eq!(scan.map(|r| r.min_host_version), Some(HostVersion::S));
        assert_eq!(scan.map(|r| r.required), Some(true));

        let location = doc.rules.rule_for(Capability::FineLocation).copied();
        assert_eq!(location.map(|r| r.min_host_version), Some(HostVersion::BASE));
        assert_eq!(location.map(|r| r.required), Some(false));
    }
}
