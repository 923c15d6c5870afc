//! Requestable host capabilities.
//!
//! A [`Capability`] is one sensitive permission the bridge may ask the
//! host for. The set is closed and fixed at compile time; its
//! declaration order is the order in which missing capabilities are
//! requested.
//!
//! # Capabilities
//!
//! | Capability | Host permission | Label |
//! |------------|-----------------|-------|
//! | [`Bluetooth`](Capability::Bluetooth) | `android.permission.BLUETOOTH` | Bluetooth |
//! | [`BluetoothScan`](Capability::BluetoothScan) | `android.permission.BLUETOOTH_SCAN` | Bluetooth scan |
//! | [`BluetoothConnect`](Capability::BluetoothConnect) | `android.permission.BLUETOOTH_CONNECT` | Bluetooth connect |
//! | [`FineLocation`](Capability::FineLocation) | `android.permission.ACCESS_FINE_LOCATION` | Location |
//!
//! # Example
//!
//! ```
//! use gio_auth::{Capability, CapabilitySet};
//!
//! let set = CapabilitySet::BLUETOOTH_SCAN | CapabilitySet::FINE_LOCATION;
//! let ordered: Vec<Capability> = set.capabilities().collect();
//! assert_eq!(ordered, vec![Capability::BluetoothScan, Capability::FineLocation]);
//!
//! assert_eq!(Capability::parse("scan"), Some(Capability::BluetoothScan));
//! assert_eq!(Capability::FineLocation.label(), "Location");
//! ```

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// A single requestable permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Classic Bluetooth access.
    Bluetooth,
    /// Discovering nearby Bluetooth devices.
    #[serde(alias = "scan")]
    BluetoothScan,
    /// Connecting to paired Bluetooth devices.
    #[serde(alias = "connect")]
    BluetoothConnect,
    /// Precise location (needed for Bluetooth scanning on older hosts).
    #[serde(alias = "location")]
    FineLocation,
}

impl Capability {
    /// Every capability in declaration order.
    pub const ALL: [Self; 4] = [
        Self::Bluetooth,
        Self::BluetoothScan,
        Self::BluetoothConnect,
        Self::FineLocation,
    ];

    /// Stable configuration name (`snake_case`).
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Bluetooth => "bluetooth",
            Self::BluetoothScan => "bluetooth_scan",
            Self::BluetoothConnect => "bluetooth_connect",
            Self::FineLocation => "fine_location",
        }
    }

    /// Permission string understood by the host.
    #[must_use]
    pub fn host_permission(self) -> &'static str {
        match self {
            Self::Bluetooth => "android.permission.BLUETOOTH",
            Self::BluetoothScan => "android.permission.BLUETOOTH_SCAN",
            Self::BluetoothConnect => "android.permission.BLUETOOTH_CONNECT",
            Self::FineLocation => "android.permission.ACCESS_FINE_LOCATION",
        }
    }

    /// Human-readable label used in user notifications.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Bluetooth => "Bluetooth",
            Self::BluetoothScan => "Bluetooth scan",
            Self::BluetoothConnect => "Bluetooth connect",
            Self::FineLocation => "Location",
        }
    }

    /// Parses a capability name (case-insensitive).
    ///
    /// Accepts the configuration name, the short aliases `scan`,
    /// `connect` and `location`, and the full host permission string.
    ///
    /// ```
    /// use gio_auth::Capability;
    ///
    /// assert_eq!(Capability::parse("BLUETOOTH"), Some(Capability::Bluetooth));
    /// assert_eq!(Capability::parse("connect"), Some(Capability::BluetoothConnect));
    /// assert_eq!(
    ///     Capability::parse("android.permission.ACCESS_FINE_LOCATION"),
    ///     Some(Capability::FineLocation)
    /// );
    /// assert_eq!(Capability::parse("camera"), None);
    /// ```
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        let lowered = name.trim().to_lowercase();
        let short = lowered
            .strip_prefix("android.permission.")
            .unwrap_or(&lowered);
        match short {
            "bluetooth" => Some(Self::Bluetooth),
            "bluetooth_scan" | "scan" => Some(Self::BluetoothScan),
            "bluetooth_connect" | "connect" => Some(Self::BluetoothConnect),
            "fine_location" | "access_fine_location" | "location" => Some(Self::FineLocation),
            _ => None,
        }
    }

    /// Parses a list of names into a set.
    ///
    /// Returns the combined set and the names that were not recognized;
    /// the caller decides whether unknown names are fatal.
    #[must_use]
    pub fn parse_list<'a>(names: &[&'a str]) -> (CapabilitySet, Vec<&'a str>) {
        let mut set = CapabilitySet::empty();
        let mut unknown = Vec::new();
        for name in names {
            match Self::parse(name) {
                Some(c) => set |= CapabilitySet::from(c),
                None => unknown.push(*name),
            }
        }
        (set, unknown)
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

bitflags! {
    /// A set of [`Capability`] values.
    ///
    /// Iteration via [`capabilities`](Self::capabilities) always follows
    /// declaration order, regardless of how the set was built.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct CapabilitySet: u8 {
        /// [`Capability::Bluetooth`]
        const BLUETOOTH         = 0b0001;
        /// [`Capability::BluetoothScan`]
        const BLUETOOTH_SCAN    = 0b0010;
        /// [`Capability::BluetoothConnect`]
        const BLUETOOTH_CONNECT = 0b0100;
        /// [`Capability::FineLocation`]
        const FINE_LOCATION     = 0b1000;
    }
}

impl CapabilitySet {
    /// Returns `true` if `capability` is in the set.
    #[must_use]
    pub fn has(self, capability: Capability) -> bool {
        self.contains(Self::from(capability))
    }

    /// Iterates the members in declaration order.
    pub fn capabilities(self) -> impl Iterator<Item = Capability> {
        Capability::ALL.into_iter().filter(move |c| self.has(*c))
    }
}

impl From<Capability> for CapabilitySet {
    fn from(capability: Capability) -> Self {
        match capability {
            Capability::Bluetooth => Self::BLUETOOTH,
            Capability::BluetoothScan => Self::BLUETOOTH_SCAN,
            Capability::BluetoothConnect => Self::BLUETOOTH_CONNECT,
            Capability::FineLocation => Self::FINE_LOCATION,
        }
    }
}

impl FromIterator<Capability> for CapabilitySet {
    fn from_iter<I: IntoIterator<Item = Capability>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::empty(), |set, c| set | Self::from(c))
    }
}

impl std::fmt::Display for CapabilitySet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.capabilities().map(Capability::name).collect();
        if names.is_empty() {
            write!(f, "(none)")
        } else {
            write!(f, "{}", names.join(" | "))
        }
    }
}
