//! Logical device endpoints and their transport addresses.
//!
//! The device exposes a fixed set of GATT characteristics. Callers and the
//! packet layer only ever name them through [`Endpoint`]; an [`EndpointTable`]
//! built once per session maps each one to the [`EndpointAddress`] the
//! transport understands.
//!
//! Two addressing schemes are seen in practice:
//!
//! - **Handles** – short numeric attribute handles. gatttool-style transports use
//!   the characteristic *value* handle ([`EndpointTable::value_handles`]), GATT client
//!   stacks commonly use the characteristic declaration handle one below it
//!   ([`EndpointTable::characteristic_handles`]).
//! - **Identifiers** – stable 128-bit UUIDs, supplied through [`EndpointTable::from_fn`].

use core::fmt;
use core::str::FromStr;

use uuid::Uuid;

use crate::params::StimulusKind;

/// The fixed set of endpoints this crate talks to.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum Endpoint {
    /// Vibration command slot.
    Vibrate,
    /// Beep command slot.
    Beep,
    /// Shock command slot.
    Shock,
    /// Battery level, percent.
    Battery,
    /// Device clock.
    Clock,
    /// Which stimulus the hardware button fires.
    ButtonAssign,
    /// Number of vibrations delivered.
    VibrateCount,
    /// Number of beeps delivered.
    BeepCount,
    /// Number of shocks delivered.
    ShockCount,
}

impl Endpoint {
    /// Every endpoint, in table order.
    pub const ALL: [Endpoint; 9] = [
        Endpoint::Vibrate,
        Endpoint::Beep,
        Endpoint::Shock,
        Endpoint::Battery,
        Endpoint::Clock,
        Endpoint::ButtonAssign,
        Endpoint::VibrateCount,
        Endpoint::BeepCount,
        Endpoint::ShockCount,
    ];

    const fn index(self) -> usize {
        match self {
            Endpoint::Vibrate => 0,
            Endpoint::Beep => 1,
            Endpoint::Shock => 2,
            Endpoint::Battery => 3,
            Endpoint::Clock => 4,
            Endpoint::ButtonAssign => 5,
            Endpoint::VibrateCount => 6,
            Endpoint::BeepCount => 7,
            Endpoint::ShockCount => 8,
        }
    }

    /// The logical name of the endpoint.
    pub const fn name(self) -> &'static str {
        match self {
            Endpoint::Vibrate => "vibrate",
            Endpoint::Beep => "beep",
            Endpoint::Shock => "shock",
            Endpoint::Battery => "battery",
            Endpoint::Clock => "clock",
            Endpoint::ButtonAssign => "button_assign",
            Endpoint::VibrateCount => "vibrate_count",
            Endpoint::BeepCount => "beep_count",
            Endpoint::ShockCount => "shock_count",
        }
    }

    /// The command slot a stimulus is written to.
    pub const fn command(kind: StimulusKind) -> Self {
        match kind {
            StimulusKind::Vibrate => Endpoint::Vibrate,
            StimulusKind::Beep => Endpoint::Beep,
            StimulusKind::Shock => Endpoint::Shock,
        }
    }

    /// The counter tallying deliveries of a stimulus.
    pub const fn counter(kind: StimulusKind) -> Self {
        match kind {
            StimulusKind::Vibrate => Endpoint::VibrateCount,
            StimulusKind::Beep => Endpoint::BeepCount,
            StimulusKind::Shock => Endpoint::ShockCount,
        }
    }

    /// Attribute value handle as used by gatttool.
    const fn value_handle(self) -> u16 {
        match self {
            Endpoint::Vibrate => 0x0010,
            Endpoint::Beep => 0x0013,
            Endpoint::Shock => 0x0016,
            Endpoint::Battery => 0x006d,
            Endpoint::Clock => 0x001d,
            Endpoint::ButtonAssign => 0x0023,
            Endpoint::ShockCount => 0x003a,
            Endpoint::BeepCount => 0x003e,
            Endpoint::VibrateCount => 0x0042,
        }
    }

    /// Characteristic declaration handle as used by GATT client stacks.
    ///
    /// Mostly one below the value handle, except battery, which sits in a
    /// separate service. The counter handles were never observed on this
    /// scheme and are derived from their value handles.
    const fn characteristic_handle(self) -> u16 {
        match self {
            Endpoint::Vibrate => 15,
            Endpoint::Beep => 18,
            Endpoint::Shock => 21,
            Endpoint::Battery => 106,
            Endpoint::Clock => 28,
            Endpoint::ButtonAssign => 34,
            Endpoint::ShockCount => 0x0039,
            Endpoint::BeepCount => 0x003d,
            Endpoint::VibrateCount => 0x0041,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A name that is not one of the fixed endpoints.
#[derive(PartialEq, Eq, Clone, Copy, Debug, thiserror::Error)]
#[error("unknown endpoint name")]
pub struct UnknownEndpoint;

impl FromStr for Endpoint {
    type Err = UnknownEndpoint;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Endpoint::ALL
            .into_iter()
            .find(|endpoint| endpoint.name() == s)
            .ok_or(UnknownEndpoint)
    }
}

/// The token a transport uses to address an endpoint.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash)]
pub enum EndpointAddress {
    /// A numeric attribute handle.
    Handle(u16),
    /// A stable 128-bit characteristic identifier.
    Identifier(Uuid),
}

impl fmt::Display for EndpointAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EndpointAddress::Handle(handle) => write!(f, "0x{handle:04x}"),
            EndpointAddress::Identifier(uuid) => write!(f, "{uuid}"),
        }
    }
}

/// Immutable mapping from [`Endpoint`] to [`EndpointAddress`].
///
/// The table is total: every endpoint has exactly one address, fixed at
/// construction.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct EndpointTable {
    addresses: [EndpointAddress; 9],
}

impl EndpointTable {
    /// Builds a table by asking `address` for every endpoint once.
    pub fn from_fn<F>(mut address: F) -> Self
    where
        F: FnMut(Endpoint) -> EndpointAddress,
    {
        Self {
            addresses: Endpoint::ALL.map(&mut address),
        }
    }

    /// The attribute value handles (gatttool `char-write-req` / `char-read-hnd`).
    pub fn value_handles() -> Self {
        Self::from_fn(|endpoint| EndpointAddress::Handle(endpoint.value_handle()))
    }

    /// The characteristic declaration handles (bleak-style GATT clients).
    pub fn characteristic_handles() -> Self {
        Self::from_fn(|endpoint| EndpointAddress::Handle(endpoint.characteristic_handle()))
    }

    /// Looks up the address of `endpoint`.
    pub fn resolve(&self, endpoint: Endpoint) -> EndpointAddress {
        self.addresses[endpoint.index()]
    }

    /// Looks up an endpoint by its logical name.
    pub fn resolve_name(&self, name: &str) -> Result<EndpointAddress, UnknownEndpoint> {
        name.parse().map(|endpoint| self.resolve(endpoint))
    }
}

impl Default for EndpointTable {
    fn default() -> Self {
        Self::value_handles()
    }
}
