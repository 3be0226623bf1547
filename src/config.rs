//! Session configuration.

use crate::consts::SHOCK_LATENCY_MS;

/// Settings fixed for the lifetime of a [`Pavlok`](crate::device::Pavlok) session.
///
/// ```rust
/// use pavlok::config::Config;
///
/// let config = Config::default().with_shock_assignment(true);
/// assert!(config.shock_assignment);
/// ```
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct Config {
    /// Whether the hardware button may be bound to the shock stimulus.
    ///
    /// Off by default: firmware that does not accept the short silent shock
    /// packet leaves the button in an undefined state.
    pub shock_assignment: bool,
    /// Delay between writing a shock and the shock being delivered, in milliseconds.
    pub shock_latency_ms: u32,
}

impl Config {
    /// Allows or forbids binding the button to shocks.
    pub const fn with_shock_assignment(mut self, allowed: bool) -> Self {
        self.shock_assignment = allowed;
        self
    }

    /// Overrides the shock elicitation latency.
    pub const fn with_shock_latency_ms(mut self, latency_ms: u32) -> Self {
        self.shock_latency_ms = latency_ms;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            shock_assignment: false,
            shock_latency_ms: SHOCK_LATENCY_MS,
        }
    }
}
