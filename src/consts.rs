//! Constants used across the Pavlok 2 protocol implementation.
//!
//! This module defines the packet markers, parameter bounds, duration
//! transform coefficients, and buffer capacities shared by the codec,
//! the validator, and the command facade.
//!
//! ## Key Concepts
//!
//! - **Prefixes**: The first hex digit of a stimulus packet selects between
//!   firing the stimulus (`8`) and silently storing it (`4`).
//! - **Marker**: A fixed `0c` digit pair separates the count from the level
//!   in full-length stimulus packets.
//! - **Bounds**: Values outside these ranges make the device behave
//!   unpredictably and are rejected before encoding.
//! - **Capacities**: Derived from the longest packet (the clock packet) and the
//!   payload of a single ATT read.

/// Leading digit of a packet that fires the stimulus immediately.
pub const FIRE_PREFIX: char = '8';

/// Leading digit of a silent packet: store the stimulus, do not fire it.
pub const SILENT_PREFIX: char = '4';

/// Fixed marker separating the count digit from the level field.
pub const COUNT_LEVEL_MARKER: &str = "0c";

/// Highest accepted stimulus level.
pub const LEVEL_MAX: i32 = 10;

/// The level is scaled by this factor before it is written as a hex byte.
pub const LEVEL_SCALE: u8 = 10;

/// Highest accepted repeat count (one hex digit on the wire).
pub const COUNT_MAX: i32 = 7;

/// Shortest accepted on-duration or gap, in seconds.
///
/// Below this the duration transform yields code `0`, which the device does
/// not honour.
pub const INTERVAL_MIN_SECONDS: f64 = 0.11;

/// Longest accepted on-duration or gap, in seconds.
pub const INTERVAL_MAX_SECONDS: f64 = 10.0;

/// Duration (in seconds) that encodes to code `0`.
pub const DURATION_BASE_SECONDS: f64 = 0.104;

/// Logarithmic step between consecutive duration codes.
pub const DURATION_LOG_STEP: f64 = 0.075;

/// Default repeat count for stimulus commands.
pub const DEFAULT_COUNT: i32 = 1;

/// Default on-duration and gap, in seconds.
pub const DEFAULT_INTERVAL_SECONDS: f64 = 0.65;

/// Observed delay between a shock write and the shock being elicited.
pub const SHOCK_LATENCY_MS: u32 = 700;

/// Capacity (in characters) of packet text. The clock packet is the longest at 14.
pub const PACKET_TEXT_LEN: usize = 16;

/// Capacity (in bytes) of a decoded packet.
pub const PACKET_BYTES_LEN: usize = PACKET_TEXT_LEN / 2;

/// Length (in characters) of the clock packet: seven two-digit decimal fields.
pub const CLOCK_PACKET_LEN: usize = 14;

/// Maximum size (in bytes) of a single telemetry read.
///
/// This is the attribute payload of the default 23 byte ATT MTU.
pub const TELEMETRY_MAX_LEN: usize = 20;
