//! Non-linear duration encoding for stimulus on-times and gaps.
//!
//! The device stores each duration as a single byte `c`, where the
//! represented time grows exponentially with `c`:
//!
//! ```text
//! seconds = 0.104 * e^(0.075 * c)
//! c       = round(ln(seconds / 0.104) / 0.075)
//! ```
//!
//! The mapping is monotonic but **not** proportional: doubling a duration adds
//! roughly nine codes regardless of where you start. Over the accepted range of
//! 0.11 s to 10 s the codes span `0x01..=0x3d`.
//!
//! ## Functions
//!
//! - [`encode`]: Seconds to a duration code
//! - [`decode`]: Duration code back to seconds (the formal inverse)
//!
//! ## Limitations
//!
//! - `encode` only accepts strictly positive, finite inputs whose code fits in a byte;
//!   anything else returns `None`. Validated [`Interval`](crate::params::Interval)s
//!   always satisfy this.
//! - `decode(encode(s))` is only equal to `s` up to the rounding step (~3.8%).
//!   Re-encoding a decoded value always reproduces the same code.

use libm::{exp, log, round};

use crate::consts::{DURATION_BASE_SECONDS, DURATION_LOG_STEP};

/// Unrounded code for `seconds`.
fn steps(seconds: f64) -> f64 {
    log(seconds / DURATION_BASE_SECONDS) / DURATION_LOG_STEP
}

/// Encodes a duration in seconds into the device's one-byte duration code.
///
/// Returns `None` when `seconds` is not strictly positive and finite, or when the
/// resulting code falls outside `0..=255`.
pub fn encode(seconds: f64) -> Option<u8> {
    if !seconds.is_finite() || seconds <= 0.0 {
        return None;
    }
    let code = round(steps(seconds));
    if (0.0..=f64::from(u8::MAX)).contains(&code) {
        Some(code as u8)
    } else {
        None
    }
}

/// Decodes a one-byte duration code back into seconds.
pub fn decode(code: u8) -> f64 {
    DURATION_BASE_SECONDS * exp(f64::from(code) * DURATION_LOG_STEP)
}
