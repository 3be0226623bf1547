//! Session sharing and shock sequencing helpers.
//!
//! A [`Pavlok`](crate::device::Pavlok) session allows one request at a time.
//! This module offers two ways to live with that outside a single owner:
//!
//! - `global-session` feature: a `critical_section::Mutex` guarded global slot
//!   ([`global_session_init`], [`with_global_session`], `init_pavlok!`,
//!   `setup_pavlok!`) so a main loop and interrupt handlers can share one session
//!   without interleaving write/read pairs.
//! - `delay` feature: blocking helpers ([`shock_train`], [`shock_at`]) that use an
//!   `embedded_hal::delay::DelayNs` to space shocks around the device's
//!   elicitation latency, since shock packets carry no duration or gap.
//!
//! Timing math shared by both lives here:
//!
//! | Helper              | Meaning                                             |
//! |---------------------|-----------------------------------------------------|
//! | [`shock_period_ms`] | write-to-write spacing for back-to-back shocks      |
//! | [`shock_lead_ms`]   | how early to write so a shock lands at a given time |

#[cfg(feature = "delay")]
mod delay;
#[cfg_attr(feature = "delay", allow(unused_imports))]
#[cfg(feature = "delay")]
pub use delay::*;

#[cfg(feature = "global-session")]
mod global;
#[cfg_attr(feature = "global-session", allow(unused_imports))]
#[cfg(feature = "global-session")]
pub use global::*;

#[cfg(feature = "global-session")]
mod macros;

/// Milliseconds between consecutive shock writes.
///
/// Each shock is delivered `latency_ms` after its write; waiting that long plus
/// `gap_ms` before the next write leaves `gap_ms` of quiet after every delivery
/// and never overwrites a shock that has not fired yet.
pub const fn shock_period_ms(latency_ms: u32, gap_ms: u32) -> u32 {
    latency_ms.saturating_add(gap_ms)
}

/// How long to wait before writing a shock that should land `in_ms` from now.
///
/// Returns 0 when `in_ms` is shorter than the latency; the shock then lands late.
pub const fn shock_lead_ms(latency_ms: u32, in_ms: u32) -> u32 {
    in_ms.saturating_sub(latency_ms)
}
