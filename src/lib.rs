//! # pavlok
//!
//! A portable, no_std Rust command and telemetry codec for the Pavlok 2 wearable
//! stimulus device, talking over Bluetooth Low Energy.
//!
//! This crate turns intents like "vibrate at level 6 for 0.65 s, twice" into the
//! device's fixed-layout command packets, writes them to the right GATT endpoint,
//! and decodes battery, counter and clock reads. It uses:
//! - a range-checking validator that runs before any encoding
//! - the device's logarithmic duration code ([`duration`])
//! - a closed endpoint table supporting both handle and UUID addressing
//! - an `embedded-hal` style [`transport::Transport`] trait as the only I/O boundary
//!
//! ## Crate features
//! | Feature                    | Description |
//! |----------------------------|-------------|
//! | `std`                      | Disables `#![no_std]` support and enables reading the local clock |
//! | `delay`                    | Shock sequencing helpers over `embedded_hal::delay::DelayNs` |
//! | `global-session` (default) | Shares one session through `critical_section::with` |
//! | `defmt-0-3`                | Derives `defmt::Format` on the public enums |
//! | `log`                      | Uses `log` logging |
//!
//! ## Packet Features
//!
//! - **Vibrate and beep** with level, repeat count, on-duration and gap
//! - **Shock** with level and repeat count
//! - **Button assignment** through silent (store, don't fire) packets
//! - **Clock sync** with UTC offset and daylight-saving correction
//! - **Telemetry**: battery percentage and per-stimulus delivery counters
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pavlok::device::Pavlok;
//! use pavlok::endpoint::EndpointTable;
//! use pavlok::params::{StimulusKind, StimulusParams};
//!
//! let mut pavlok = Pavlok::new(link, EndpointTable::value_handles(), Default::default());
//! pavlok.start()?;
//! pavlok.vibrate(StimulusParams::level(6).count(2))?;
//! pavlok.assign_button(StimulusKind::Beep, StimulusParams::level(3))?;
//! let percent = pavlok.read_battery()?;
//! ```
//!
//! Packets can also be built without a session:
//!
//! ```rust
//! use pavlok::packet;
//! use pavlok::params::{StimulusKind, StimulusParams, validate};
//!
//! let command = validate(StimulusKind::Vibrate, &StimulusParams::level(5).count(2)).unwrap();
//! assert_eq!(packet::stimulus(&command).as_str(), "820c321818");
//! ```
//!
//! ## Integration Notes
//!
//! - Only one request may be outstanding per session; the facade waits on
//!   [`transport::Transport::poll_idle`] before each one
//! - Shocks land about 0.7 s after the write; see [`session`] for spacing helpers
//! - Transport errors are surfaced unchanged and never retried
//!
//! --
//! Designed for `#![no_std]` use on BLE central firmware as well as host tools.

#![deny(
    bad_style,
    dead_code,
    improper_ctypes,
    non_shorthand_field_patterns,
    no_mangle_generic_items,
    overflowing_literals,
    path_statements,
    patterns_in_fns_without_body,
    unconditional_recursion,
    unused,
    while_true,
    missing_debug_implementations,
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces,
    unused_qualifications,
    unused_results
)]
#![cfg_attr(not(feature = "std"), no_std)]

#[macro_use]
mod fmt;

#[cfg(feature = "global-session")]
pub use critical_section;

pub use heapless;

pub mod clock;
pub mod config;
pub mod consts;
pub mod device;
pub mod duration;
pub mod endpoint;
pub mod error;
#[cfg(test)]
pub(crate) mod mock;
pub mod packet;
pub mod params;
pub mod session;
pub mod telemetry;
pub mod transport;
