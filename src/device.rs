//! Command facade for a single Pavlok 2 session.
//!
//! This module provides the [`Pavlok`] struct, which owns a [`Transport`] and
//! turns high-level intents ("vibrate at level 6 for 0.65 s, twice") into
//! packet writes, and endpoint reads into numbers.
//!
//! Every operation follows the same pipeline:
//!
//! ```text
//! validate -> encode packet -> resolve endpoint -> transport write/read
//! ```
//!
//! Validation happens first and rejects bad input before any I/O.
//!
//! ## Example
//!
//! ```rust,ignore
//! use pavlok::device::Pavlok;
//! use pavlok::endpoint::EndpointTable;
//! use pavlok::params::StimulusParams;
//!
//! let mut pavlok = Pavlok::new(link, EndpointTable::value_handles(), Default::default());
//! pavlok.start()?;
//! pavlok.vibrate(StimulusParams::level(6).count(2))?;
//! let battery = pavlok.read_battery()?;
//! pavlok.stop()?;
//! ```
//!
//! ## Design Notes
//!
//! The facade is synchronous and holds no state between calls beyond its
//! lifecycle mode and counters. Exclusive `&mut self` access keeps one request
//! in flight per session; to share a session between contexts see
//! [`crate::session`].

use nb::block;

use crate::clock::{ClockValue, WallClock};
use crate::config::Config;
use crate::consts::TELEMETRY_MAX_LEN;
use crate::endpoint::{Endpoint, EndpointTable};
use crate::error::Error;
use crate::packet::{self, Packet};
use crate::params::{ParameterError, StimulusKind, StimulusParams, validate};
use crate::telemetry::TelemetryReading;
use crate::transport::{self, Transport};

/// Lifecycle state of a [`Pavlok`] session.
#[derive(PartialEq, Eq, Clone, Copy, Default, Debug)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum SessionMode {
    /// Constructed but not started. No I/O is allowed.
    #[default]
    Idle,
    /// The transport is open and commands may be issued.
    Active,
    /// The session was stopped. It can be started again.
    Closed,
}

/// An owned session with one device.
///
/// ## Type Parameters
///
/// - `T`: The link to the device, implementing [`Transport`]
///
/// ## Notes
///
/// - The endpoint table and configuration are fixed for the lifetime of the session.
/// - Transport errors are returned unchanged and never retried.
#[derive(Debug)]
pub struct Pavlok<T>
where
    T: Transport,
{
    /// The current lifecycle state
    pub mode: SessionMode,
    transport: T,
    endpoints: EndpointTable,
    config: Config,

    /// Counter of acknowledged writes.
    pub writes: u32,

    /// Counter of successful reads.
    pub reads: u32,
}

type Result<R, T> = core::result::Result<R, Error<<T as transport::ErrorType>::Error>>;

impl<T> Pavlok<T>
where
    T: Transport,
{
    /// Creates a session over `transport`.
    ///
    /// # Arguments
    /// - `transport`: The link to the device.
    /// - `endpoints`: Addresses for the scheme `transport` uses.
    /// - `config`: Session settings.
    ///
    /// # Returns
    /// A session in [`SessionMode::Idle`]; call [`start`](Pavlok::start) before issuing commands.
    pub fn new(transport: T, endpoints: EndpointTable, config: Config) -> Self {
        Self {
            mode: SessionMode::Idle,
            transport,
            endpoints,
            config,
            writes: 0,
            reads: 0,
        }
    }

    /// Opens the transport and activates the session. Does nothing if already active.
    pub fn start(&mut self) -> Result<(), T> {
        if self.mode != SessionMode::Active {
            self.transport.open().map_err(Error::Transport)?;
            self.mode = SessionMode::Active;
            debug!("session started");
        }
        Ok(())
    }

    /// Closes the transport. Does nothing if the session is not active.
    pub fn stop(&mut self) -> Result<(), T> {
        if self.mode == SessionMode::Active {
            self.mode = SessionMode::Closed;
            self.transport.close().map_err(Error::Transport)?;
            debug!("session stopped");
        }
        Ok(())
    }

    /// Ends the session and hands the transport back without closing it.
    pub fn release(self) -> T {
        self.transport
    }

    /// The endpoint table this session resolves addresses with.
    pub fn endpoints(&self) -> &EndpointTable {
        &self.endpoints
    }

    /// The session configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Vibrates with the given parameters.
    ///
    /// # Errors
    /// [`Error::InvalidParameter`] if any parameter is out of range; nothing is written.
    pub fn vibrate(&mut self, params: StimulusParams) -> Result<(), T> {
        self.stimulate(StimulusKind::Vibrate, &params)
    }

    /// Beeps with the given parameters.
    ///
    /// # Errors
    /// [`Error::InvalidParameter`] if any parameter is out of range; nothing is written.
    pub fn beep(&mut self, params: StimulusParams) -> Result<(), T> {
        self.stimulate(StimulusKind::Beep, &params)
    }

    /// Shocks at `level`, `count` times.
    ///
    /// The device delivers the shock roughly 0.7 s after the write is
    /// acknowledged, and the packet has no duration or gap. Callers sequencing
    /// repeated shocks must space the calls themselves; see
    /// [`Config::shock_latency_ms`] and the `delay` helpers in [`crate::session`].
    pub fn shock(&mut self, level: i32, count: i32) -> Result<(), T> {
        self.stimulate(StimulusKind::Shock, &StimulusParams::level(level).count(count))
    }

    fn stimulate(&mut self, kind: StimulusKind, params: &StimulusParams) -> Result<(), T> {
        let command = validate(kind, params)?;
        self.ensure_active()?;
        self.write(Endpoint::command(kind), &packet::stimulus(&command))
            .map_err(Error::Transport)
    }

    /// Binds the hardware button to `target` with the given parameters.
    ///
    /// Two writes are issued: the silent packet to `target`'s command endpoint,
    /// then the assignment code to the button-assignment endpoint. They are not
    /// atomic. If the second fails the stimulus slot is already updated but the
    /// button is not rebound, reported as [`Error::ButtonNotBound`].
    ///
    /// # Errors
    /// - [`ParameterError::UnsupportedAssignment`] for shock targets unless
    ///   [`Config::shock_assignment`] is set.
    /// - [`Error::Transport`] if the silent packet write fails (nothing changed).
    /// - [`Error::ButtonNotBound`] if the assignment write fails.
    pub fn assign_button(&mut self, target: StimulusKind, params: StimulusParams) -> Result<(), T> {
        if target == StimulusKind::Shock && !self.config.shock_assignment {
            return Err(ParameterError::UnsupportedAssignment(target).into());
        }
        let command = validate(target, &params)?;
        self.ensure_active()?;
        self.write(Endpoint::command(target), &packet::silent(&command))
            .map_err(Error::Transport)?;
        self.write(Endpoint::ButtonAssign, &packet::assignment(target))
            .map_err(|e| {
                warn!("button assignment to {} failed after silent packet was stored", target);
                Error::ButtonNotBound(e)
            })
    }

    /// Sets the device clock from `clock` and returns the device's read-back.
    ///
    /// The hour is shifted by `utc_offset_hours`, and by one more hour back when
    /// `dst` is set. The date rolls over when the shift crosses midnight.
    ///
    /// The read-back is returned verbatim; use [`TelemetryReading::as_clock`] to decode it.
    pub fn sync_clock<C>(&mut self, clock: &C, utc_offset_hours: i8, dst: bool) -> Result<TelemetryReading, T>
    where
        C: WallClock + ?Sized,
    {
        let shift = i32::from(utc_offset_hours) - i32::from(dst);
        let value = ClockValue::try_from(clock.now())?.shift_hours(shift)?;
        self.ensure_active()?;
        self.write(Endpoint::Clock, &packet::clock(&value))
            .map_err(Error::Transport)?;
        self.read(Endpoint::Clock)
    }

    /// Reads the device clock verbatim.
    pub fn read_clock(&mut self) -> Result<TelemetryReading, T> {
        self.ensure_active()?;
        self.read(Endpoint::Clock)
    }

    /// Reads the battery level as a percentage.
    ///
    /// # Errors
    /// [`Error::MalformedTelemetry`] if the reading is empty, wider than four
    /// bytes, or above 100. Out-of-range values are rejected rather than
    /// passed on, so a returned level is always a valid percentage.
    pub fn read_battery(&mut self) -> Result<u8, T> {
        self.ensure_active()?;
        self.read(Endpoint::Battery)?
            .as_unsigned()
            .and_then(|level| u8::try_from(level).ok())
            .filter(|percent| *percent <= 100)
            .ok_or(Error::MalformedTelemetry)
    }

    /// Reads how many stimuli of `kind` the device has delivered.
    pub fn read_counts(&mut self, kind: StimulusKind) -> Result<u32, T> {
        self.ensure_active()?;
        self.read(Endpoint::counter(kind))?
            .as_unsigned()
            .ok_or(Error::MalformedTelemetry)
    }

    fn ensure_active(&self) -> Result<(), T> {
        if self.mode == SessionMode::Active {
            Ok(())
        } else {
            Err(Error::NotStarted)
        }
    }

    fn write(&mut self, endpoint: Endpoint, packet: &Packet) -> core::result::Result<(), T::Error> {
        let address = self.endpoints.resolve(endpoint);
        debug!("write {} ({}) <- {}", endpoint, address, packet);
        block!(self.transport.poll_idle())?;
        self.transport.write(&address, packet).inspect_err(|e| {
            warn!("write to {} failed: {:?}", endpoint, e);
        })?;
        self.writes = self.writes.wrapping_add(1);
        Ok(())
    }

    fn read(&mut self, endpoint: Endpoint) -> Result<TelemetryReading, T> {
        let address = self.endpoints.resolve(endpoint);
        let mut buf = [0u8; TELEMETRY_MAX_LEN];
        block!(self.transport.poll_idle()).map_err(Error::Transport)?;
        let len = self
            .transport
            .read(&address, &mut buf)
            .map_err(|e| {
                warn!("read from {} failed: {:?}", endpoint, e);
                Error::Transport(e)
            })?;
        let reading = buf
            .get(..len)
            .and_then(TelemetryReading::from_slice)
            .ok_or(Error::MalformedTelemetry)?;
        self.reads = self.reads.wrapping_add(1);
        trace!("read {} ({}) -> {}", endpoint, address, reading);
        Ok(reading)
    }
}
