//! The link-layer boundary.
//!
//! This crate never talks to a radio itself. Whatever owns the BLE connection
//! (a host GATT client, a gatttool subprocess, an on-device stack) implements
//! [`Transport`], and the [`Pavlok`](crate::device::Pavlok) facade drives it.
//!
//! The traits mirror `embedded-hal`'s layout: an [`ErrorType`] carrying the
//! implementation's error, and an [`Error`] trait that maps it onto a small,
//! portable [`ErrorKind`].

use crate::endpoint::EndpointAddress;
use crate::packet::Packet;

/// Portable classification of transport failures.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
#[non_exhaustive]
pub enum ErrorKind {
    /// The device did not answer within the link's timeout.
    Timeout,
    /// The request was rejected or the link failed.
    Failure,
    /// Anything the implementation cannot classify.
    Other,
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            ErrorKind::Timeout => "timed out",
            ErrorKind::Failure => "link failure",
            ErrorKind::Other => "unclassified transport error",
        })
    }
}

/// A transport error.
pub trait Error: core::fmt::Debug {
    /// Classifies the error.
    fn kind(&self) -> ErrorKind;
}

impl Error for core::convert::Infallible {
    fn kind(&self) -> ErrorKind {
        match *self {}
    }
}

impl Error for ErrorKind {
    fn kind(&self) -> ErrorKind {
        *self
    }
}

/// Associates an error type with a transport.
pub trait ErrorType {
    /// Error returned by every transport operation.
    type Error: Error;
}

impl<T: ErrorType + ?Sized> ErrorType for &mut T {
    type Error = T::Error;
}

/// Request/response access to one connected device.
///
/// Implementations must not let two requests overlap on the link. The facade
/// calls [`poll_idle`](Transport::poll_idle) before every request and only
/// proceeds once it reports `Ok`.
pub trait Transport: ErrorType {
    /// Brings the link up. Called once by [`Pavlok::start`](crate::device::Pavlok::start).
    fn open(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Tears the link down. Called once by [`Pavlok::stop`](crate::device::Pavlok::stop).
    fn close(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Reports `WouldBlock` while the response to a previous request is still pending.
    fn poll_idle(&mut self) -> nb::Result<(), Self::Error> {
        Ok(())
    }

    /// Writes `packet` to the endpoint at `address` and waits for the acknowledgement.
    ///
    /// Text-based links send [`Packet::as_str`]; byte-based links send
    /// [`Packet::to_bytes`].
    fn write(&mut self, address: &EndpointAddress, packet: &Packet) -> Result<(), Self::Error>;

    /// Reads the endpoint at `address` into `buf`, returning the number of bytes read.
    ///
    /// `buf` receives raw bytes. Text-based links that get the value back as
    /// hex digits (gatttool's `char-read-hnd`, say) must decode it first, for
    /// example with `hex::decode_to_slice`.
    fn read(&mut self, address: &EndpointAddress, buf: &mut [u8]) -> Result<usize, Self::Error>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn open(&mut self) -> Result<(), Self::Error> {
        T::open(self)
    }

    fn close(&mut self) -> Result<(), Self::Error> {
        T::close(self)
    }

    fn poll_idle(&mut self) -> nb::Result<(), Self::Error> {
        T::poll_idle(self)
    }

    fn write(&mut self, address: &EndpointAddress, packet: &Packet) -> Result<(), Self::Error> {
        T::write(self, address, packet)
    }

    fn read(&mut self, address: &EndpointAddress, buf: &mut [u8]) -> Result<usize, Self::Error> {
        T::read(self, address, buf)
    }
}
