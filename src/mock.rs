//! Expectation-based [`Transport`] mock for unit tests.
//!
//! Built on `embedded_hal_mock`'s generic expectation queue, so tests read
//! like the HAL pin mocks: list the expected transactions up front and call
//! `done()` at the end.

use embedded_hal_mock::common::Generic;

use crate::endpoint::EndpointAddress;
use crate::packet::Packet;
use crate::transport::{ErrorKind, ErrorType, Transport};

/// One expected call on the transport.
#[derive(PartialEq, Eq, Clone, Debug)]
pub(crate) enum Transaction {
    Open,
    Close,
    Write {
        address: EndpointAddress,
        text: String,
        error: Option<ErrorKind>,
    },
    Read {
        address: EndpointAddress,
        response: Vec<u8>,
        error: Option<ErrorKind>,
    },
}

impl Transaction {
    pub(crate) fn write(handle: u16, text: &str) -> Self {
        Self::write_to(EndpointAddress::Handle(handle), text)
    }

    pub(crate) fn write_to(address: EndpointAddress, text: &str) -> Self {
        Transaction::Write {
            address,
            text: String::from(text),
            error: None,
        }
    }

    pub(crate) fn read(handle: u16, response: &[u8]) -> Self {
        Self::read_from(EndpointAddress::Handle(handle), response)
    }

    pub(crate) fn read_from(address: EndpointAddress, response: &[u8]) -> Self {
        Transaction::Read {
            address,
            response: Vec::from(response),
            error: None,
        }
    }

    pub(crate) fn with_error(mut self, kind: ErrorKind) -> Self {
        match &mut self {
            Transaction::Write { error, .. } | Transaction::Read { error, .. } => {
                *error = Some(kind)
            }
            Transaction::Open | Transaction::Close => panic!("open/close cannot fail in the mock"),
        }
        self
    }
}

pub(crate) type MockTransport = Generic<Transaction>;

impl ErrorType for MockTransport {
    type Error = ErrorKind;
}

impl Transport for MockTransport {
    fn open(&mut self) -> Result<(), ErrorKind> {
        assert_eq!(self.next(), Some(Transaction::Open));
        Ok(())
    }

    fn close(&mut self) -> Result<(), ErrorKind> {
        assert_eq!(self.next(), Some(Transaction::Close));
        Ok(())
    }

    fn write(&mut self, address: &EndpointAddress, packet: &Packet) -> Result<(), ErrorKind> {
        match self.next() {
            Some(Transaction::Write {
                address: expected,
                text,
                error,
            }) => {
                assert_eq!(*address, expected, "write to wrong endpoint");
                assert_eq!(packet.as_str(), text, "wrong packet");
                error.map_or(Ok(()), Err)
            }
            other => panic!("unexpected write of {packet} to {address}, expected {other:?}"),
        }
    }

    fn read(&mut self, address: &EndpointAddress, buf: &mut [u8]) -> Result<usize, ErrorKind> {
        match self.next() {
            Some(Transaction::Read {
                address: expected,
                response,
                error,
            }) => {
                assert_eq!(*address, expected, "read from wrong endpoint");
                if let Some(kind) = error {
                    return Err(kind);
                }
                buf[..response.len()].copy_from_slice(&response);
                Ok(response.len())
            }
            other => panic!("unexpected read from {address}, expected {other:?}"),
        }
    }
}
