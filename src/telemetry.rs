//! Raw telemetry read back from the device.

use core::fmt;

use heapless::Vec;

use crate::clock::ClockValue;
use crate::consts::TELEMETRY_MAX_LEN;

/// The bytes returned by a single endpoint read.
#[derive(PartialEq, Eq, Clone, Debug, Default)]
pub struct TelemetryReading {
    bytes: Vec<u8, TELEMETRY_MAX_LEN>,
}

impl TelemetryReading {
    /// Wraps raw bytes. Returns `None` if they exceed one attribute payload.
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        Vec::from_slice(bytes).ok().map(|bytes| Self { bytes })
    }

    /// The bytes exactly as read.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Interprets the reading as a base-16 unsigned number, most significant byte first.
    ///
    /// This is the value of the reading's hex text: `[0x01, 0x2c]` reads as `"012c"`,
    /// i.e. 300. Returns `None` for empty readings or readings wider than 32 bits.
    pub fn as_unsigned(&self) -> Option<u32> {
        if self.bytes.is_empty() || self.bytes.len() > 4 {
            return None;
        }
        Some(
            self.bytes
                .iter()
                .fold(0u32, |acc, &byte| (acc << 8) | u32::from(byte)),
        )
    }

    /// Interprets the reading as a device clock value.
    pub fn as_clock(&self) -> Option<ClockValue> {
        ClockValue::from_wire(&self.bytes)
    }
}

impl fmt::Display for TelemetryReading {
    /// Formats the reading as lowercase hex, two digits per byte.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.bytes {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_byte() {
        let reading = TelemetryReading::from_slice(&[0x64]).unwrap();
        assert_eq!(reading.as_unsigned(), Some(100));
        assert_eq!(reading.to_string(), "64");
    }

    #[test]
    fn test_multi_byte_is_big_endian() {
        let reading = TelemetryReading::from_slice(&[0x01, 0x2c]).unwrap();
        assert_eq!(reading.as_unsigned(), Some(300));
    }

    #[test]
    fn test_rejects_empty_and_wide() {
        assert_eq!(TelemetryReading::default().as_unsigned(), None);
        let wide = TelemetryReading::from_slice(&[1, 2, 3, 4, 5]).unwrap();
        assert_eq!(wide.as_unsigned(), None);
    }

    #[test]
    fn test_rejects_oversized_read() {
        assert!(TelemetryReading::from_slice(&[0u8; TELEMETRY_MAX_LEN + 1]).is_none());
    }

    #[test]
    fn test_clock_reading() {
        let reading =
            TelemetryReading::from_slice(&[0x30, 0x45, 0x09, 0x17, 0x04, 0x10, 0x26]).unwrap();
        let clock = reading.as_clock().unwrap();
        assert_eq!(clock.hour(), 9);
        assert_eq!(clock.weekday(), 4);
        assert_eq!(reading.to_string(), "30450917041026");
    }
}
