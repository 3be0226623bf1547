//! Fixed-layout command packets.
//!
//! Packets are built as ASCII text (hex digits, or decimal digits for the
//! clock) and decoded into wire bytes on demand, so a transport can send
//! whichever form it needs.
//!
//! ## Layouts
//!
//! ```text
//! stimulus      8 C 0c LL DD GG     fire vibrate / beep
//! shock         8 C LL              fire shock
//! silent        4 C 0c LL DD GG     store vibrate / beep for the button
//! silent shock  4 C LL              store shock for the button
//! assignment    AA                  button binding code
//! clock         ss mm hh DD 0w MM YY  decimal, not hex
//! ```
//!
//! `C` is the repeat count (one digit), `LL` is `level * 10` as hex, `DD` and
//! `GG` are duration codes from [`crate::duration`].

use core::fmt::{self, Write};

use heapless::{String, Vec};

use crate::clock::ClockValue;
use crate::consts::{
    COUNT_LEVEL_MARKER, FIRE_PREFIX, PACKET_BYTES_LEN, PACKET_TEXT_LEN, SILENT_PREFIX,
};
use crate::params::{StimulusCommand, StimulusKind};

/// Text form of a packet.
pub type PacketText = String<PACKET_TEXT_LEN>;

/// Wire form of a packet.
pub type PacketBytes = Vec<u8, PACKET_BYTES_LEN>;

/// An encoded command, ready to be written to an endpoint.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Packet {
    text: PacketText,
}

impl Packet {
    /// The packet as ASCII digits.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Number of characters in the text form. Always even.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Whether the packet is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Decodes the text form pairwise into wire bytes.
    ///
    /// Clock packets are decimal digits, so each pair becomes one BCD byte.
    pub fn to_bytes(&self) -> Result<PacketBytes, hex::FromHexError> {
        let mut bytes = PacketBytes::new();
        bytes
            .resize_default(self.text.len() / 2)
            .map_err(|_| hex::FromHexError::InvalidStringLength)?;
        hex::decode_to_slice(self.text.as_bytes(), &mut bytes)?;
        Ok(bytes)
    }
}

impl fmt::Display for Packet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

fn render(args: fmt::Arguments<'_>) -> Packet {
    let mut text = PacketText::new();
    // Every layout is at most 14 characters, so this cannot overflow.
    let _ = text.write_fmt(args);
    Packet { text }
}

/// Full-length layout shared by fire and silent vibrate/beep packets.
///
/// Shock commands fall back to the short layout.
fn with_prefix(prefix: char, command: &StimulusCommand) -> Packet {
    let count = command.count().get();
    let level = command.level().wire();
    match command.timing() {
        Some(timing) => render(format_args!(
            "{prefix}{count}{COUNT_LEVEL_MARKER}{level:02x}{:02x}{:02x}",
            timing.duration_on.code(),
            timing.gap.code(),
        )),
        None => render(format_args!("{prefix}{count}{level:02x}")),
    }
}

/// Builds the packet that fires `command` immediately.
///
/// Vibrate and beep use the full layout; shock uses the short one, because the
/// device has no duration or gap for shocks.
pub fn stimulus(command: &StimulusCommand) -> Packet {
    with_prefix(FIRE_PREFIX, command)
}

/// Builds the silent packet that stores `command` for the hardware button.
///
/// For shocks this is the full silent layout with the `0c` marker and the
/// trailing duration and gap removed, since the device's shock slot only takes
/// the short form.
pub fn silent(command: &StimulusCommand) -> Packet {
    with_prefix(SILENT_PREFIX, command)
}

/// Builds the one-byte assignment code that binds the button to `kind`.
pub fn assignment(kind: StimulusKind) -> Packet {
    render(format_args!("{:02x}", kind.assignment_code()))
}

/// Builds the 14-digit decimal clock packet.
///
/// The fifth field is a literal `0` followed by the weekday digit (0 = Sunday).
/// That layout is inferred from device behaviour, not documented.
pub fn clock(value: &ClockValue) -> Packet {
    render(format_args!(
        "{:02}{:02}{:02}{:02}0{}{:02}{:02}",
        value.second(),
        value.minute(),
        value.hour(),
        value.day(),
        value.weekday(),
        value.month(),
        value.year(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::CLOCK_PACKET_LEN;
    use crate::params::{StimulusParams, validate};

    fn command(kind: StimulusKind, params: StimulusParams) -> StimulusCommand {
        validate(kind, &params).unwrap()
    }

    #[test]
    fn test_vibrate_packet() {
        let cmd = command(StimulusKind::Vibrate, StimulusParams::level(5).count(2));
        // "8" + "2" + "0c" + "32" + encode(0.65) + encode(0.65)
        assert_eq!(stimulus(&cmd).as_str(), "820c321818");
    }

    #[test]
    fn test_beep_packet_shares_layout() {
        let cmd = command(
            StimulusKind::Beep,
            StimulusParams::level(10).count(7).duration_on(0.11).gap(10.0),
        );
        assert_eq!(stimulus(&cmd).as_str(), "870c64013d");
    }

    #[test]
    fn test_shock_packet() {
        let cmd = command(StimulusKind::Shock, StimulusParams::level(3));
        assert_eq!(stimulus(&cmd).as_str(), "811e");
    }

    #[test]
    fn test_silent_packet_uses_store_prefix() {
        let cmd = command(StimulusKind::Vibrate, StimulusParams::level(2));
        assert_eq!(silent(&cmd).as_str(), "410c141818");
    }

    #[test]
    fn test_silent_shock_packet_is_short() {
        let shock = command(StimulusKind::Shock, StimulusParams::level(2));
        let vibrate = command(StimulusKind::Vibrate, StimulusParams::level(2));
        let full = silent(&vibrate);
        let stripped = full.as_str().replacen(COUNT_LEVEL_MARKER, "", 1);
        assert_eq!(silent(&shock).as_str(), "4114");
        assert_eq!(silent(&shock).as_str(), &stripped[..stripped.len() - 4]);
    }

    #[test]
    fn test_silent_shock_with_marker_like_duration() {
        // Duration code 0x0c must not be mistaken for the marker.
        let vibrate = command(StimulusKind::Vibrate, StimulusParams::level(4).duration_on(0.255));
        assert_eq!(silent(&vibrate).as_str(), "410c280c18");
        let shock = command(StimulusKind::Shock, StimulusParams::level(4).duration_on(0.255));
        assert_eq!(silent(&shock).as_str(), "4128");
    }

    #[test]
    fn test_assignment_packets() {
        assert_eq!(assignment(StimulusKind::Vibrate).as_str(), "01");
        assert_eq!(assignment(StimulusKind::Beep).as_str(), "02");
        assert_eq!(assignment(StimulusKind::Shock).as_str(), "03");
    }

    #[test]
    fn test_level_field_for_every_level() {
        for level in 0..=10 {
            let cmd = command(StimulusKind::Shock, StimulusParams::level(level));
            let packet = stimulus(&cmd);
            assert_eq!(&packet.as_str()[2..], format!("{:02x}", level * 10));
        }
    }

    #[test]
    fn test_to_bytes() {
        let cmd = command(StimulusKind::Vibrate, StimulusParams::level(5).count(2));
        let bytes = stimulus(&cmd).to_bytes().unwrap();
        assert_eq!(&bytes[..], &[0x82, 0x0c, 0x32, 0x18, 0x18]);
    }

    #[test]
    fn test_clock_packet() {
        // Tuesday 2024-03-05 14:07:09
        let value = ClockValue::new(9, 7, 14, 5, 2, 3, 24).unwrap();
        let packet = clock(&value);
        assert_eq!(packet.as_str(), "09071405020324");
        assert_eq!(packet.len(), CLOCK_PACKET_LEN);
        assert_eq!(&packet.to_bytes().unwrap()[..], &[0x09, 0x07, 0x14, 0x05, 0x02, 0x03, 0x24]);
    }

    #[test]
    fn test_packets_have_even_length() {
        for kind in [StimulusKind::Vibrate, StimulusKind::Beep, StimulusKind::Shock] {
            let cmd = command(kind, StimulusParams::level(7).count(3));
            assert_eq!(stimulus(&cmd).len() % 2, 0);
            assert_eq!(silent(&cmd).len() % 2, 0);
        }
    }
}
