//! Wire format for the 1-byte CRTP header.
//!
//! Every frame starts with a single header byte routing the packet on the
//! vehicle:
//! ```text
//! ┌──────────┬──────────┬──────────┐
//! │ Port     │ Reserved │ Channel  │
//! │ bits 7-4 │ bits 3-2 │ bits 1-0 │
//! └──────────┴──────────┴──────────┘
//! ```
//!
//! The bit positions are a protocol constant shared with the vehicle
//! firmware; they live here as named constants rather than inline shifts.
//! All multi-byte payload fields elsewhere in the crate are Little Endian.

use crate::error::{CrtpError, Result};

/// Header size in bytes (fixed, exactly 1).
pub const HEADER_SIZE: usize = 1;

/// Bit offset of the port nibble within the header byte.
pub const PORT_SHIFT: u32 = 4;

/// Mask for the port value before shifting (4 bits, 0-15).
pub const PORT_MASK: u8 = 0x0F;

/// Mask for the channel value (2 bits, 0-3).
pub const CHANNEL_MASK: u8 = 0x03;

/// Destination subsystem on the vehicle, embedded in the header's high nibble.
///
/// This is a closed enumeration: the firmware routes on these numbers, so an
/// unknown value is a protocol error, not an extension point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Port {
    /// Legacy fixed-layout attitude setpoint stream.
    Commander = 0x03,
    /// Tagged, extensible command family (hover, velocity, ...).
    CommanderGeneric = 0x07,
}

impl Port {
    /// Numeric port value as routed by the firmware (fits in 4 bits).
    #[inline]
    pub fn number(self) -> u8 {
        self as u8
    }

    /// Look up a port by its numeric value.
    ///
    /// Returns [`CrtpError::InvalidPort`] for values outside the enumeration.
    pub fn from_number(value: u8) -> Result<Self> {
        match value {
            0x03 => Ok(Port::Commander),
            0x07 => Ok(Port::CommanderGeneric),
            other => Err(CrtpError::InvalidPort(other)),
        }
    }
}

/// Sub-stream selector within a port, embedded in the header's low two bits.
///
/// Validated at construction; a `Channel` value is always in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Channel(u8);

impl Channel {
    /// Channel 0.
    pub const CH0: Channel = Channel(0);
    /// Channel 1.
    pub const CH1: Channel = Channel(1);
    /// Channel 2.
    pub const CH2: Channel = Channel(2);
    /// Channel 3.
    pub const CH3: Channel = Channel(3);

    /// Create a channel, rejecting values that do not fit the 2-bit field.
    pub fn new(value: u8) -> Result<Self> {
        if value > CHANNEL_MASK {
            return Err(CrtpError::InvalidChannel(value));
        }
        Ok(Channel(value))
    }

    /// Numeric channel value (0-3).
    #[inline]
    pub fn value(self) -> u8 {
        self.0
    }
}

/// Decoded CRTP header: destination port plus channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Destination subsystem.
    pub port: Port,
    /// Sub-stream within the port.
    pub channel: Channel,
}

impl Header {
    /// Create a new header.
    pub fn new(port: Port, channel: Channel) -> Self {
        Self { port, channel }
    }

    /// Encode the header to its single wire byte.
    ///
    /// # Example
    ///
    /// ```
    /// use crtp_link::protocol::{Channel, Header, Port};
    ///
    /// let header = Header::new(Port::Commander, Channel::new(0).unwrap());
    /// assert_eq!(header.encode(), 0x30);
    /// ```
    #[inline]
    pub fn encode(&self) -> u8 {
        ((self.port.number() & PORT_MASK) << PORT_SHIFT) | (self.channel.value() & CHANNEL_MASK)
    }

    /// Decode a header from its wire byte.
    ///
    /// Inbound telemetry handling is not implemented; this is the symmetric
    /// seam a decoder would build on. Fails with [`CrtpError::InvalidPort`]
    /// if the port nibble is not a known port.
    pub fn decode(byte: u8) -> Result<Self> {
        let port = Port::from_number((byte >> PORT_SHIFT) & PORT_MASK)?;
        // Channel bits cannot be out of range after masking.
        let channel = Channel::new(byte & CHANNEL_MASK)?;
        Ok(Self { port, channel })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_numbers_fit_header_nibble() {
        assert_eq!(Port::Commander.number(), 0x03);
        assert_eq!(Port::CommanderGeneric.number(), 0x07);
        assert!(Port::Commander.number() <= PORT_MASK);
        assert!(Port::CommanderGeneric.number() <= PORT_MASK);
    }

    #[test]
    fn test_port_from_number_roundtrip() {
        for port in [Port::Commander, Port::CommanderGeneric] {
            assert_eq!(Port::from_number(port.number()).unwrap(), port);
        }
    }

    #[test]
    fn test_port_from_number_rejects_unknown() {
        let err = Port::from_number(0x0C).unwrap_err();
        assert!(matches!(err, CrtpError::InvalidPort(0x0C)));
    }

    #[test]
    fn test_channel_accepts_0_through_3() {
        for v in 0..=3 {
            assert_eq!(Channel::new(v).unwrap().value(), v);
        }
    }

    #[test]
    fn test_channel_rejects_out_of_range() {
        for v in [4u8, 5, 255] {
            assert!(matches!(
                Channel::new(v).unwrap_err(),
                CrtpError::InvalidChannel(_)
            ));
        }
    }

    #[test]
    fn test_header_bit_layout() {
        // Port in high nibble, channel in low two bits.
        let header = Header::new(Port::CommanderGeneric, Channel::new(1).unwrap());
        assert_eq!(header.encode(), 0x71);

        let header = Header::new(Port::Commander, Channel::new(0).unwrap());
        assert_eq!(header.encode(), 0x30);
    }

    #[test]
    fn test_header_encode_decode_roundtrip() {
        for port in [Port::Commander, Port::CommanderGeneric] {
            for ch in 0..=3 {
                let header = Header::new(port, Channel::new(ch).unwrap());
                let decoded = Header::decode(header.encode()).unwrap();
                assert_eq!(decoded, header);
            }
        }
    }

    #[test]
    fn test_header_decode_unknown_port() {
        // Port nibble 0x0 is not a defined port.
        assert!(Header::decode(0x01).is_err());
    }

    #[test]
    fn test_header_size_is_exactly_1() {
        assert_eq!(HEADER_SIZE, 1);
    }
}
