//! Frame assembly: header byte plus serialized payload.
//!
//! The framer is the one place a typed command becomes transport bytes. It is
//! pure and allocation-local: each call produces its own buffer, so frames
//! may be built concurrently without synchronization.

use bytes::{BufMut, Bytes, BytesMut};

use crate::commands::Command;
use crate::error::{CrtpError, Result};
use crate::protocol::{Header, HEADER_SIZE};

/// A complete frame: header identity plus serialized payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Header identity.
    pub header: Header,
    /// Serialized payload bytes (zero-copy via `bytes::Bytes`).
    pub payload: Bytes,
}

impl Frame {
    /// Serialize a command into a frame.
    ///
    /// The payload is bounded by the command's declared length; a variant
    /// that writes more or fewer bytes than it declares is an internal
    /// defect surfaced as [`CrtpError::FrameLengthMismatch`] rather than a
    /// corrupt frame on the wire.
    pub fn from_command(command: &Command) -> Result<Self> {
        let declared = command.payload_len();
        let mut buf = BytesMut::with_capacity(declared);
        command.write_payload(&mut buf);

        if buf.len() != declared {
            return Err(CrtpError::FrameLengthMismatch {
                declared,
                written: buf.len(),
            });
        }

        Ok(Self {
            header: command.header(),
            payload: buf.freeze(),
        })
    }

    /// Get a reference to the payload bytes.
    #[inline]
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Get the payload length.
    #[inline]
    pub fn payload_len(&self) -> usize {
        self.payload.len()
    }

    /// The encoded header byte.
    #[inline]
    pub fn header_byte(&self) -> u8 {
        self.header.encode()
    }

    /// Total wire size: header plus payload.
    #[inline]
    pub fn size(&self) -> usize {
        HEADER_SIZE + self.payload.len()
    }

    /// Encode the complete frame as a contiguous byte sequence.
    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(self.size());
        buf.put_u8(self.header_byte());
        buf.extend_from_slice(&self.payload);
        buf.freeze()
    }
}

/// Serialize a command straight to transmittable bytes.
///
/// Output length is always exactly `1 + command.payload_len()`.
///
/// # Example
///
/// ```
/// use crtp_link::commands::HoverCommand;
/// use crtp_link::protocol::encode_command;
///
/// let cmd = HoverCommand::new(1.0, 2.0, 3.0, 4.0).unwrap();
/// let bytes = encode_command(&cmd.into()).unwrap();
/// assert_eq!(bytes.len(), 18);
/// assert_eq!(bytes[0], 0x71); // port 7, channel 1
/// assert_eq!(bytes[1], 5); // hover type tag
/// ```
pub fn encode_command(command: &Command) -> Result<Bytes> {
    Ok(Frame::from_command(command)?.encode())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{AttitudeCommand, HoverCommand};

    #[test]
    fn test_frame_length_is_header_plus_payload() {
        let commands: [Command; 2] = [
            AttitudeCommand::new(0.0, 1.0, 0.0, 14000.0).unwrap().into(),
            HoverCommand::new(1.0, 2.0, 3.0, 4.0).unwrap().into(),
        ];
        for command in commands {
            let bytes = encode_command(&command).unwrap();
            assert_eq!(bytes.len(), 1 + command.payload_len());
        }
    }

    #[test]
    fn test_attitude_frame_bytes() {
        let cmd = AttitudeCommand::new(0.0, 1.0, 0.0, 14000.0).unwrap();
        let bytes = encode_command(&cmd.into()).unwrap();

        assert_eq!(bytes.len(), 15);
        // Port 3 in the high nibble, channel 0 in the low bits.
        assert_eq!(bytes[0], 0x30);
        assert_eq!(&bytes[1..5], &0.0f32.to_le_bytes());
        assert_eq!(&bytes[5..9], &1.0f32.to_le_bytes());
        assert_eq!(&bytes[9..13], &0.0f32.to_le_bytes());
        assert_eq!(&bytes[13..15], &14000u16.to_le_bytes());
    }

    #[test]
    fn test_hover_frame_bytes() {
        let cmd = HoverCommand::new(1.0, 2.0, 3.0, 4.0).unwrap();
        let bytes = encode_command(&cmd.into()).unwrap();

        assert_eq!(bytes.len(), 18);
        // Port 7 in the high nibble, channel 1 in the low bits.
        assert_eq!(bytes[0], 0x71);
        assert_eq!(bytes[1], 5);
    }

    #[test]
    fn test_framing_is_deterministic() {
        let command: Command = AttitudeCommand::new(0.25, -0.25, 3.5, 12345.0)
            .unwrap()
            .into();
        assert_eq!(
            encode_command(&command).unwrap(),
            encode_command(&command).unwrap()
        );
    }

    #[test]
    fn test_value_equality_implies_frame_equality() {
        let a: Command = HoverCommand::new(0.1, 0.2, 0.3, 0.4).unwrap().into();
        let b: Command = HoverCommand::new(0.1, 0.2, 0.3, 0.4).unwrap().into();
        assert_eq!(a, b);
        assert_eq!(encode_command(&a).unwrap(), encode_command(&b).unwrap());
    }

    #[test]
    fn test_float_fields_decode_back() {
        let (vx, vy, vyaw, dis) = (1.5f32, -2.25, 0.125, 4.75);
        let cmd = HoverCommand::new(vx, vy, vyaw, dis).unwrap();
        let bytes = encode_command(&cmd.into()).unwrap();

        let read = |at: usize| {
            f32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
        };
        assert_eq!(read(2), vx);
        assert_eq!(read(6), vy);
        assert_eq!(read(10), vyaw);
        assert_eq!(read(14), dis);
    }

    #[test]
    fn test_frame_accessors() {
        let cmd = HoverCommand::new(1.0, 2.0, 3.0, 4.0).unwrap();
        let frame = Frame::from_command(&cmd.into()).unwrap();

        assert_eq!(frame.payload_len(), 17);
        assert_eq!(frame.header_byte(), 0x71);
        assert_eq!(frame.size(), 18);
        assert_eq!(frame.payload()[0], 5);
        assert_eq!(frame.encode().len(), frame.size());
    }
}
