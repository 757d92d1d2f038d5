//! Hover setpoint on the generic commander port.

use std::fmt;
use std::mem;

use bytes::{BufMut, BytesMut};

use crate::error::Result;
use crate::protocol::{Channel, Header, Port};

use super::require_finite;

/// Type tag identifying a hover setpoint within the generic command family.
pub const HOVER_TYPE_TAG: u8 = 5;

/// Velocity-hover setpoint: a tagged command on port
/// [`Port::CommanderGeneric`], channel 1.
///
/// Holds body-frame velocities plus a height to hold above the ground.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoverCommand {
    vx: f32,
    vy: f32,
    vyaw: f32,
    distance: f32,
}

impl HoverCommand {
    /// Create a hover setpoint. Non-finite fields are rejected.
    pub fn new(vx: f32, vy: f32, vyaw: f32, distance: f32) -> Result<Self> {
        Ok(Self {
            vx: require_finite("vx", vx)?,
            vy: require_finite("vy", vy)?,
            vyaw: require_finite("vyaw", vyaw)?,
            distance: require_finite("distance", distance)?,
        })
    }

    /// Forward velocity.
    #[inline]
    pub fn vx(&self) -> f32 {
        self.vx
    }

    /// Sideways velocity.
    #[inline]
    pub fn vy(&self) -> f32 {
        self.vy
    }

    /// Yaw rate.
    #[inline]
    pub fn vyaw(&self) -> f32 {
        self.vyaw
    }

    /// Height to hold.
    #[inline]
    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Header identity: port `CommanderGeneric`, channel 1.
    #[inline]
    pub fn header(&self) -> Header {
        Header::new(Port::CommanderGeneric, Channel::CH1)
    }

    /// Payload length in bytes, computed from the field set (1 tag + 4 f32).
    #[inline]
    pub fn payload_len(&self) -> usize {
        mem::size_of::<u8>() + 4 * mem::size_of::<f32>()
    }

    /// Write exactly [`payload_len`](Self::payload_len) bytes, Little Endian,
    /// in wire order: type tag, vx, vy, vyaw, distance.
    pub fn write_payload(&self, buf: &mut BytesMut) {
        buf.put_u8(HOVER_TYPE_TAG);
        buf.put_f32_le(self.vx);
        buf.put_f32_le(self.vy);
        buf.put_f32_le(self.vyaw);
        buf.put_f32_le(self.distance);
    }
}

impl fmt::Display for HoverCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "HoverCommand - Vx: {}, Vy: {}, Vyaw: {}, Dis: {}",
            self.vx, self.vy, self.vyaw, self.distance
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CrtpError;

    #[test]
    fn test_payload_len_is_17() {
        let cmd = HoverCommand::new(1.0, 2.0, 3.0, 4.0).unwrap();
        assert_eq!(cmd.payload_len(), 17);
    }

    #[test]
    fn test_payload_starts_with_type_tag() {
        let cmd = HoverCommand::new(1.0, 2.0, 3.0, 4.0).unwrap();
        let mut buf = BytesMut::new();
        cmd.write_payload(&mut buf);

        assert_eq!(buf.len(), cmd.payload_len());
        assert_eq!(buf[0], HOVER_TYPE_TAG);
        assert_eq!(&buf[1..5], &1.0f32.to_le_bytes());
        assert_eq!(&buf[5..9], &2.0f32.to_le_bytes());
        assert_eq!(&buf[9..13], &3.0f32.to_le_bytes());
        assert_eq!(&buf[13..17], &4.0f32.to_le_bytes());
    }

    #[test]
    fn test_non_finite_fields_rejected() {
        assert!(matches!(
            HoverCommand::new(f32::NAN, 0.0, 0.0, 0.0).unwrap_err(),
            CrtpError::FieldOutOfRange { field: "vx", .. }
        ));
        assert!(HoverCommand::new(0.0, f32::INFINITY, 0.0, 0.0).is_err());
        assert!(HoverCommand::new(0.0, 0.0, f32::NAN, 0.0).is_err());
        assert!(HoverCommand::new(0.0, 0.0, 0.0, f32::NEG_INFINITY).is_err());
    }

    #[test]
    fn test_header_identity() {
        let cmd = HoverCommand::new(0.0, 0.0, 0.0, 0.5).unwrap();
        assert_eq!(cmd.header().port, Port::CommanderGeneric);
        assert_eq!(cmd.header().channel.value(), 1);
    }

    #[test]
    fn test_display() {
        let cmd = HoverCommand::new(1.0, 2.0, 3.0, 4.0).unwrap();
        let s = cmd.to_string();
        assert!(s.contains("HoverCommand"));
        assert!(s.contains("Dis: 4"));
    }
}
