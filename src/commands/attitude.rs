//! Legacy attitude setpoint on the `Commander` port.

use std::fmt;
use std::mem;

use bytes::{BufMut, BytesMut};

use crate::error::{CrtpError, Result};
use crate::protocol::{Channel, Header, Port};

use super::require_finite;

/// Thrust envelope documented for the vehicle: `(roll + pitch) * thrust`
/// should stay within this bound. Not enforced (observed production traffic
/// sits exactly on the boundary); exceeding it logs a warning.
pub const THRUST_ENVELOPE: f32 = 14000.0;

/// Attitude-rate setpoint: the legacy fixed-layout command on port
/// [`Port::Commander`], channel 0.
///
/// Immutable value object; construct one per control tick, frame it, drop it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttitudeCommand {
    roll: f32,
    pitch: f32,
    yaw: f32,
    thrust: u16,
}

impl AttitudeCommand {
    /// Create an attitude setpoint.
    ///
    /// Sign conventions: roll +left/-right, pitch +forward/-backward,
    /// yaw +clockwise/-counterclockwise.
    ///
    /// `thrust` is taken as a float (matching the caller surface) and
    /// converted to the `u16` wire type by truncation toward zero. NaN,
    /// infinite, or out-of-range values fail with
    /// [`CrtpError::FieldOutOfRange`] rather than wrapping.
    pub fn new(roll: f32, pitch: f32, yaw: f32, thrust: f32) -> Result<Self> {
        let roll = require_finite("roll", roll)?;
        let pitch = require_finite("pitch", pitch)?;
        let yaw = require_finite("yaw", yaw)?;
        let thrust = thrust_to_wire(thrust)?;

        if (roll + pitch) * f32::from(thrust) > THRUST_ENVELOPE {
            tracing::warn!(roll, pitch, thrust, "attitude setpoint exceeds thrust envelope");
        }

        Ok(Self {
            roll,
            pitch,
            yaw,
            thrust,
        })
    }

    /// Roll setpoint.
    #[inline]
    pub fn roll(&self) -> f32 {
        self.roll
    }

    /// Pitch setpoint.
    #[inline]
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Yaw setpoint.
    #[inline]
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Thrust as sent on the wire.
    #[inline]
    pub fn thrust(&self) -> u16 {
        self.thrust
    }

    /// Header identity: port `Commander`, channel 0.
    #[inline]
    pub fn header(&self) -> Header {
        Header::new(Port::Commander, Channel::CH0)
    }

    /// Payload length in bytes, computed from the field set (3 f32 + 1 u16).
    #[inline]
    pub fn payload_len(&self) -> usize {
        3 * mem::size_of::<f32>() + mem::size_of::<u16>()
    }

    /// Write exactly [`payload_len`](Self::payload_len) bytes, Little Endian,
    /// in wire order: roll, pitch, yaw, thrust.
    pub fn write_payload(&self, buf: &mut BytesMut) {
        buf.put_f32_le(self.roll);
        buf.put_f32_le(self.pitch);
        buf.put_f32_le(self.yaw);
        buf.put_u16_le(self.thrust);
    }
}

impl fmt::Display for AttitudeCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AttitudeCommand - R: {}, P: {}, Y: {}, T: {}",
            self.roll, self.pitch, self.yaw, self.thrust
        )
    }
}

/// Convert a caller-supplied thrust to its `u16` wire representation.
///
/// Rule: truncate toward zero, then range-check. NaN, infinities, and values
/// outside [0, 65535] are rejected.
fn thrust_to_wire(thrust: f32) -> Result<u16> {
    if !thrust.is_finite() {
        return Err(CrtpError::FieldOutOfRange {
            field: "thrust",
            reason: format!("{thrust} is not a finite value"),
        });
    }
    let truncated = thrust.trunc();
    if truncated < 0.0 || truncated > f32::from(u16::MAX) {
        return Err(CrtpError::FieldOutOfRange {
            field: "thrust",
            reason: format!("{thrust} does not fit in u16"),
        });
    }
    Ok(truncated as u16)
}
