//! Typed command family.
//!
//! Each variant is an immutable value object that knows its header identity
//! (port, channel), its payload length (computed from the field set, never
//! hand-maintained), and its Little Endian wire layout. [`Command`] is the
//! closed sum over the known variants with a single dispatch point, so adding
//! a variant is an exhaustively-checked change rather than a new subclass.

mod attitude;
mod hover;

use std::fmt;

use bytes::BytesMut;

use crate::error::{CrtpError, Result};
use crate::protocol::Header;

pub use attitude::{AttitudeCommand, THRUST_ENVELOPE};
pub use hover::{HoverCommand, HOVER_TYPE_TAG};

/// A typed outbound command, ready to be framed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Legacy attitude setpoint (port `Commander`, channel 0).
    Attitude(AttitudeCommand),
    /// Velocity-hover setpoint (port `CommanderGeneric`, channel 1).
    Hover(HoverCommand),
}

impl Command {
    /// Header identity of this command.
    pub fn header(&self) -> Header {
        match self {
            Command::Attitude(cmd) => cmd.header(),
            Command::Hover(cmd) => cmd.header(),
        }
    }

    /// Declared payload length in bytes.
    pub fn payload_len(&self) -> usize {
        match self {
            Command::Attitude(cmd) => cmd.payload_len(),
            Command::Hover(cmd) => cmd.payload_len(),
        }
    }

    /// Serialize the payload into `buf`, writing exactly
    /// [`payload_len`](Self::payload_len) bytes in the variant's wire order.
    pub fn write_payload(&self, buf: &mut BytesMut) {
        match self {
            Command::Attitude(cmd) => cmd.write_payload(buf),
            Command::Hover(cmd) => cmd.write_payload(buf),
        }
    }
}

impl From<AttitudeCommand> for Command {
    fn from(cmd: AttitudeCommand) -> Self {
        Command::Attitude(cmd)
    }
}

impl From<HoverCommand> for Command {
    fn from(cmd: HoverCommand) -> Self {
        Command::Hover(cmd)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Attitude(cmd) => cmd.fmt(f),
            Command::Hover(cmd) => cmd.fmt(f),
        }
    }
}

/// Reject NaN and infinities at construction time.
fn require_finite(field: &'static str, value: f32) -> Result<f32> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CrtpError::FieldOutOfRange {
            field,
            reason: format!("{value} is not a finite value"),
        })
    }
}
