//! Protocol module - wire format and framing.
//!
//! This module implements the outbound half of the CRTP binary protocol:
//! - 1-byte header (port nibble + channel bits) encoding/decoding
//! - Frame assembly from a typed command to transport bytes

mod frame;
mod wire_format;

pub use frame::{encode_command, Frame};
pub use wire_format::{
    Channel, Header, Port, CHANNEL_MASK, HEADER_SIZE, PORT_MASK, PORT_SHIFT,
};
