//! High-level command surface for driving the vehicle.
//!
//! Wraps a [`WriterHandle`] with typed send methods so callers never touch
//! the wire format: construct, validate, frame, queue in one call. The
//! motion helpers mirror how the vehicle is actually driven: unit attitude
//! setpoints at a caller-chosen thrust.

use crate::commands::{AttitudeCommand, Command, HoverCommand};
use crate::error::Result;
use crate::writer::WriterHandle;

/// Typed command sender over an established link.
#[derive(Clone)]
pub struct Commander {
    writer: WriterHandle,
}

impl Commander {
    /// Create a commander over a writer handle.
    pub fn new(writer: WriterHandle) -> Self {
        Self { writer }
    }

    /// Send an already-constructed command.
    pub async fn send(&self, command: Command) -> Result<()> {
        self.writer.send_command(&command).await
    }

    /// Send an attitude setpoint.
    pub async fn attitude(&self, roll: f32, pitch: f32, yaw: f32, thrust: f32) -> Result<()> {
        self.send(AttitudeCommand::new(roll, pitch, yaw, thrust)?.into())
            .await
    }

    /// Send a velocity-hover setpoint.
    pub async fn hover(&self, vx: f32, vy: f32, vyaw: f32, distance: f32) -> Result<()> {
        self.send(HoverCommand::new(vx, vy, vyaw, distance)?.into())
            .await
    }

    /// Drive forward: unit pitch at the given thrust.
    pub async fn forward(&self, thrust: f32) -> Result<()> {
        self.attitude(0.0, 1.0, 0.0, thrust).await
    }

    /// Drive backward: negative unit pitch at the given thrust.
    pub async fn backward(&self, thrust: f32) -> Result<()> {
        self.attitude(0.0, -1.0, 0.0, thrust).await
    }

    /// Turn left: unit roll at the given thrust.
    pub async fn left(&self, thrust: f32) -> Result<()> {
        self.attitude(1.0, 0.0, 0.0, thrust).await
    }

    /// Turn right: negative unit roll at the given thrust.
    pub async fn right(&self, thrust: f32) -> Result<()> {
        self.attitude(-1.0, 0.0, 0.0, thrust).await
    }
}
