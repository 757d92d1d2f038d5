//! # crtp-link
//!
//! Small binary command protocol ("CRTP": channel/port framed packets) for
//! driving a remote vehicle over a byte-stream transport such as USB-serial.
//!
//! ## Architecture
//!
//! - **Protocol** ([`protocol`]): 1-byte port/channel header and frame
//!   assembly from a typed command to transmittable bytes.
//! - **Commands** ([`commands`]): the closed family of typed setpoints, each
//!   owning its payload layout.
//! - **Writer** ([`writer`]): a dedicated task owning the transport, fed
//!   through a backpressured queue.
//! - **Commander** ([`commander`]): typed send surface layered on top.
//!
//! The framing path is pure and stateless; everything up to the transport
//! write can run concurrently from multiple threads.
//!
//! ## Example
//!
//! ```no_run
//! use crtp_link::{spawn_writer_task_default, Commander};
//!
//! # async fn run(serial: impl tokio::io::AsyncWrite + Unpin + Send + 'static) {
//! let (handle, _task) = spawn_writer_task_default(serial);
//! let commander = Commander::new(handle);
//! commander.forward(14000.0).await.unwrap();
//! # }
//! ```

pub mod commands;
pub mod error;
pub mod protocol;
pub mod writer;

mod commander;

pub use commander::Commander;
pub use commands::{AttitudeCommand, Command, HoverCommand};
pub use error::{CrtpError, Result};
pub use protocol::{encode_command, Channel, Frame, Header, Port};
pub use writer::{spawn_writer_task, spawn_writer_task_default, WriterConfig, WriterHandle};
