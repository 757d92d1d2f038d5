//! Dedicated writer task owning the transport.
//!
//! The transport is an opaque `AsyncWrite` capability (a USB-serial port in
//! production, a duplex pipe in tests). A single task owns it; callers send
//! encoded frames through an mpsc channel via [`WriterHandle`], so framing
//! stays pure and the only blocking point is the transport write itself.
//!
//! ```text
//! control tick ─┐
//! UI action    ─┼─► mpsc::Sender<OutboundFrame> ─► writer task ─► serial link
//! telemetry?   ─┘
//! ```
//!
//! No retry policy lives here: a failed transport write ends the task and
//! propagates unchanged through its `JoinHandle`.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use bytes::Bytes;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::commands::Command;
use crate::error::{CrtpError, Result};
use crate::protocol::encode_command;

/// Default maximum pending frames before backpressure kicks in.
pub const DEFAULT_MAX_PENDING_FRAMES: usize = 256;

/// Default channel capacity.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 256;

/// Default backpressure timeout.
pub const DEFAULT_BACKPRESSURE_TIMEOUT: Duration = Duration::from_secs(1);

/// Maximum frames drained into a single write burst.
const MAX_BATCH_SIZE: usize = 32;

/// A frame ready to be written to the transport.
///
/// CRTP frames are tiny (header byte plus at most a few dozen payload
/// bytes), so the encoded frame is carried as one contiguous `Bytes`.
#[derive(Debug, Clone)]
pub struct OutboundFrame {
    bytes: Bytes,
}

impl OutboundFrame {
    /// Encode a command into an outbound frame.
    pub fn encode(command: &Command) -> Result<Self> {
        Ok(Self {
            bytes: encode_command(command)?,
        })
    }

    /// The complete wire bytes (header + payload).
    #[inline]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Total frame size in bytes.
    #[inline]
    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// Configuration for the writer task.
#[derive(Debug, Clone)]
pub struct WriterConfig {
    /// Maximum pending frames before backpressure kicks in.
    pub max_pending_frames: usize,
    /// Channel capacity for the frame queue.
    pub channel_capacity: usize,
    /// Timeout when waiting for backpressure to clear.
    pub backpressure_timeout: Duration,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            max_pending_frames: DEFAULT_MAX_PENDING_FRAMES,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            backpressure_timeout: DEFAULT_BACKPRESSURE_TIMEOUT,
        }
    }
}

/// Handle for sending frames to the writer task.
///
/// Cheaply cloneable; control loops and UI handlers can share one.
#[derive(Clone)]
pub struct WriterHandle {
    tx: mpsc::Sender<OutboundFrame>,
    pending: Arc<AtomicUsize>,
    max_pending: usize,
    timeout: Duration,
}

impl WriterHandle {
    fn new(
        tx: mpsc::Sender<OutboundFrame>,
        pending: Arc<AtomicUsize>,
        max_pending: usize,
        timeout: Duration,
    ) -> Self {
        Self {
            tx,
            pending,
            max_pending,
            timeout,
        }
    }

    /// Encode a command and queue its frame for transmission.
    pub async fn send_command(&self, command: &Command) -> Result<()> {
        let frame = OutboundFrame::encode(command)?;
        tracing::debug!(%command, size = frame.size(), "queueing command frame");
        self.send(frame).await
    }

    /// Queue an already-encoded frame.
    ///
    /// Waits for backpressure to clear, failing with
    /// [`CrtpError::BackpressureTimeout`] after the configured timeout and
    /// [`CrtpError::LinkClosed`] if the writer task is gone.
    pub async fn send(&self, frame: OutboundFrame) -> Result<()> {
        if self.pending.load(Ordering::Acquire) >= self.max_pending {
            self.wait_for_backpressure().await?;
        }

        self.pending.fetch_add(1, Ordering::AcqRel);
        self.tx.send(frame).await.map_err(|_| {
            self.pending.fetch_sub(1, Ordering::Release);
            CrtpError::LinkClosed
        })
    }

    /// Queue a frame without waiting.
    ///
    /// Returns [`CrtpError::BackpressureTimeout`] immediately if at capacity.
    pub fn try_send(&self, frame: OutboundFrame) -> Result<()> {
        if self.pending.load(Ordering::Acquire) >= self.max_pending {
            return Err(CrtpError::BackpressureTimeout);
        }

        self.pending.fetch_add(1, Ordering::AcqRel);
        self.tx.try_send(frame).map_err(|e| {
            self.pending.fetch_sub(1, Ordering::Release);
            match e {
                mpsc::error::TrySendError::Full(_) => CrtpError::BackpressureTimeout,
                mpsc::error::TrySendError::Closed(_) => CrtpError::LinkClosed,
            }
        })
    }

    /// Check if backpressure is currently active.
    #[inline]
    pub fn is_backpressure_active(&self) -> bool {
        self.pending.load(Ordering::Acquire) >= self.max_pending
    }

    /// Get the current pending frame count.
    #[inline]
    pub fn pending_count(&self) -> usize {
        self.pending.load(Ordering::Acquire)
    }

    async fn wait_for_backpressure(&self) -> Result<()> {
        let start = Instant::now();
        let check_interval = Duration::from_micros(100);

        loop {
            if self.pending.load(Ordering::Acquire) < self.max_pending {
                return Ok(());
            }
            if start.elapsed() > self.timeout {
                return Err(CrtpError::BackpressureTimeout);
            }
            tokio::time::sleep(check_interval).await;
        }
    }
}

/// Spawn the writer task and return a handle for sending frames.
///
/// The `JoinHandle` resolves when the handle side closes (clean shutdown) or
/// the transport write fails.
pub fn spawn_writer_task<W>(
    transport: W,
    config: WriterConfig,
) -> (WriterHandle, JoinHandle<Result<()>>)
where
    W: AsyncWrite + Unpin + Send + 'static,
{
    let (tx, rx) = mpsc::channel(config.channel_capacity);
    let pending = Arc::new(AtomicUsize::new(0));

    let handle = WriterHandle::new(
        tx,
        pending.clone(),
        config.max_pending_frames,
        config.backpressure_timeout,
    );

    let task = tokio::spawn(writer_loop(rx, transport, pending));

    (handle, task)
}

/// Spawn the writer task with default configuration.
pub fn spawn_writer_task_default<W>(transport: W) -> (WriterHandle, JoinHandle<Result<()>>)
where
    W: AsyncWrite + Unpin + Send + 'static,
{
    spawn_writer_task(transport, WriterConfig::default())
}

/// Writer loop: drain queued frames, write them, flush once per burst.
///
/// Frames are at most a couple dozen bytes, so each is written with a single
/// `write_all`; batching buys one flush per burst instead of one per frame.
async fn writer_loop<W>(
    mut rx: mpsc::Receiver<OutboundFrame>,
    mut transport: W,
    pending: Arc<AtomicUsize>,
) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    loop {
        let first = match rx.recv().await {
            Some(f) => f,
            None => {
                tracing::debug!("frame queue closed, writer task shutting down");
                return Ok(());
            }
        };

        let mut batch = Vec::with_capacity(MAX_BATCH_SIZE);
        batch.push(first);
        while batch.len() < MAX_BATCH_SIZE {
            match rx.try_recv() {
                Ok(frame) => batch.push(frame),
                Err(_) => break,
            }
        }

        let batch_size = batch.len();
        let result = write_batch(&mut transport, &batch).await;
        pending.fetch_sub(batch_size, Ordering::Release);

        if let Err(e) = result {
            tracing::error!("transport write failed: {}", e);
            return Err(e);
        }
    }
}

async fn write_batch<W>(transport: &mut W, batch: &[OutboundFrame]) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    for frame in batch {
        transport.write_all(frame.bytes()).await?;
    }
    transport.flush().await?;
    Ok(())
}
