// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Core primitives for channel patterns.
//!
//! Everything else in the workspace is composed from four building blocks:
//!
//! - [`Chan`], [`Sender`] and [`Receiver`]: a closable FIFO queue with
//!   bidirectional and direction-narrowed handles
//! - [`CancellationToken`]: a broadcast "done" signal
//! - [`WaitGroup`]: an atomic completion counter
//! - [`spawn`]: detaches a worker on the configured runtime

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]

mod handoff;
mod logging;

pub mod cancellation_token;
pub mod channel;
pub mod error;
pub mod task;
pub mod wait_group;

pub use self::cancellation_token::{CancelOnDrop, CancellationToken, Cancelled};
pub use self::channel::{channel, receive_only, send_only, Chan, Receiver, Sender};
pub use self::error::{ChannelError, Result};
pub use self::task::{spawn, spawn_stage};
pub use self::wait_group::{Wait, WaitGroup, WaitGuard};

#[cfg(feature = "tracing")]
#[doc(hidden)]
pub use tracing;
