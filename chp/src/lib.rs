// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! # chp
//!
//! Channel patterns for async Rust.
//!
//! ## Overview
//!
//! Independent producers push values into streams; chp combines, transforms
//! and consumes them with deterministic shutdown:
//!
//! - **Fan-in**: [`merge`] / [`fan_in`] multiplex any number of streams into
//!   one, and stop early when a [`CancellationToken`] fires
//! - **Reducers**: [`first`] and [`last`] pull one value out of a fan-in and
//!   release every worker they started
//! - **Stages**: map, choose, drop, partition, collect and take, each with a
//!   single worker, via [`StageExt`]
//! - **Direction narrowing**: [`send_only`] and [`receive_only`] for API
//!   boundaries
//!
//! Per-input order is preserved everywhere; order across inputs is not.
//!
//! ## Quick Start
//!
//! ```rust
//! use chp::prelude::*;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut inputs = Vec::new();
//!     for i in 0..5 {
//!         let (tx, rx) = channel(0);
//!         inputs.push(rx);
//!         tokio::spawn(async move {
//!             for j in 0..3 {
//!                 let _ = tx.send(i * 10 + j).await;
//!             }
//!             tx.close();
//!         });
//!     }
//!
//!     let mut values = merge(None, 0, inputs).collect_values().await;
//!     values.sort();
//!     assert_eq!(values.len(), 15);
//!     assert_eq!(values[..3], [0, 1, 2]);
//! }
//! ```
//!
//! ## Features
//!
//! - `runtime-tokio` (default): workers run on `tokio::spawn`
//! - `runtime-smol`: workers run on `smol::spawn`
//! - `tracing`: worker lifecycle is logged through `tracing`

pub use chp_core::{
    channel, receive_only, send_only, spawn, CancelOnDrop, CancellationToken, Chan, ChannelError,
    Receiver, Result, Sender, WaitGroup, WaitGuard,
};
pub use chp_merge::{fan_in, first, last, merge};
pub use chp_stream::{
    choose_impl, collect_impl, drop_impl, map_impl, partition_impl, take_impl, StageExt,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use chp_core::{channel, receive_only, send_only, CancellationToken, Chan, Receiver, Sender};
    pub use chp_merge::{fan_in, first, last, merge};
    pub use chp_stream::StageExt;
}
