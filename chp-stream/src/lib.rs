// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Single-input pipeline stages over [`Receiver`](chp_core::Receiver) streams.
//!
//! Every stage except [`collect_impl`] spawns exactly one worker that reads its
//! input to the end and then closes its own output. No cancellation token is
//! involved: a stage's lifetime is bounded by its input. A worker also stops
//! early once every receiver of its output has been dropped.
//!
//! Outputs are unbuffered hand-offs, so a stage only advances as fast as its
//! consumer reads.
//!
//! The [`StageExt`] trait exposes the stages as methods:
//!
//! ```rust
//! use chp_core::channel;
//! use chp_stream::StageExt;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let (tx, rx) = channel(8);
//! for v in 1..=6 {
//!     tx.send(v).await.unwrap();
//! }
//! tx.close();
//!
//! let evens_doubled = rx.choose(|v| v % 2 == 0).map_values(|v| v * 2);
//! assert_eq!(evens_doubled.collect_values().await, vec![4, 8, 12]);
//! # }
//! ```

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
pub mod choose;
pub mod collect;
pub mod map;
pub mod partition;
pub mod stage_ext;
pub mod take;

pub use choose::{choose_impl, drop_impl};
pub use collect::collect_impl;
pub use map::map_impl;
pub use partition::partition_impl;
pub use stage_ext::StageExt;
pub use take::take_impl;
