// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Fan-in of many [`Receiver`](chp_core::Receiver) streams into one.
//!
//! [`merge`] and [`fan_in`] run one worker per input and close the output
//! once every worker has finished, either because its input closed or because
//! the optional [`CancellationToken`](chp_core::CancellationToken) fired.
//! [`first`] and [`last`] reduce a merge to a single value.
//!
//! ```rust
//! use chp_core::channel;
//! use chp_merge::{first, last};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let (tx, rx) = channel(3);
//! for v in [4, 5, 6] {
//!     tx.send(v).await.unwrap();
//! }
//! tx.close();
//!
//! assert_eq!(last(vec![rx]).await, Some(6));
//! assert_eq!(first(Vec::<chp_core::Receiver<i32>>::new()).await, None);
//! # }
//! ```

#![allow(clippy::multiple_crate_versions)]

mod merge;
mod reduce;

pub use merge::{fan_in, merge};
pub use reduce::{first, last};
