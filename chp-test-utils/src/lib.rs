// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities and fixtures for the chp workspace.
//!
//! Designed for tests and benches only.
//!
//! - [`producers`]: spawn producers that fill input streams and close them
//! - [`helpers`]: timeout-guarded assertions on stream behaviour
//!
//! ```rust
//! use chp_test_utils::{nchan, recv_within};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let (inputs, sent) = nchan(3, 2);
//! assert_eq!(inputs.len(), 3);
//! assert_eq!(sent.len(), 6);
//!
//! let v = recv_within(&inputs[0], 500).await;
//! assert!(sent.contains(&v));
//! # }
//! ```

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
pub mod helpers;
pub mod producers;

pub use helpers::{assert_closed_within, assert_no_value_within, drain_within, recv_within};
pub use producers::{nchan, produce, rand_values, stride_chans, tagged_chans};
