// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Runtime-agnostic worker spawning.
//!
//! Workers are detached: nothing joins them. Each one is written so that it
//! terminates on its own once its input closes, its output loses every
//! receiver, or its cancellation token fires.
//!
//! # Runtime Support
//!
//! - **Tokio**: `tokio::spawn` (default, `runtime-tokio`)
//! - **smol**: `smol::spawn` (`runtime-smol`)
//!
//! When both features are enabled Tokio wins.

use core::future::Future;
use core::panic::AssertUnwindSafe;
use futures::FutureExt;

#[cfg(not(any(feature = "runtime-tokio", feature = "runtime-smol")))]
compile_error!("chp-core needs a runtime: enable `runtime-tokio` or `runtime-smol`");

/// Spawn a detached worker on the configured runtime.
///
/// With `runtime-tokio` this must be called from within a Tokio runtime.
///
/// # Example
///
/// ```rust
/// use chp_core::{spawn, Chan};
///
/// # #[tokio::main]
/// # async fn main() {
/// let chan = Chan::new(1);
/// let producer = chan.clone();
///
/// spawn(async move {
///     let _ = producer.send(42).await;
///     producer.close();
/// });
///
/// assert_eq!(chan.recv().await, Some(42));
/// # }
/// ```
pub fn spawn<F>(future: F)
where
    F: Future<Output = ()> + Send + 'static,
{
    #[cfg(feature = "runtime-tokio")]
    {
        drop(tokio::spawn(future));
    }

    #[cfg(all(feature = "runtime-smol", not(feature = "runtime-tokio")))]
    {
        smol::spawn(future).detach();
    }
}

/// Spawn a worker that runs caller-supplied code.
///
/// `outputs` are handles on the streams the worker feeds. If the worker
/// panics they are leaked, so those streams stay open instead of looking
/// exhausted, and the panic resumes unwinding in the worker's task. On normal
/// completion they are simply dropped.
///
/// # Example
///
/// ```rust
/// use chp_core::{channel, spawn_stage};
///
/// # #[tokio::main]
/// # async fn main() {
/// let (tx, rx) = channel::<u32>(1);
/// let held = tx.clone();
///
/// spawn_stage(
///     async move {
///         let _ = tx.send(1).await;
///         tx.close();
///     },
///     held,
/// );
///
/// assert_eq!(rx.recv().await, Some(1));
/// # }
/// ```
pub fn spawn_stage<F, H>(future: F, outputs: H)
where
    F: Future<Output = ()> + Send + 'static,
    H: Send + 'static,
{
    spawn(async move {
        match AssertUnwindSafe(future).catch_unwind().await {
            Ok(()) => drop(outputs),
            Err(payload) => {
                crate::error!("worker panicked; its output streams are left open");
                core::mem::forget(outputs);
                std::panic::resume_unwind(payload);
            }
        }
    });
}
