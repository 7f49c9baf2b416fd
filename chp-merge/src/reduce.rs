// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Reducers that pull a single value out of a fan-in.

use crate::merge::fan_in;
use chp_core::{debug, CancellationToken, Receiver};

/// Return the first value produced by any of `inputs`.
///
/// Which input wins is not specified. The merge runs under a private
/// cancellation token that is cancelled on every exit path, including when
/// this future is dropped before completing, so no worker outlives the call.
///
/// Returns `None` only if every input closes without sending a value.
///
/// # Example
///
/// ```rust
/// use chp_core::channel;
/// use chp_merge::first;
///
/// # #[tokio::main]
/// # async fn main() {
/// let (fast_tx, fast) = channel(1);
/// let (_slow_tx, slow) = channel::<&str>(1);
///
/// fast_tx.send("fast").await.unwrap();
///
/// assert_eq!(first(vec![fast, slow]).await, Some("fast"));
/// # }
/// ```
pub async fn first<T, I>(inputs: I) -> Option<T>
where
    T: Send + 'static,
    I: IntoIterator<Item = Receiver<T>>,
{
    let cancel = CancellationToken::new();
    let _release = cancel.clone().drop_guard();

    let merged = fan_in(Some(cancel), inputs);
    merged.recv().await
}

/// Return the last value produced once every input has closed.
///
/// Waits for all of `inputs` to close. The value returned is the final one the
/// merge delivered, which is the last value sent on whichever input supplied
/// it. Returns `None` when no input sent anything.
pub async fn last<T, I>(inputs: I) -> Option<T>
where
    T: Send + 'static,
    I: IntoIterator<Item = Receiver<T>>,
{
    let cancel = CancellationToken::new();
    let _release = cancel.clone().drop_guard();

    let merged = fan_in(Some(cancel), inputs);
    let mut latest = None;
    let mut received = 0usize;
    while let Some(value) = merged.recv().await {
        latest = Some(value);
        received += 1;
    }
    debug!("last: drained {} values", received);

    latest
}
