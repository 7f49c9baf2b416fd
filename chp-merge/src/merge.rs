// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Fan-in of many streams into one.
//!
//! Every input gets its own worker that forwards values to a shared output.
//! Workers never close the output. They register with a [`WaitGroup`], and a
//! single supervisor closes the output once the group drains, so the output
//! is closed exactly once and only after the last forward has finished.

use chp_core::{
    channel, debug, spawn, trace, CancellationToken, ChannelError, Receiver, Sender, WaitGroup,
    WaitGuard,
};
use core::pin::pin;
use futures::future::{select, Either};

/// Merge `inputs` into a single stream with an output buffer of `buffer` values.
///
/// Values from one input keep their relative order; how values from different
/// inputs interleave depends on scheduling. The returned stream closes when
/// every input has closed, or as soon as all workers have observed `cancel`.
///
/// Cancellation is lossy: a worker that is waiting to receive or to forward
/// when `cancel` fires exits at once and drops its in-flight value. With an
/// unbuffered output, a value not yet taken by the consumer is withdrawn, so
/// nothing is received after `cancel` returns. Passing
/// `None` means the merge only ends by exhaustion. With no inputs the output
/// closes immediately.
///
/// If every receiver of the output is dropped, workers stop on their next
/// forward attempt.
///
/// The caller must drain the output or cancel: with a small buffer, workers
/// wait on their sends until someone receives.
///
/// Must be called from within the configured runtime.
///
/// # Example
///
/// ```rust
/// use chp_core::channel;
/// use chp_merge::merge;
/// use futures::StreamExt;
///
/// # #[tokio::main]
/// # async fn main() {
/// let (tx1, rx1) = channel(4);
/// let (tx2, rx2) = channel(4);
///
/// let merged = merge(None, 0, vec![rx1, rx2]);
///
/// tx1.send(1).await.unwrap();
/// tx2.send(2).await.unwrap();
/// tx1.close();
/// tx2.close();
///
/// let mut values: Vec<i32> = merged.collect().await;
/// values.sort();
/// assert_eq!(values, vec![1, 2]);
/// # }
/// ```
pub fn merge<T, I>(cancel: Option<CancellationToken>, buffer: usize, inputs: I) -> Receiver<T>
where
    T: Send + 'static,
    I: IntoIterator<Item = Receiver<T>>,
{
    let cancel = cancel.unwrap_or_default();
    let (output, merged) = channel(buffer);
    let workers = WaitGroup::new();

    let mut count = 0usize;
    for input in inputs {
        // Registered before the supervisor exists so it cannot see a premature zero
        let done = workers.enter();
        spawn(forward(count, input, output.clone(), cancel.clone(), done));
        count += 1;
    }
    debug!("merge: started {} workers", count);

    spawn(async move {
        workers.wait().await;
        output.close();
        debug!("merge: all workers finished, output closed");
    });

    merged
}

/// [`merge`] with an unbuffered output: each forward waits for the consumer.
pub fn fan_in<T, I>(cancel: Option<CancellationToken>, inputs: I) -> Receiver<T>
where
    T: Send + 'static,
    I: IntoIterator<Item = Receiver<T>>,
{
    merge(cancel, 0, inputs)
}

async fn forward<T>(
    worker: usize,
    input: Receiver<T>,
    output: Sender<T>,
    cancel: CancellationToken,
    _done: WaitGuard,
) {
    loop {
        // Cancellation is polled first so it wins when both sides are ready
        let value = match select(pin!(cancel.cancelled()), pin!(input.recv())).await {
            Either::Left(_) => {
                trace!("merge worker {}: cancelled while receiving", worker);
                return;
            }
            Either::Right((None, _)) => {
                trace!("merge worker {}: input closed", worker);
                return;
            }
            Either::Right((Some(value), _)) => value,
        };

        // A hand-off still pending when the token fires is withdrawn
        match output.send_until(value, &cancel).await {
            Ok(()) => {}
            Err(ChannelError::Cancelled) => {
                trace!("merge worker {}: cancelled while forwarding", worker);
                return;
            }
            Err(_) => {
                trace!("merge worker {}: output dropped", worker);
                return;
            }
        }
    }
}
