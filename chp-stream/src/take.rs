// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Take-values stage that limits a stream to its first n values.

use chp_core::{channel, spawn, trace, Receiver};

/// Forward at most the first `n` values of `input`, then close the output.
///
/// The worker stops reading as soon as it has forwarded `n` values (with
/// `n == 0` it never reads). Whatever remains in `input` is left untouched;
/// the worker only gives up its own handle, so callers that still need the
/// rest should keep a clone of `input`.
///
/// # Examples
///
/// ```rust
/// use chp_core::channel;
/// use chp_stream::{collect_impl, take_impl};
///
/// # async fn example() {
/// let (tx, rx) = channel(4);
/// for v in 1..=4 {
///     tx.send(v).await.unwrap();
/// }
///
/// let first_two = take_impl(rx.clone(), 2);
/// assert_eq!(collect_impl(first_two).await, vec![1, 2]);
///
/// // The source is still open and still holds the rest
/// assert_eq!(rx.recv().await, Some(3));
/// # }
/// ```
pub fn take_impl<T>(input: Receiver<T>, n: usize) -> Receiver<T>
where
    T: Send + 'static,
{
    let (output, taken) = channel(0);

    spawn(async move {
        for _ in 0..n {
            let Some(value) = input.recv().await else {
                break;
            };
            if output.send(value).await.is_err() {
                trace!("take: output dropped");
                return;
            }
        }
        output.close();
    });

    taken
}
