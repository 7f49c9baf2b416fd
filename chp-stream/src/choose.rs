// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Predicate filters: keep matching values, or drop them.

use chp_core::{channel, spawn_stage, trace, Receiver};

/// Forward only the values for which `predicate` holds, preserving order.
///
/// If `predicate` panics the output is left open, as with [`map_impl`](crate::map_impl).
///
/// # Examples
///
/// ```rust
/// use chp_core::channel;
/// use chp_stream::{choose_impl, collect_impl};
///
/// # async fn example() {
/// let (tx, rx) = channel(4);
/// for word in ["apple", "kiwi", "avocado", "fig"] {
///     tx.send(word).await.unwrap();
/// }
/// tx.close();
///
/// let a_words = choose_impl(rx, |w| w.starts_with('a'));
/// assert_eq!(collect_impl(a_words).await, vec!["apple", "avocado"]);
/// # }
/// ```
pub fn choose_impl<T, F>(input: Receiver<T>, mut predicate: F) -> Receiver<T>
where
    T: Send + 'static,
    F: FnMut(&T) -> bool + Send + 'static,
{
    let (output, chosen) = channel(0);
    let held = output.clone();

    let worker = async move {
        while let Some(value) = input.recv().await {
            if !predicate(&value) {
                continue;
            }
            if output.send(value).await.is_err() {
                trace!("choose: output dropped");
                return;
            }
        }
        output.close();
    };
    spawn_stage(worker, held);

    chosen
}

/// Forward only the values for which `predicate` fails. The complement of [`choose_impl`].
pub fn drop_impl<T, F>(input: Receiver<T>, mut predicate: F) -> Receiver<T>
where
    T: Send + 'static,
    F: FnMut(&T) -> bool + Send + 'static,
{
    choose_impl(input, move |value| !predicate(value))
}
