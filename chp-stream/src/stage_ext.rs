// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{choose_impl, collect_impl, drop_impl, map_impl, partition_impl, take_impl};
use chp_core::Receiver;
use core::future::Future;

/// Extension trait chaining pipeline stages on a [`Receiver`].
///
/// Method names avoid clashing with `futures::StreamExt`, which is also
/// implemented for `Receiver`.
pub trait StageExt<T>: Sized
where
    T: Send + 'static,
{
    /// See [`map_impl`].
    fn map_values<U, F>(self, f: F) -> Receiver<U>
    where
        U: Send + 'static,
        F: FnMut(T) -> U + Send + 'static;

    /// See [`choose_impl`].
    fn choose<F>(self, predicate: F) -> Receiver<T>
    where
        F: FnMut(&T) -> bool + Send + 'static;

    /// See [`drop_impl`].
    fn drop_where<F>(self, predicate: F) -> Receiver<T>
    where
        F: FnMut(&T) -> bool + Send + 'static;

    /// See [`partition_impl`]. Returns `(matching, not_matching)`.
    fn partition_by<F>(self, predicate: F) -> (Receiver<T>, Receiver<T>)
    where
        F: FnMut(&T) -> bool + Send + 'static;

    /// See [`collect_impl`].
    fn collect_values(self) -> impl Future<Output = Vec<T>> + Send;

    /// See [`take_impl`].
    ///
    /// This consumes the receiver. If it is the only one, the input loses its
    /// last receiver once `n` values are taken and producers see it closed.
    /// To keep reading the rest, take from a clone:
    ///
    /// ```rust
    /// use chp_core::channel;
    /// use chp_stream::StageExt;
    ///
    /// # async fn example() {
    /// let (tx, rx) = channel(4);
    /// for v in 1..=3 {
    ///     tx.send(v).await.unwrap();
    /// }
    ///
    /// let head = rx.clone().take_values(1).collect_values().await;
    /// assert_eq!(head, vec![1]);
    /// assert_eq!(rx.recv().await, Some(2));
    /// # }
    /// ```
    fn take_values(self, n: usize) -> Receiver<T>;
}

impl<T> StageExt<T> for Receiver<T>
where
    T: Send + 'static,
{
    fn map_values<U, F>(self, f: F) -> Receiver<U>
    where
        U: Send + 'static,
        F: FnMut(T) -> U + Send + 'static,
    {
        map_impl(self, f)
    }

    fn choose<F>(self, predicate: F) -> Receiver<T>
    where
        F: FnMut(&T) -> bool + Send + 'static,
    {
        choose_impl(self, predicate)
    }

    fn drop_where<F>(self, predicate: F) -> Receiver<T>
    where
        F: FnMut(&T) -> bool + Send + 'static,
    {
        drop_impl(self, predicate)
    }

    fn partition_by<F>(self, predicate: F) -> (Receiver<T>, Receiver<T>)
    where
        F: FnMut(&T) -> bool + Send + 'static,
    {
        partition_impl(self, predicate)
    }

    fn collect_values(self) -> impl Future<Output = Vec<T>> + Send {
        collect_impl(self)
    }

    fn take_values(self, n: usize) -> Receiver<T> {
        take_impl(self, n)
    }
}
