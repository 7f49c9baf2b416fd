// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Closable FIFO streams with bidirectional and direction-narrowed handles.
//!
//! A [`Chan`] owns both ends of one queue. [`send_only`] and [`receive_only`]
//! hand out views restricted to one direction; they share the queue and have
//! no runtime effect beyond the extra handle.
//!
//! The producer side owns closing. A stream closes when [`Chan::close`] or
//! [`Sender::close`] is called, or when every sending handle is dropped.
//! Receivers drain whatever is buffered and then observe end-of-sequence.

use crate::cancellation_token::CancellationToken;
use crate::error::{ChannelError, Result};
use crate::handoff::{Envelope, Handoff, WithdrawOnDrop};
use core::fmt;
use core::pin::{pin, Pin};
use core::task::{ready, Context, Poll};
use futures::future::{select, Either};
use futures::Stream;
use pin_project::{pin_project, pinned_drop};

/// Creates a stream and returns its two direction-narrowed halves.
///
/// A `capacity` of zero makes the stream unbuffered: every send is a
/// synchronous hand-off that completes only once a receiver has taken the
/// value. A send abandoned before that (for example by losing a `select`)
/// withdraws its value, and no receiver ever sees it.
pub fn channel<T>(capacity: usize) -> (Sender<T>, Receiver<T>) {
    Chan::new(capacity).split()
}

/// Restricts a bidirectional stream to its receiving side.
///
/// The returned handle shares the queue with `chan`; `chan` keeps full access.
pub fn receive_only<T>(chan: &Chan<T>) -> Receiver<T> {
    chan.receiver.clone()
}

/// Restricts a bidirectional stream to its sending side.
///
/// The returned handle shares the queue with `chan`; `chan` keeps full access.
pub fn send_only<T>(chan: &Chan<T>) -> Sender<T> {
    chan.sender.clone()
}

/// Bidirectional handle over a closable FIFO queue.
///
/// # Example
///
/// ```
/// use chp_core::{receive_only, Chan};
///
/// # async fn example() {
/// let chan = Chan::new(2);
/// let rx = receive_only(&chan);
///
/// chan.send(1).await.unwrap();
/// chan.send(2).await.unwrap();
/// chan.close();
///
/// assert_eq!(rx.recv().await, Some(1));
/// assert_eq!(rx.recv().await, Some(2));
/// assert_eq!(rx.recv().await, None);
/// # }
/// ```
pub struct Chan<T> {
    sender: Sender<T>,
    receiver: Receiver<T>,
}

impl<T> Chan<T> {
    /// Create a bounded stream. See [`channel`] for the meaning of `capacity == 0`.
    pub fn new(capacity: usize) -> Self {
        // An unbuffered stream parks one sender at a time in a single slot
        let (sender, receiver) = async_channel::bounded(capacity.max(1));
        Self::from_parts(sender, receiver, capacity == 0)
    }

    /// Create a stream whose sends never wait.
    pub fn unbounded() -> Self {
        let (sender, receiver) = async_channel::unbounded();
        Self::from_parts(sender, receiver, false)
    }

    fn from_parts(
        sender: async_channel::Sender<Envelope<T>>,
        receiver: async_channel::Receiver<Envelope<T>>,
        rendezvous: bool,
    ) -> Self {
        Self {
            sender: Sender {
                inner: sender,
                rendezvous,
            },
            receiver: Receiver { inner: receiver },
        }
    }

    /// Give up the bidirectional handle in exchange for its two halves.
    pub fn split(self) -> (Sender<T>, Receiver<T>) {
        (self.sender, self.receiver)
    }

    /// See [`Sender::send`].
    pub async fn send(&self, value: T) -> Result<()> {
        self.sender.send(value).await
    }

    /// See [`Sender::try_send`].
    pub fn try_send(&self, value: T) -> Result<()> {
        self.sender.try_send(value)
    }

    /// See [`Sender::send_blocking`].
    pub fn send_blocking(&self, value: T) -> Result<()> {
        self.sender.send_blocking(value)
    }

    /// See [`Receiver::recv`].
    pub async fn recv(&self) -> Option<T> {
        self.receiver.recv().await
    }

    /// See [`Receiver::try_recv`].
    pub fn try_recv(&self) -> Result<T> {
        self.receiver.try_recv()
    }

    /// See [`Receiver::recv_blocking`].
    pub fn recv_blocking(&self) -> Option<T> {
        self.receiver.recv_blocking()
    }

    /// See [`Sender::close`].
    pub fn close(&self) -> bool {
        self.sender.close()
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }

    pub fn len(&self) -> usize {
        self.sender.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sender.is_empty()
    }

    /// Buffer size, `Some(0)` when unbuffered and `None` when unbounded.
    pub fn capacity(&self) -> Option<usize> {
        self.sender.capacity()
    }
}

impl<T> Clone for Chan<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
            receiver: self.receiver.clone(),
        }
    }
}

impl<T> fmt::Debug for Chan<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chan")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .field("closed", &self.is_closed())
            .finish()
    }
}

/// Send-only view of a stream.
pub struct Sender<T> {
    inner: async_channel::Sender<Envelope<T>>,
    rendezvous: bool,
}

impl<T> Sender<T> {
    /// Send a value, waiting while the buffer is full.
    ///
    /// On an unbuffered stream this waits until a receiver takes the value.
    /// Dropping the future before then withdraws the value.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError::Closed`] if the stream was closed or every
    /// receiver was dropped. The value is dropped.
    pub async fn send(&self, value: T) -> Result<()> {
        self.deliver(value, None).await
    }

    /// Send a value unless `cancel` fires first.
    ///
    /// On an unbuffered stream a value still waiting for a receiver when
    /// `cancel` fires is withdrawn: no receiver can take it once
    /// [`CancellationToken::cancel`] has returned. A value already in a
    /// buffer stays there.
    ///
    /// # Errors
    ///
    /// [`ChannelError::Cancelled`] if `cancel` fired first (including before
    /// the call), otherwise the same as [`Sender::send`].
    pub async fn send_until(&self, value: T, cancel: &CancellationToken) -> Result<()> {
        let delivery = self.deliver(value, Some(cancel));
        match select(pin!(cancel.cancelled()), pin!(delivery)).await {
            Either::Left(_) => Err(ChannelError::Cancelled),
            Either::Right((result, _)) => result,
        }
    }

    async fn deliver(&self, value: T, cancel: Option<&CancellationToken>) -> Result<()> {
        if !self.rendezvous {
            self.inner.send(Envelope::buffered(value)).await?;
            return Ok(());
        }

        let handoff = Handoff::new(cancel.cloned());
        self.inner
            .send(Envelope {
                value,
                handoff: Some(handoff.clone()),
            })
            .await?;
        let _withdraw = WithdrawOnDrop(&handoff);
        handoff.delivered().await
    }

    /// Send without waiting.
    ///
    /// An unbuffered stream has no room to leave a value in, so this never
    /// succeeds on one.
    ///
    /// # Errors
    ///
    /// [`ChannelError::Full`] when the buffer has no room or the stream is
    /// unbuffered, [`ChannelError::Closed`] when the stream is closed.
    pub fn try_send(&self, value: T) -> Result<()> {
        if self.rendezvous {
            drop(value);
            return Err(if self.is_closed() {
                ChannelError::Closed
            } else {
                ChannelError::Full
            });
        }
        self.inner.try_send(Envelope::buffered(value))?;
        Ok(())
    }

    /// Send from synchronous code, parking the thread while the buffer is full.
    ///
    /// Must not be called from inside an async task.
    ///
    /// # Errors
    ///
    /// Same as [`Sender::send`].
    pub fn send_blocking(&self, value: T) -> Result<()> {
        if !self.rendezvous {
            self.inner.send_blocking(Envelope::buffered(value))?;
            return Ok(());
        }

        let handoff = Handoff::new(None);
        self.inner.send_blocking(Envelope {
            value,
            handoff: Some(handoff.clone()),
        })?;
        handoff.delivered_blocking()
    }

    /// Close the stream.
    ///
    /// Buffered values stay available to receivers. Returns `true` if this
    /// call closed the stream and `false` if it was already closed.
    pub fn close(&self) -> bool {
        self.inner.close()
    }

    pub fn is_closed(&self) -> bool {
        self.inner.is_closed()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn capacity(&self) -> Option<usize> {
        if self.rendezvous {
            Some(0)
        } else {
            self.inner.capacity()
        }
    }
}

impl<T> Clone for Sender<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            rendezvous: self.rendezvous,
        }
    }
}

impl<T> fmt::Debug for Sender<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sender")
            .field("len", &self.len())
            .field("closed", &self.is_closed())
            .finish()
    }
}

/// Receive-only view of a stream.
///
/// Implements [`Stream`], so iterating until the stream closes is
/// `while let Some(value) = rx.next().await`.
#[pin_project(PinnedDrop)]
pub struct Receiver<T> {
    #[pin]
    inner: async_channel::Receiver<Envelope<T>>,
}

impl<T> Receiver<T> {
    /// Receive the next value.
    ///
    /// Returns `None` once the stream is closed and drained.
    pub async fn recv(&self) -> Option<T> {
        loop {
            let envelope = self.inner.recv().await.ok()?;
            if let Some(value) = envelope.open() {
                return Some(value);
            }
        }
    }

    /// Receive without waiting.
    ///
    /// # Errors
    ///
    /// [`ChannelError::Empty`] when nothing is buffered (or, unbuffered, no
    /// sender is waiting), [`ChannelError::Closed`] when the stream is closed
    /// and drained.
    pub fn try_recv(&self) -> Result<T> {
        loop {
            if let Some(value) = self.inner.try_recv()?.open() {
                return Ok(value);
            }
        }
    }

    /// Receive from synchronous code, parking the thread until a value or closure.
    ///
    /// Must not be called from inside an async task.
    pub fn recv_blocking(&self) -> Option<T> {
        loop {
            let envelope = self.inner.recv_blocking().ok()?;
            if let Some(value) = envelope.open() {
                return Some(value);
            }
        }
    }

    pub fn is_closed(&self) -> bool {
        self.inner.is_closed()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl<T> Clone for Receiver<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> fmt::Debug for Receiver<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Receiver")
            .field("len", &self.len())
            .field("closed", &self.is_closed())
            .finish()
    }
}

impl<T> Stream for Receiver<T> {
    type Item = T;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<T>> {
        let mut inner = self.project().inner;
        loop {
            match ready!(inner.as_mut().poll_next(cx)) {
                None => return Poll::Ready(None),
                Some(envelope) => {
                    if let Some(value) = envelope.open() {
                        return Poll::Ready(Some(value));
                    }
                }
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        // Withdrawn hand-offs are skipped, so only the upper bound carries over
        (0, self.inner.size_hint().1)
    }
}

#[pinned_drop]
impl<T> PinnedDrop for Receiver<T> {
    fn drop(self: Pin<&mut Self>) {
        // Last receiver: release senders parked on a hand-off with an error
        if self.inner.receiver_count() == 1 {
            while let Ok(envelope) = self.inner.try_recv() {
                if let Some(handoff) = envelope.handoff {
                    handoff.refuse();
                }
            }
        }
    }
}
