// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Error type for channel operations.
//!
//! Streams never carry errors: a stream ends by closing. [`ChannelError`] only
//! reports misuse or a non-blocking operation that could not complete.
//!
//! # Examples
//!
//! ```
//! use chp_core::{Chan, ChannelError};
//!
//! let chan = Chan::<i32>::new(1);
//! chan.close();
//! assert_eq!(chan.try_send(7), Err(ChannelError::Closed));
//! ```

/// Root error type for channel operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ChannelError {
    /// The stream was closed, or every handle on the other side was dropped.
    ///
    /// For sends this is the "send on closed stream" programming error; the
    /// value that could not be delivered is dropped.
    #[error("channel is closed")]
    Closed,

    /// A cancellable send gave up because its token fired.
    #[error("send was cancelled")]
    Cancelled,

    /// A non-blocking send found the buffer full, or the stream is unbuffered.
    #[error("channel is full")]
    Full,

    /// A non-blocking receive found no buffered value on an open stream.
    #[error("channel is empty")]
    Empty,
}

impl ChannelError {
    /// `true` when the error means the stream will never accept or yield another value.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        matches!(self, Self::Closed)
    }
}

impl<T> From<async_channel::SendError<T>> for ChannelError {
    fn from(_: async_channel::SendError<T>) -> Self {
        Self::Closed
    }
}

impl<T> From<async_channel::TrySendError<T>> for ChannelError {
    fn from(error: async_channel::TrySendError<T>) -> Self {
        match error {
            async_channel::TrySendError::Full(_) => Self::Full,
            async_channel::TrySendError::Closed(_) => Self::Closed,
        }
    }
}

impl From<async_channel::TryRecvError> for ChannelError {
    fn from(error: async_channel::TryRecvError) -> Self {
        match error {
            async_channel::TryRecvError::Empty => Self::Empty,
            async_channel::TryRecvError::Closed => Self::Closed,
        }
    }
}

/// Specialized Result type for channel operations
pub type Result<T> = core::result::Result<T, ChannelError>;
