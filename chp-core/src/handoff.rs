// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

// Acknowledged hand-off for unbuffered streams.
//
// The queue always holds at least one slot, so an unbuffered sender parks its
// value together with a `Handoff` and waits until a receiver claims it. If
// the send is abandoned first, or the token it was sent under is cancelled,
// the parked value is withdrawn and the receiver skips it.

use crate::cancellation_token::CancellationToken;
use crate::error::{ChannelError, Result};
use core::sync::atomic::{AtomicU8, Ordering};
use event_listener::{Event, Listener};
use std::sync::Arc;

const WAITING: u8 = 0;
const TAKEN: u8 = 1;
const WITHDRAWN: u8 = 2;
const REFUSED: u8 = 3;

#[derive(Debug)]
pub(crate) struct Handoff {
    state: AtomicU8,
    event: Event,
    cancel: Option<CancellationToken>,
}

impl Handoff {
    pub(crate) fn new(cancel: Option<CancellationToken>) -> Arc<Self> {
        Arc::new(Self {
            state: AtomicU8::new(WAITING),
            event: Event::new(),
            cancel,
        })
    }

    fn settle(&self, to: u8) -> bool {
        let settled = self
            .state
            .compare_exchange(WAITING, to, Ordering::AcqRel, Ordering::Acquire)
            .is_ok();
        if settled {
            self.event.notify(usize::MAX);
        }
        settled
    }

    /// Receiver side: take the value if its sender is still waiting.
    pub(crate) fn claim(&self) -> bool {
        if self
            .cancel
            .as_ref()
            .is_some_and(CancellationToken::is_cancelled)
        {
            self.withdraw();
            return false;
        }
        self.settle(TAKEN)
    }

    /// Receiver side: every receiver is gone, release the sender with an error.
    pub(crate) fn refuse(&self) {
        self.settle(REFUSED);
    }

    /// Sender side: give up on a value nobody has claimed yet.
    pub(crate) fn withdraw(&self) {
        self.settle(WITHDRAWN);
    }

    fn outcome(&self) -> Option<Result<()>> {
        match self.state.load(Ordering::Acquire) {
            WAITING => None,
            TAKEN => Some(Ok(())),
            _ => Some(Err(ChannelError::Closed)),
        }
    }

    /// Wait until a receiver claims the value or every receiver is gone.
    pub(crate) async fn delivered(&self) -> Result<()> {
        loop {
            if let Some(outcome) = self.outcome() {
                return outcome;
            }
            let listener = self.event.listen();
            if let Some(outcome) = self.outcome() {
                return outcome;
            }
            listener.await;
        }
    }

    /// Blocking form of [`Handoff::delivered`].
    pub(crate) fn delivered_blocking(&self) -> Result<()> {
        loop {
            if let Some(outcome) = self.outcome() {
                return outcome;
            }
            let listener = self.event.listen();
            if let Some(outcome) = self.outcome() {
                return outcome;
            }
            listener.wait();
        }
    }
}

/// Withdraws the parked value if the send is abandoned before it is claimed.
pub(crate) struct WithdrawOnDrop<'a>(pub(crate) &'a Handoff);

impl Drop for WithdrawOnDrop<'_> {
    fn drop(&mut self) {
        self.0.withdraw();
    }
}

/// A queued value, plus its hand-off state when the stream is unbuffered.
pub(crate) struct Envelope<T> {
    pub(crate) value: T,
    pub(crate) handoff: Option<Arc<Handoff>>,
}

impl<T> Envelope<T> {
    pub(crate) fn buffered(value: T) -> Self {
        Self {
            value,
            handoff: None,
        }
    }

    /// The value, unless its sender withdrew it.
    pub(crate) fn open(self) -> Option<T> {
        match self.handoff {
            None => Some(self.value),
            Some(handoff) => handoff.claim().then_some(self.value),
        }
    }
}
