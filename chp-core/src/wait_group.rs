// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Atomic completion counter.
//!
//! Tracks outstanding workers. Waiters are released once the count drops to
//! zero; the count is only ever touched atomically.

use core::future::Future;
use core::pin::Pin;
use core::sync::atomic::{AtomicUsize, Ordering};
use core::task::{Context, Poll};
use event_listener::{Event, EventListener};
use std::sync::Arc;

/// Countdown shared by a set of workers and the task waiting for them.
///
/// # Example
///
/// ```
/// use chp_core::WaitGroup;
///
/// # async fn example() {
/// let group = WaitGroup::new();
///
/// for _ in 0..3 {
///     let guard = group.enter();
///     tokio::spawn(async move {
///         // work...
///         drop(guard);
///     });
/// }
///
/// group.wait().await;
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct WaitGroup {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    count: AtomicUsize,
    event: Event,
}

impl WaitGroup {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                count: AtomicUsize::new(0),
                event: Event::new(),
            }),
        }
    }

    /// Register `n` more outstanding workers.
    pub fn add(&self, n: usize) {
        self.inner.count.fetch_add(n, Ordering::AcqRel);
    }

    /// Mark one worker as finished.
    ///
    /// # Panics
    ///
    /// Panics if called more often than workers were registered.
    pub fn done(&self) {
        let previous = self
            .inner
            .count
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |count| {
                count.checked_sub(1)
            });

        match previous {
            Ok(1) => {
                self.inner.event.notify(usize::MAX);
            }
            Ok(_) => {}
            Err(_) => panic!("WaitGroup::done called with no outstanding workers"),
        }
    }

    /// Register one worker and return a guard that finishes it when dropped.
    pub fn enter(&self) -> WaitGuard {
        self.add(1);
        WaitGuard {
            group: self.clone(),
        }
    }

    /// Number of outstanding workers.
    pub fn count(&self) -> usize {
        self.inner.count.load(Ordering::Acquire)
    }

    /// Wait until the count reaches zero. Resolves immediately if it already is.
    pub fn wait(&self) -> Wait<'_> {
        Wait {
            group: self,
            listener: None,
        }
    }
}

impl Default for WaitGroup {
    fn default() -> Self {
        Self::new()
    }
}

/// Future returned by [`WaitGroup::wait()`].
#[derive(Debug)]
#[must_use = "futures do nothing unless polled"]
pub struct Wait<'a> {
    group: &'a WaitGroup,
    listener: Option<EventListener>,
}

impl Future for Wait<'_> {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        loop {
            if self.group.count() == 0 {
                return Poll::Ready(());
            }

            match self.listener.as_mut() {
                None => self.listener = Some(self.group.inner.event.listen()),
                Some(listener) => {
                    if Pin::new(listener).poll(cx).is_pending() {
                        return Poll::Pending;
                    }
                    // Count may have gone back up through `add`; re-check
                    self.listener = None;
                }
            }
        }
    }
}

/// Guard returned by [`WaitGroup::enter`].
#[derive(Debug)]
pub struct WaitGuard {
    group: WaitGroup,
}

impl Drop for WaitGuard {
    fn drop(&mut self) {
        self.group.done();
    }
}
