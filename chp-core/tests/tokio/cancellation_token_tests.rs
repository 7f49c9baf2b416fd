// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use chp_core::CancellationToken;
use core::future::Future;
use core::task::{Context, Poll};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

// ============================================================================
// Unit Tests
// ============================================================================

#[test]
fn test_new_token_not_cancelled() {
    let token = CancellationToken::new();
    assert!(!token.is_cancelled());
}

#[test]
fn test_cancel_is_idempotent() {
    let token = CancellationToken::new();
    token.cancel();
    token.cancel();
    assert!(token.is_cancelled());
}

#[test]
fn test_clone_shares_state() {
    let token1 = CancellationToken::new();
    let token2 = token1.clone();

    token2.cancel();

    assert!(token1.is_cancelled());
    assert!(token2.is_cancelled());
}

#[test]
fn test_cancelled_ready_on_first_poll_when_already_cancelled() {
    let token = CancellationToken::new();
    token.cancel();

    let mut future = Box::pin(token.cancelled());
    let waker = futures::task::noop_waker();
    let mut cx = Context::from_waker(&waker);

    assert_eq!(future.as_mut().poll(&mut cx), Poll::Ready(()));
}

#[test]
fn test_cancelled_pending_while_open() {
    let token = CancellationToken::new();

    let mut future = Box::pin(token.cancelled());
    let waker = futures::task::noop_waker();
    let mut cx = Context::from_waker(&waker);

    assert_eq!(future.as_mut().poll(&mut cx), Poll::Pending);

    token.cancel();
    assert_eq!(future.as_mut().poll(&mut cx), Poll::Ready(()));
}

#[test]
fn test_drop_guard_cancels_on_drop() {
    let token = CancellationToken::new();
    let guard = token.clone().drop_guard();
    assert!(!token.is_cancelled());

    drop(guard);

    assert!(token.is_cancelled());
}

#[test]
fn test_drop_guard_cancels_on_panic_unwind() {
    let token = CancellationToken::new();
    let scoped = token.clone();

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(move || {
        let _guard = scoped.drop_guard();
        panic!("scope aborted");
    }));

    assert!(result.is_err());
    assert!(token.is_cancelled());
}

#[test]
fn test_disarmed_guard_leaves_token_open() {
    let token = CancellationToken::new();
    let guard = token.clone().drop_guard();

    let returned = guard.disarm();

    assert!(!token.is_cancelled());
    returned.cancel();
    assert!(token.is_cancelled());
}

// ============================================================================
// Async Tests
// ============================================================================

#[tokio::test]
async fn test_cancelled_waits_until_cancel() -> anyhow::Result<()> {
    // Arrange
    let token = CancellationToken::new();
    let listener = token.clone();
    let handle = tokio::spawn(async move {
        listener.cancelled().await;
        true
    });
    tokio::time::sleep(Duration::from_millis(10)).await;
    assert!(!handle.is_finished());

    // Act
    token.cancel();

    // Assert
    assert!(tokio::time::timeout(Duration::from_millis(500), handle).await??);
    Ok(())
}

#[tokio::test]
async fn test_cancel_broadcasts_to_all_waiters() -> anyhow::Result<()> {
    // Arrange
    let token = CancellationToken::new();
    let count = Arc::new(AtomicUsize::new(0));
    let mut handles = vec![];
    for _ in 0..20 {
        let listener = token.clone();
        let count = count.clone();
        handles.push(tokio::spawn(async move {
            listener.cancelled().await;
            count.fetch_add(1, Ordering::SeqCst);
        }));
    }
    tokio::time::sleep(Duration::from_millis(20)).await;

    // Act
    token.cancel();

    // Assert
    for handle in handles {
        tokio::time::timeout(Duration::from_millis(500), handle).await??;
    }
    assert_eq!(count.load(Ordering::SeqCst), 20);
    Ok(())
}

#[tokio::test]
async fn test_waiter_created_after_cancel_resolves() -> anyhow::Result<()> {
    let token = CancellationToken::new();
    token.cancel();

    tokio::time::timeout(Duration::from_millis(100), token.cancelled()).await?;
    Ok(())
}

#[tokio::test]
async fn test_cancel_racing_listener_registration() -> anyhow::Result<()> {
    for _ in 0..100 {
        let token = CancellationToken::new();
        let listener = token.clone();

        let handle = tokio::spawn(async move {
            listener.cancelled().await;
        });
        token.cancel();

        tokio::time::timeout(Duration::from_millis(500), handle).await??;
    }
    Ok(())
}
