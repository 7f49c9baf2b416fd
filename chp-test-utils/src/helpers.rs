// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use chp_core::Receiver;
use std::time::Duration;
use tokio::time::{sleep, timeout};

/// Receive the next value, panicking on timeout or closure.
pub async fn recv_within<T>(rx: &Receiver<T>, timeout_ms: u64) -> T {
    match timeout(Duration::from_millis(timeout_ms), rx.recv()).await {
        Ok(Some(value)) => value,
        Ok(None) => panic!("Expected value but stream closed"),
        Err(_) => panic!("Timeout: No value received within {timeout_ms} ms"),
    }
}

/// Assert nothing arrives (and the stream does not close) for `timeout_ms`.
pub async fn assert_no_value_within<T>(rx: &Receiver<T>, timeout_ms: u64) {
    tokio::select! {
        received = rx.recv() => {
            match received {
                Some(_) => panic!("Unexpected value emitted, expected no output."),
                None => panic!("Unexpected close, expected the stream to stay open."),
            }
        }
        _ = sleep(Duration::from_millis(timeout_ms)) => {}
    }
}

/// Receive until the stream closes, panicking if that takes longer than `timeout_ms`.
pub async fn drain_within<T>(rx: &Receiver<T>, timeout_ms: u64) -> Vec<T> {
    let drain = async {
        let mut values = Vec::new();
        while let Some(value) = rx.recv().await {
            values.push(value);
        }
        values
    };

    timeout(Duration::from_millis(timeout_ms), drain)
        .await
        .unwrap_or_else(|_| panic!("Timeout: stream did not close within {timeout_ms} ms"))
}

/// Assert the stream closes within `timeout_ms`, discarding whatever is still in flight.
pub async fn assert_closed_within<T>(rx: &Receiver<T>, timeout_ms: u64) {
    let _ = drain_within(rx, timeout_ms).await;
}
