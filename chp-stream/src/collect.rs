// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use chp_core::Receiver;

/// Receive until `input` closes and return every value in arrival order.
///
/// Runs on the caller's task; no worker is spawned.
pub async fn collect_impl<T>(input: Receiver<T>) -> Vec<T> {
    let mut values = Vec::with_capacity(input.len());
    while let Some(value) = input.recv().await {
        values.push(value);
    }
    values
}
