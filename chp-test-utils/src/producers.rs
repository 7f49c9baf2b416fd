// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use chp_core::{channel, Receiver};

/// Spawn a producer that sends `values` in order on a fresh stream, then closes it.
///
/// The producer stops early if every receiver is dropped.
pub fn produce<T>(values: Vec<T>, capacity: usize) -> Receiver<T>
where
    T: Send + 'static,
{
    let (tx, rx) = channel(capacity);
    tokio::spawn(async move {
        for value in values {
            if tx.send(value).await.is_err() {
                return;
            }
        }
        tx.close();
    });
    rx
}

/// `size` random values in `0..1000`.
pub fn rand_values(size: usize) -> Vec<i32> {
    (0..size).map(|_| fastrand::i32(0..1000)).collect()
}

/// Create `n` unbuffered streams and send `k` random values into each, closing
/// each stream after its values.
///
/// Returns the streams and every value sent, across all of them.
pub fn nchan(n: usize, k: usize) -> (Vec<Receiver<i32>>, Vec<i32>) {
    let mut inputs = Vec::with_capacity(n);
    let mut sent = Vec::with_capacity(n * k);

    for _ in 0..n {
        let values = rand_values(k);
        sent.extend_from_slice(&values);
        inputs.push(produce(values, 0));
    }

    (inputs, sent)
}

/// Create `n` unbuffered streams where stream `i` sends `i * stride + j` for `j` in `0..k`.
pub fn stride_chans(n: usize, k: usize, stride: usize) -> Vec<Receiver<usize>> {
    (0..n)
        .map(|i| produce((0..k).map(|j| i * stride + j).collect(), 0))
        .collect()
}

/// Create `n` unbuffered streams where stream `i` sends `(i, j)` for `j` in `0..k`.
///
/// The tag identifies the source stream so per-input order can be checked
/// after a merge.
pub fn tagged_chans(n: usize, k: usize) -> Vec<Receiver<(usize, usize)>> {
    (0..n)
        .map(|i| produce((0..k).map(|j| (i, j)).collect(), 0))
        .collect()
}
