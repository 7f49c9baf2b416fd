// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use chp_core::{channel, CancellationToken, ChannelError, Receiver, Sender};
use chp_merge::{fan_in, merge};
use chp_test_utils::{
    assert_closed_within, drain_within, nchan, produce, recv_within, stride_chans, tagged_chans,
};
use std::collections::BTreeMap;
use std::time::Duration;

/// Keep sending on `tx` until it fails, proving every receiver is gone.
async fn assert_receivers_released(tx: &Sender<i32>) {
    let released = tokio::time::timeout(Duration::from_secs(1), async {
        let mut v = 0;
        loop {
            match tx.send(v).await {
                Ok(()) => v += 1,
                Err(e) => return e,
            }
        }
    })
    .await;
    assert_eq!(released.ok(), Some(ChannelError::Closed), "merge worker still holds the input");
}

#[tokio::test]
async fn test_merge_preserves_multiset() -> anyhow::Result<()> {
    // Arrange
    let (inputs, mut sent) = nchan(200, 5);

    // Act
    let merged = merge(None, 0, inputs);
    let mut got = drain_within(&merged, 5_000).await;

    // Assert
    got.sort_unstable();
    sent.sort_unstable();
    assert_eq!(got, sent);
    Ok(())
}

#[tokio::test]
async fn test_merge_five_inputs_of_three_values() -> anyhow::Result<()> {
    // Arrange
    let inputs = stride_chans(5, 3, 10);

    // Act
    let merged = merge(None, 0, inputs);
    let mut got = drain_within(&merged, 2_000).await;

    // Assert
    got.sort_unstable();
    assert_eq!(
        got,
        vec![0, 1, 2, 10, 11, 12, 20, 21, 22, 30, 31, 32, 40, 41, 42]
    );
    Ok(())
}

#[tokio::test]
async fn test_merge_preserves_order_within_each_input() -> anyhow::Result<()> {
    // Arrange
    let inputs = tagged_chans(8, 50);

    // Act
    let merged = merge(None, 4, inputs);
    let got = drain_within(&merged, 5_000).await;

    // Assert
    let mut per_input: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for (input, seq) in got {
        per_input.entry(input).or_default().push(seq);
    }
    assert_eq!(per_input.len(), 8);
    for seqs in per_input.values() {
        assert_eq!(seqs, &(0..50).collect::<Vec<_>>());
    }
    Ok(())
}

#[tokio::test]
async fn test_merge_terminates_after_all_values() -> anyhow::Result<()> {
    // Arrange
    let (n, k) = (12, 40);
    let (inputs, _) = nchan(n, k);

    // Act
    let merged = merge(None, 16, inputs);
    let got = drain_within(&merged, 5_000).await;

    // Assert
    assert_eq!(got.len(), n * k);
    assert!(merged.is_closed());
    Ok(())
}

#[tokio::test]
async fn test_merge_without_inputs_closes_immediately() {
    let merged = merge::<i32, _>(None, 0, Vec::<Receiver<i32>>::new());

    assert_closed_within(&merged, 500).await;
}

#[tokio::test]
async fn test_single_input_passes_through_in_order() {
    let merged = merge(None, 2, vec![produce(vec!['a', 'b', 'c'], 0)]);

    assert_eq!(drain_within(&merged, 500).await, vec!['a', 'b', 'c']);
}

#[tokio::test]
async fn test_cancel_releases_workers_blocked_on_receive() -> anyhow::Result<()> {
    // Arrange - inputs stay open and never send
    let cancel = CancellationToken::new();
    let mut senders = vec![];
    let mut inputs = vec![];
    for _ in 0..4 {
        let (tx, rx) = channel::<i32>(0);
        senders.push(tx);
        inputs.push(rx);
    }
    let merged = merge(Some(cancel.clone()), 0, inputs);

    // Act
    cancel.cancel();

    // Assert
    assert_closed_within(&merged, 1_000).await;
    for tx in &senders {
        assert_receivers_released(tx).await;
    }
    Ok(())
}

#[tokio::test]
async fn test_cancel_releases_workers_blocked_on_send() -> anyhow::Result<()> {
    // Arrange - every input has data, nobody reads the output
    let cancel = CancellationToken::new();
    let mut senders = vec![];
    let mut inputs = vec![];
    for i in 0..4 {
        let (tx, rx) = channel(8);
        for v in 0..8 {
            tx.send(i * 100 + v).await?;
        }
        senders.push(tx);
        inputs.push(rx);
    }
    let merged = merge(Some(cancel.clone()), 0, inputs);
    tokio::time::sleep(Duration::from_millis(20)).await;

    // Act
    cancel.cancel();

    // Assert - the value parked for hand-off was withdrawn
    assert!(drain_within(&merged, 1_000).await.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_cancel_withdraws_value_waiting_for_consumer() -> anyhow::Result<()> {
    // Arrange
    let cancel = CancellationToken::new();
    let input = produce(vec![7], 1);
    let merged = merge(Some(cancel.clone()), 0, vec![input]);
    tokio::time::sleep(Duration::from_millis(20)).await;

    // Act
    cancel.cancel();

    // Assert
    assert_eq!(merged.recv().await, None);
    Ok(())
}

#[tokio::test]
async fn test_pre_cancelled_merge_forwards_nothing() -> anyhow::Result<()> {
    // Arrange
    let cancel = CancellationToken::new();
    cancel.cancel();
    let inputs = vec![produce(vec![1, 2, 3], 3), produce(vec![4, 5, 6], 3)];
    tokio::time::sleep(Duration::from_millis(10)).await;

    // Act
    let merged = merge(Some(cancel), 8, inputs);

    // Assert
    assert!(drain_within(&merged, 1_000).await.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_cancel_mid_stream_stops_forwarding() -> anyhow::Result<()> {
    // Arrange - an endless producer
    let cancel = CancellationToken::new();
    let (tx, rx) = channel(0);
    tokio::spawn(async move {
        let mut v = 0u64;
        while tx.send(v).await.is_ok() {
            v += 1;
        }
    });
    let merged = merge(Some(cancel.clone()), 0, vec![rx]);
    assert_eq!(recv_within(&merged, 500).await, 0);
    assert_eq!(recv_within(&merged, 500).await, 1);

    // Act
    cancel.cancel();

    // Assert
    assert!(drain_within(&merged, 1_000).await.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_dropped_output_stops_workers() -> anyhow::Result<()> {
    // Arrange
    let (tx, rx) = channel(0);
    let merged = merge(None, 0, vec![rx]);

    // Act
    drop(merged);

    // Assert - once the worker gives up it drops the only input receiver
    assert_receivers_released(&tx).await;
    assert!(tx.is_closed());
    Ok(())
}

#[tokio::test]
async fn test_fan_in_merges_unbuffered() -> anyhow::Result<()> {
    // Arrange
    let (inputs, mut sent) = nchan(10, 10);

    // Act
    let merged = fan_in(None, inputs);
    let mut got = drain_within(&merged, 2_000).await;

    // Assert
    got.sort_unstable();
    sent.sort_unstable();
    assert_eq!(got, sent);
    Ok(())
}

#[tokio::test]
async fn test_merge_of_merges() -> anyhow::Result<()> {
    // Arrange
    let left = merge(None, 0, stride_chans(2, 3, 10));
    let right = merge(None, 0, vec![produce(vec![100, 101], 0)]);

    // Act
    let merged = merge(None, 0, vec![left, right]);
    let mut got = drain_within(&merged, 2_000).await;

    // Assert
    got.sort_unstable();
    assert_eq!(got, vec![0, 1, 2, 10, 11, 12, 100, 101]);
    Ok(())
}
