// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use chp_core::channel;
use chp_stream::{take_impl, StageExt};
use chp_test_utils::{assert_closed_within, drain_within, produce, recv_within};

#[tokio::test]
async fn test_take_returns_prefix() {
    let taken = take_impl(produce((0..10).collect::<Vec<_>>(), 0), 4);

    assert_eq!(drain_within(&taken, 500).await, vec![0, 1, 2, 3]);
}

#[tokio::test]
async fn test_take_more_than_available() {
    let taken = produce(vec!['x', 'y'], 0).take_values(5);

    assert_eq!(drain_within(&taken, 500).await, vec!['x', 'y']);
}

#[tokio::test]
async fn test_take_zero_closes_without_reading() -> anyhow::Result<()> {
    // Arrange
    let (tx, rx) = channel(1);
    tx.send(1).await?;

    // Act
    let taken = rx.clone().take_values(0);

    // Assert
    assert_closed_within(&taken, 500).await;
    assert_eq!(rx.recv().await, Some(1));
    Ok(())
}

#[tokio::test]
async fn test_take_closes_while_input_stays_open() -> anyhow::Result<()> {
    // Arrange - the producer never closes its stream
    let (tx, rx) = channel(0);
    let taken = rx.clone().take_values(2);

    // Act
    tx.send(10).await?;
    assert_eq!(recv_within(&taken, 500).await, 10);
    tx.send(20).await?;
    assert_eq!(recv_within(&taken, 500).await, 20);

    // Assert
    assert_closed_within(&taken, 500).await;
    assert!(!tx.is_closed());
    let (sent, rest) = tokio::join!(tx.send(30), rx.recv());
    sent?;
    assert_eq!(rest, Some(30));
    Ok(())
}
