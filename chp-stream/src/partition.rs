// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use chp_core::{channel, debug, spawn_stage, Receiver};

/// Split `input` in two: values satisfying `predicate` go to the first
/// stream, all others to the second.
///
/// A single worker reads `input` once and routes every value to exactly one
/// side. Both outputs close together when `input` closes.
///
/// Both sides are unbuffered, so a consumer must drain both (typically from
/// separate tasks): a value routed to a side nobody reads holds up the other
/// side. A side whose receivers are all dropped is skipped from then on; the
/// worker stops reading once both sides are gone. If `predicate` panics both
/// outputs are left open.
pub fn partition_impl<T, F>(input: Receiver<T>, mut predicate: F) -> (Receiver<T>, Receiver<T>)
where
    T: Send + 'static,
    F: FnMut(&T) -> bool + Send + 'static,
{
    let (matched_tx, matched) = channel(0);
    let (rest_tx, rest) = channel(0);
    let held = (matched_tx.clone(), rest_tx.clone());

    let worker = async move {
        while let Some(value) = input.recv().await {
            let side = if predicate(&value) {
                &matched_tx
            } else {
                &rest_tx
            };

            // A failed send means that side went away; its value is discarded
            let delivered = side.send(value).await.is_ok();
            if !delivered && matched_tx.is_closed() && rest_tx.is_closed() {
                debug!("partition: both outputs dropped");
                return;
            }
        }
        matched_tx.close();
        rest_tx.close();
    };
    spawn_stage(worker, held);

    (matched, rest)
}
