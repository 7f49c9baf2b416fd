// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use chp_core::{channel, spawn_stage, trace, Receiver};

/// Apply `f` to every value of `input`, in order.
///
/// The output closes when `input` closes. A panic in `f` is not caught: it
/// unwinds the worker, and the output is left open rather than closed, so a
/// consumer never mistakes the truncated sequence for a complete one.
pub fn map_impl<T, U, F>(input: Receiver<T>, mut f: F) -> Receiver<U>
where
    T: Send + 'static,
    U: Send + 'static,
    F: FnMut(T) -> U + Send + 'static,
{
    let (output, mapped) = channel(0);
    let held = output.clone();

    let worker = async move {
        while let Some(value) = input.recv().await {
            if output.send(f(value)).await.is_err() {
                trace!("map: output dropped");
                return;
            }
        }
        output.close();
    };
    spawn_stage(worker, held);

    mapped
}
