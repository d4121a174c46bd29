// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Live fan-out of a build's updates.

use crate::env::Config;
use crate::state::BuildView;
use crate::update_log::{LogError, UpdateSink};
use kevin_core::Update;
use tokio::sync::broadcast;

/// Publishes updates to live subscribers and records them in a sink.
///
/// Every update is broadcast as its wire line. Only recorded updates reach
/// the sink; the generated updates they imply are derived by the build
/// view and broadcast right after them.
pub struct Publisher<S: UpdateSink> {
    sink: S,
    view: BuildView,
    tx: broadcast::Sender<String>,
}

impl<S: UpdateSink> Publisher<S> {
    pub fn new(sink: S, capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { sink, view: BuildView::new(), tx }
    }

    pub fn from_config(sink: S, config: &Config) -> Self {
        Self::new(sink, config.broadcast_capacity)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<String> {
        self.tx.subscribe()
    }

    pub fn view(&self) -> &BuildView {
        &self.view
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Publish one update and return the generated updates it caused.
    ///
    /// A recorded update is written to the sink before anyone sees it, so
    /// subscribers never observe an update the log does not hold.
    pub fn publish(&mut self, update: &Update) -> Result<Vec<Update>, LogError> {
        if update.is_generated() {
            self.broadcast(update)?;
            return Ok(Vec::new());
        }
        let line = update.serialize()?;
        self.sink.write(&line)?;
        self.send(line, update);

        let generated = self.view.apply(update);
        for derived in &generated {
            self.broadcast(derived)?;
        }
        Ok(generated)
    }

    fn broadcast(&self, update: &Update) -> Result<(), LogError> {
        let line = update.serialize()?;
        self.send(line, update);
        Ok(())
    }

    fn send(&self, line: String, update: &Update) {
        match self.tx.send(line) {
            Ok(receivers) => tracing::debug!(tag = update.tag(), receivers, "broadcast update"),
            Err(_) => tracing::debug!(tag = update.tag(), "no subscribers"),
        }
    }
}

#[cfg(test)]
#[path = "publish_tests.rs"]
mod tests;
