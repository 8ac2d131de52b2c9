//! Background write queue for slice persistence.
//!
//! Mutations enqueue writes and return immediately. A tokio task drains the
//! queue, keeps only the latest pending value per slice and applies the batch
//! on the blocking pool. Failures are logged and dropped.

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};

use crate::storage::{KeyValueStore, SliceKey};

enum WriteOp {
    Set(SliceKey, String),
    Delete(SliceKey),
    Flush(oneshot::Sender<()>),
}

/// Handle to the background writer. Dropping it lets the task finish the
/// remaining queue and exit.
#[derive(Debug, Clone)]
pub struct WriteQueue {
    tx: mpsc::UnboundedSender<WriteOp>,
}

impl std::fmt::Debug for WriteOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WriteOp::Set(key, _) => write!(f, "Set({})", key),
            WriteOp::Delete(key) => write!(f, "Delete({})", key),
            WriteOp::Flush(_) => write!(f, "Flush"),
        }
    }
}

impl WriteQueue {
    /// Spawns the writer task. Must be called from within a tokio runtime.
    pub fn spawn(kv: Arc<dyn KeyValueStore>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(run_writer(kv, rx));
        Self { tx }
    }

    pub fn set(&self, key: SliceKey, value: String) {
        self.send(WriteOp::Set(key, value));
    }

    pub fn delete(&self, key: SliceKey) {
        self.send(WriteOp::Delete(key));
    }

    /// Resolves once every write queued before this call has been applied.
    pub async fn flush(&self) {
        let (done_tx, done_rx) = oneshot::channel();
        if self.tx.send(WriteOp::Flush(done_tx)).is_err() {
            return;
        }
        let _ = done_rx.await;
    }

    fn send(&self, op: WriteOp) {
        if let Err(e) = self.tx.send(op) {
            tracing::warn!("Write queue closed, dropping {:?}", e.0);
        }
    }
}

async fn run_writer(kv: Arc<dyn KeyValueStore>, mut rx: mpsc::UnboundedReceiver<WriteOp>) {
    while let Some(first) = rx.recv().await {
        let mut pending: BTreeMap<SliceKey, Option<String>> = BTreeMap::new();
        let mut waiters = Vec::new();

        let mut next = Some(first);
        while let Some(op) = next {
            match op {
                WriteOp::Set(key, value) => {
                    pending.insert(key, Some(value));
                }
                WriteOp::Delete(key) => {
                    pending.insert(key, None);
                }
                WriteOp::Flush(done) => waiters.push(done),
            }
            next = rx.try_recv().ok();
        }

        if !pending.is_empty() {
            let kv = Arc::clone(&kv);
            let result = tokio::task::spawn_blocking(move || apply_batch(kv.as_ref(), pending)).await;
            if let Err(e) = result {
                tracing::error!("Slice write task failed: {}", e);
            }
        }

        for done in waiters {
            let _ = done.send(());
        }
    }
    tracing::debug!("Write queue drained, writer exiting");
}

fn apply_batch(kv: &dyn KeyValueStore, batch: BTreeMap<SliceKey, Option<String>>) {
    for (key, value) in batch {
        let result = match &value {
            Some(text) => kv.set(key.key(), text),
            None => kv.delete(key.key()),
        };
        match result {
            Ok(()) => tracing::debug!("Persisted slice {}", key),
            Err(e) => tracing::warn!("Failed to persist slice {}: {}", key, e),
        }
    }
}
