//! Asynchronous popularity feedback sink.
//!
//! Handlers record the ids they returned; a bounded queue feeds a single
//! consumer task that applies batched relative increments. The enqueue path
//! never blocks and never fails the response: a full queue or a failed write
//! is logged and dropped.

use quotd_core::types::{DbId, ItemKind};
use quotd_db::repositories::PopularityRepo;
use quotd_db::DbPool;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Maximum number of pending feedback batches before new ones are dropped.
pub const QUEUE_CAPACITY: usize = 1024;

/// One batch of returned item ids to credit.
#[derive(Debug)]
pub struct PopularityHit {
    pub kind: ItemKind,
    pub ids: Vec<DbId>,
    pub delta: i64,
}

/// Producer handle for the popularity queue. Cheap to clone; held in
/// `AppState`.
#[derive(Clone)]
pub struct PopularitySink {
    tx: mpsc::Sender<PopularityHit>,
}

impl PopularitySink {
    /// Start the consumer task and return the producer handle plus the
    /// task's join handle (awaited during graceful shutdown).
    pub fn start(pool: DbPool, cancel: CancellationToken) -> (Self, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(QUEUE_CAPACITY);
        let handle = tokio::spawn(run(pool, rx, cancel));
        (Self { tx }, handle)
    }

    /// Enqueue a feedback batch. Called after a response is already being
    /// sent; must not block or surface errors.
    pub fn record(&self, kind: ItemKind, ids: Vec<DbId>, delta: i64) {
        if ids.is_empty() {
            return;
        }
        if let Err(e) = self.tx.try_send(PopularityHit { kind, ids, delta }) {
            tracing::warn!(error = %e, "Popularity queue full or closed, dropping feedback");
        }
    }
}

/// Consumer loop: apply batches until cancelled, then drain whatever is
/// already queued and exit.
async fn run(pool: DbPool, mut rx: mpsc::Receiver<PopularityHit>, cancel: CancellationToken) {
    tracing::info!(capacity = QUEUE_CAPACITY, "Popularity sink started");

    loop {
        tokio::select! {
            () = cancel.cancelled() => {
                while let Ok(hit) = rx.try_recv() {
                    apply(&pool, &hit).await;
                }
                tracing::info!("Popularity sink stopped");
                break;
            }
            hit = rx.recv() => match hit {
                Some(hit) => apply(&pool, &hit).await,
                None => {
                    tracing::info!("Popularity queue closed, sink stopping");
                    break;
                }
            },
        }
    }
}

/// Apply one batch. Failures are logged and dropped; feedback is
/// best-effort by contract.
async fn apply(pool: &DbPool, hit: &PopularityHit) {
    let result = match hit.kind {
        ItemKind::Quote => PopularityRepo::increment_quotes(pool, &hit.ids, hit.delta).await,
        ItemKind::Author => PopularityRepo::increment_authors(pool, &hit.ids, hit.delta).await,
    };

    match result {
        Ok(rows) => {
            tracing::debug!(kind = ?hit.kind, rows, delta = hit.delta, "Popularity counters bumped");
        }
        Err(e) => {
            tracing::error!(error = %e, kind = ?hit.kind, "Popularity update failed, feedback dropped");
        }
    }
}
