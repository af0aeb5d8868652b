//! Non-blocking click ingestion.
//!
//! Redirect handlers hand [`ClickEvent`]s to a bounded queue through
//! [`ClickPipeline::submit`], which never waits. A fixed number of background
//! workers share the receiving end and persist one event at a time. When the
//! queue is full the event is dropped and counted.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use metrics::counter;
use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

use crate::domain::click_event::ClickEvent;
use crate::domain::repositories::ClickRepository;

/// Default number of events the queue holds.
pub const DEFAULT_QUEUE_CAPACITY: usize = 1000;

/// Default number of persisting workers.
pub const DEFAULT_WORKER_COUNT: usize = 5;

/// Running totals for the pipeline.
#[derive(Debug, Default)]
pub struct PipelineCounters {
    accepted: AtomicU64,
    dropped: AtomicU64,
    persisted: AtomicU64,
    failed: AtomicU64,
}

impl PipelineCounters {
    /// Events accepted into the queue.
    pub fn accepted(&self) -> u64 {
        self.accepted.load(Ordering::Relaxed)
    }

    /// Events rejected because the queue was full or closed.
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Events written to the click store.
    pub fn persisted(&self) -> u64 {
        self.persisted.load(Ordering::Relaxed)
    }

    /// Events discarded after a store failure.
    pub fn failed(&self) -> u64 {
        self.failed.load(Ordering::Relaxed)
    }

    fn record_accepted(&self) {
        self.accepted.fetch_add(1, Ordering::Relaxed);
        counter!("clicks_accepted_total").increment(1);
    }

    fn record_dropped(&self) {
        self.dropped.fetch_add(1, Ordering::Relaxed);
        counter!("clicks_dropped_total").increment(1);
    }

    fn record_persisted(&self) {
        self.persisted.fetch_add(1, Ordering::Relaxed);
        counter!("clicks_persisted_total").increment(1);
    }

    fn record_failed(&self) {
        self.failed.fetch_add(1, Ordering::Relaxed);
        counter!("clicks_failed_total").increment(1);
    }
}

/// Producer handle for the click queue.
///
/// Cheap to clone; every clone feeds the same queue. Workers stop once all
/// handles are dropped and the queue has drained.
#[derive(Clone)]
pub struct ClickPipeline {
    sender: mpsc::Sender<ClickEvent>,
    counters: Arc<PipelineCounters>,
}

impl ClickPipeline {
    /// Creates a pipeline holding at most `capacity` pending events.
    ///
    /// A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<ClickEvent>) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));

        let pipeline = Self {
            sender,
            counters: Arc::new(PipelineCounters::default()),
        };

        (pipeline, receiver)
    }

    /// Enqueues `event` without waiting.
    ///
    /// A full or closed queue drops the event, bumps the drop counter and logs
    /// a warning. Nothing is reported back to the caller.
    pub fn submit(&self, event: ClickEvent) {
        match self.sender.try_send(event) {
            Ok(()) => self.counters.record_accepted(),
            Err(mpsc::error::TrySendError::Full(event)) => {
                self.counters.record_dropped();
                warn!(
                    link_id = event.link_id,
                    capacity = self.capacity(),
                    dropped_total = self.counters.dropped(),
                    "Click queue full, dropping event"
                );
            }
            Err(mpsc::error::TrySendError::Closed(event)) => {
                self.counters.record_dropped();
                warn!(link_id = event.link_id, "Click queue closed, dropping event");
            }
        }
    }

    /// Total events dropped so far.
    pub fn dropped(&self) -> u64 {
        self.counters.dropped()
    }

    /// Maximum number of pending events.
    pub fn capacity(&self) -> usize {
        self.sender.max_capacity()
    }

    /// Number of events waiting for a worker.
    pub fn depth(&self) -> usize {
        self.sender.max_capacity() - self.sender.capacity()
    }

    /// True once the receiving side is gone.
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }

    pub fn counters(&self) -> Arc<PipelineCounters> {
        Arc::clone(&self.counters)
    }
}

/// Handles to the spawned click workers.
pub struct ClickWorkers {
    handles: Vec<JoinHandle<()>>,
}

#[allow(clippy::len_without_is_empty)]
impl ClickWorkers {
    /// Number of spawned workers.
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Waits for every worker to finish.
    ///
    /// Workers only finish after all [`ClickPipeline`] handles are dropped and
    /// the queue is empty, so this drains the pipeline.
    pub async fn join(self) {
        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = %e, "Click worker terminated abnormally");
            }
        }
    }
}

/// Spawns `count` workers persisting events from `receiver`.
///
/// Workers share the receiver, so each event is handled by exactly one of
/// them. At least one worker is always started.
pub fn spawn_click_workers<C>(
    receiver: mpsc::Receiver<ClickEvent>,
    repository: Arc<C>,
    count: usize,
    counters: Arc<PipelineCounters>,
) -> ClickWorkers
where
    C: ClickRepository + 'static,
{
    let receiver = Arc::new(Mutex::new(receiver));

    let handles = (0..count.max(1))
        .map(|worker_id| {
            tokio::spawn(run_click_worker(
                worker_id,
                Arc::clone(&receiver),
                Arc::clone(&repository),
                Arc::clone(&counters),
            ))
        })
        .collect();

    ClickWorkers { handles }
}

async fn run_click_worker<C: ClickRepository>(
    worker_id: usize,
    receiver: Arc<Mutex<mpsc::Receiver<ClickEvent>>>,
    repository: Arc<C>,
    counters: Arc<PipelineCounters>,
) {
    debug!(worker_id, "Click worker started");

    loop {
        let event = receiver.lock().await.recv().await;
        let Some(event) = event else { break };

        let link_id = event.link_id;

        match repository.create(event.into_new_click()).await {
            Ok(()) => counters.record_persisted(),
            Err(e) => {
                counters.record_failed();
                error!(worker_id, link_id, error = %e, "Failed to persist click, discarding");
            }
        }
    }

    debug!(worker_id, "Click worker stopped");
}
