use super::task::{Task, TaskResult};
use crate::encoder::Compressor;
use crate::error::CompressError;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{self, Sender};
use std::sync::{Mutex, PoisonError};
use std::thread;
use std::vec;
use tracing::{debug, warn};

/// Bounded worker pool for compression tasks
///
/// Tasks are queued with [`Pool::add`] and executed by [`Pool::run`], which
/// keeps at most `concurrency` calls to the compressor in flight and blocks
/// until every task has produced its [`TaskResult`].
pub struct Pool<C> {
    tasks: Vec<Task>,
    concurrency: usize,
    compressor: C,
}

impl<C: Compressor> Pool<C> {
    /// Create an empty pool. A concurrency of 0 is treated as 1 when run.
    pub fn new(concurrency: usize, compressor: C) -> Self {
        Self {
            tasks: Vec::new(),
            concurrency,
            compressor,
        }
    }

    pub fn add(&mut self, task: Task) {
        self.tasks.push(task);
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Run every pending task and return one result per task, in completion order.
    ///
    /// The pending list is drained; calling `run` again without adding tasks
    /// returns an empty Vec.
    pub fn run(&mut self) -> Vec<TaskResult> {
        if self.is_empty() {
            return Vec::new();
        }
        let tasks = std::mem::take(&mut self.tasks);

        if self.concurrency == 0 {
            warn!("Concurrency of 0 requested, running with a single worker");
        }
        let total = tasks.len();
        let workers = self.concurrency.clamp(1, total);
        debug!("Running {} tasks on {} workers", total, workers);

        let pending = Mutex::new(tasks.into_iter());
        let compressor = &self.compressor;
        let (tx, rx) = mpsc::channel();

        let results: Vec<TaskResult> = thread::scope(|scope| {
            for id in 0..workers {
                let tx = tx.clone();
                let pending = &pending;
                scope.spawn(move || run_worker(id, pending, compressor, tx));
            }
            // Workers hold the only senders, so the receiver ends once all of them exit
            drop(tx);
            rx.iter().collect()
        });

        debug!(
            "Pool finished: {} succeeded, {} failed",
            results.iter().filter(|r| r.is_success()).count(),
            results.iter().filter(|r| !r.is_success()).count()
        );
        results
    }
}

/// Pull tasks until the pending source is exhausted
fn run_worker<C: Compressor>(
    id: usize,
    pending: &Mutex<vec::IntoIter<Task>>,
    compressor: &C,
    tx: Sender<TaskResult>,
) {
    while let Some(task) = next_task(pending) {
        debug!("Worker {} starting {}", id, task.source.display());

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            compressor.compress(&task.source, &task.destination, &task.args)
        }))
        .unwrap_or_else(|payload| Err(CompressError::Panicked(panic_message(payload.as_ref()))));

        if tx.send(TaskResult::from_outcome(task, outcome)).is_err() {
            break;
        }
    }
    debug!("Worker {} done", id);
}

fn next_task(pending: &Mutex<vec::IntoIter<Task>>) -> Option<Task> {
    pending
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .next()
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
