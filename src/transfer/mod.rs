//! Cancellable background downloads keyed by a hash of their URL.
//!
//! Every download runs on its own dedicated thread and reports through a
//! per-task event channel. The executor only keeps bookkeeping for running
//! tasks: whatever the outcome, a task removes itself from the registry
//! before its terminal event is delivered.

pub mod download;

use crossbeam_channel::{unbounded, Receiver};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread;

/// Progress of one download
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// Percent of the reported content length already written
    Percent(u8),
    /// The server did not report a content length; completion is unknown
    Indeterminate,
}

/// Events emitted by one download task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadEvent {
    Progress(Progress),
    /// Terminal event: `true` for a complete download, `false` after an
    /// I/O failure or a cancellation
    Finished(bool),
}

/// Handle to a started download
#[derive(Debug)]
pub struct DownloadHandle {
    /// Registry key derived from the URL
    pub task_id: u64,
    /// Per-task event stream; closes after the terminal event
    pub events: Receiver<DownloadEvent>,
}

struct RegisteredTask {
    url: String,
    cancel: Arc<AtomicBool>,
}

type Registry = Arc<Mutex<HashMap<u64, RegisteredTask>>>;

/// Registry of running download tasks
#[derive(Default)]
pub struct TransferExecutor {
    tasks: Registry,
}

impl TransferExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deterministic registry key for `url`
    pub fn task_id(url: &str) -> u64 {
        fxhash::hash64(&url)
    }

    /// Starts downloading `url` into `output_file` on a dedicated thread.
    ///
    /// Starting a URL that is already registered replaces its registry
    /// entry without stopping the earlier thread; `cancel` then reaches
    /// only the newest task, and whichever task terminates first clears
    /// the shared key.
    pub fn start(&self, url: &str, output_file: PathBuf) -> DownloadHandle {
        let task_id = Self::task_id(url);
        let cancel = Arc::new(AtomicBool::new(false));
        let (tx, rx) = unbounded();

        let replaced = lock(&self.tasks).insert(
            task_id,
            RegisteredTask {
                url: url.to_string(),
                cancel: Arc::clone(&cancel),
            },
        );
        if let Some(previous) = replaced {
            log::warn!(
                "download of {} already running, its registry entry is replaced",
                previous.url
            );
        }

        let registry = Arc::clone(&self.tasks);
        let url = url.to_string();
        thread::spawn(move || {
            log::debug!("downloading {} to {}", url, output_file.display());
            let success = download::fetch(&url, &output_file, &cancel, &tx);

            // the registry must not hold terminal tasks, so the entry goes
            // before the terminal event is observable
            lock(&registry).remove(&task_id);
            let _ = tx.send(DownloadEvent::Finished(success));
        });

        DownloadHandle { task_id, events: rx }
    }

    /// Requests cooperative cancellation of the task downloading `url`.
    ///
    /// The task notices the flag at its next chunk boundary, so up to one
    /// chunk may still be written after this returns; it then reports
    /// `Finished(false)`. Returns whether a task was registered for the
    /// URL.
    pub fn cancel(&self, url: &str) -> bool {
        match lock(&self.tasks).get(&Self::task_id(url)) {
            Some(task) => {
                task.cancel.store(true, Ordering::Relaxed);
                true
            }
            None => false,
        }
    }

    /// Whether a task for `url` is currently registered
    pub fn is_registered(&self, url: &str) -> bool {
        lock(&self.tasks).contains_key(&Self::task_id(url))
    }

    /// Number of currently registered tasks
    pub fn active_count(&self) -> usize {
        lock(&self.tasks).len()
    }
}

fn lock(tasks: &Registry) -> MutexGuard<'_, HashMap<u64, RegisteredTask>> {
    tasks.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_id_is_deterministic() {
        let url = "https://example.com/map.zip";
        assert_eq!(TransferExecutor::task_id(url), TransferExecutor::task_id(url));
        assert_ne!(
            TransferExecutor::task_id(url),
            TransferExecutor::task_id("https://example.com/other.zip")
        );
    }

    #[test]
    fn test_cancel_unknown_url() {
        let executor = TransferExecutor::new();
        assert!(!executor.cancel("https://example.com/missing.zip"));
    }

    #[test]
    fn test_empty_registry() {
        let executor = TransferExecutor::new();
        assert_eq!(executor.active_count(), 0);
        assert!(!executor.is_registered("https://example.com/map.zip"));
    }
}
