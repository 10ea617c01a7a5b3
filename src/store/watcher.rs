use anyhow::{Context, Result};
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::sync::mpsc::{channel, Receiver};
use std::time::Duration;

use super::FileStore;

/// Something changed that warrants a fresh derive + reconcile + render pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshSignal {
    /// The host application reported new mission data
    DataChanged,
    /// A watched store entry changed on disk (possibly from another process)
    StorageChanged { key: String },
}

/// Watches the store directory for changes to the mission and order entries
pub struct StoreWatcher {
    _watcher: RecommendedWatcher,
    receiver: Receiver<Result<Event, notify::Error>>,
    store: FileStore,
    keys: Vec<String>,
}

impl StoreWatcher {
    pub fn new(store: FileStore, keys: Vec<String>) -> Result<Self> {
        let (tx, rx) = channel();

        let mut watcher = RecommendedWatcher::new(
            move |res| {
                let _ = tx.send(res);
            },
            Config::default().with_poll_interval(Duration::from_secs(1)),
        )?;

        std::fs::create_dir_all(store.dir()).context("Failed to create store directory")?;
        watcher
            .watch(store.dir(), RecursiveMode::NonRecursive)
            .context("Failed to watch store directory")?;

        tracing::debug!(dir = %store.dir().display(), keys = ?keys, "Watching store");

        Ok(Self {
            _watcher: watcher,
            receiver: rx,
            store,
            keys,
        })
    }

    /// Wait for the next refresh signal (blocking). Returns `None` once the
    /// watcher has shut down.
    pub fn next(&self) -> Option<RefreshSignal> {
        loop {
            match self.receiver.recv() {
                Ok(Ok(event)) => {
                    if let Some(signal) = classify_event(&self.store, &self.keys, &event) {
                        return Some(signal);
                    }
                }
                Ok(Err(e)) => tracing::warn!(error = %e, "Store watch error"),
                Err(_) => return None,
            }
        }
    }
}

fn classify_event(store: &FileStore, keys: &[String], event: &Event) -> Option<RefreshSignal> {
    if !matches!(
        event.kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    ) {
        return None;
    }

    event
        .paths
        .iter()
        .filter_map(|path| store.key_for_path(path))
        .find(|key| keys.contains(key))
        .map(|key| RefreshSignal::StorageChanged { key })
}
