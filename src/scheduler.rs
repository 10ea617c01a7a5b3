//! Coalescing render scheduler.
//!
//! Any number of [`RenderScheduler::schedule`] calls made before the next
//! tick fires collapse into a single render, which then sees the latest
//! state. There is no cancel; a pending render always runs.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Notify;

#[derive(Clone, Default)]
pub struct RenderScheduler {
    pending: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl RenderScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a render on the next tick. Returns false when one was
    /// already pending and this call was coalesced into it.
    pub fn schedule(&self) -> bool {
        if self.pending.swap(true, Ordering::AcqRel) {
            return false;
        }
        self.notify.notify_one();
        true
    }

    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }

    /// Drive renders forever: wait for a request, let the tick elapse so
    /// further requests coalesce, then render once.
    pub async fn run<F>(self, tick: Duration, mut render: F)
    where
        F: FnMut(),
    {
        loop {
            self.notify.notified().await;
            tokio::time::sleep(tick).await;
            if self.pending.swap(false, Ordering::AcqRel) {
                render();
            }
        }
    }
}
