// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Teardown capability returned to subscribers.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::task::AbortHandle;

#[derive(Debug, Default)]
struct Inner {
    cancelled: AtomicBool,
    tasks: Mutex<Vec<AbortHandle>>,
    children: Mutex<Vec<SubscriptionHandle>>,
}

/// Cancels every task and child handle attached to it.
///
/// Clones share state. `unsubscribe` is idempotent, and anything attached
/// after cancellation is cancelled on the spot.
#[derive(Debug, Clone, Default)]
pub struct SubscriptionHandle {
    inner: Arc<Inner>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    // Aborting tasks cannot leave the lists inconsistent
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl SubscriptionHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach_task(&self, task: AbortHandle) {
        let mut tasks = lock(&self.inner.tasks);
        if self.is_cancelled() {
            task.abort();
        } else {
            tasks.push(task);
        }
    }

    pub fn attach_child(&self, child: SubscriptionHandle) {
        let mut children = lock(&self.inner.children);
        if self.is_cancelled() {
            child.unsubscribe();
        } else {
            children.push(child);
        }
    }

    /// Cancel everything attached. Later calls do nothing.
    pub fn unsubscribe(&self) {
        if self.inner.cancelled.swap(true, Ordering::SeqCst) {
            return;
        }

        let tasks = std::mem::take(&mut *lock(&self.inner.tasks));
        for task in tasks {
            task.abort();
        }

        let children = std::mem::take(&mut *lock(&self.inner.children));
        for child in children {
            child.unsubscribe();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::SeqCst)
    }
}
