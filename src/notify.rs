// Copyright 2026 BadCompany
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Notification Queue.
//!
//! Collects transient user-facing messages and expires them after their
//! time-to-live, independent of navigation or session state. Display order
//! is enqueue order; duplicates are not coalesced.

use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::sync::watch;
use tracing::debug;

use crate::auth_core::constants::defaults;
use crate::auth_core::errors::ApiError;
use crate::auth_core::models::{Notification, Severity};
use crate::auth_core::types::NotificationId;
use crate::utils::runtime::spawn_detached;
use crate::utils::time;

#[derive(Clone)]
pub struct NotificationQueue {
    inner: Arc<QueueInner>,
}

struct QueueInner {
    items: watch::Sender<Vec<Notification>>,
    default_ttl: Duration,
}

impl NotificationQueue {
    pub fn new(default_ttl: Duration) -> Self {
        let (items, _) = watch::channel(Vec::new());
        Self {
            inner: Arc::new(QueueInner { items, default_ttl }),
        }
    }

    pub fn default_ttl(&self) -> Duration {
        self.inner.default_ttl
    }

    /// Append a notification and schedule its removal after `ttl`
    /// (or the queue default).
    ///
    /// Outside a Tokio runtime no timer is scheduled and the notification
    /// stays until dismissed.
    pub fn enqueue(
        &self,
        severity: Severity,
        message: impl Into<String>,
        title: Option<String>,
        ttl: Option<Duration>,
    ) -> NotificationId {
        let id = NotificationId::generate();
        let ttl = ttl.unwrap_or(self.inner.default_ttl);
        let notification = Notification {
            id,
            severity,
            message: message.into(),
            title,
            ttl,
            created_at: time::now(),
        };
        debug!(id = %id, ?severity, ?ttl, "Notification enqueued");
        self.inner.items.send_modify(|items| items.push(notification));

        let weak: Weak<QueueInner> = Arc::downgrade(&self.inner);
        spawn_detached("notification_expiry", async move {
            tokio::time::sleep(ttl).await;
            if let Some(inner) = weak.upgrade() {
                if remove(&inner, id) {
                    debug!(id = %id, "Notification expired");
                }
            }
        });
        id
    }

    pub fn success(&self, message: impl Into<String>) -> NotificationId {
        self.enqueue(Severity::Success, message, None, None)
    }

    pub fn error(&self, message: impl Into<String>) -> NotificationId {
        self.enqueue(Severity::Error, message, None, None)
    }

    pub fn warning(&self, message: impl Into<String>) -> NotificationId {
        self.enqueue(Severity::Warning, message, None, None)
    }

    pub fn info(&self, message: impl Into<String>) -> NotificationId {
        self.enqueue(Severity::Info, message, None, None)
    }

    /// Report a failed user action with the server's message when available.
    pub fn notify_failure(&self, error: &ApiError) -> NotificationId {
        self.error(error.user_message())
    }

    /// Remove a notification now. Returns `false` if it was already gone.
    pub fn dismiss(&self, id: NotificationId) -> bool {
        remove(&self.inner, id)
    }

    pub fn clear(&self) {
        self.inner.items.send_if_modified(|items| {
            let had = !items.is_empty();
            items.clear();
            had
        });
    }

    pub fn items(&self) -> Vec<Notification> {
        self.inner.items.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<Notification>> {
        self.inner.items.subscribe()
    }

    pub fn len(&self) -> usize {
        self.inner.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.items.borrow().is_empty()
    }
}

impl Default for NotificationQueue {
    fn default() -> Self {
        Self::new(Duration::from_millis(defaults::NOTIFICATION_TTL_MS))
    }
}

fn remove(inner: &QueueInner, id: NotificationId) -> bool {
    inner.items.send_if_modified(|items| {
        let before = items.len();
        items.retain(|n| n.id != id);
        items.len() != before
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_without_runtime_notification_persists_until_dismissed() {
        let queue = NotificationQueue::default();
        let id = queue.info("Saved draft");
        assert_eq!(queue.len(), 1);
        assert!(queue.dismiss(id));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_clear_empties_queue() {
        let queue = NotificationQueue::default();
        queue.warning("a");
        queue.warning("b");
        queue.clear();
        assert!(queue.is_empty());
    }
}
