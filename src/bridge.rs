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

//! Event Bridge.
//!
//! Explicit multicast channel connecting the transport layer to the session
//! stores and shells. Every holder gets a cloned handle; there is no ambient
//! global. Subscribers receive every signal published after they subscribed,
//! with no ordering guarantee between subscribers.

use tokio::sync::broadcast;
use tracing::debug;

use crate::auth_core::constants::defaults;
use crate::auth_core::events::BridgeSignal;

#[derive(Debug, Clone)]
pub struct EventBridge {
    tx: broadcast::Sender<BridgeSignal>,
}

impl EventBridge {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Publish a signal. Returns how many subscribers will see it.
    ///
    /// Having no subscribers is not an error.
    pub fn publish(&self, signal: BridgeSignal) -> usize {
        match self.tx.send(signal) {
            Ok(n) => {
                debug!(signal = %signal, receivers = n, "Bridge signal published");
                n
            }
            Err(_) => {
                debug!(signal = %signal, "Bridge signal dropped: no subscribers");
                0
            }
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<BridgeSignal> {
        self.tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for EventBridge {
    fn default() -> Self {
        Self::new(defaults::BRIDGE_CAPACITY)
    }
}
