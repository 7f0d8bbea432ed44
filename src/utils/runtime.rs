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

//! Runtime-aware task spawning.
//!
//! Session and notification handles are usable from synchronous call sites.
//! Background work (expiry timers, post-login fetches) is only scheduled when
//! a Tokio runtime is driving the caller.

use std::future::Future;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::debug;

/// Spawn `fut` on the current runtime, or drop it when there is none.
pub fn spawn_detached<F>(what: &'static str, fut: F) -> Option<JoinHandle<()>>
where
    F: Future<Output = ()> + Send + 'static,
{
    match Handle::try_current() {
        Ok(handle) => Some(handle.spawn(fut)),
        Err(_) => {
            debug!(task = what, "No Tokio runtime; background task skipped");
            None
        }
    }
}
