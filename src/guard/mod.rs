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

//! Route guards and the application shell.
//!
//! Guards are finite-state gates over a `SessionState`:
//! Initializing -> {Authenticated, Unauthenticated} -> {Authorized, Forbidden}.
//! The shell composes a guard, the subscription-expiry gate and the
//! connectivity listener into one render decision per navigation.

mod route;
mod shell;
mod subscription;

pub use route::{GuardOutcome, Redirect, RouteGuard};
pub use shell::{AppShell, ShellView};
pub use subscription::{GateOutcome, SubscriptionGate};
