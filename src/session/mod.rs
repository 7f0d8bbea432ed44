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

//! Session stores.
//!
//! One generic store per authority domain, holding who is logged in and
//! answering authorization questions about them.

mod access;
mod state;
mod store;

pub use access::CapabilityAccess;
pub use state::SessionState;
pub use store::SessionStore;
