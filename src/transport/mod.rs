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

//! REST transport.
//!
//! Normalises HTTP outcomes into `ApiError` and raises bridge signals for
//! 401, expired-403 and connectivity failures on every call.

mod backend;
mod classify;
mod http;

pub use backend::HttpAuthBackend;
pub use classify::{classify_response, error_for_status, is_expired_marker};
pub use http::HttpTransport;
