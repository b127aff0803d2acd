// Copyright 2025 eraflo
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

//! Low-level synchronization primitives.
//!
//! [`Mutex`] is a payload-less exclusive lock handed out to higher layers
//! (worker coordination, scripting glue) as an opaque handle; acquisition is
//! scoped through [`LockGuard`], so release on every exit path is guaranteed
//! by drop order rather than call discipline.
//!
//! [`Conditional`] is the matching condition variable. Waiting is always
//! predicate-driven at the call site: a single wakeup carries no guarantee
//! that the awaited state holds, so callers re-check in a loop.

mod conditional;
mod mutex;

pub use self::conditional::Conditional;
pub use self::mutex::{LockGuard, Mutex};
