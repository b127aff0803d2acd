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

//! Worker threads and the module that hands them out.
//!
//! [`ThreadModule`] is the factory and directory the rest of the runtime
//! talks to: it builds named [`WorkerThread`]s around caller-supplied
//! payloads, owns the [`ChannelRegistry`](crate::ChannelRegistry) workers
//! rendezvous through, and publishes worker lifecycle
//! [`ThreadEvent`](crate::ThreadEvent)s.
//!
//! Creating a worker and starting it are separate steps: construction
//! validates and binds, [`WorkerThread::start`] schedules.

mod facade;
mod worker;

pub use self::facade::ThreadModule;
pub use self::worker::{ThreadError, WorkerThread};
