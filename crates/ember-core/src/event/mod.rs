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

//! Event-driven notification plumbing.
//!
//! The [`EventBus`] is a generic fire-and-forget pipe; the concrete payload
//! published by this crate is [`ThreadEvent`], the lifecycle notifications
//! of worker threads. Channels carry application messages; the bus carries
//! what the runtime wants to observe about the workers themselves.

mod bus;

pub use self::bus::EventBus;

/// Lifecycle notification for a worker thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThreadEvent {
    /// The worker's payload started executing.
    Started {
        /// Name of the worker.
        name: String,
    },
    /// The worker's payload returned normally.
    Finished {
        /// Name of the worker.
        name: String,
    },
    /// The worker's payload panicked.
    Panicked {
        /// Name of the worker.
        name: String,
        /// Panic message, when one could be extracted.
        message: String,
    },
}

impl ThreadEvent {
    /// Name of the worker the event concerns.
    #[must_use]
    pub fn thread_name(&self) -> &str {
        match self {
            ThreadEvent::Started { name }
            | ThreadEvent::Finished { name }
            | ThreadEvent::Panicked { name, .. } => name,
        }
    }
}
