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

//! The thread subsystem facade registered with the module registry.

use super::worker::{ThreadError, WorkerThread};
use crate::channel::{Channel, ChannelRegistry};
use crate::event::{EventBus, ThreadEvent};
use crate::module::Module;
use std::any::Any;
use std::sync::Arc;

/// Factory and directory for worker threads and channels.
///
/// One `ThreadModule` lives for the runtime's lifetime, registered under
/// the name `"thread"`. It owns the channel directory that workers
/// rendezvous through, and the event bus carrying their lifecycle
/// notifications.
///
/// # Example
///
/// ```rust
/// use ember_core::{ThreadModule, Variant};
///
/// let module = ThreadModule::new();
/// let jobs = module.channel("jobs");
///
/// let mut worker = module
///     .new_thread("producer", {
///         let jobs = jobs.clone();
///         move || {
///             jobs.push(Variant::from(1));
///         }
///     })
///     .unwrap();
///
/// worker.start().unwrap();
/// assert_eq!(jobs.demand(None), Some(Variant::from(1)));
/// worker.wait().unwrap();
/// ```
#[derive(Debug, Default)]
pub struct ThreadModule {
    channels: ChannelRegistry,
    events: EventBus<ThreadEvent>,
}

impl ThreadModule {
    /// Creates the thread subsystem with an empty channel directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a named worker bound to `payload`, without starting it.
    ///
    /// The name must be non-empty; it becomes the OS thread name once the
    /// worker is started.
    pub fn new_thread(
        &self,
        name: impl Into<String>,
        payload: impl FnOnce() + Send + 'static,
    ) -> Result<WorkerThread, ThreadError> {
        WorkerThread::new(name.into(), Box::new(payload), self.events.sender())
    }

    /// Creates a fresh, anonymous channel not visible in the directory.
    #[must_use]
    pub fn new_channel(&self) -> Arc<Channel> {
        Arc::new(Channel::new())
    }

    /// Returns the channel registered under `name`, creating it on first
    /// use. Concurrent callers for one name share one channel.
    pub fn channel(&self, name: &str) -> Arc<Channel> {
        self.channels.get_or_create(name)
    }

    /// The channel directory itself, for explicit removal or inspection.
    #[must_use]
    pub fn channels(&self) -> &ChannelRegistry {
        &self.channels
    }

    /// The worker lifecycle event bus.
    #[must_use]
    pub fn events(&self) -> &EventBus<ThreadEvent> {
        &self.events
    }
}

impl Module for ThreadModule {
    fn name(&self) -> &'static str {
        "thread"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
