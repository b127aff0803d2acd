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

//! A named worker thread with an explicit start/wait lifecycle.

use crate::event::ThreadEvent;
use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::thread::{self, JoinHandle};

/// An error from the worker-thread lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThreadError {
    /// The requested thread name is empty or whitespace-only.
    InvalidName(String),
    /// `start` was called on a thread that was already started.
    AlreadyStarted(String),
    /// `wait` was called on a thread that was never started, or was
    /// already waited on.
    NotStarted(String),
    /// The operating system refused to spawn the thread.
    Spawn {
        /// Name of the thread that failed to spawn.
        name: String,
        /// The underlying OS error text.
        message: String,
    },
    /// The worker's payload panicked.
    Panicked {
        /// Name of the panicked thread.
        name: String,
        /// Panic message, when one could be extracted.
        message: String,
    },
}

impl fmt::Display for ThreadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThreadError::InvalidName(name) => {
                write!(f, "Invalid thread name {name:?}: must be non-empty")
            }
            ThreadError::AlreadyStarted(name) => {
                write!(f, "Thread '{name}' was already started")
            }
            ThreadError::NotStarted(name) => {
                write!(f, "Thread '{name}' is not running and cannot be waited on")
            }
            ThreadError::Spawn { name, message } => {
                write!(f, "Failed to spawn thread '{name}': {message}")
            }
            ThreadError::Panicked { name, message } => {
                write!(f, "Thread '{name}' panicked: {message}")
            }
        }
    }
}

impl std::error::Error for ThreadError {}

/// A named worker bound to a payload.
///
/// Construction (through [`ThreadModule::new_thread`]) does not schedule
/// anything; the caller decides when the payload runs by calling
/// [`start`](Self::start), and collects the outcome with
/// [`wait`](Self::wait).
///
/// [`ThreadModule::new_thread`]: crate::ThreadModule::new_thread
pub struct WorkerThread {
    name: String,
    payload: Option<Box<dyn FnOnce() + Send + 'static>>,
    handle: Option<JoinHandle<()>>,
    events: flume::Sender<ThreadEvent>,
}

impl WorkerThread {
    pub(crate) fn new(
        name: String,
        payload: Box<dyn FnOnce() + Send + 'static>,
        events: flume::Sender<ThreadEvent>,
    ) -> Result<Self, ThreadError> {
        if name.trim().is_empty() {
            return Err(ThreadError::InvalidName(name));
        }
        Ok(Self {
            name,
            payload: Some(payload),
            handle: None,
            events,
        })
    }

    /// The worker's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the worker has been started and its payload has not yet
    /// finished.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|handle| !handle.is_finished())
    }

    /// Spawns the OS thread and runs the payload on it.
    ///
    /// Publishes [`ThreadEvent::Started`] from the new thread, and
    /// `Finished` or `Panicked` when the payload ends. A second `start` is
    /// [`ThreadError::AlreadyStarted`].
    pub fn start(&mut self) -> Result<(), ThreadError> {
        if self.handle.is_some() {
            return Err(ThreadError::AlreadyStarted(self.name.clone()));
        }
        let payload = self
            .payload
            .take()
            .ok_or_else(|| ThreadError::AlreadyStarted(self.name.clone()))?;

        let events = self.events.clone();
        let name = self.name.clone();
        let handle = thread::Builder::new()
            .name(self.name.clone())
            .spawn(move || {
                log::debug!("WorkerThread '{name}': started");
                let _ = events.send(ThreadEvent::Started { name: name.clone() });

                match panic::catch_unwind(AssertUnwindSafe(payload)) {
                    Ok(()) => {
                        log::debug!("WorkerThread '{name}': finished");
                        let _ = events.send(ThreadEvent::Finished { name });
                    }
                    Err(cause) => {
                        let message = panic_message(cause.as_ref());
                        log::error!("WorkerThread '{name}': panicked: {message}");
                        let _ = events.send(ThreadEvent::Panicked { name, message });
                        // Re-raise so `wait` observes the panic too.
                        panic::resume_unwind(cause);
                    }
                }
            })
            .map_err(|error| ThreadError::Spawn {
                name: self.name.clone(),
                message: error.to_string(),
            })?;

        self.handle = Some(handle);
        Ok(())
    }

    /// Blocks until the payload has finished.
    ///
    /// A panicking payload surfaces as [`ThreadError::Panicked`]; waiting
    /// on a never-started (or already-waited) worker is
    /// [`ThreadError::NotStarted`].
    pub fn wait(&mut self) -> Result<(), ThreadError> {
        let handle = self
            .handle
            .take()
            .ok_or_else(|| ThreadError::NotStarted(self.name.clone()))?;
        match handle.join() {
            Ok(()) => Ok(()),
            Err(cause) => Err(ThreadError::Panicked {
                name: self.name.clone(),
                message: panic_message(cause.as_ref()),
            }),
        }
    }
}

impl fmt::Debug for WorkerThread {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkerThread")
            .field("name", &self.name)
            .field("started", &self.payload.is_none())
            .field("running", &self.is_running())
            .finish()
    }
}

fn panic_message(cause: &(dyn Any + Send)) -> String {
    if let Some(message) = cause.downcast_ref::<&str>() {
        (*message).to_owned()
    } else if let Some(message) = cause.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_owned()
    }
}
