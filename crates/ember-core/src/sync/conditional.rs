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

//! Condition variable paired with [`Mutex`](super::Mutex) for blocking waits.

use super::mutex::LockGuard;
use std::sync::{Condvar, PoisonError};
use std::time::Duration;

/// A condition variable for coordinating threads around shared state.
///
/// `wait` must be called with the [`LockGuard`] of the mutex protecting the
/// awaited state; the guard is released for the duration of the wait and
/// reacquired before `wait` returns, atomically with respect to `signal`
/// and `broadcast`.
///
/// Signals are not queued: a `signal` with no thread waiting is a no-op.
/// Wakeups may also be spurious, so callers always loop:
///
/// ```rust,ignore
/// let mut guard = mutex.lock();
/// while !ready() {
///     let (reacquired, _signaled) = cond.wait(guard, None);
///     guard = reacquired;
/// }
/// ```
#[derive(Debug, Default)]
pub struct Conditional {
    cvar: Condvar,
}

impl Conditional {
    /// Creates a new condition variable.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cvar: Condvar::new(),
        }
    }

    /// Releases `guard`, blocks until woken or until `timeout` elapses, then
    /// reacquires the lock.
    ///
    /// Returns the reacquired guard and `true` when the wait ended by a
    /// wakeup, `false` when it ended by timeout. A `timeout` of `None`
    /// waits indefinitely and therefore always reports `true`.
    pub fn wait<'a>(
        &self,
        guard: LockGuard<'a>,
        timeout: Option<Duration>,
    ) -> (LockGuard<'a>, bool) {
        match timeout {
            None => {
                let reacquired = self
                    .cvar
                    .wait(guard.guard)
                    .unwrap_or_else(PoisonError::into_inner);
                (LockGuard { guard: reacquired }, true)
            }
            Some(timeout) => {
                let (reacquired, result) = self
                    .cvar
                    .wait_timeout(guard.guard, timeout)
                    .unwrap_or_else(PoisonError::into_inner);
                (LockGuard { guard: reacquired }, !result.timed_out())
            }
        }
    }

    /// Wakes at least one waiting thread, if any is waiting.
    pub fn signal(&self) {
        self.cvar.notify_one();
    }

    /// Wakes all currently waiting threads.
    pub fn broadcast(&self) {
        self.cvar.notify_all();
    }
}
