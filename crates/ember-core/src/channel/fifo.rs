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

//! The FIFO message queue behind every channel handle.

use crate::variant::Variant;
use std::collections::VecDeque;
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

/// Queue contents and counters, only ever touched under the channel lock.
#[derive(Debug, Default)]
struct ChannelState {
    queue: VecDeque<Variant>,
    /// Total messages ever pushed. The id handed back by
    /// [`Channel::push`] is the value of this counter after the push.
    sent: u64,
    /// Total messages consumed. FIFO order means ids are consumed in
    /// sequence, so `received >= id` is exactly "message `id` was read".
    received: u64,
}

/// A thread-safe FIFO queue of [`Variant`] messages.
///
/// All operations are safe to call from any thread; mutation happens under
/// an internal lock, and the blocking operations re-check their predicate
/// in a loop so a spurious wakeup never produces a spurious result.
///
/// Messages are delivered in push order. Under concurrent producers and
/// consumers no message is lost or delivered twice.
///
/// # Example
///
/// ```rust
/// use ember_core::{Channel, Variant};
///
/// let channel = Channel::new();
/// channel.push(Variant::from(1.0));
/// assert_eq!(channel.pop(), Some(Variant::from(1.0)));
/// assert_eq!(channel.pop(), None);
/// ```
#[derive(Debug, Default)]
pub struct Channel {
    name: Option<String>,
    state: Mutex<ChannelState>,
    cond: Condvar,
}

impl Channel {
    /// Creates a fresh, anonymous, empty channel.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty channel registered under `name`.
    pub(crate) fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// The name this channel is registered under, or `None` for anonymous
    /// channels.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Appends `value` to the tail of the queue and wakes blocked
    /// consumers. Never blocks.
    ///
    /// Returns the message's send id, usable with [`has_read`](Self::has_read).
    pub fn push(&self, value: Variant) -> u64 {
        let mut state = self.lock_state();
        state.queue.push_back(value);
        state.sent += 1;
        let id = state.sent;
        drop(state);
        self.cond.notify_all();
        id
    }

    /// Removes and returns the head of the queue, or `None` when empty.
    /// Never blocks.
    pub fn pop(&self) -> Option<Variant> {
        let mut state = self.lock_state();
        let value = Self::take_head(&mut state)?;
        drop(state);
        self.cond.notify_all();
        Some(value)
    }

    /// Returns a clone of the head of the queue without removing it, or
    /// `None` when empty. Never blocks.
    pub fn peek(&self) -> Option<Variant> {
        self.lock_state().queue.front().cloned()
    }

    /// Blocks until a message is available, then removes and returns it.
    ///
    /// Returns `None` only when `timeout` elapses first; a `timeout` of
    /// `None` waits indefinitely.
    pub fn demand(&self, timeout: Option<Duration>) -> Option<Variant> {
        let deadline = timeout.map(|timeout| Instant::now() + timeout);
        let mut state = self.lock_state();
        loop {
            if let Some(value) = Self::take_head(&mut state) {
                drop(state);
                self.cond.notify_all();
                return Some(value);
            }
            state = self.wait_until(state, deadline)?;
        }
    }

    /// Pushes `value`, then blocks until that message has been consumed.
    ///
    /// Returns `true` once the message was read (or discarded by
    /// [`clear`](Self::clear)), `false` when `timeout` elapsed before that
    /// happened. On timeout the message remains queued.
    pub fn supply(&self, value: Variant, timeout: Option<Duration>) -> bool {
        let deadline = timeout.map(|timeout| Instant::now() + timeout);
        let mut state = self.lock_state();
        state.queue.push_back(value);
        state.sent += 1;
        let id = state.sent;
        self.cond.notify_all();

        while state.received < id {
            state = match self.wait_until(state, deadline) {
                Some(state) => state,
                None => return false,
            };
        }
        true
    }

    /// Current queue length.
    ///
    /// Purely a snapshot: the length may change before the caller acts on
    /// it.
    #[must_use]
    pub fn count(&self) -> usize {
        self.lock_state().queue.len()
    }

    /// Whether the message with send id `id` has been consumed.
    ///
    /// Consumption is strictly in send order, so this is exact rather than
    /// a heuristic.
    #[must_use]
    pub fn has_read(&self, id: u64) -> bool {
        self.lock_state().received >= id
    }

    /// Discards every queued message, marking them all as read.
    ///
    /// Blocked [`supply`](Self::supply) callers are released with a
    /// successful outcome.
    pub fn clear(&self) {
        let mut state = self.lock_state();
        state.queue.clear();
        state.received = state.sent;
        drop(state);
        self.cond.notify_all();
    }

    fn take_head(state: &mut MutexGuard<'_, ChannelState>) -> Option<Variant> {
        let value = state.queue.pop_front()?;
        state.received += 1;
        Some(value)
    }

    /// One predicate-loop iteration: wait on the condvar, bounded by
    /// `deadline`. Returns `None` when the deadline has passed.
    fn wait_until<'a>(
        &'a self,
        state: MutexGuard<'a, ChannelState>,
        deadline: Option<Instant>,
    ) -> Option<MutexGuard<'a, ChannelState>> {
        match deadline {
            None => Some(self.cond.wait(state).unwrap_or_else(PoisonError::into_inner)),
            Some(deadline) => {
                let now = Instant::now();
                if now >= deadline {
                    return None;
                }
                let (state, _) = self
                    .cond
                    .wait_timeout(state, deadline - now)
                    .unwrap_or_else(PoisonError::into_inner);
                Some(state)
            }
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, ChannelState> {
        // A consumer panicking mid-pop cannot leave the queue half-mutated;
        // recover the guard instead of propagating the poison.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
