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

//! Exclusive lock primitive with scoped acquisition.

use std::sync::{self, PoisonError};

/// A non-reentrant exclusive lock wrapping the platform mutex.
///
/// The lock carries no payload; it protects whatever state the holder
/// associates with it by convention. At most one thread holds the lock at a
/// time. Relocking from the holding thread deadlocks — that is a call
/// discipline violation, not a recoverable condition.
///
/// # Example
///
/// ```rust
/// use ember_core::sync::Mutex;
///
/// let mutex = Mutex::new();
/// {
///     let _guard = mutex.lock();
///     // exclusive section
/// } // released here, on every exit path
/// ```
#[derive(Debug, Default)]
pub struct Mutex {
    inner: sync::Mutex<()>,
}

/// Scoped acquisition of a [`Mutex`].
///
/// Holding a `LockGuard` is holding the lock; dropping it releases the lock.
/// There is no explicit unlock call, so unlock-without-lock and double
/// unlock are unrepresentable.
#[derive(Debug)]
pub struct LockGuard<'a> {
    pub(crate) guard: sync::MutexGuard<'a, ()>,
}

impl Mutex {
    /// Creates a new, unlocked mutex.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: sync::Mutex::new(()),
        }
    }

    /// Blocks the calling thread until it owns the lock.
    ///
    /// A panic in a previous holder leaves the protected state in whatever
    /// shape the panicking section left it; the lock itself stays usable.
    pub fn lock(&self) -> LockGuard<'_> {
        LockGuard {
            guard: self.inner.lock().unwrap_or_else(PoisonError::into_inner),
        }
    }

    /// Attempts to acquire the lock without blocking.
    ///
    /// Returns `None` if another thread currently holds it.
    pub fn try_lock(&self) -> Option<LockGuard<'_>> {
        match self.inner.try_lock() {
            Ok(guard) => Some(LockGuard { guard }),
            Err(sync::TryLockError::Poisoned(poisoned)) => Some(LockGuard {
                guard: poisoned.into_inner(),
            }),
            Err(sync::TryLockError::WouldBlock) => None,
        }
    }
}
