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

//! Name-to-channel directory shared across threads.

use super::Channel;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Directory of named [`Channel`]s.
///
/// The registry is an owned object, passed to whoever needs it (typically
/// via [`ThreadModule`](crate::ThreadModule)), rather than process-global
/// state. Lookup-or-create is atomic under a single internal lock, so two
/// threads racing on the same name always end up sharing one channel
/// object.
///
/// The registry holds a strong handle to every registered channel: a named
/// channel created by a short-lived producer keeps its messages for a
/// consumer that looks the name up later. A channel is freed once it has
/// been [`remove`](Self::remove)d and the last external handle is dropped.
#[derive(Debug, Default)]
pub struct ChannelRegistry {
    channels: Mutex<HashMap<String, Arc<Channel>>>,
}

impl ChannelRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the channel registered under `name`, creating and
    /// registering an empty one if none exists.
    pub fn get_or_create(&self, name: &str) -> Arc<Channel> {
        let mut channels = self.lock_channels();
        if let Some(existing) = channels.get(name) {
            return Arc::clone(existing);
        }
        log::debug!("ChannelRegistry: created channel '{name}'");
        let channel = Arc::new(Channel::named(name));
        channels.insert(name.to_owned(), Arc::clone(&channel));
        channel
    }

    /// Returns the channel registered under `name`, if any.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<Channel>> {
        self.lock_channels().get(name).cloned()
    }

    /// Removes the channel registered under `name` from the directory.
    ///
    /// Existing handles stay valid; the channel itself is freed when the
    /// last one is dropped.
    pub fn remove(&self, name: &str) -> Option<Arc<Channel>> {
        let removed = self.lock_channels().remove(name);
        if removed.is_some() {
            log::debug!("ChannelRegistry: removed channel '{name}'");
        }
        removed
    }

    /// Number of registered channels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock_channels().len()
    }

    /// Whether no channels are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock_channels().is_empty()
    }

    fn lock_channels(&self) -> MutexGuard<'_, HashMap<String, Arc<Channel>>> {
        self.channels.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variant::Variant;
    use std::thread;

    #[test]
    fn test_lookup_or_create_reuses_instances() {
        let registry = ChannelRegistry::new();

        let first = registry.get_or_create("jobs");
        let second = registry.get_or_create("jobs");

        assert!(Arc::ptr_eq(&first, &second), "one name, one channel");
        assert_eq!(first.name(), Some("jobs"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_get_without_create() {
        let registry = ChannelRegistry::new();
        assert!(registry.get("missing").is_none());
        registry.get_or_create("present");
        assert!(registry.get("present").is_some());
    }

    #[test]
    fn test_concurrent_lookup_yields_one_channel() {
        let registry = Arc::new(ChannelRegistry::new());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || registry.get_or_create("shared"))
            })
            .collect();

        let channels: Vec<_> = handles
            .into_iter()
            .map(|handle| handle.join().expect("lookup should not panic"))
            .collect();

        for channel in &channels[1..] {
            assert!(
                Arc::ptr_eq(&channels[0], channel),
                "racing lookups must agree on one object"
            );
        }
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_removed_channel_survives_through_handles() {
        let registry = ChannelRegistry::new();
        let channel = registry.get_or_create("scratch");
        channel.push(Variant::from(5));

        let removed = registry.remove("scratch").expect("channel was registered");
        assert!(registry.get("scratch").is_none());
        assert!(registry.is_empty());

        // The handle keeps the queue alive and intact.
        assert_eq!(removed.pop(), Some(Variant::from(5)));

        // A fresh lookup under the old name is a brand-new channel.
        let recreated = registry.get_or_create("scratch");
        assert!(!Arc::ptr_eq(&removed, &recreated));
    }
}
