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

//! Generic thread-safe notification bus.

/// An unbounded, thread-safe notification pipe.
///
/// Producers clone the [`sender`](EventBus::sender) freely; the bus owner
/// consumes from the [`receiver`](EventBus::receiver) or sweeps everything
/// pending with [`drain`](EventBus::drain). Publishing never blocks.
///
/// The payload type is left generic so this crate stays decoupled from
/// whatever higher layers want to observe.
#[derive(Debug)]
pub struct EventBus<T: Send + 'static> {
    sender: flume::Sender<T>,
    receiver: flume::Receiver<T>,
}

impl<T: Send + 'static> EventBus<T> {
    /// Creates a bus with an unbounded queue.
    #[must_use]
    pub fn new() -> Self {
        let (sender, receiver) = flume::unbounded();
        Self { sender, receiver }
    }

    /// Publishes an event.
    ///
    /// Delivery can only fail when every receiver handle is gone, which for
    /// an owner-held bus means shutdown; the event is dropped and the
    /// situation logged rather than surfaced to the producer.
    pub fn publish(&self, event: T) {
        if self.sender.send(event).is_err() {
            log::warn!("EventBus: dropping event, all receivers disconnected");
        }
    }

    /// Returns a cloneable sending handle for producers.
    #[must_use]
    pub fn sender(&self) -> flume::Sender<T> {
        self.sender.clone()
    }

    /// Returns the receiving end, for the owner of the bus.
    #[must_use]
    pub fn receiver(&self) -> &flume::Receiver<T> {
        &self.receiver
    }

    /// Removes and returns every event currently pending, without blocking.
    #[must_use]
    pub fn drain(&self) -> Vec<T> {
        self.receiver.try_iter().collect()
    }
}

impl<T: Send + 'static> Default for EventBus<T> {
    fn default() -> Self {
        Self::new()
    }
}
