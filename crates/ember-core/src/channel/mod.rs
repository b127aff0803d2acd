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

//! Thread-safe FIFO message channels and their name registry.
//!
//! A [`Channel`] is a shared queue of [`Variant`](crate::Variant) messages
//! with non-blocking (`pop`, `peek`) and blocking (`demand`, `supply`)
//! consumption, plus a monotonic send counter that lets producers ask
//! whether a specific message has been consumed yet.
//!
//! Channels are shared by reference count. The [`ChannelRegistry`] maps
//! names to live channels so unrelated threads can rendezvous on a name;
//! removal from the registry and the last external handle dropping are both
//! required before a named channel is freed.

mod fifo;
mod registry;

pub use self::fifo::Channel;
pub use self::registry::ChannelRegistry;
