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

//! # Ember Core
//!
//! Threading and messaging core of the Ember runtime: synchronization
//! primitives, the [`Variant`] payload type, named FIFO [`Channel`]s, the
//! worker-thread facade, and the subsystem [`ModuleRegistry`].
//!
//! The pieces compose bottom-up: [`sync`] wraps the platform lock and
//! condition variable, [`channel`] builds a blocking FIFO queue on top of
//! them, and [`thread`] ties workers and channels together behind a
//! [`Module`] that the runtime root registers at startup.

#![warn(missing_docs)]

pub mod channel;
pub mod event;
pub mod module;
pub mod sync;
pub mod thread;
pub mod variant;

pub use channel::{Channel, ChannelRegistry};
pub use event::{EventBus, ThreadEvent};
pub use module::{Module, ModuleRegistry, RegistryError};
pub use sync::{Conditional, LockGuard, Mutex};
pub use thread::{ThreadError, ThreadModule, WorkerThread};
pub use variant::{LightUserdata, Variant};
