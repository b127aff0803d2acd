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

//! Name-keyed directory of runtime subsystems.
//!
//! The [`ModuleRegistry`] lets subsystems find each other by name without
//! compile-time coupling. It is owned by the runtime root and populated
//! during a single-threaded initialization phase; registration takes
//! `&mut self` to encode that phase in the type system. After
//! initialization the registry is shared immutably and lookups are safe
//! from any thread.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A runtime subsystem registrable under a unique name.
///
/// Implementors are shared across threads for the life of the runtime.
pub trait Module: Send + Sync + 'static {
    /// The unique name this module registers under.
    fn name(&self) -> &'static str;

    /// Allows downcasting to the concrete module type.
    fn as_any(&self) -> &dyn Any;
}

/// An error from [`ModuleRegistry`] registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A module with the same name is already registered.
    DuplicateModule(String),
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::DuplicateModule(name) => {
                write!(f, "Module already registered under name '{name}'")
            }
        }
    }
}

impl std::error::Error for RegistryError {}

/// Directory mapping subsystem names to live instances.
///
/// Unlike a cache, an entry lives for the registry's whole lifetime; a
/// duplicate name is a caller error rather than a replacement.
///
/// # Example
///
/// ```rust
/// use ember_core::{Module, ModuleRegistry, ThreadModule};
/// use std::sync::Arc;
///
/// let mut registry = ModuleRegistry::new();
/// registry.register(Arc::new(ThreadModule::new())).unwrap();
///
/// let module = registry.get("thread").unwrap();
/// assert_eq!(module.name(), "thread");
/// ```
#[derive(Default)]
pub struct ModuleRegistry {
    modules: HashMap<&'static str, Arc<dyn Module>>,
}

impl ModuleRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            modules: HashMap::new(),
        }
    }

    /// Registers `module` under its own name.
    ///
    /// Fails with [`RegistryError::DuplicateModule`] if the name is taken.
    pub fn register(&mut self, module: Arc<dyn Module>) -> Result<(), RegistryError> {
        let name = module.name();
        if self.modules.contains_key(name) {
            return Err(RegistryError::DuplicateModule(name.to_owned()));
        }
        log::info!("ModuleRegistry: registered module '{name}'");
        self.modules.insert(name, module);
        Ok(())
    }

    /// Returns the module registered under `name`, or `None`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<dyn Module>> {
        self.modules.get(name).cloned()
    }

    /// Returns `true` if a module is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.modules.contains_key(name)
    }

    /// Number of registered modules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Whether no modules are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeAudio;

    impl Module for FakeAudio {
        fn name(&self) -> &'static str {
            "audio"
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    struct FakePhysics {
        gravity: f64,
    }

    impl Module for FakePhysics {
        fn name(&self) -> &'static str {
            "physics"
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    #[test]
    fn test_register_and_get() {
        let mut registry = ModuleRegistry::new();
        registry
            .register(Arc::new(FakePhysics { gravity: 9.81 }))
            .expect("first registration succeeds");

        let module = registry.get("physics").expect("module was registered");
        let physics = module
            .as_any()
            .downcast_ref::<FakePhysics>()
            .expect("downcast to the concrete type");
        assert_eq!(physics.gravity, 9.81);
    }

    #[test]
    fn test_duplicate_registration_fails() {
        let mut registry = ModuleRegistry::new();
        registry
            .register(Arc::new(FakeAudio))
            .expect("first registration succeeds");

        let err = registry
            .register(Arc::new(FakeAudio))
            .expect_err("second registration under the same name must fail");
        assert_eq!(err, RegistryError::DuplicateModule("audio".to_owned()));
        assert_eq!(registry.len(), 1, "failed registration changes nothing");
    }

    #[test]
    fn test_get_missing_returns_none() {
        let registry = ModuleRegistry::new();
        assert!(registry.get("missing").is_none());
        assert!(!registry.contains("missing"));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_multiple_modules() {
        let mut registry = ModuleRegistry::new();
        registry.register(Arc::new(FakeAudio)).unwrap();
        registry
            .register(Arc::new(FakePhysics { gravity: 1.6 }))
            .unwrap();

        assert_eq!(registry.len(), 2);
        assert!(registry.contains("audio"));
        assert!(registry.contains("physics"));
    }
}
