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

//! The [`Variant`] payload type carried through channels.
//!
//! A `Variant` is the boxed value that crosses thread and scripting-layer
//! boundaries. The scripting glue converts externally supplied values into
//! `Variant`s before pushing, and unboxes them after popping; this crate
//! only moves them around. Exactly one alternative is active per value by
//! construction, and string payloads own their bytes for the lifetime of
//! the value.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// An opaque pointer-sized handle passed through unchanged.
///
/// The runtime never dereferences it; it exists so native extensions can
/// route raw handles (window handles, foreign objects) between threads by
/// identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LightUserdata(usize);

impl LightUserdata {
    /// Wraps a raw pointer as an opaque handle.
    pub fn from_ptr<T>(ptr: *mut T) -> Self {
        Self(ptr as usize)
    }

    /// Returns the handle as a raw pointer.
    ///
    /// The caller is responsible for knowing the pointee type and lifetime;
    /// this crate guarantees nothing beyond identity preservation.
    #[must_use]
    pub fn as_ptr<T>(&self) -> *mut T {
        self.0 as *mut T
    }

    /// Returns the raw address of the handle.
    #[must_use]
    pub fn addr(&self) -> usize {
        self.0
    }
}

/// A boxed message value flowing through [`Channel`](crate::Channel)s.
///
/// Cloning is cheap: strings and userdata are reference counted, everything
/// else is `Copy`-sized.
#[derive(Clone)]
pub enum Variant {
    /// A boolean value.
    Bool(bool),
    /// A double-precision number. Integer payloads convert losslessly
    /// through [`From<i32>`].
    Number(f64),
    /// A single character.
    Char(char),
    /// An owned, reference-counted string buffer.
    String(Arc<str>),
    /// An opaque pointer-sized handle, compared by identity.
    Light(LightUserdata),
    /// A typed, reference-counted userdata object, compared by identity.
    Userdata(Arc<dyn Any + Send + Sync>),
}

impl Variant {
    /// Returns the boolean payload, if this variant holds one.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Variant::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the numeric payload, if this variant holds one.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Variant::Number(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the string payload, if this variant holds one.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Variant::String(value) => Some(value),
            _ => None,
        }
    }

    /// Downcasts a [`Variant::Userdata`] payload to a concrete type.
    ///
    /// Returns `None` for other alternatives or on type mismatch.
    #[must_use]
    pub fn userdata_ref<T: Any + Send + Sync>(&self) -> Option<&T> {
        match self {
            Variant::Userdata(value) => value.downcast_ref::<T>(),
            _ => None,
        }
    }

    /// Name of the active alternative, for diagnostics.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Variant::Bool(_) => "boolean",
            Variant::Number(_) => "number",
            Variant::Char(_) => "character",
            Variant::String(_) => "string",
            Variant::Light(_) => "light userdata",
            Variant::Userdata(_) => "userdata",
        }
    }
}

impl PartialEq for Variant {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Variant::Bool(a), Variant::Bool(b)) => a == b,
            (Variant::Number(a), Variant::Number(b)) => a == b,
            (Variant::Char(a), Variant::Char(b)) => a == b,
            (Variant::String(a), Variant::String(b)) => a == b,
            (Variant::Light(a), Variant::Light(b)) => a == b,
            // Userdata has no structural equality; identity is the contract.
            (Variant::Userdata(a), Variant::Userdata(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Bool(value) => f.debug_tuple("Bool").field(value).finish(),
            Variant::Number(value) => f.debug_tuple("Number").field(value).finish(),
            Variant::Char(value) => f.debug_tuple("Char").field(value).finish(),
            Variant::String(value) => f.debug_tuple("String").field(value).finish(),
            Variant::Light(value) => f.debug_tuple("Light").field(value).finish(),
            // `dyn Any` carries no Debug; identity is all we can show.
            Variant::Userdata(value) => write!(f, "Userdata({:p})", Arc::as_ptr(value)),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Bool(value) => write!(f, "{value}"),
            Variant::Number(value) => write!(f, "{value}"),
            Variant::Char(value) => write!(f, "{value}"),
            Variant::String(value) => write!(f, "{value}"),
            Variant::Light(value) => write!(f, "light userdata @ {:#x}", value.addr()),
            Variant::Userdata(_) => write!(f, "userdata"),
        }
    }
}

impl From<bool> for Variant {
    fn from(value: bool) -> Self {
        Variant::Bool(value)
    }
}

impl From<f64> for Variant {
    fn from(value: f64) -> Self {
        Variant::Number(value)
    }
}

impl From<i32> for Variant {
    fn from(value: i32) -> Self {
        Variant::Number(f64::from(value))
    }
}

impl From<char> for Variant {
    fn from(value: char) -> Self {
        Variant::Char(value)
    }
}

impl From<&str> for Variant {
    fn from(value: &str) -> Self {
        Variant::String(Arc::from(value))
    }
}

impl From<String> for Variant {
    fn from(value: String) -> Self {
        Variant::String(Arc::from(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversions_pick_the_right_alternative() {
        assert_eq!(Variant::from(true).type_name(), "boolean");
        assert_eq!(Variant::from(1.5).type_name(), "number");
        assert_eq!(Variant::from(42).as_number(), Some(42.0));
        assert_eq!(Variant::from('x').type_name(), "character");
        assert_eq!(Variant::from("hello").as_str(), Some("hello"));
    }

    #[test]
    fn test_string_owns_its_bytes() {
        let variant = {
            let transient = String::from("short lived");
            Variant::from(transient.as_str())
        };
        assert_eq!(variant.as_str(), Some("short lived"));
    }

    #[test]
    fn test_userdata_identity_equality() {
        let object: Arc<dyn std::any::Any + Send + Sync> = Arc::new(7u32);
        let a = Variant::Userdata(Arc::clone(&object));
        let b = Variant::Userdata(object);
        let other = Variant::Userdata(Arc::new(7u32));

        assert_eq!(a, b, "same allocation compares equal");
        assert_ne!(a, other, "equal contents in different allocations differ");
        assert_eq!(a.userdata_ref::<u32>(), Some(&7));
        assert!(a.userdata_ref::<i64>().is_none());
    }

    #[test]
    fn test_light_userdata_round_trips_pointers() {
        let mut value = 3i32;
        let handle = LightUserdata::from_ptr(&mut value);
        assert_eq!(handle.as_ptr::<i32>(), &mut value as *mut i32);
    }

    #[test]
    fn test_cross_alternative_inequality() {
        assert_ne!(Variant::from(1.0), Variant::from(true));
        assert_ne!(Variant::from("1"), Variant::from(1.0));
    }
}
