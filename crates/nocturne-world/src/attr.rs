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

//! Named character attributes.

use std::collections::HashMap;
use std::sync::Mutex;

/// One named character attribute: a base value and the composite value
/// after modifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharAttr {
    /// The attribute name.
    pub name: String,
    /// The unmodified base value.
    pub base: i32,
    /// The effective value after modifiers.
    pub comp: i32,
}

impl CharAttr {
    /// Creates an attribute with the given values.
    #[must_use]
    pub fn new(name: impl Into<String>, base: i32, comp: i32) -> Self {
        Self {
            name: name.into(),
            base,
            comp,
        }
    }

    /// The net effect of modifiers, positive when buffed.
    #[must_use]
    pub fn modifier(&self) -> i32 {
        self.comp - self.base
    }

    /// Overwrites the values, reporting whether anything changed.
    pub fn update(&mut self, base: i32, comp: i32) -> bool {
        if (base == self.base) && (comp == self.comp) {
            return false;
        }
        self.base = base;
        self.comp = comp;
        true
    }
}

/// The attribute table, shared between the session thread writing updates
/// and UI readers.
#[derive(Debug, Default)]
pub struct AttrMap {
    attrs: Mutex<HashMap<String, CharAttr>>,
}

impl AttrMap {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies an update, creating the attribute if it is new.
    ///
    /// Returns `true` if the stored value changed.
    pub fn update(&self, name: &str, base: i32, comp: i32) -> bool {
        let mut attrs = self.attrs.lock().unwrap();
        match attrs.get_mut(name) {
            Some(attr) => attr.update(base, comp),
            None => {
                attrs.insert(name.to_owned(), CharAttr::new(name, base, comp));
                true
            }
        }
    }

    /// A snapshot of the named attribute.
    ///
    /// Unknown names read as a zeroed attribute rather than an error, so
    /// readers racing ahead of the first server update see neutral values.
    #[must_use]
    pub fn get(&self, name: &str) -> CharAttr {
        let attrs = self.attrs.lock().unwrap();
        attrs
            .get(name)
            .cloned()
            .unwrap_or_else(|| CharAttr::new(name, 0, 0))
    }

    /// The number of attributes seen so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.attrs.lock().unwrap().len()
    }

    /// Whether no attribute has been seen yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attrs.lock().unwrap().is_empty()
    }
}
