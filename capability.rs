/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Runtime keys for view and presenter capabilities.
//!
//! A capability is any `'static` Rust type used as a lookup key. View
//! capabilities are usually trait-object types (`dyn DetailView`),
//! presenter capabilities are usually the concrete presenter type.

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};

#[derive(Clone, Copy)]
pub struct Capability {
    id: TypeId,
    name: &'static str,
}

impl Capability {
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.id
    }

    /// Fully qualified type name, as reported by `std::any::type_name`.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Type name without its module path (`dyn app::views::DetailView`
    /// becomes `dyn DetailView`).
    pub fn short_name(&self) -> String {
        let (prefix, path) = match self.name.strip_prefix("dyn ") {
            Some(rest) => ("dyn ", rest),
            None => ("", self.name),
        };
        let base = path.split('<').next().unwrap_or(path);
        let short = base.rsplit("::").next().unwrap_or(base);
        format!("{prefix}{short}{}", &path[base.len()..])
    }
}

impl PartialEq for Capability {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Capability {}

impl Hash for Capability {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Capability({})", self.name)
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.short_name())
    }
}

/// A view capability paired with the presenter capability that drives it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BindingKey {
    pub view: Capability,
    pub presenter: Capability,
}

impl BindingKey {
    pub fn new(view: Capability, presenter: Capability) -> Self {
        Self { view, presenter }
    }

    pub fn of<V: ?Sized + 'static, P: ?Sized + 'static>() -> Self {
        Self::new(Capability::of::<V>(), Capability::of::<P>())
    }
}

impl fmt::Display for BindingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.view, self.presenter)
    }
}
