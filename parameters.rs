/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Opaque, positional navigation parameters.
//!
//! The navigator never looks inside these values. They are handed to the
//! view constructor (and to owner init entry points on refresh) in the
//! order the caller supplied them.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

pub type Parameter = Arc<dyn Any + Send + Sync>;

#[derive(Clone, Default)]
pub struct Parameters {
    values: Vec<Parameter>,
}

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<T: Any + Send + Sync>(mut self, value: T) -> Self {
        self.push(value);
        self
    }

    pub fn push<T: Any + Send + Sync>(&mut self, value: T) {
        self.values.push(Arc::new(value));
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Typed read of the value at `index`. `None` when the index is out of
    /// range or the value has a different type.
    pub fn get<T: Any>(&self, index: usize) -> Option<&T> {
        self.values
            .get(index)
            .and_then(|value| (**value).downcast_ref::<T>())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Parameter> {
        self.values.iter()
    }
}

impl fmt::Debug for Parameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parameters")
            .field("len", &self.values.len())
            .finish()
    }
}

impl FromIterator<Parameter> for Parameters {
    fn from_iter<I: IntoIterator<Item = Parameter>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// Builds [`Parameters`] from a list of values: `params![42, "open"]`.
#[macro_export]
macro_rules! params {
    () => {
        $crate::parameters::Parameters::new()
    };
    ($($value:expr),+ $(,)?) => {
        $crate::parameters::Parameters::new()$(.with($value))+
    };
}
