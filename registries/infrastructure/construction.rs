/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Narrow construction interfaces consumed by the registries.
//!
//! The framework never allocates views or presenters itself. Whatever
//! object-construction service the application uses is plugged in behind
//! these two traits; [`super::container`] provides a default.

use std::sync::Arc;

use thiserror::Error;

use crate::capability::{BindingKey, Capability};
use crate::error::HookError;
use crate::parameters::Parameters;
use crate::presenter::Presenter;
use crate::view::View;

#[derive(Debug, Error)]
pub enum ConstructionError {
    #[error("no provider registered for {0}")]
    NoProvider(Capability),
    #[error("no implementation mapped to {0}")]
    NoMapping(Capability),
    #[error("no presenter provider registered for {0}")]
    NoPresenterProvider(BindingKey),
    #[error("{interface} is already mapped to {existing}, not {requested}")]
    ConflictingMapping {
        interface: Capability,
        existing: Capability,
        requested: Capability,
    },
    #[error("provider for {capability} failed")]
    Failed {
        capability: Capability,
        #[source]
        source: HookError,
    },
}

pub trait ViewConstruction: Send + Sync {
    /// Associates a view capability with the implementation type that
    /// realizes it.
    fn register_mapping(
        &self,
        interface: Capability,
        implementation: Capability,
    ) -> Result<(), ConstructionError>;

    fn create_instance(
        &self,
        capability: Capability,
        parameters: &Parameters,
    ) -> Result<Arc<dyn View>, ConstructionError>;
}

pub trait PresenterConstruction: Send + Sync {
    fn has_provider(&self, key: BindingKey) -> bool;

    fn create_instance(&self, key: BindingKey) -> Result<Arc<dyn Presenter>, ConstructionError>;
}

impl<T: ViewConstruction + ?Sized> ViewConstruction for Arc<T> {
    fn register_mapping(
        &self,
        interface: Capability,
        implementation: Capability,
    ) -> Result<(), ConstructionError> {
        (**self).register_mapping(interface, implementation)
    }

    fn create_instance(
        &self,
        capability: Capability,
        parameters: &Parameters,
    ) -> Result<Arc<dyn View>, ConstructionError> {
        (**self).create_instance(capability, parameters)
    }
}

impl<T: PresenterConstruction + ?Sized> PresenterConstruction for Arc<T> {
    fn has_provider(&self, key: BindingKey) -> bool {
        (**self).has_provider(key)
    }

    fn create_instance(&self, key: BindingKey) -> Result<Arc<dyn Presenter>, ConstructionError> {
        (**self).create_instance(key)
    }
}
