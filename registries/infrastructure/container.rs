/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Default provider tables behind the construction interfaces.
//!
//! Applications that already own an object-construction service implement
//! [`ViewConstruction`] / [`PresenterConstruction`] over it instead.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};

use super::construction::{ConstructionError, PresenterConstruction, ViewConstruction};
use crate::capability::{BindingKey, Capability};
use crate::error::HookError;
use crate::parameters::Parameters;
use crate::presenter::Presenter;
use crate::view::View;

/// Instance lifetime policy of a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lifetime {
    /// A new instance per request.
    #[default]
    Transient,
    /// One instance, built on first request and handed out afterwards.
    Shared,
}

type BuildFn<T> = Box<dyn Fn(&Parameters) -> Result<Arc<T>, HookError> + Send + Sync>;

struct Provider<T: ?Sized> {
    lifetime: Lifetime,
    build: BuildFn<T>,
    shared: Mutex<Option<Arc<T>>>,
}

impl<T: ?Sized> Provider<T> {
    fn new(lifetime: Lifetime, build: BuildFn<T>) -> Self {
        Self {
            lifetime,
            build,
            shared: Mutex::new(None),
        }
    }

    fn resolve(
        &self,
        capability: Capability,
        parameters: &Parameters,
    ) -> Result<Arc<T>, ConstructionError> {
        let build = || {
            (self.build)(parameters)
                .map_err(|source| ConstructionError::Failed { capability, source })
        };

        match self.lifetime {
            Lifetime::Transient => build(),
            Lifetime::Shared => {
                let mut slot = self.shared.lock();
                if let Some(instance) = slot.as_ref() {
                    return Ok(Arc::clone(instance));
                }
                let instance = build()?;
                *slot = Some(Arc::clone(&instance));
                Ok(instance)
            }
        }
    }
}

#[derive(Default)]
pub struct ViewContainer {
    providers: RwLock<HashMap<Capability, Arc<Provider<dyn View>>>>,
    mappings: RwLock<HashMap<Capability, Capability>>,
}

impl ViewContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers how to build implementation type `I`. Replaces any earlier
    /// provider for `I`.
    pub fn provide<I, F>(&self, lifetime: Lifetime, build: F) -> &Self
    where
        I: View,
        F: Fn(&Parameters) -> Result<I, HookError> + Send + Sync + 'static,
    {
        let build: BuildFn<dyn View> = Box::new(move |parameters| {
            let view: Arc<dyn View> = Arc::new(build(parameters)?);
            Ok(view)
        });
        self.providers.write().insert(
            Capability::of::<I>(),
            Arc::new(Provider::new(lifetime, build)),
        );
        self
    }

    pub fn provides(&self, implementation: Capability) -> bool {
        self.providers.read().contains_key(&implementation)
    }

    pub fn mapping(&self, interface: Capability) -> Option<Capability> {
        self.mappings.read().get(&interface).copied()
    }
}

impl ViewConstruction for ViewContainer {
    fn register_mapping(
        &self,
        interface: Capability,
        implementation: Capability,
    ) -> Result<(), ConstructionError> {
        let mut mappings = self.mappings.write();
        match mappings.get(&interface) {
            Some(existing) if *existing != implementation => {
                Err(ConstructionError::ConflictingMapping {
                    interface,
                    existing: *existing,
                    requested: implementation,
                })
            }
            Some(_) => Ok(()),
            None => {
                mappings.insert(interface, implementation);
                Ok(())
            }
        }
    }

    fn create_instance(
        &self,
        capability: Capability,
        parameters: &Parameters,
    ) -> Result<Arc<dyn View>, ConstructionError> {
        let mapped = self.mapping(capability);
        let implementation = mapped.unwrap_or(capability);
        let provider = self.providers.read().get(&implementation).cloned();

        match (provider, mapped) {
            (Some(provider), _) => provider.resolve(implementation, parameters),
            (None, Some(_)) => Err(ConstructionError::NoProvider(implementation)),
            (None, None) => Err(ConstructionError::NoMapping(capability)),
        }
    }
}

#[derive(Default)]
pub struct PresenterContainer {
    providers: RwLock<HashMap<BindingKey, Arc<Provider<dyn Presenter>>>>,
}

impl PresenterContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers how to build presenter `P` for views of capability `V`.
    pub fn provide<V, P, F>(&self, lifetime: Lifetime, build: F) -> &Self
    where
        V: ?Sized + 'static,
        P: Presenter,
        F: Fn() -> Result<P, HookError> + Send + Sync + 'static,
    {
        let build: BuildFn<dyn Presenter> = Box::new(move |_| {
            let presenter: Arc<dyn Presenter> = Arc::new(build()?);
            Ok(presenter)
        });
        self.providers.write().insert(
            BindingKey::of::<V, P>(),
            Arc::new(Provider::new(lifetime, build)),
        );
        self
    }
}

impl PresenterConstruction for PresenterContainer {
    fn has_provider(&self, key: BindingKey) -> bool {
        self.providers.read().contains_key(&key)
    }

    fn create_instance(&self, key: BindingKey) -> Result<Arc<dyn Presenter>, ConstructionError> {
        let provider = self
            .providers
            .read()
            .get(&key)
            .cloned()
            .ok_or(ConstructionError::NoPresenterProvider(key))?;
        provider.resolve(key.presenter, &Parameters::new())
    }
}
