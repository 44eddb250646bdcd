/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Presenter pairings and the presenter construction boundary.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::capability::{BindingKey, Capability};
use crate::diagnostics::{
    CHANNEL_PRESENTER_CREATE_FAILED, CHANNEL_PRESENTER_PAIRING_CONFLICT,
    CHANNEL_PRESENTER_REGISTERED, Diagnostics,
};
use crate::error::{MvpError, MvpResult};
use crate::presenter::Presenter;
use crate::registries::infrastructure::{ConstructionError, PresenterConstruction};

pub struct PresenterFactory {
    /// View capability -> presenter capabilities, in registration order.
    pairings: Mutex<HashMap<Capability, Vec<Capability>>>,
    construction: Arc<dyn PresenterConstruction>,
    diagnostics: Diagnostics,
}

impl PresenterFactory {
    pub fn new(construction: Arc<dyn PresenterConstruction>) -> Self {
        Self::with_diagnostics(construction, Diagnostics::disabled())
    }

    pub fn with_diagnostics(
        construction: Arc<dyn PresenterConstruction>,
        diagnostics: Diagnostics,
    ) -> Self {
        Self {
            pairings: Mutex::new(HashMap::new()),
            construction,
            diagnostics,
        }
    }

    /// Pairs view capability `VC` with presenter `P`. Returns `false` when
    /// the identical pair was already recorded.
    pub fn register<VC, P>(&self) -> bool
    where
        VC: ?Sized + 'static,
        P: Presenter,
    {
        self.register_pair(BindingKey::of::<VC, P>())
    }

    pub fn register_pair(&self, key: BindingKey) -> bool {
        let mut pairings = self.pairings.lock();
        let presenters = pairings.entry(key.view).or_default();
        if presenters.contains(&key.presenter) {
            log::debug!("presenter_factory: {} already paired", key);
            return false;
        }
        if !presenters.is_empty() {
            // Recorded anyway; activation through a bare handle reports the
            // ambiguity.
            log::warn!(
                "presenter_factory: {} now has {} presenters, adding {}",
                key.view,
                presenters.len() + 1,
                key.presenter
            );
            self.diagnostics
                .emit(CHANNEL_PRESENTER_PAIRING_CONFLICT, key.view.name());
        }
        presenters.push(key.presenter);
        log::debug!("presenter_factory: paired {}", key);
        self.diagnostics
            .emit(CHANNEL_PRESENTER_REGISTERED, key.presenter.name());
        true
    }

    pub fn presenter_capabilities_for(&self, view: Capability) -> Vec<Capability> {
        self.pairings
            .lock()
            .get(&view)
            .cloned()
            .unwrap_or_default()
    }

    pub fn is_paired(&self, key: BindingKey) -> bool {
        self.pairings
            .lock()
            .get(&key.view)
            .is_some_and(|presenters| presenters.contains(&key.presenter))
    }

    /// Builds a presenter for the exact pair. Instance reuse is the
    /// construction collaborator's policy.
    pub fn create(&self, key: BindingKey) -> MvpResult<Arc<dyn Presenter>> {
        if !self.construction.has_provider(key) {
            self.diagnostics
                .emit(CHANNEL_PRESENTER_CREATE_FAILED, key.presenter.name());
            return Err(MvpError::Resolution(key));
        }
        self.construction.create_instance(key).map_err(|source| {
            self.diagnostics
                .emit(CHANNEL_PRESENTER_CREATE_FAILED, key.presenter.name());
            match source {
                ConstructionError::NoPresenterProvider(key) => MvpError::Resolution(key),
                source => MvpError::Construction {
                    capability: key.presenter,
                    source,
                },
            }
        })
    }
}

impl fmt::Debug for PresenterFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PresenterFactory")
            .field("pairings", &*self.pairings.lock())
            .finish()
    }
}
