/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Presenter resolution and two-phase wiring.
//!
//! Resolution looks up the presenter pairings recorded for a view capability:
//! the one a view was requested under, or, for a bare handle, the one the
//! view registry stamped on it. Exactly one pairing must exist. Wiring then
//! runs in a fixed order:
//!
//! 1. the presenter factory builds the presenter,
//! 2. the presenter gets its view reference,
//! 3. the presenter gets its navigator reference,
//! 4. presenter `on_load`,
//! 5. the view gets its presenter,
//! 6. view `on_load`.

use std::sync::{Arc, Weak};

use crate::capability::{BindingKey, Capability};
use crate::diagnostics::{
    CHANNEL_ACTIVATION_BINDING_FAILED, CHANNEL_ACTIVATION_HOOK_FAILED,
    CHANNEL_ACTIVATION_SUCCEEDED, Diagnostics,
};
use crate::error::{BindingError, HookStage, MvpError, MvpResult};
use crate::navigation::Navigate;
use crate::presenter::{Presenter, downcast_presenter};
use crate::registries::PresenterFactory;
use crate::view::View;

#[derive(Debug, Clone)]
pub struct ActivationEngine {
    presenters: Arc<PresenterFactory>,
    diagnostics: Diagnostics,
}

impl ActivationEngine {
    pub fn new(presenters: Arc<PresenterFactory>, diagnostics: Diagnostics) -> Self {
        Self {
            presenters,
            diagnostics,
        }
    }

    /// Which presenter the given view needs, from the view handle alone.
    pub fn resolve(&self, view: &dyn View) -> Result<BindingKey, BindingError> {
        let capability = view
            .context()
            .capability()
            .ok_or(BindingError::Unregistered { view: view.id() })?;
        self.resolve_for(capability)
    }

    pub fn resolve_for(&self, capability: Capability) -> Result<BindingKey, BindingError> {
        let mut presenters = self.presenters.presenter_capabilities_for(capability);
        match presenters.len() {
            0 => Err(BindingError::Unbound { view: capability }),
            1 => Ok(BindingKey::new(capability, presenters.remove(0))),
            _ => Err(BindingError::Ambiguous {
                view: capability,
                presenters,
            }),
        }
    }

    pub fn activate(
        &self,
        view: &Arc<dyn View>,
        navigator: Weak<dyn Navigate>,
    ) -> MvpResult<Arc<dyn Presenter>> {
        let resolved = self.resolve(view.as_ref());
        self.bind_resolved(resolved, view, navigator)
    }

    /// Activation for a view requested under `capability`. A shared instance
    /// registered under several capabilities gets the presenter paired with
    /// the one asked for, whatever it was first stamped with.
    pub fn activate_for(
        &self,
        capability: Capability,
        view: &Arc<dyn View>,
        navigator: Weak<dyn Navigate>,
    ) -> MvpResult<Arc<dyn Presenter>> {
        let resolved = self.resolve_for(capability);
        self.bind_resolved(resolved, view, navigator)
    }

    fn bind_resolved(
        &self,
        resolved: Result<BindingKey, BindingError>,
        view: &Arc<dyn View>,
        navigator: Weak<dyn Navigate>,
    ) -> MvpResult<Arc<dyn Presenter>> {
        let key = resolved.inspect_err(|error| {
            log::debug!("activation: {} not bound: {}", view.id(), error);
            self.diagnostics
                .emit(CHANNEL_ACTIVATION_BINDING_FAILED, &view.id().to_string());
        })?;
        self.bind(key, view, navigator)
    }

    /// Activation with a known pair, skipping resolution. The pair still has
    /// to be registered with the presenter factory.
    pub fn activate_with<VC, P>(
        &self,
        view: &Arc<dyn View>,
        navigator: Weak<dyn Navigate>,
    ) -> MvpResult<Arc<P>>
    where
        VC: ?Sized + 'static,
        P: Presenter,
    {
        let key = BindingKey::of::<VC, P>();
        if !self.presenters.is_paired(key) {
            self.diagnostics
                .emit(CHANNEL_ACTIVATION_BINDING_FAILED, &view.id().to_string());
            return Err(BindingError::Unbound { view: key.view }.into());
        }

        let presenter = self.bind(key, view, navigator)?;
        downcast_presenter::<P>(presenter).ok_or(MvpError::TypeMismatch {
            expected: std::any::type_name::<P>(),
            view: view.id(),
        })
    }

    fn bind(
        &self,
        key: BindingKey,
        view: &Arc<dyn View>,
        navigator: Weak<dyn Navigate>,
    ) -> MvpResult<Arc<dyn Presenter>> {
        let presenter = self.presenters.create(key)?;

        presenter.context().attach_view(view);
        presenter.context().attach_navigator(navigator);
        presenter
            .on_load()
            .map_err(|source| self.hook_failed(HookStage::PresenterLoad, key, source))?;

        view.context().attach_presenter(Arc::clone(&presenter));
        view.on_load()
            .map_err(|source| self.hook_failed(HookStage::ViewLoad, key, source))?;

        log::debug!("activation: bound {} as {}", view.id(), key);
        self.diagnostics
            .emit(CHANNEL_ACTIVATION_SUCCEEDED, key.view.name());
        Ok(presenter)
    }

    fn hook_failed(
        &self,
        stage: HookStage,
        key: BindingKey,
        source: crate::error::HookError,
    ) -> MvpError {
        log::debug!("activation: {} failed for {}: {}", stage, key, source);
        self.diagnostics
            .emit(CHANNEL_ACTIVATION_HOOK_FAILED, key.view.name());
        MvpError::Hook { stage, source }
    }
}
