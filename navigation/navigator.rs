/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use std::fmt;
use std::sync::{Arc, Weak};

use super::phase::{NavigationEvent, NavigationTrace};
use super::{Navigate, NavigationHost, ViewTarget};
use crate::activation::ActivationEngine;
use crate::diagnostics::{
    CHANNEL_NAVIGATOR_CLOSE, CHANNEL_NAVIGATOR_GET_FAILED, CHANNEL_NAVIGATOR_GET_SUCCEEDED,
    CHANNEL_NAVIGATOR_MESSAGE, CHANNEL_NAVIGATOR_OPEN_FAILED, CHANNEL_NAVIGATOR_OPEN_STARTED,
    CHANNEL_NAVIGATOR_OPEN_SUCCEEDED, CHANNEL_NAVIGATOR_REFRESH_FAILED,
    CHANNEL_NAVIGATOR_REFRESH_SUCCEEDED, Diagnostics,
};
use crate::error::{MvpError, MvpResult, OwnerResolutionError};
use crate::parameters::Parameters;
use crate::registries::{ViewDefinition, ViewRegistry};
use crate::view::View;

/// Drives definition lookup, construction and activation, then hands the
/// visual effect to the host.
///
/// Always lives behind an `Arc`: presenters receive a weak reference to it
/// during activation.
pub struct Navigator<H> {
    registry: Arc<ViewRegistry>,
    activation: ActivationEngine,
    host: H,
    diagnostics: Diagnostics,
    this: Weak<Navigator<H>>,
}

impl<H: NavigationHost + 'static> Navigator<H> {
    pub fn new(
        registry: Arc<ViewRegistry>,
        activation: ActivationEngine,
        host: H,
        diagnostics: Diagnostics,
    ) -> Arc<Self> {
        Arc::new_cyclic(|this| Self {
            registry,
            activation,
            host,
            diagnostics,
            this: this.clone(),
        })
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    fn weak_navigate(&self) -> Weak<dyn Navigate> {
        self.this.clone()
    }

    fn definition_for(&self, target: &ViewTarget) -> MvpResult<Arc<ViewDefinition>> {
        match target {
            ViewTarget::Name(name) => self.registry.definition(name),
            ViewTarget::Capability(capability) => self.registry.definition_for(*capability),
        }
    }

    /// Lookup, construction and activation. Lookup comes first so an
    /// unknown target never reaches the construction collaborator.
    fn build(
        &self,
        trace: &mut NavigationTrace,
        target: &ViewTarget,
        parameters: &Parameters,
    ) -> MvpResult<(Arc<ViewDefinition>, Arc<dyn View>)> {
        let definition = self.definition_for(target)?;
        let view = self.registry.instantiate(&definition, parameters)?;
        self.activation
            .activate_for(definition.capability(), &view, self.weak_navigate())?;
        trace.advance(NavigationEvent::BindingCompleted);
        Ok((definition, view))
    }

    fn open(
        &self,
        trace: &mut NavigationTrace,
        target: &ViewTarget,
        owner: Option<&Arc<dyn View>>,
        parameters: &Parameters,
    ) -> MvpResult<Arc<dyn View>> {
        let (definition, view) = self.build(trace, target, parameters)?;
        self.host
            .display(&view, &definition, owner)
            .map_err(|source| MvpError::Host {
                operation: "display",
                source,
            })?;
        trace.advance(NavigationEvent::HostDisplayed);
        log::info!(
            "navigator: displayed '{}' as {} ({})",
            definition.name(),
            view.id(),
            definition.open_mode()
        );
        Ok(view)
    }

    fn refresh(&self, view: &Arc<dyn View>, parameters: &Parameters) -> MvpResult<()> {
        let owner = self
            .host
            .owner_of(view)
            .ok_or(OwnerResolutionError::NoOwner { view: view.id() })?;
        self.host.reinitialize_owner(&owner, parameters)?;
        log::debug!("navigator: refreshed owner {} of {}", owner.id(), view.id());
        Ok(())
    }

    fn fail<T>(
        &self,
        trace: &mut NavigationTrace,
        channel_id: &'static str,
        subject: &str,
        result: MvpResult<T>,
    ) -> MvpResult<T> {
        if let Err(error) = &result {
            trace.abort();
            self.diagnostics.emit(channel_id, subject);
            log::debug!("navigator: {} '{}' failed: {}", trace.operation(), subject, error);
        }
        result
    }
}

impl<H: NavigationHost + 'static> Navigate for Navigator<H> {
    fn open_view(
        &self,
        target: ViewTarget,
        owner: Option<Arc<dyn View>>,
        parameters: Parameters,
    ) -> MvpResult<Arc<dyn View>> {
        let subject = target.to_string();
        let mut trace = NavigationTrace::begin("open", self.diagnostics.clone());
        trace.advance(NavigationEvent::OpenRequested);
        self.diagnostics
            .emit(CHANNEL_NAVIGATOR_OPEN_STARTED, &subject);

        let result = self.open(&mut trace, &target, owner.as_ref(), &parameters);
        let view = self.fail(&mut trace, CHANNEL_NAVIGATOR_OPEN_FAILED, &subject, result)?;
        self.diagnostics
            .emit(CHANNEL_NAVIGATOR_OPEN_SUCCEEDED, &subject);
        Ok(view)
    }

    fn get_view(&self, target: ViewTarget, parameters: Parameters) -> MvpResult<Arc<dyn View>> {
        let subject = target.to_string();
        let mut trace = NavigationTrace::begin("get", self.diagnostics.clone());
        trace.advance(NavigationEvent::GetRequested);

        let result = self
            .build(&mut trace, &target, &parameters)
            .map(|(_, view)| view);
        let view = self.fail(&mut trace, CHANNEL_NAVIGATOR_GET_FAILED, &subject, result)?;
        self.diagnostics
            .emit(CHANNEL_NAVIGATOR_GET_SUCCEEDED, &subject);
        Ok(view)
    }

    fn close_view(&self, view: &Arc<dyn View>) -> MvpResult<()> {
        let mut trace = NavigationTrace::begin("close", self.diagnostics.clone());
        self.host.dismiss(view).map_err(|source| {
            trace.abort();
            MvpError::Host {
                operation: "dismiss",
                source,
            }
        })?;
        trace.advance(NavigationEvent::CloseRequested);
        self.diagnostics
            .emit(CHANNEL_NAVIGATOR_CLOSE, &view.id().to_string());
        log::info!("navigator: closed {}", view.id());
        Ok(())
    }

    fn refresh_parent_view(&self, view: &Arc<dyn View>, parameters: Parameters) -> MvpResult<()> {
        let subject = view.id().to_string();
        let mut trace = NavigationTrace::begin("refresh", self.diagnostics.clone());
        trace.advance(NavigationEvent::RefreshRequested);

        let result = self.refresh(view, &parameters);
        self.fail(&mut trace, CHANNEL_NAVIGATOR_REFRESH_FAILED, &subject, result)?;
        trace.advance(NavigationEvent::OwnerReinitialized);
        self.diagnostics
            .emit(CHANNEL_NAVIGATOR_REFRESH_SUCCEEDED, &subject);
        Ok(())
    }

    fn show_message(&self, message: &str) -> MvpResult<()> {
        self.host.notify(message).map_err(|source| MvpError::Host {
            operation: "notify",
            source,
        })?;
        self.diagnostics.emit(CHANNEL_NAVIGATOR_MESSAGE, message);
        Ok(())
    }
}

impl<H> fmt::Debug for Navigator<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Navigator")
            .field("registry", &self.registry)
            .field("host", &std::any::type_name::<H>())
            .finish()
    }
}
