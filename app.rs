/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Application context.
//!
//! Owns the view registry, the presenter factory and the activation engine
//! for one application. Navigators created from it share those; nothing in
//! the crate is process-global apart from link-time registrations.

use std::fmt;
use std::sync::Arc;

use crate::activation::ActivationEngine;
use crate::config::FrameworkConfig;
use crate::diagnostics::{
    CHANNEL_STATIC_REGISTRATION_FAILED, CHANNEL_STATIC_REGISTRATION_INSTALLED, Diagnostics,
};
use crate::error::MvpResult;
use crate::menu::Menu;
use crate::navigation::{NavigationHost, Navigator};
use crate::presenter::Presenter;
use crate::registries::infrastructure::discover_static_registrations;
use crate::registries::{
    PresenterConstruction, PresenterContainer, PresenterFactory, RegistrationOutcome,
    StaticRegistration, ViewConstruction, ViewContainer, ViewRegistry,
};
use crate::view::View;

pub struct MvpApplication {
    views: Arc<ViewRegistry>,
    presenters: Arc<PresenterFactory>,
    activation: ActivationEngine,
    config: FrameworkConfig,
    diagnostics: Diagnostics,
}

impl MvpApplication {
    pub fn builder() -> MvpApplicationBuilder {
        MvpApplicationBuilder::default()
    }

    pub fn views(&self) -> &Arc<ViewRegistry> {
        &self.views
    }

    pub fn presenters(&self) -> &Arc<PresenterFactory> {
        &self.presenters
    }

    pub fn activation(&self) -> &ActivationEngine {
        &self.activation
    }

    pub fn config(&self) -> &FrameworkConfig {
        &self.config
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn register_view<C, I>(&self, name: &str, caption: &str) -> MvpResult<RegistrationOutcome>
    where
        C: ?Sized + 'static,
        I: View,
    {
        self.views.register::<C, I>(name, caption)
    }

    pub fn register_presenter<VC, P>(&self) -> bool
    where
        VC: ?Sized + 'static,
        P: Presenter,
    {
        self.presenters.register::<VC, P>()
    }

    pub fn navigator<H: NavigationHost + 'static>(&self, host: H) -> Arc<Navigator<H>> {
        Navigator::new(
            Arc::clone(&self.views),
            self.activation.clone(),
            host,
            self.diagnostics.clone(),
        )
    }

    /// The configured `[[menu]]` tree.
    pub fn menu(&self) -> Menu {
        Menu::from_config(&self.config.menu)
    }

    pub fn install(&self, registration: &StaticRegistration) -> MvpResult<()> {
        match (registration.install)(self) {
            Ok(()) => {
                log::debug!("app: installed static registration '{}'", registration.name);
                self.diagnostics
                    .emit(CHANNEL_STATIC_REGISTRATION_INSTALLED, registration.name);
                Ok(())
            }
            Err(error) => {
                self.diagnostics
                    .emit(CHANNEL_STATIC_REGISTRATION_FAILED, registration.name);
                Err(error)
            }
        }
    }
}

impl fmt::Debug for MvpApplication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MvpApplication")
            .field("views", &self.views)
            .field("presenters", &self.presenters)
            .finish()
    }
}

#[derive(Default)]
pub struct MvpApplicationBuilder {
    view_construction: Option<Arc<dyn ViewConstruction>>,
    presenter_construction: Option<Arc<dyn PresenterConstruction>>,
    config: FrameworkConfig,
    diagnostics: Diagnostics,
    static_registrations: bool,
}

impl MvpApplicationBuilder {
    pub fn view_construction(mut self, construction: impl ViewConstruction + 'static) -> Self {
        self.view_construction = Some(Arc::new(construction));
        self
    }

    pub fn presenter_construction(
        mut self,
        construction: impl PresenterConstruction + 'static,
    ) -> Self {
        self.presenter_construction = Some(Arc::new(construction));
        self
    }

    pub fn config(mut self, config: FrameworkConfig) -> Self {
        self.config = config;
        self
    }

    pub fn diagnostics(mut self, diagnostics: Diagnostics) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// Installs every `inventory`-submitted [`StaticRegistration`], in name
    /// order, once the context is built.
    pub fn with_static_registrations(mut self) -> Self {
        self.static_registrations = true;
        self
    }

    pub fn build(self) -> MvpResult<MvpApplication> {
        let view_construction = self.view_construction.unwrap_or_else(|| {
            log::debug!("app: no view construction supplied, using an empty container");
            Arc::new(ViewContainer::new())
        });
        let presenter_construction = self.presenter_construction.unwrap_or_else(|| {
            log::debug!("app: no presenter construction supplied, using an empty container");
            Arc::new(PresenterContainer::new())
        });

        let views = Arc::new(ViewRegistry::with_config(
            view_construction,
            &self.config,
            self.diagnostics.clone(),
        ));
        let presenters = Arc::new(PresenterFactory::with_diagnostics(
            presenter_construction,
            self.diagnostics.clone(),
        ));
        let activation = ActivationEngine::new(Arc::clone(&presenters), self.diagnostics.clone());

        let app = MvpApplication {
            views,
            presenters,
            activation,
            config: self.config,
            diagnostics: self.diagnostics,
        };

        if self.static_registrations {
            for registration in discover_static_registrations() {
                app.install(registration)?;
            }
        }

        Ok(app)
    }
}
