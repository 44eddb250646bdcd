/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Named view definitions.
//!
//! Two maps kept in lockstep under a single lock: `name -> definition` and
//! `capability -> name`. Every registered capability has exactly one name
//! and every name exactly one capability.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::capability::Capability;
use crate::config::{FrameworkConfig, ViewOverride};
use crate::diagnostics::{
    CHANNEL_VIEW_CREATED, CHANNEL_VIEW_LOOKUP_FAILED, CHANNEL_VIEW_REGISTERED,
    CHANNEL_VIEW_REGISTRATION_CONFLICT, Diagnostics,
};
use crate::error::{DuplicateRegistration, LookupKey, MvpError, MvpResult};
use crate::parameters::Parameters;
use crate::registries::infrastructure::ViewConstruction;
use crate::view::View;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpenMode {
    #[default]
    Modal,
    NonModal,
}

impl fmt::Display for OpenMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Modal => "modal",
            Self::NonModal => "non_modal",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewDefinition {
    name: String,
    capability: Capability,
    caption: String,
    open_mode: OpenMode,
}

impl ViewDefinition {
    pub fn new(
        name: impl Into<String>,
        capability: Capability,
        caption: impl Into<String>,
        open_mode: OpenMode,
    ) -> Self {
        Self {
            name: name.into(),
            capability,
            caption: caption.into(),
            open_mode,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn capability(&self) -> Capability {
        self.capability
    }

    pub fn caption(&self) -> &str {
        &self.caption
    }

    pub fn open_mode(&self) -> OpenMode {
        self.open_mode
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationOutcome {
    Registered,
    /// Same name, same capability: the first definition is kept.
    AlreadyRegistered,
}

#[derive(Default)]
struct RegistryState {
    definitions: HashMap<String, Arc<ViewDefinition>>,
    names: HashMap<Capability, String>,
}

pub struct ViewRegistry {
    state: Mutex<RegistryState>,
    construction: Arc<dyn ViewConstruction>,
    default_open_mode: OpenMode,
    overrides: HashMap<String, ViewOverride>,
    diagnostics: Diagnostics,
}

impl ViewRegistry {
    pub fn new(construction: Arc<dyn ViewConstruction>) -> Self {
        Self::with_config(construction, &FrameworkConfig::default(), Diagnostics::disabled())
    }

    pub fn with_config(
        construction: Arc<dyn ViewConstruction>,
        config: &FrameworkConfig,
        diagnostics: Diagnostics,
    ) -> Self {
        Self {
            state: Mutex::new(RegistryState::default()),
            construction,
            default_open_mode: config.navigation.default_open_mode,
            overrides: config.views.clone(),
            diagnostics,
        }
    }

    /// Registers capability `C` under `name`, realized by implementation `I`.
    pub fn register<C, I>(&self, name: &str, caption: &str) -> MvpResult<RegistrationOutcome>
    where
        C: ?Sized + 'static,
        I: View,
    {
        self.register_definition(
            name,
            Capability::of::<C>(),
            Capability::of::<I>(),
            caption,
            None,
        )
    }

    pub fn register_with_mode<C, I>(
        &self,
        name: &str,
        caption: &str,
        open_mode: OpenMode,
    ) -> MvpResult<RegistrationOutcome>
    where
        C: ?Sized + 'static,
        I: View,
    {
        self.register_definition(
            name,
            Capability::of::<C>(),
            Capability::of::<I>(),
            caption,
            Some(open_mode),
        )
    }

    /// Untyped registration. `open_mode: None` takes the configured default.
    /// Configured `[views.<name>]` overrides win over the given caption and
    /// open mode.
    pub fn register_definition(
        &self,
        name: &str,
        capability: Capability,
        implementation: Capability,
        caption: &str,
        open_mode: Option<OpenMode>,
    ) -> MvpResult<RegistrationOutcome> {
        let mut state = self.state.lock();

        if let Some(existing) = state.definitions.get(name) {
            if existing.capability() != capability {
                self.diagnostics
                    .emit(CHANNEL_VIEW_REGISTRATION_CONFLICT, name);
                return Err(DuplicateRegistration::Name {
                    name: name.to_string(),
                    existing: existing.capability(),
                    requested: capability,
                }
                .into());
            }
            if existing.caption() != caption {
                log::warn!(
                    "registry: '{}' re-registered with caption '{}', keeping '{}'",
                    name,
                    caption,
                    existing.caption()
                );
            }
            log::debug!("registry: '{}' already registered as {}", name, capability);
            return Ok(RegistrationOutcome::AlreadyRegistered);
        }

        if let Some(existing) = state.names.get(&capability) {
            self.diagnostics
                .emit(CHANNEL_VIEW_REGISTRATION_CONFLICT, name);
            return Err(DuplicateRegistration::Capability {
                capability,
                existing: existing.clone(),
                requested: name.to_string(),
            }
            .into());
        }

        self.construction
            .register_mapping(capability, implementation)
            .map_err(|source| MvpError::Construction { capability, source })?;

        let overrides = self.overrides.get(name);
        let definition = ViewDefinition::new(
            name,
            capability,
            overrides
                .and_then(|o| o.caption.as_deref())
                .unwrap_or(caption),
            resolve_open_mode(overrides, open_mode, self.default_open_mode),
        );
        log::debug!(
            "registry: registered '{}' as {} ({}, {})",
            name,
            capability,
            implementation,
            definition.open_mode()
        );

        state.names.insert(capability, name.to_string());
        state
            .definitions
            .insert(name.to_string(), Arc::new(definition));
        self.diagnostics.emit(CHANNEL_VIEW_REGISTERED, name);

        Ok(RegistrationOutcome::Registered)
    }

    /// Lookup by name.
    pub fn definition(&self, name: &str) -> MvpResult<Arc<ViewDefinition>> {
        let found = self.state.lock().definitions.get(name).cloned();
        found.ok_or_else(|| {
            self.diagnostics.emit(CHANNEL_VIEW_LOOKUP_FAILED, name);
            MvpError::NotFound(LookupKey::Name(name.to_string()))
        })
    }

    /// Lookup by capability.
    pub fn name_of(&self, capability: Capability) -> MvpResult<String> {
        let found = self.state.lock().names.get(&capability).cloned();
        found.ok_or_else(|| {
            self.diagnostics
                .emit(CHANNEL_VIEW_LOOKUP_FAILED, capability.name());
            MvpError::NotFound(LookupKey::Capability(capability))
        })
    }

    pub fn definition_of<C: ?Sized + 'static>(&self) -> MvpResult<Arc<ViewDefinition>> {
        self.definition_for(Capability::of::<C>())
    }

    pub fn definition_for(&self, capability: Capability) -> MvpResult<Arc<ViewDefinition>> {
        let name = self.name_of(capability)?;
        self.definition(&name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.state.lock().definitions.contains_key(name)
    }

    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.state.lock().definitions.keys().cloned().collect();
        names.sort();
        names
    }

    /// Builds a view for `name` and stamps the definition's caption and
    /// capability onto it.
    pub fn create_view(&self, name: &str, parameters: &Parameters) -> MvpResult<Arc<dyn View>> {
        let definition = self.definition(name)?;
        self.instantiate(&definition, parameters)
    }

    /// Construction runs outside the registry lock so view constructors may
    /// build child views through the registry.
    pub fn instantiate(
        &self,
        definition: &ViewDefinition,
        parameters: &Parameters,
    ) -> MvpResult<Arc<dyn View>> {
        let capability = definition.capability();
        let view = self
            .construction
            .create_instance(capability, parameters)
            .map_err(|source| MvpError::Construction { capability, source })?;

        view.set_caption(definition.caption());
        view.context().stamp_capability(capability);
        self.diagnostics.emit(CHANNEL_VIEW_CREATED, definition.name());
        log::debug!(
            "registry: created '{}' view {}",
            definition.name(),
            view.id()
        );

        Ok(view)
    }
}

impl fmt::Debug for ViewRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewRegistry")
            .field("names", &self.names())
            .finish()
    }
}

fn resolve_open_mode(
    overrides: Option<&ViewOverride>,
    requested: Option<OpenMode>,
    default: OpenMode,
) -> OpenMode {
    overrides
        .and_then(|o| o.open_mode)
        .or(requested)
        .unwrap_or(default)
}
