/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Error taxonomy for registration, activation and navigation.
//!
//! Every variant is a configuration error raised synchronously by the call
//! that detects it. Nothing here is retried internally.

use std::fmt;

use thiserror::Error;

use crate::capability::{BindingKey, Capability};
use crate::config::ConfigError;
use crate::registries::ConstructionError;
use crate::view::ViewId;

/// Error type returned by view and presenter hooks and by host adapters.
pub type HookError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub type MvpResult<T> = Result<T, MvpError>;

#[derive(Debug, Error)]
pub enum MvpError {
    #[error("view {0} couldn't be found")]
    NotFound(LookupKey),
    #[error(transparent)]
    DuplicateRegistration(#[from] DuplicateRegistration),
    #[error(transparent)]
    Binding(#[from] BindingError),
    #[error("no presenter provider registered for {0}")]
    Resolution(BindingKey),
    #[error(transparent)]
    OwnerResolution(#[from] OwnerResolutionError),
    #[error("constructing {capability} failed")]
    Construction {
        capability: Capability,
        #[source]
        source: ConstructionError,
    },
    #[error("{stage} hook failed")]
    Hook {
        stage: HookStage,
        #[source]
        source: HookError,
    },
    #[error("navigation host failed to {operation}")]
    Host {
        operation: &'static str,
        #[source]
        source: HookError,
    },
    #[error("view {view} is not a {expected}")]
    TypeMismatch { expected: &'static str, view: ViewId },
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl MvpError {
    /// True for the lookup/binding failures that abort a navigation call
    /// before anything is constructed or displayed.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::NotFound(_)
                | Self::DuplicateRegistration(_)
                | Self::Binding(_)
                | Self::Resolution(_)
                | Self::OwnerResolution(_)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupKey {
    Name(String),
    Capability(Capability),
}

impl fmt::Display for LookupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => write!(f, "'{name}'"),
            Self::Capability(capability) => write!(f, "'{capability}'"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DuplicateRegistration {
    #[error("view name '{name}' is already bound to {existing}, not {requested}")]
    Name {
        name: String,
        existing: Capability,
        requested: Capability,
    },
    #[error("{capability} is already registered as '{existing}', not '{requested}'")]
    Capability {
        capability: Capability,
        existing: String,
        requested: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindingError {
    #[error("view {view} was not produced by the view registry and carries no capability")]
    Unregistered { view: ViewId },
    #[error("no presenter is paired with {view}")]
    Unbound { view: Capability },
    #[error("{view} is paired with {} presenters: {}", .presenters.len(), join(.presenters))]
    Ambiguous {
        view: Capability,
        presenters: Vec<Capability>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OwnerResolutionError {
    #[error("view {view} has no owner to refresh")]
    NoOwner { view: ViewId },
    #[error("owner {owner} exposes {found} init entry points, expected exactly one")]
    EntryPoints { owner: ViewId, found: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookStage {
    PresenterLoad,
    ViewLoad,
    OwnerInit,
    OwnerLoad,
}

impl fmt::Display for HookStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::PresenterLoad => "presenter on_load",
            Self::ViewLoad => "view on_load",
            Self::OwnerInit => "owner init",
            Self::OwnerLoad => "owner on_load",
        })
    }
}

fn join(capabilities: &[Capability]) -> String {
    capabilities
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
