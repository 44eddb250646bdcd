/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Host-agnostic navigation.
//!
//! [`Navigate`] is the object-safe surface presenters and application code
//! call. [`Navigator`] implements it for any [`NavigationHost`], which owns
//! every visual effect (showing, closing, message boxes, redirects).

mod host;
mod navigator;
mod phase;

use std::fmt;
use std::sync::Arc;

pub use host::{NavigationHost, reinitialize};
pub use navigator::Navigator;
pub use phase::{NavigationEvent, NavigationPhase, NavigationTrace, next_phase};

use crate::capability::Capability;
use crate::error::{LookupKey, MvpError, MvpResult};
use crate::parameters::Parameters;
use crate::view::{View, downcast_view};

/// What to open: a registered name or a view capability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewTarget {
    Name(String),
    Capability(Capability),
}

impl ViewTarget {
    pub fn of<C: ?Sized + 'static>() -> Self {
        Self::Capability(Capability::of::<C>())
    }
}

impl From<&str> for ViewTarget {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for ViewTarget {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<Capability> for ViewTarget {
    fn from(capability: Capability) -> Self {
        Self::Capability(capability)
    }
}

impl From<ViewTarget> for LookupKey {
    fn from(target: ViewTarget) -> Self {
        match target {
            ViewTarget::Name(name) => Self::Name(name),
            ViewTarget::Capability(capability) => Self::Capability(capability),
        }
    }
}

impl fmt::Display for ViewTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => f.write_str(name),
            Self::Capability(capability) => write!(f, "{capability}"),
        }
    }
}

pub trait Navigate: Send + Sync {
    /// Builds, binds and displays a view. `owner` is the view the new one
    /// is opened from, if any.
    fn open_view(
        &self,
        target: ViewTarget,
        owner: Option<Arc<dyn View>>,
        parameters: Parameters,
    ) -> MvpResult<Arc<dyn View>>;

    /// Builds and binds a view without displaying it.
    fn get_view(&self, target: ViewTarget, parameters: Parameters) -> MvpResult<Arc<dyn View>>;

    fn close_view(&self, view: &Arc<dyn View>) -> MvpResult<()>;

    /// Re-runs the init entry point and `on_load` of the view that opened
    /// `view`.
    fn refresh_parent_view(&self, view: &Arc<dyn View>, parameters: Parameters) -> MvpResult<()>;

    fn show_message(&self, message: &str) -> MvpResult<()>;
}

/// Typed conveniences over [`Navigate`].
pub trait NavigateExt: Navigate {
    fn open<C: ?Sized + 'static>(&self, parameters: Parameters) -> MvpResult<Arc<dyn View>> {
        self.open_view(ViewTarget::of::<C>(), None, parameters)
    }

    fn open_owned<C: ?Sized + 'static>(
        &self,
        owner: &Arc<dyn View>,
        parameters: Parameters,
    ) -> MvpResult<Arc<dyn View>> {
        self.open_view(ViewTarget::of::<C>(), Some(Arc::clone(owner)), parameters)
    }

    fn get<C: ?Sized + 'static>(&self, parameters: Parameters) -> MvpResult<Arc<dyn View>> {
        self.get_view(ViewTarget::of::<C>(), parameters)
    }

    /// `get_view` followed by a downcast to the concrete view type.
    fn get_as<T: View>(
        &self,
        target: impl Into<ViewTarget>,
        parameters: Parameters,
    ) -> MvpResult<Arc<T>> {
        let view = self.get_view(target.into(), parameters)?;
        let id = view.id();
        downcast_view::<T>(view).ok_or(MvpError::TypeMismatch {
            expected: std::any::type_name::<T>(),
            view: id,
        })
    }
}

impl<N: Navigate + ?Sized> NavigateExt for N {}
