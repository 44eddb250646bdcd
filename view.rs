/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! The view side of a binding.
//!
//! A view embeds a [`ViewContext`] holding the state the framework writes
//! into it (caption, registered capability, presenter). Implementors only
//! provide `context()` and override hooks as needed.

use std::any::Any;
use std::fmt;
use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;
use uuid::Uuid;

use crate::capability::Capability;
use crate::error::HookError;
use crate::parameters::Parameters;
use crate::presenter::Presenter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId(Uuid);

impl ViewId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ViewId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

/// Type-erasure helper implemented for every sized `Send + Sync` type, so
/// `Arc<dyn View>` and `Arc<dyn Presenter>` can be downcast.
pub trait IntoAny: Any + Send + Sync {
    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any + Send + Sync> IntoAny for T {
    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

pub trait View: IntoAny {
    fn context(&self) -> &ViewContext;

    /// Runs after the presenter is attached and loaded.
    fn on_load(&self) -> Result<(), HookError> {
        Ok(())
    }

    /// Names of the entry points an owner refresh may invoke. Refreshing
    /// requires exactly one.
    fn init_entry_points(&self) -> Vec<&'static str> {
        Vec::new()
    }

    fn invoke_init(&self, entry_point: &str, _parameters: &Parameters) -> Result<(), HookError> {
        Err(format!("view has no init entry point '{entry_point}'").into())
    }

    fn id(&self) -> ViewId {
        self.context().id()
    }

    fn caption(&self) -> String {
        self.context().caption()
    }

    fn set_caption(&self, caption: &str) {
        self.context().set_caption(caption);
    }

    fn presenter(&self) -> Option<Arc<dyn Presenter>> {
        self.context().presenter()
    }
}

/// Framework-owned state embedded in every view.
pub struct ViewContext {
    id: ViewId,
    caption: RwLock<String>,
    capability: OnceLock<Capability>,
    presenter: RwLock<Option<Arc<dyn Presenter>>>,
}

impl ViewContext {
    pub fn new() -> Self {
        Self {
            id: ViewId::new(),
            caption: RwLock::new(String::new()),
            capability: OnceLock::new(),
            presenter: RwLock::new(None),
        }
    }

    pub fn id(&self) -> ViewId {
        self.id
    }

    pub fn caption(&self) -> String {
        self.caption.read().clone()
    }

    pub fn set_caption(&self, caption: &str) {
        *self.caption.write() = caption.to_string();
    }

    /// The capability this instance was created for, set by the view
    /// registry. `None` for views built outside the registry.
    pub fn capability(&self) -> Option<Capability> {
        self.capability.get().copied()
    }

    /// First stamp wins; a shared instance handed out twice keeps the
    /// capability it was first created for.
    pub(crate) fn stamp_capability(&self, capability: Capability) {
        if let Err(rejected) = self.capability.set(capability)
            && self.capability.get() != Some(&rejected)
        {
            log::debug!(
                "view: {} already stamped as {:?}, ignoring {}",
                self.id,
                self.capability.get(),
                rejected
            );
        }
    }

    pub fn presenter(&self) -> Option<Arc<dyn Presenter>> {
        self.presenter.read().clone()
    }

    pub(crate) fn attach_presenter(&self, presenter: Arc<dyn Presenter>) {
        *self.presenter.write() = Some(presenter);
    }

    /// Typed access to the attached presenter.
    pub fn presenter_as<P: Presenter>(&self) -> Option<Arc<P>> {
        self.presenter().and_then(crate::presenter::downcast_presenter)
    }
}

impl Default for ViewContext {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ViewContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewContext")
            .field("id", &self.id)
            .field("caption", &*self.caption.read())
            .field("capability", &self.capability.get())
            .field("has_presenter", &self.presenter.read().is_some())
            .finish()
    }
}

/// Recovers the concrete view type behind a type-erased handle.
pub fn downcast_view<T: View>(view: Arc<dyn View>) -> Option<Arc<T>> {
    view.into_any().downcast::<T>().ok()
}
