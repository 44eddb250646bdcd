/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! The presenter side of a binding.
//!
//! The view owns its presenter. The presenter refers back to its view and
//! to the navigator weakly, so dismissing a view frees both.

use std::fmt;
use std::sync::{Arc, Weak};

use parking_lot::RwLock;

use crate::error::HookError;
use crate::navigation::Navigate;
use crate::view::{IntoAny, View};

pub trait Presenter: IntoAny {
    fn context(&self) -> &PresenterContext;

    /// Runs once the view and navigator references are set, before the
    /// view's own `on_load`.
    fn on_load(&self) -> Result<(), HookError> {
        Ok(())
    }

    fn view(&self) -> Option<Arc<dyn View>> {
        self.context().view()
    }

    fn navigator(&self) -> Option<Arc<dyn Navigate>> {
        self.context().navigator()
    }
}

#[derive(Default)]
pub struct PresenterContext {
    view: RwLock<Option<Weak<dyn View>>>,
    navigator: RwLock<Option<Weak<dyn Navigate>>>,
}

impl PresenterContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> Option<Arc<dyn View>> {
        self.view.read().as_ref().and_then(Weak::upgrade)
    }

    /// Typed access to the bound view.
    pub fn view_as<T: View>(&self) -> Option<Arc<T>> {
        self.view().and_then(crate::view::downcast_view)
    }

    pub fn navigator(&self) -> Option<Arc<dyn Navigate>> {
        self.navigator.read().as_ref().and_then(Weak::upgrade)
    }

    pub fn is_bound(&self) -> bool {
        self.view().is_some() && self.navigator().is_some()
    }

    pub(crate) fn attach_view(&self, view: &Arc<dyn View>) {
        *self.view.write() = Some(Arc::downgrade(view));
    }

    pub(crate) fn attach_navigator(&self, navigator: Weak<dyn Navigate>) {
        *self.navigator.write() = Some(navigator);
    }
}

impl fmt::Debug for PresenterContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PresenterContext")
            .field("view", &self.view().map(|view| view.id()))
            .field("has_navigator", &self.navigator().is_some())
            .finish()
    }
}

pub fn downcast_presenter<P: Presenter>(presenter: Arc<dyn Presenter>) -> Option<Arc<P>> {
    presenter.into_any().downcast::<P>().ok()
}
