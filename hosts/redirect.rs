/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Request/response host. Opening a view redirects the client to the
//! view's route; there are no windows to close, owners to refresh or
//! message boxes to show.

use std::sync::Arc;

use crate::error::HookError;
use crate::navigation::NavigationHost;
use crate::registries::ViewDefinition;
use crate::view::View;

pub const DEFAULT_ACTION: &str = "Index";

pub trait ResponseSink: Send + Sync {
    fn redirect(&self, location: &str) -> Result<(), HookError>;
}

#[derive(Debug)]
pub struct RedirectHost<S> {
    sink: S,
    action: String,
}

impl<S: ResponseSink> RedirectHost<S> {
    pub fn new(sink: S) -> Self {
        Self::with_action(sink, DEFAULT_ACTION)
    }

    pub fn with_action(sink: S, action: &str) -> Self {
        Self {
            sink,
            action: action.to_string(),
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn route_for(&self, view_name: &str) -> String {
        format!("/{}/{}", view_name, self.action)
    }
}

impl<S: ResponseSink> NavigationHost for RedirectHost<S> {
    /// Open mode and owner are meaningless for a redirect.
    fn display(
        &self,
        _view: &Arc<dyn View>,
        definition: &ViewDefinition,
        _owner: Option<&Arc<dyn View>>,
    ) -> Result<(), HookError> {
        let location = self.route_for(definition.name());
        log::debug!("redirect_host: redirecting to {}", location);
        self.sink.redirect(&location)
    }

    fn notify(&self, _message: &str) -> Result<(), HookError> {
        Ok(())
    }

    fn dismiss(&self, _view: &Arc<dyn View>) -> Result<(), HookError> {
        Ok(())
    }

    fn owner_of(&self, _view: &Arc<dyn View>) -> Option<Arc<dyn View>> {
        None
    }
}
