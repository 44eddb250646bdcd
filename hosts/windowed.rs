/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Desktop window host.
//!
//! Tracks every window it displayed together with the window it was opened
//! from. Closing a window closes the windows it owns first, and drops the
//! host's handles so the views and their presenters are freed.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::HookError;
use crate::navigation::NavigationHost;
use crate::registries::{OpenMode, ViewDefinition};
use crate::view::{View, ViewId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowPlacement {
    pub caption: String,
    pub mode: OpenMode,
    /// Windows with an owner are centered on it.
    pub owner: Option<ViewId>,
}

/// Toolkit seam. A modal `show` may run a nested event loop; the host has
/// already recorded the window by then, so presenters inside the dialog can
/// close it or refresh its owner.
pub trait WindowSurface: Send + Sync {
    fn show(&self, view: &Arc<dyn View>, placement: &WindowPlacement) -> Result<(), HookError>;

    fn close(&self, view: ViewId) -> Result<(), HookError>;

    fn message_box(&self, message: &str) -> Result<(), HookError>;
}

struct OpenWindow {
    view: Arc<dyn View>,
    owner: Option<Arc<dyn View>>,
    mode: OpenMode,
}

pub struct WindowHost<S> {
    surface: S,
    windows: Mutex<HashMap<ViewId, OpenWindow>>,
}

impl<S: WindowSurface> WindowHost<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            windows: Mutex::new(HashMap::new()),
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn is_open(&self, view: ViewId) -> bool {
        self.windows.lock().contains_key(&view)
    }

    pub fn open_windows(&self) -> Vec<ViewId> {
        let mut ids: Vec<_> = self.windows.lock().keys().copied().collect();
        ids.sort();
        ids
    }

    pub fn mode_of(&self, view: ViewId) -> Option<OpenMode> {
        self.windows.lock().get(&view).map(|window| window.mode)
    }

    /// For toolkits that close windows on their own (title bar button):
    /// forgets the window and everything it owns without calling back into
    /// the surface for `view` itself.
    pub fn window_closed(&self, view: ViewId) {
        let owned = self.detach_tree(view);
        for id in owned.into_iter().filter(|id| *id != view) {
            if let Err(error) = self.surface.close(id) {
                log::warn!("window_host: closing owned window {} failed: {}", id, error);
            }
        }
    }

    /// Removes `root` and every window transitively owned by it. Returns the
    /// removed ids, owned windows before their owners.
    fn detach_tree(&self, root: ViewId) -> Vec<ViewId> {
        let mut windows = self.windows.lock();
        if !windows.contains_key(&root) {
            return Vec::new();
        }

        let mut order = vec![root];
        let mut visited = HashSet::from([root]);
        let mut index = 0;
        while index < order.len() {
            let current = order[index];
            let owned: Vec<_> = windows
                .iter()
                .filter(|(_, window)| {
                    window.owner.as_ref().map(|owner| owner.id()) == Some(current)
                })
                .map(|(id, _)| *id)
                .collect();
            for id in owned {
                if visited.insert(id) {
                    order.push(id);
                }
            }
            index += 1;
        }

        // Handles are dropped after the lock is released.
        let detached: Vec<_> = order.iter().filter_map(|id| windows.remove(id)).collect();
        drop(windows);
        drop(detached);

        order.reverse();
        order
    }
}

impl<S: WindowSurface> NavigationHost for WindowHost<S> {
    fn display(
        &self,
        view: &Arc<dyn View>,
        definition: &ViewDefinition,
        owner: Option<&Arc<dyn View>>,
    ) -> Result<(), HookError> {
        // A shared instance reopened from itself is not its own owner.
        let owner = owner.filter(|owner| owner.id() != view.id());
        let placement = WindowPlacement {
            caption: view.caption(),
            mode: definition.open_mode(),
            owner: owner.map(|owner| owner.id()),
        };
        self.windows.lock().insert(
            view.id(),
            OpenWindow {
                view: Arc::clone(view),
                owner: owner.cloned(),
                mode: placement.mode,
            },
        );

        if let Err(error) = self.surface.show(view, &placement) {
            self.windows.lock().remove(&view.id());
            return Err(error);
        }
        Ok(())
    }

    fn notify(&self, message: &str) -> Result<(), HookError> {
        self.surface.message_box(message)
    }

    fn dismiss(&self, view: &Arc<dyn View>) -> Result<(), HookError> {
        let closed = self.detach_tree(view.id());
        if closed.is_empty() {
            log::debug!("window_host: {} is not an open window", view.id());
            return Ok(());
        }
        for id in closed {
            self.surface.close(id)?;
        }
        Ok(())
    }

    fn owner_of(&self, view: &Arc<dyn View>) -> Option<Arc<dyn View>> {
        self.windows
            .lock()
            .get(&view.id())
            .and_then(|window| window.owner.clone())
    }
}

impl<S> std::fmt::Debug for WindowHost<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let windows = self.windows.lock();
        f.debug_struct("WindowHost")
            .field(
                "windows",
                &windows
                    .values()
                    .map(|window| (window.view.id(), window.mode))
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}
