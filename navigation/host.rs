/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use std::sync::Arc;

use crate::error::{HookError, HookStage, MvpError, MvpResult, OwnerResolutionError};
use crate::parameters::Parameters;
use crate::registries::ViewDefinition;
use crate::view::View;

/// The UI platform side of navigation.
///
/// The host owns displayed views. Dropping its `Arc<dyn View>` on dismissal
/// frees the view and, through it, the presenter.
pub trait NavigationHost: Send + Sync {
    fn display(
        &self,
        view: &Arc<dyn View>,
        definition: &ViewDefinition,
        owner: Option<&Arc<dyn View>>,
    ) -> Result<(), HookError>;

    fn notify(&self, message: &str) -> Result<(), HookError>;

    fn dismiss(&self, view: &Arc<dyn View>) -> Result<(), HookError>;

    /// The view `view` was opened from, if the host tracks one.
    fn owner_of(&self, view: &Arc<dyn View>) -> Option<Arc<dyn View>>;

    fn reinitialize_owner(&self, owner: &Arc<dyn View>, parameters: &Parameters) -> MvpResult<()> {
        reinitialize(owner, parameters)
    }
}

/// Invokes the owner's single init entry point with `parameters`, then its
/// `on_load`.
pub fn reinitialize(owner: &Arc<dyn View>, parameters: &Parameters) -> MvpResult<()> {
    let entry_points = owner.init_entry_points();
    let [entry_point] = entry_points.as_slice() else {
        return Err(OwnerResolutionError::EntryPoints {
            owner: owner.id(),
            found: entry_points.len(),
        }
        .into());
    };

    owner
        .invoke_init(entry_point, parameters)
        .map_err(|source| MvpError::Hook {
            stage: HookStage::OwnerInit,
            source,
        })?;
    owner.on_load().map_err(|source| MvpError::Hook {
        stage: HookStage::OwnerLoad,
        source,
    })
}
