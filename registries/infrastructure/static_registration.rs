/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Link-time registration.
//!
//! A crate contributes views and presenters without touching application
//! start-up code:
//!
//! ```ignore
//! inventory::submit! {
//!     viewbind::registries::StaticRegistration {
//!         name: "orders",
//!         install: install_order_views,
//!     }
//! }
//! ```

use crate::app::MvpApplication;
use crate::error::MvpResult;

pub struct StaticRegistration {
    pub name: &'static str,
    pub install: fn(&MvpApplication) -> MvpResult<()>,
}

inventory::collect!(StaticRegistration);

/// Every submitted registration, sorted by name so installation order does
/// not depend on link order.
pub fn discover_static_registrations() -> Vec<&'static StaticRegistration> {
    let mut registrations: Vec<_> = inventory::iter::<StaticRegistration>
        .into_iter()
        .collect();
    registrations.sort_by_key(|registration| registration.name);
    registrations
}
