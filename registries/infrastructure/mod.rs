/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

pub mod construction;
pub mod container;
pub mod static_registration;

pub use construction::{ConstructionError, PresenterConstruction, ViewConstruction};
pub use container::{Lifetime, PresenterContainer, ViewContainer};
pub use static_registration::{StaticRegistration, discover_static_registrations};
