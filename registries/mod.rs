/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Registries are split the same way as the rest of the framework:
//! `atomic` holds the keyed tables (view definitions, presenter pairings),
//! `infrastructure` holds the construction boundary and link-time
//! registration.

pub mod atomic;
pub mod infrastructure;

pub use atomic::{OpenMode, PresenterFactory, RegistrationOutcome, ViewDefinition, ViewRegistry};
pub use infrastructure::{
    ConstructionError, Lifetime, PresenterConstruction, PresenterContainer, StaticRegistration,
    ViewConstruction, ViewContainer,
};
