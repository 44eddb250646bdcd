/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! View/presenter binding and host-agnostic navigation.
//!
//! Views are registered under a stable name together with the capability
//! they realize. Presenters are paired with view capabilities explicitly.
//! A [`Navigator`] turns a name or capability into a constructed, wired
//! and displayed view, delegating every visual effect to a
//! [`NavigationHost`] supplied by the UI platform.

pub mod activation;
pub mod app;
pub mod capability;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod hosts;
pub mod menu;
pub mod navigation;
pub mod parameters;
pub mod presenter;
pub mod registries;
pub mod view;

pub use activation::ActivationEngine;
pub use app::{MvpApplication, MvpApplicationBuilder};
pub use capability::{BindingKey, Capability};
pub use config::FrameworkConfig;
pub use error::{MvpError, MvpResult};
pub use navigation::{Navigate, NavigateExt, NavigationHost, Navigator, ViewTarget};
pub use parameters::Parameters;
pub use presenter::{Presenter, PresenterContext};
pub use registries::{
    Lifetime, OpenMode, PresenterContainer, PresenterFactory, ViewContainer, ViewDefinition,
    ViewRegistry,
};
pub use view::{View, ViewContext, ViewId};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
