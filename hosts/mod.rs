/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Reference [`NavigationHost`](crate::NavigationHost) implementations.
//!
//! Both are toolkit-agnostic: the toolkit plugs in through a narrow seam
//! ([`WindowSurface`], [`ResponseSink`]).

pub mod redirect;
pub mod windowed;

pub use redirect::{RedirectHost, ResponseSink};
pub use windowed::{WindowHost, WindowPlacement, WindowSurface};
