/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use std::fmt;

use crate::diagnostics::Diagnostics;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavigationPhase {
    Idle,
    Activating,
    /// Bound but not shown. Terminal for `get_view`.
    Activated,
    Displayed,
    Refreshing,
    Refreshed,
    Closed,
    Aborted,
}

impl NavigationPhase {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::Displayed | Self::Refreshed | Self::Closed | Self::Aborted
        )
    }
}

impl fmt::Display for NavigationPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Idle => "idle",
            Self::Activating => "activating",
            Self::Activated => "activated",
            Self::Displayed => "displayed",
            Self::Refreshing => "refreshing",
            Self::Refreshed => "refreshed",
            Self::Closed => "closed",
            Self::Aborted => "aborted",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationEvent {
    OpenRequested,
    GetRequested,
    BindingCompleted,
    HostDisplayed,
    CloseRequested,
    RefreshRequested,
    OwnerReinitialized,
    Failed,
}

/// Transition table. `None` means the event is not valid in that phase.
pub fn next_phase(phase: NavigationPhase, event: NavigationEvent) -> Option<NavigationPhase> {
    use NavigationEvent as E;
    use NavigationPhase as P;

    match (phase, event) {
        (P::Idle, E::OpenRequested | E::GetRequested) => Some(P::Activating),
        (P::Activating, E::BindingCompleted) => Some(P::Activated),
        (P::Activated, E::HostDisplayed) => Some(P::Displayed),
        (P::Idle, E::CloseRequested) => Some(P::Closed),
        (P::Idle, E::RefreshRequested) => Some(P::Refreshing),
        (P::Refreshing, E::OwnerReinitialized) => Some(P::Refreshed),
        (phase, E::Failed) if !phase.is_terminal() => Some(P::Aborted),
        _ => None,
    }
}

/// Per-call walk through the phase table. Navigators keep no phase between
/// calls; each operation starts a fresh trace at `Idle`.
#[derive(Debug)]
pub struct NavigationTrace {
    operation: &'static str,
    phase: NavigationPhase,
    diagnostics: Diagnostics,
}

impl NavigationTrace {
    pub fn begin(operation: &'static str, diagnostics: Diagnostics) -> Self {
        Self {
            operation,
            phase: NavigationPhase::Idle,
            diagnostics,
        }
    }

    pub fn phase(&self) -> NavigationPhase {
        self.phase
    }

    pub fn operation(&self) -> &'static str {
        self.operation
    }

    pub fn advance(&mut self, event: NavigationEvent) -> NavigationPhase {
        match next_phase(self.phase, event) {
            Some(next) => {
                log::debug!(
                    "navigator: {} {} -> {} ({:?})",
                    self.operation,
                    self.phase,
                    next,
                    event
                );
                self.diagnostics.transition(self.operation, self.phase, next);
                self.phase = next;
            }
            None => log::warn!(
                "navigator: {} ignoring {:?} in phase {}",
                self.operation,
                event,
                self.phase
            ),
        }
        self.phase
    }

    pub fn abort(&mut self) -> NavigationPhase {
        self.advance(NavigationEvent::Failed)
    }
}
