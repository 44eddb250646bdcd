/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Diagnostics channels for registration, activation and navigation.
//!
//! Components hold a cloneable [`Diagnostics`] emitter. Events travel over an
//! unbounded `crossbeam_channel` to a [`DiagnosticsState`], which aggregates
//! them when drained. An emitter with no state behind it drops everything.

use std::collections::HashMap;

use crossbeam_channel::{Receiver, Sender, unbounded};

use crate::navigation::NavigationPhase;

pub const CHANNEL_VIEW_REGISTERED: &str = "registry.view.registered";
pub const CHANNEL_VIEW_REGISTRATION_CONFLICT: &str = "registry.view.registration_conflict";
pub const CHANNEL_VIEW_LOOKUP_FAILED: &str = "registry.view.lookup_failed";
pub const CHANNEL_VIEW_CREATED: &str = "registry.view.created";
pub const CHANNEL_PRESENTER_REGISTERED: &str = "registry.presenter.registered";
pub const CHANNEL_PRESENTER_PAIRING_CONFLICT: &str = "registry.presenter.pairing_conflict";
pub const CHANNEL_PRESENTER_CREATE_FAILED: &str = "registry.presenter.create_failed";
pub const CHANNEL_STATIC_REGISTRATION_INSTALLED: &str = "registry.static.installed";
pub const CHANNEL_STATIC_REGISTRATION_FAILED: &str = "registry.static.failed";
pub const CHANNEL_ACTIVATION_SUCCEEDED: &str = "activation.succeeded";
pub const CHANNEL_ACTIVATION_BINDING_FAILED: &str = "activation.binding_failed";
pub const CHANNEL_ACTIVATION_HOOK_FAILED: &str = "activation.hook_failed";
pub const CHANNEL_NAVIGATOR_OPEN_STARTED: &str = "navigator.open.started";
pub const CHANNEL_NAVIGATOR_OPEN_SUCCEEDED: &str = "navigator.open.succeeded";
pub const CHANNEL_NAVIGATOR_OPEN_FAILED: &str = "navigator.open.failed";
pub const CHANNEL_NAVIGATOR_GET_SUCCEEDED: &str = "navigator.get.succeeded";
pub const CHANNEL_NAVIGATOR_GET_FAILED: &str = "navigator.get.failed";
pub const CHANNEL_NAVIGATOR_CLOSE: &str = "navigator.close";
pub const CHANNEL_NAVIGATOR_REFRESH_SUCCEEDED: &str = "navigator.refresh.succeeded";
pub const CHANNEL_NAVIGATOR_REFRESH_FAILED: &str = "navigator.refresh.failed";
pub const CHANNEL_NAVIGATOR_MESSAGE: &str = "navigator.message";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DiagnosticEvent {
    Message {
        channel_id: &'static str,
        subject: String,
    },
    Transition(PhaseTransition),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PhaseTransition {
    pub operation: &'static str,
    pub from: NavigationPhase,
    pub to: NavigationPhase,
}

/// Cloneable emitter handed to every component.
#[derive(Clone, Debug, Default)]
pub struct Diagnostics {
    tx: Option<Sender<DiagnosticEvent>>,
}

impl Diagnostics {
    pub fn disabled() -> Self {
        Self { tx: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.tx.is_some()
    }

    pub fn emit(&self, channel_id: &'static str, subject: &str) {
        self.send(DiagnosticEvent::Message {
            channel_id,
            subject: subject.to_string(),
        });
    }

    pub fn transition(&self, operation: &'static str, from: NavigationPhase, to: NavigationPhase) {
        self.send(DiagnosticEvent::Transition(PhaseTransition {
            operation,
            from,
            to,
        }));
    }

    fn send(&self, event: DiagnosticEvent) {
        if let Some(tx) = &self.tx {
            // The receiving state may already be gone during teardown.
            let _ = tx.send(event);
        }
    }
}

pub struct DiagnosticsState {
    event_tx: Sender<DiagnosticEvent>,
    event_rx: Receiver<DiagnosticEvent>,
    message_counts: HashMap<&'static str, u64>,
    last_subjects: HashMap<&'static str, String>,
    transitions: Vec<PhaseTransition>,
}

impl DiagnosticsState {
    pub fn new() -> Self {
        let (event_tx, event_rx) = unbounded();
        Self {
            event_tx,
            event_rx,
            message_counts: HashMap::new(),
            last_subjects: HashMap::new(),
            transitions: Vec::new(),
        }
    }

    pub fn emitter(&self) -> Diagnostics {
        Diagnostics {
            tx: Some(self.event_tx.clone()),
        }
    }

    /// Folds every pending event into the aggregates. Returns how many were
    /// consumed.
    pub fn drain(&mut self) -> usize {
        let mut drained = 0;
        while let Ok(event) = self.event_rx.try_recv() {
            self.aggregate_event(event);
            drained += 1;
        }
        drained
    }

    fn aggregate_event(&mut self, event: DiagnosticEvent) {
        match event {
            DiagnosticEvent::Message {
                channel_id,
                subject,
            } => {
                *self.message_counts.entry(channel_id).or_insert(0) += 1;
                self.last_subjects.insert(channel_id, subject);
            }
            DiagnosticEvent::Transition(transition) => self.transitions.push(transition),
        }
    }

    pub fn channel_count(&self, channel_id: &str) -> u64 {
        self.message_counts.get(channel_id).copied().unwrap_or(0)
    }

    pub fn last_subject(&self, channel_id: &str) -> Option<&str> {
        self.last_subjects.get(channel_id).map(String::as_str)
    }

    pub fn transitions(&self) -> &[PhaseTransition] {
        &self.transitions
    }

    /// Transitions recorded for one operation (`"open"`, `"get"`, ...), in order.
    pub fn transitions_for(&self, operation: &str) -> Vec<PhaseTransition> {
        self.transitions
            .iter()
            .filter(|transition| transition.operation == operation)
            .copied()
            .collect()
    }

    pub fn clear(&mut self) {
        self.message_counts.clear();
        self.last_subjects.clear();
        self.transitions.clear();
    }
}

impl Default for DiagnosticsState {
    fn default() -> Self {
        Self::new()
    }
}
