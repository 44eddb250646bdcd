/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use viewbind::diagnostics::{CHANNEL_ACTIVATION_BINDING_FAILED, CHANNEL_NAVIGATOR_OPEN_FAILED};
use viewbind::error::BindingError;
use viewbind::navigation::NavigationPhase;
use viewbind::{Capability, MvpError, Navigate, Presenter, View, params};

use super::harness::{
    AltPresenter, AuditPresenter, AuditView, MainPresenter, MainView, ReviewPresenter,
    TestHarness,
};

#[test]
fn view_without_presenter_pairing_is_unbound_and_never_displayed() {
    let mut harness = TestHarness::new();
    harness.register_audit();
    let navigator = harness.navigator();

    let result = navigator.open_view("audit".into(), None, params![]);

    assert!(matches!(
        result,
        Err(MvpError::Binding(BindingError::Unbound { .. }))
    ));
    assert_eq!(navigator.host().display_count(), 0);
    assert_eq!(harness.channel_count(CHANNEL_ACTIVATION_BINDING_FAILED), 1);
}

#[test]
fn two_presenter_pairings_are_fatal() {
    let mut harness = TestHarness::new();
    harness.register_audit();
    harness.app.register_presenter::<dyn AuditView, AuditPresenter>();
    harness.app.register_presenter::<dyn AuditView, ReviewPresenter>();
    let navigator = harness.navigator();

    let result = navigator.open_view("audit".into(), None, params![]);

    match result {
        Err(MvpError::Binding(BindingError::Ambiguous { presenters, .. })) => {
            assert_eq!(presenters.len(), 2);
        }
        other => panic!("expected ambiguity, got {:?}", other.map(|view| view.id())),
    }
    assert_eq!(navigator.host().display_count(), 0);
    assert_eq!(harness.channel_count(CHANNEL_NAVIGATOR_OPEN_FAILED), 1);

    harness.diagnostics.drain();
    let phases: Vec<_> = harness
        .diagnostics
        .transitions_for("open")
        .iter()
        .map(|transition| transition.to)
        .collect();
    assert_eq!(
        phases,
        vec![NavigationPhase::Activating, NavigationPhase::Aborted]
    );
}

#[test]
fn presenter_and_navigator_are_set_before_presenter_load() {
    let harness = TestHarness::new();
    harness.register_detail();
    let navigator = harness.navigator();

    navigator
        .open_view("detail".into(), None, params![3_i32])
        .expect("detail should open");

    let journal = harness.journal();
    assert_eq!(journal.len(), 2);
    assert!(journal[0].starts_with("detail.presenter.on_load"));
    assert!(journal[0].ends_with("view=true navigator=true"));
    assert_eq!(journal[1], "detail.view.on_load presenter=true");
}

#[test]
fn presenter_loses_its_navigator_when_the_navigator_is_dropped() {
    let harness = TestHarness::new();
    harness.register_detail();
    let navigator = harness.navigator();

    let view = navigator
        .get_view("detail".into(), params![])
        .expect("detail should build");
    let presenter = view.presenter().expect("presenter attached");
    assert!(presenter.navigator().is_some());

    drop(navigator);

    assert!(presenter.navigator().is_none());
    assert!(presenter.view().is_some());
}

#[test]
fn shared_instance_binds_the_presenter_of_the_name_it_was_opened_under() {
    let harness = TestHarness::new();
    harness.register_shared();
    let navigator = harness.navigator();

    let main = navigator
        .get_view("main".into(), params![])
        .expect("main should build");
    assert!(main.context().presenter_as::<MainPresenter>().is_some());

    let alt = navigator
        .get_view("alt".into(), params![])
        .expect("alt should build");

    assert_eq!(alt.id(), main.id());
    assert_eq!(alt.caption(), "Alt");
    assert!(alt.context().presenter_as::<AltPresenter>().is_some());
    assert_eq!(
        alt.context().capability(),
        Some(Capability::of::<dyn MainView>())
    );
    assert_eq!(harness.presenter_creation_count(), 2);
}
