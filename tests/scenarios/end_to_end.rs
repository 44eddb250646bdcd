/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use viewbind::diagnostics::{CHANNEL_NAVIGATOR_OPEN_SUCCEEDED, CHANNEL_VIEW_CREATED};
use viewbind::view::downcast_view;
use viewbind::{Navigate, NavigateExt, OpenMode, Presenter, View, params};

use super::harness::{DetailForm, DetailPresenter, DetailView, TestHarness};

#[test]
fn opening_detail_by_name_builds_binds_and_displays_once() {
    let mut harness = TestHarness::new();
    harness.register_detail();
    let navigator = harness.navigator();

    let view = navigator
        .open_view("detail".into(), None, params![42_i32])
        .expect("detail should open");

    let displayed = navigator.host().displayed.lock().clone();
    assert_eq!(displayed.len(), 1);
    assert_eq!(displayed[0].view, view.id());
    assert_eq!(displayed[0].name, "detail");
    assert_eq!(displayed[0].caption, "Detail View");
    assert_eq!(displayed[0].mode, OpenMode::Modal);
    assert_eq!(view.caption(), "Detail View");

    let presenter = view
        .context()
        .presenter_as::<DetailPresenter>()
        .expect("detail presenter attached");
    let presenter_view = presenter.view().expect("presenter view");
    assert_eq!(presenter_view.id(), view.id());

    let form = downcast_view::<DetailForm>(view).expect("detail form");
    assert_eq!(form.order_id(), Some(42));

    assert_eq!(
        harness.journal(),
        vec![
            "detail.presenter.on_load view=true navigator=true".to_string(),
            "detail.view.on_load presenter=true".to_string(),
        ]
    );
    assert_eq!(harness.construction_count(), 1);
    assert_eq!(harness.channel_count(CHANNEL_VIEW_CREATED), 1);
    assert_eq!(harness.channel_count(CHANNEL_NAVIGATOR_OPEN_SUCCEEDED), 1);
}

#[test]
fn opening_detail_by_capability_matches_opening_by_name() {
    let harness = TestHarness::new();
    harness.register_detail();
    let navigator = harness.navigator();

    let view = navigator
        .open::<dyn DetailView>(params![7_i32])
        .expect("detail should open by capability");

    let displayed = navigator.host().displayed.lock().clone();
    assert_eq!(displayed.len(), 1);
    assert_eq!(displayed[0].name, "detail");
    assert_eq!(
        downcast_view::<DetailForm>(view).and_then(|form| form.order_id()),
        Some(7)
    );
}

#[test]
fn presenter_can_call_back_into_the_navigator_during_load() {
    let harness = TestHarness::new();
    harness.register_detail();
    let navigator = harness.navigator();

    navigator
        .open_view("detail".into(), None, params![1_i32])
        .expect("detail should open");

    assert_eq!(
        *navigator.host().messages.lock(),
        vec!["loading detail".to_string()]
    );
}

#[test]
fn menu_item_from_config_opens_its_view() {
    let config = viewbind::FrameworkConfig::from_toml_str(
        r#"
        [[menu]]
        caption = "Orders"

        [[menu.children]]
        caption = "Detail"
        view = "detail"
        parameters = [42]
        "#,
    )
    .expect("menu config");
    let harness = TestHarness::with_config(config);
    harness.register_detail();
    let navigator = harness.navigator();
    let menu = harness.app.menu();

    let group = menu.find(&["Orders"]).expect("group header");
    let leaf = menu.find(&["Orders", "Detail"]).expect("detail item");

    assert!(!group.activate(navigator.as_ref()).expect("group is a no-op"));
    assert!(leaf.activate(navigator.as_ref()).expect("leaf opens"));
    assert_eq!(navigator.host().display_count(), 1);
    assert!(menu.unresolved(harness.app.views()).is_empty());
}
