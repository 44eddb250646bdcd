/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use std::sync::Arc;

use parking_lot::Mutex;
use viewbind::error::{HookError, OwnerResolutionError};
use viewbind::hosts::{RedirectHost, ResponseSink, WindowHost, WindowPlacement, WindowSurface};
use viewbind::{
    FrameworkConfig, MvpError, Navigate, NavigationHost, OpenMode, View, ViewId, params,
};

use super::harness::TestHarness;

#[derive(Default)]
struct DesktopSurface {
    shown: Mutex<Vec<(ViewId, WindowPlacement)>>,
    closed: Mutex<Vec<ViewId>>,
    boxes: Mutex<Vec<String>>,
}

impl WindowSurface for DesktopSurface {
    fn show(&self, view: &Arc<dyn View>, placement: &WindowPlacement) -> Result<(), HookError> {
        self.shown.lock().push((view.id(), placement.clone()));
        Ok(())
    }

    fn close(&self, view: ViewId) -> Result<(), HookError> {
        self.closed.lock().push(view);
        Ok(())
    }

    fn message_box(&self, message: &str) -> Result<(), HookError> {
        self.boxes.lock().push(message.to_string());
        Ok(())
    }
}

#[derive(Default)]
struct Response {
    redirects: Mutex<Vec<String>>,
}

impl ResponseSink for Response {
    fn redirect(&self, location: &str) -> Result<(), HookError> {
        self.redirects.lock().push(location.to_string());
        Ok(())
    }
}

fn desktop_harness() -> TestHarness {
    let config = FrameworkConfig::from_toml_str(
        r#"
        [views.summary]
        open_mode = "non_modal"
        "#,
    )
    .expect("config");
    let harness = TestHarness::with_config(config);
    harness.register_detail();
    harness.register_summaries();
    harness
}

#[test]
fn window_host_shows_modal_and_non_modal_windows_with_owner() {
    let harness = desktop_harness();
    let navigator = harness.app.navigator(WindowHost::new(DesktopSurface::default()));

    let summary = navigator
        .open_view("summary".into(), None, params![])
        .expect("summary");
    let detail = navigator
        .open_view("detail".into(), Some(summary.clone()), params![5_i32])
        .expect("detail");

    let host = navigator.host();
    assert_eq!(host.mode_of(summary.id()), Some(OpenMode::NonModal));
    assert_eq!(host.mode_of(detail.id()), Some(OpenMode::Modal));

    let shown = host.surface().shown.lock().clone();
    assert_eq!(shown.len(), 2);
    assert_eq!(shown[1].1.owner, Some(summary.id()));
    assert_eq!(shown[1].1.caption, "Detail View");
    // The detail presenter's load-time message lands in a message box.
    assert_eq!(
        *host.surface().boxes.lock(),
        vec!["loading detail".to_string()]
    );
}

#[test]
fn window_host_refreshes_the_tracked_owner() {
    let harness = desktop_harness();
    let navigator = harness.app.navigator(WindowHost::new(DesktopSurface::default()));
    let summary = navigator
        .open_view("summary".into(), None, params![])
        .expect("summary");
    let detail = navigator
        .open_view("detail".into(), Some(summary), params![])
        .expect("detail");
    harness.journal.lock().clear();

    navigator
        .refresh_parent_view(&detail, params![12_i32])
        .expect("refresh");

    assert_eq!(
        harness.journal(),
        vec![
            "summary.init_view(12)".to_string(),
            "summary.on_load".to_string()
        ]
    );
}

#[test]
fn closing_an_owner_closes_its_windows_and_frees_views_and_presenters() {
    let harness = desktop_harness();
    let navigator = harness.app.navigator(WindowHost::new(DesktopSurface::default()));
    let summary = navigator
        .open_view("summary".into(), None, params![])
        .expect("summary");
    let detail = navigator
        .open_view("detail".into(), Some(summary.clone()), params![])
        .expect("detail");
    let detail_id = detail.id();
    let weak_detail = Arc::downgrade(&detail);
    let weak_presenter = Arc::downgrade(&detail.presenter().expect("presenter"));
    drop(detail);

    navigator.close_view(&summary).expect("close summary");

    let host = navigator.host();
    assert_eq!(*host.surface().closed.lock(), vec![detail_id, summary.id()]);
    assert!(host.open_windows().is_empty());
    assert!(weak_detail.upgrade().is_none());
    assert!(weak_presenter.upgrade().is_none());
}

#[test]
fn redirect_host_sends_the_client_to_the_view_route() {
    let harness = desktop_harness();
    let navigator = harness.app.navigator(RedirectHost::new(Response::default()));

    let view = navigator
        .open_view("detail".into(), None, params![])
        .expect("detail");
    navigator.close_view(&view).expect("close is a no-op");
    navigator.show_message("ignored").expect("notify is a no-op");

    assert_eq!(
        *navigator.host().sink().redirects.lock(),
        vec!["/detail/Index".to_string()]
    );
    assert!(matches!(
        navigator.refresh_parent_view(&view, params![]),
        Err(MvpError::OwnerResolution(OwnerResolutionError::NoOwner { .. }))
    ));
}

#[test]
fn reopening_a_shared_window_from_itself_closes_cleanly() {
    let harness = desktop_harness();
    harness.register_shared();
    let navigator = harness.app.navigator(WindowHost::new(DesktopSurface::default()));

    let main = navigator
        .open_view("main".into(), None, params![])
        .expect("main");
    let again = navigator
        .open_view("main".into(), Some(main.clone()), params![])
        .expect("main reopened from itself");
    assert_eq!(again.id(), main.id());

    let host = navigator.host();
    assert!(host.owner_of(&main).is_none());

    navigator.close_view(&main).expect("close main");

    assert_eq!(*host.surface().closed.lock(), vec![main.id()]);
    assert!(host.open_windows().is_empty());
}
