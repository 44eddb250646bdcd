/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use viewbind::diagnostics::{
    CHANNEL_STATIC_REGISTRATION_INSTALLED, CHANNEL_VIEW_REGISTERED,
    CHANNEL_VIEW_REGISTRATION_CONFLICT, DiagnosticsState,
};
use viewbind::error::{DuplicateRegistration, LookupKey};
use viewbind::registries::{RegistrationOutcome, StaticRegistration};
use viewbind::{
    Capability, FrameworkConfig, MvpApplication, MvpError, MvpResult, OpenMode, ViewContainer,
};

use super::harness::{AuditForm, DetailForm, DetailView, SummaryView, TestHarness};

#[test]
fn registered_name_and_capability_resolve_to_each_other() {
    let harness = TestHarness::new();
    harness.register_detail();
    let views = harness.app.views();

    let definition = views.definition("detail").expect("by name");
    let name = views
        .name_of(Capability::of::<dyn DetailView>())
        .expect("by capability");

    assert_eq!(name, "detail");
    assert_eq!(definition.capability(), Capability::of::<dyn DetailView>());
    assert_eq!(definition.caption(), "Detail View");
    assert_eq!(
        views.definition_of::<dyn DetailView>().expect("composed").name(),
        "detail"
    );
}

#[test]
fn duplicate_registrations_follow_first_wins() {
    let mut harness = TestHarness::new();
    harness.register_detail();

    let identical = harness
        .app
        .register_view::<dyn DetailView, DetailForm>("detail", "Detail View");
    let other_capability = harness
        .app
        .register_view::<dyn SummaryView, DetailForm>("detail", "Detail View");
    let second_name = harness
        .app
        .register_view::<dyn DetailView, DetailForm>("order_detail", "Order Detail");

    assert_eq!(
        identical.expect("identical re-registration"),
        RegistrationOutcome::AlreadyRegistered
    );
    assert!(matches!(
        other_capability,
        Err(MvpError::DuplicateRegistration(DuplicateRegistration::Name { .. }))
    ));
    assert!(matches!(
        second_name,
        Err(MvpError::DuplicateRegistration(
            DuplicateRegistration::Capability { .. }
        ))
    ));
    assert_eq!(harness.app.views().names(), vec!["detail".to_string()]);
    assert_eq!(harness.channel_count(CHANNEL_VIEW_REGISTERED), 1);
    assert_eq!(harness.channel_count(CHANNEL_VIEW_REGISTRATION_CONFLICT), 2);
}

#[test]
fn unknown_lookups_are_not_found() {
    let harness = TestHarness::new();

    let by_name = harness.app.views().definition("ghost");
    let by_type = harness.app.views().name_of(Capability::of::<AuditForm>());

    assert!(matches!(by_name, Err(MvpError::NotFound(LookupKey::Name(_)))));
    assert!(matches!(
        by_type,
        Err(MvpError::NotFound(LookupKey::Capability(_)))
    ));
}

#[test]
fn configured_overrides_apply_at_registration() {
    let config = FrameworkConfig::from_toml_str(
        r#"
        [navigation]
        default_open_mode = "non_modal"

        [views.detail]
        caption = "Order Detail"
        open_mode = "modal"
        "#,
    )
    .expect("config");
    let harness = TestHarness::with_config(config);
    harness.register_detail();
    harness.register_summaries();

    let detail = harness.app.views().definition("detail").expect("detail");
    let summary = harness.app.views().definition("summary").expect("summary");

    assert_eq!(detail.caption(), "Order Detail");
    assert_eq!(detail.open_mode(), OpenMode::Modal);
    assert_eq!(summary.caption(), "Summary");
    assert_eq!(summary.open_mode(), OpenMode::NonModal);
}

fn install_scenario_audit(app: &MvpApplication) -> MvpResult<()> {
    app.register_view::<AuditForm, AuditForm>("scenarios.audit", "Audit")?;
    Ok(())
}

inventory::submit! {
    StaticRegistration {
        name: "scenarios.audit",
        install: install_scenario_audit,
    }
}

#[test]
fn static_registrations_install_when_requested() {
    let mut diagnostics = DiagnosticsState::new();

    let app = MvpApplication::builder()
        .view_construction(ViewContainer::new())
        .diagnostics(diagnostics.emitter())
        .with_static_registrations()
        .build()
        .expect("app with static registrations");
    diagnostics.drain();

    assert!(app.views().contains("scenarios.audit"));
    assert_eq!(
        diagnostics.channel_count(CHANNEL_STATIC_REGISTRATION_INSTALLED),
        1
    );

    let plain = MvpApplication::builder().build().expect("plain app");
    assert!(!plain.views().contains("scenarios.audit"));
}
