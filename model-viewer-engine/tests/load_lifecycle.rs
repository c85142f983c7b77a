use bevy::prelude::Vec3;
use model_viewer_engine::engine::loading::lifecycle::{
    LifecycleError, LoadError, LoadLifecycle, LoadPhase, StatusSeverity, VisibleContent,
};

const EXTENTS: Vec3 = Vec3::new(2.0, 4.0, 8.0);
const CENTRE: Vec3 = Vec3::new(1.0, 2.0, -1.5);

#[test]
fn starts_empty_with_nothing_visible() {
    let lifecycle = LoadLifecycle::new();
    assert!(matches!(lifecycle.phase(), LoadPhase::Empty));
    assert_eq!(lifecycle.visible_content(), VisibleContent::Nothing);
}

#[test]
fn initialize_shows_placeholder_and_is_one_shot() {
    let mut lifecycle = LoadLifecycle::new();
    assert!(lifecycle.initialize());
    assert!(matches!(lifecycle.phase(), LoadPhase::FallbackShown));
    assert_eq!(lifecycle.visible_content(), VisibleContent::Placeholder);
    // A second call must not respawn placeholder content.
    assert!(!lifecycle.initialize());
}

#[test]
fn start_load_requires_placeholder() {
    let mut lifecycle = LoadLifecycle::new();
    let err = lifecycle.start_load("models/a.glb", 10_000, 0.0).unwrap_err();
    assert_eq!(err, LifecycleError::NotInitialised);
}

#[test]
fn double_start_is_rejected_not_double_issued() {
    let mut lifecycle = LoadLifecycle::new();
    lifecycle.initialize();
    lifecycle.start_load("models/a.glb", 10_000, 0.0).expect("start");
    let err = lifecycle.start_load("models/a.glb", 10_000, 1.0).unwrap_err();
    assert_eq!(err, LifecycleError::LoadInFlight);
}

// Property 1: exactly one of placeholder/model visible at every step.
#[test]
fn always_visible_through_success_sequence() {
    let mut lifecycle = LoadLifecycle::new();
    lifecycle.initialize();
    assert_eq!(lifecycle.visible_content(), VisibleContent::Placeholder);
    let ticket = lifecycle.start_load("models/a.glb", 10_000, 0.0).expect("start");
    assert_eq!(lifecycle.visible_content(), VisibleContent::Placeholder);
    lifecycle.on_progress(ticket, Some(0.4));
    assert_eq!(lifecycle.visible_content(), VisibleContent::Placeholder);
    lifecycle.on_success(ticket, EXTENTS, CENTRE, 100.0).expect("placement");
    assert_eq!(lifecycle.visible_content(), VisibleContent::Model);
}

#[test]
fn always_visible_through_failure_sequence() {
    let mut lifecycle = LoadLifecycle::new();
    lifecycle.initialize();
    let ticket = lifecycle.start_load("models/a.glb", 10_000, 0.0).expect("start");
    lifecycle.on_failure(
        ticket,
        LoadError::NetworkOrParse(String::from("404")),
        100.0,
    );
    assert_eq!(lifecycle.visible_content(), VisibleContent::Placeholder);
}

// Property 2: only the first resolution has any effect.
#[test]
fn at_most_one_resolution_success_first() {
    let mut lifecycle = LoadLifecycle::new();
    lifecycle.initialize();
    let ticket = lifecycle.start_load("models/a.glb", 10_000, 0.0).expect("start");
    assert!(lifecycle.on_success(ticket, EXTENTS, CENTRE, 50.0).is_some());
    // A late failure (e.g. the timer) must be a no-op.
    assert!(!lifecycle.on_failure(ticket, LoadError::Timeout(10_000), 60.0));
    assert!(matches!(lifecycle.phase(), LoadPhase::Loaded { .. }));
}

#[test]
fn at_most_one_resolution_failure_first() {
    let mut lifecycle = LoadLifecycle::new();
    lifecycle.initialize();
    let ticket = lifecycle.start_load("models/a.glb", 10_000, 0.0).expect("start");
    assert!(lifecycle.on_failure(ticket, LoadError::NetworkOrParse(String::from("bad")), 50.0));
    assert!(lifecycle.on_success(ticket, EXTENTS, CENTRE, 60.0).is_none());
    assert!(matches!(lifecycle.phase(), LoadPhase::Failed { .. }));
}

#[test]
fn timeout_beats_late_transport_callback() {
    let mut lifecycle = LoadLifecycle::new();
    lifecycle.initialize();
    let ticket = lifecycle.start_load("models/a.glb", 100, 0.0).expect("start");
    assert_eq!(lifecycle.tick(100.0), Some(LoadError::Timeout(100)));
    assert!(lifecycle.on_success(ticket, EXTENTS, CENTRE, 101.0).is_none());
    assert!(matches!(
        lifecycle.phase(),
        LoadPhase::Failed {
            error: LoadError::Timeout(100)
        }
    ));
}

// Property 3: progress never changes the phase tag; last value wins.
#[test]
fn progress_is_idempotent_and_last_wins() {
    let mut lifecycle = LoadLifecycle::new();
    lifecycle.initialize();
    let ticket = lifecycle.start_load("models/a.glb", 10_000, 0.0).expect("start");
    lifecycle.on_progress(ticket, Some(0.9));
    lifecycle.on_progress(ticket, Some(0.2));
    lifecycle.on_progress(ticket, Some(0.2));
    lifecycle.on_progress(ticket, None);
    lifecycle.on_progress(ticket, Some(0.5));
    match lifecycle.phase() {
        LoadPhase::Loading { progress } => assert_eq!(*progress, Some(0.5)),
        other => panic!("unexpected phase {other:?}"),
    }
    assert!(lifecycle.loading_text().contains("50%"));
}

#[test]
fn progress_ratio_is_clamped() {
    let mut lifecycle = LoadLifecycle::new();
    lifecycle.initialize();
    let ticket = lifecycle.start_load("models/a.glb", 10_000, 0.0).expect("start");
    lifecycle.on_progress(ticket, Some(1.7));
    match lifecycle.phase() {
        LoadPhase::Loading { progress } => assert_eq!(*progress, Some(1.0)),
        other => panic!("unexpected phase {other:?}"),
    }
}

// Property 4: extents (2,4,8) with target size 3 give scale 3/8, and the
// scaled bounding centre lands on the origin.
#[test]
fn placement_scale_and_centering() {
    let mut lifecycle = LoadLifecycle::new();
    lifecycle.initialize();
    let ticket = lifecycle.start_load("models/a.glb", 10_000, 0.0).expect("start");
    let placement = lifecycle
        .on_success(ticket, EXTENTS, CENTRE, 50.0)
        .expect("placement");
    assert_eq!(placement.scale, 0.375);
    let mapped_centre = CENTRE * placement.scale + placement.offset;
    assert!(mapped_centre.length() < 1e-6);
}

#[test]
fn degenerate_bounds_fail_instead_of_dividing_by_zero() {
    let mut lifecycle = LoadLifecycle::new();
    lifecycle.initialize();
    let ticket = lifecycle.start_load("models/a.glb", 10_000, 0.0).expect("start");
    assert!(lifecycle.on_success(ticket, Vec3::ZERO, Vec3::ZERO, 50.0).is_none());
    assert!(matches!(
        lifecycle.phase(),
        LoadPhase::Failed {
            error: LoadError::DegenerateAsset
        }
    ));
    assert_eq!(lifecycle.visible_content(), VisibleContent::Placeholder);
}

// Property 5: callbacks from a superseded request never touch new state.
#[test]
fn stale_callbacks_are_suppressed_after_reset() {
    let mut lifecycle = LoadLifecycle::new();
    lifecycle.initialize();
    let stale = lifecycle.start_load("models/a.glb", 10_000, 0.0).expect("start");

    lifecycle.reset();
    lifecycle.initialize();
    let current = lifecycle.start_load("models/b.glb", 10_000, 100.0).expect("start");

    assert!(lifecycle.on_success(stale, EXTENTS, CENTRE, 150.0).is_none());
    assert!(!lifecycle.on_failure(stale, LoadError::Timeout(10_000), 150.0));
    lifecycle.on_progress(stale, Some(0.9));
    match lifecycle.phase() {
        LoadPhase::Loading { progress } => assert_eq!(*progress, None),
        other => panic!("unexpected phase {other:?}"),
    }

    // The live ticket still resolves normally.
    assert!(lifecycle.on_success(current, EXTENTS, CENTRE, 200.0).is_some());
}

// Property 6: the banner expires on its own clock, whatever happens next.
#[test]
fn banner_expires_after_fixed_duration() {
    let mut lifecycle = LoadLifecycle::new();
    lifecycle.initialize();
    let ticket = lifecycle.start_load("models/a.glb", 10_000, 0.0).expect("start");
    lifecycle.on_failure(ticket, LoadError::NetworkOrParse(String::from("404")), 1_000.0);
    assert!(lifecycle.banner_visible(1_000.0));
    assert!(lifecycle.banner_visible(3_999.0));
    assert!(!lifecycle.banner_visible(4_000.0));
}

#[test]
fn banner_expiry_survives_reset_and_restart() {
    let mut lifecycle = LoadLifecycle::new();
    lifecycle.initialize();
    let ticket = lifecycle.start_load("models/a.glb", 10_000, 0.0).expect("start");
    lifecycle.on_failure(ticket, LoadError::NetworkOrParse(String::from("404")), 1_000.0);

    lifecycle.reset();
    lifecycle.initialize();
    lifecycle.start_load("models/a.glb", 10_000, 1_500.0).expect("start");

    assert!(lifecycle.banner_visible(2_000.0));
    assert!(!lifecycle.banner_visible(4_100.0));
}

// Scenario A: progress then success.
#[test]
fn scenario_good_asset_loads() {
    let mut lifecycle = LoadLifecycle::new();
    lifecycle.initialize();
    let ticket = lifecycle.start_load("good.glb", 10_000, 0.0).expect("start");
    lifecycle.on_progress(ticket, Some(0.5));
    lifecycle.on_success(ticket, EXTENTS, CENTRE, 500.0).expect("placement");

    assert!(matches!(lifecycle.phase(), LoadPhase::Loaded { .. }));
    assert_eq!(lifecycle.visible_content(), VisibleContent::Model);
    assert_eq!(lifecycle.status().severity, StatusSeverity::Success);
}

// Scenario B: transport failure.
#[test]
fn scenario_missing_asset_falls_back() {
    let mut lifecycle = LoadLifecycle::new();
    lifecycle.initialize();
    let ticket = lifecycle.start_load("missing.glb", 10_000, 0.0).expect("start");
    lifecycle.on_failure(
        ticket,
        LoadError::NetworkOrParse(String::from("not found")),
        200.0,
    );

    assert!(matches!(lifecycle.phase(), LoadPhase::Failed { .. }));
    assert_eq!(lifecycle.visible_content(), VisibleContent::Placeholder);
    assert_eq!(lifecycle.status().severity, StatusSeverity::Warning);
    assert!(lifecycle.banner_visible(200.0));
    assert!(!lifecycle.banner_visible(3_200.0));
}

// Scenario C: a silent transport, resolved by the timeout, must look
// exactly like scenario B apart from the error tag.
#[test]
fn scenario_timeout_matches_failure_behaviour() {
    let mut lifecycle = LoadLifecycle::new();
    lifecycle.initialize();
    lifecycle.start_load("slow.glb", 50, 0.0).expect("start");

    assert_eq!(lifecycle.tick(49.0), None);
    assert_eq!(lifecycle.tick(50.0), Some(LoadError::Timeout(50)));
    // Already resolved; a second tick must not fire again.
    assert_eq!(lifecycle.tick(51.0), None);

    assert!(matches!(
        lifecycle.phase(),
        LoadPhase::Failed {
            error: LoadError::Timeout(50)
        }
    ));
    assert_eq!(lifecycle.visible_content(), VisibleContent::Placeholder);
    assert_eq!(lifecycle.status().severity, StatusSeverity::Warning);
    assert!(lifecycle.banner_visible(51.0));
    assert!(!lifecycle.banner_visible(3_050.0));
}

#[test]
fn retry_flow_reaches_loaded_after_failure() {
    let mut lifecycle = LoadLifecycle::new();
    lifecycle.initialize();
    let ticket = lifecycle.start_load("models/a.glb", 10_000, 0.0).expect("start");
    lifecycle.on_failure(ticket, LoadError::NetworkOrParse(String::from("bad")), 100.0);

    // Terminal until reset.
    let err = lifecycle.start_load("models/a.glb", 10_000, 200.0).unwrap_err();
    assert_eq!(err, LifecycleError::AlreadyResolved);

    lifecycle.reset();
    lifecycle.initialize();
    let ticket = lifecycle.start_load("models/a.glb", 10_000, 300.0).expect("start");
    assert!(lifecycle.on_success(ticket, EXTENTS, CENTRE, 400.0).is_some());
    assert_eq!(lifecycle.visible_content(), VisibleContent::Model);
}
