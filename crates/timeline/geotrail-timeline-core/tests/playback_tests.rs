use chrono::NaiveDate;
use geotrail_timeline_core::{
    Camera, CameraExtent, Command, Config, ControlStates, CoreEvent, Engine, GeoPoint, Inputs,
    SceneCommand, SceneView, ScreenPoint, Timeline, TimelineEvent,
};

struct FixedView {
    camera: Camera,
}

impl SceneView for FixedView {
    fn camera(&self) -> Camera {
        self.camera
    }
    fn world_to_display(&self, p: GeoPoint) -> ScreenPoint {
        ScreenPoint::new(p.lon, p.lat)
    }
    fn scale_factor(&self) -> f32 {
        1.0
    }
}

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn mk_event(date: &str, place: &str, source: Option<&str>) -> TimelineEvent {
    TimelineEvent {
        date: d(date),
        place: place.to_string(),
        city: None,
        source: source.map(str::to_string),
        coord: GeoPoint::new(0.0, 0.0),
        extent: CameraExtent {
            center: GeoPoint::new(-12.5, 8.4),
            zoom: 3.64,
            duration_ms: 0.0,
        },
        description: None,
        link: None,
    }
}

fn three_steps() -> Timeline {
    Timeline::load(vec![
        mk_event("2013-12-06", "Guinea", None),
        mk_event("2014-03-01", "Liberia", Some("Guinea")),
        mk_event("2014-05-15", "Sierra Leone", Some("Guinea")),
    ])
    .unwrap()
}

fn settled_view() -> FixedView {
    FixedView {
        camera: Camera {
            center: GeoPoint::new(-12.5, 8.4),
            zoom: 3.64,
        },
    }
}

fn last_controls(out: &geotrail_timeline_core::Outputs) -> Option<ControlStates> {
    out.commands.iter().rev().find_map(|c| match c {
        SceneCommand::UpdateControls(states) => Some(*states),
        _ => None,
    })
}

/// it should return to Stopped with no auto-advance armed after toggling
/// play twice in a row
#[test]
fn toggle_play_twice_is_stopped() {
    let mut engine = Engine::new(Config::default(), three_steps());
    let view = settled_view();
    engine.start(&view);

    let out = engine
        .update(
            0.0,
            Inputs {
                commands: vec![Command::TogglePlay, Command::TogglePlay],
                scene_events: vec![],
            },
            &view,
        )
        .clone();
    assert!(!engine.playback().playing);
    assert!(!engine.auto_advance_armed());
    assert!(out
        .events
        .iter()
        .any(|e| matches!(e, CoreEvent::PlaybackStarted)));
    assert!(out
        .events
        .iter()
        .any(|e| matches!(e, CoreEvent::PlaybackStopped)));

    // Far past the auto-advance delay: nothing fires.
    let out = engine.update(60_000.0, Inputs::default(), &view);
    assert!(!out
        .events
        .iter()
        .any(|e| matches!(e, CoreEvent::StepShown { .. })));
    assert_eq!(engine.playback().index, 0);
}

/// it should auto-advance ten seconds after each step start while playing,
/// wrapping past the last event
#[test]
fn playing_advances_and_wraps() {
    let mut engine = Engine::new(Config::default(), three_steps());
    let view = settled_view();
    engine.start(&view);
    engine.update(0.0, Inputs::command(Command::TogglePlay), &view);
    assert!(engine.playback().playing);

    // Just short of the delay: no advance yet.
    engine.update(9_999.0, Inputs::default(), &view);
    assert_eq!(engine.playback().index, 0);

    let out = engine.update(1.0, Inputs::default(), &view).clone();
    assert_eq!(engine.playback().index, 1);
    assert!(out
        .events
        .iter()
        .any(|e| matches!(e, CoreEvent::StepShown { .. })));

    engine.update(10_000.0, Inputs::default(), &view);
    assert_eq!(engine.playback().index, 2);
    engine.update(10_000.0, Inputs::default(), &view);
    assert_eq!(engine.playback().index, 0, "auto-advance wraps to the start");
    assert!(engine.playback().playing);
}

/// it should ignore step commands while playing
#[test]
fn step_commands_ignored_while_playing() {
    let mut engine = Engine::new(Config::default(), three_steps());
    let view = settled_view();
    engine.start(&view);
    engine.update(0.0, Inputs::command(Command::TogglePlay), &view);

    let out = engine
        .update(0.0, Inputs::command(Command::StepForward), &view)
        .clone();
    assert_eq!(engine.playback().index, 0);
    assert!(!out
        .events
        .iter()
        .any(|e| matches!(e, CoreEvent::StepShown { .. })));
}

/// it should treat jump-to-first as a no-op when already at the first step
#[test]
fn jump_to_first_noop_at_start() {
    let mut engine = Engine::new(Config::default(), three_steps());
    let view = settled_view();
    engine.start(&view);

    let out = engine.update(0.0, Inputs::command(Command::JumpToFirst), &view);
    assert!(out.is_empty());
}

/// it should render the last step on jump-to-last and disable the forward
/// controls there
#[test]
fn jump_to_last_renders_and_disables_forward() {
    let mut engine = Engine::new(Config::default(), three_steps());
    let view = settled_view();
    engine.start(&view);

    let out = engine
        .update(0.0, Inputs::command(Command::JumpToLast), &view)
        .clone();
    assert_eq!(engine.playback().index, 2);
    assert!(out
        .events
        .iter()
        .any(|e| matches!(e, CoreEvent::StepShown { active: 3, .. })));
    let controls = last_controls(&out).expect("controls should update");
    assert!(controls.first && controls.back && controls.play);
    assert!(!controls.step && !controls.last);
}

/// it should walk back from the end one step at a time
#[test]
fn step_back_from_the_end() {
    let mut engine = Engine::new(Config::default(), three_steps());
    let view = settled_view();
    engine.start(&view);
    engine.update(0.0, Inputs::command(Command::JumpToLast), &view);

    let out = engine
        .update(0.0, Inputs::command(Command::StepBack), &view)
        .clone();
    assert_eq!(engine.playback().index, 1);
    let controls = last_controls(&out).expect("controls should update");
    assert!(controls.first && controls.back && controls.step && controls.last);
}

/// it should show the pause affordance and lock stepping while playing
#[test]
fn controls_while_playing() {
    let mut engine = Engine::new(Config::default(), three_steps());
    let view = settled_view();
    engine.start(&view);

    let out = engine
        .update(0.0, Inputs::command(Command::TogglePlay), &view)
        .clone();
    let controls = last_controls(&out).expect("controls should update");
    assert!(controls.play && controls.play_shows_pause);
    assert!(!controls.first && !controls.back && !controls.step && !controls.last);
}
