//! Engine: the per-step render coordinator.
//!
//! Owns the timeline, the playback cursor, the transition guard state, and
//! the marker flight, and sequences them against a millisecond clock
//! advanced by `update()`. All of the original timers (deferred retry,
//! transition settle, flight completion, auto-advance) are deadlines on
//! that clock, checked once per tick after inputs are applied.

use chrono::NaiveDate;
use hashbrown::HashSet;

use geotrail_api_core::{Color, ColorSpec, LineStyle, PolygonStyle};

use crate::camera::plan_transition;
use crate::config::Config;
use crate::inputs::{Command, Inputs, SceneEvent};
use crate::marker::MarkerFlight;
use crate::outputs::{CoreEvent, Outputs, SceneCommand};
use crate::palette::RegionPalette;
use crate::playback::Playback;
use crate::scene::SceneView;
use crate::timeline::Timeline;

/// Step sequencing phase. `Transitioning` guards against re-entrant step
/// requests; `Animating` means a marker flight is live.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Transitioning,
    Animating,
}

pub struct Engine {
    cfg: Config,
    timeline: Timeline,
    palette: RegionPalette,
    playback: Playback,

    clock_ms: f32,
    phase: Phase,
    /// Date of the step currently settling, staged at transition start.
    staged_date: Option<NaiveDate>,
    settle_at: Option<f32>,
    /// Single-slot deferred retry for step requests that arrive
    /// mid-transition; a second request while one is staged is dropped.
    retry_at: Option<f32>,
    retry_date: Option<NaiveDate>,
    auto_advance_at: Option<f32>,
    flight: Option<MarkerFlight>,
    /// Places that currently own a trail line in the scene.
    trails: HashSet<String>,
    /// Cleared by `destroy()`; a dead engine emits nothing, even when a
    /// deadline would have fired.
    alive: bool,

    outputs: Outputs,
}

impl Engine {
    pub fn new(cfg: Config, timeline: Timeline) -> Self {
        let palette = RegionPalette::from_timeline(&timeline);
        Self {
            cfg,
            timeline,
            palette,
            playback: Playback::default(),
            clock_ms: 0.0,
            phase: Phase::Idle,
            staged_date: None,
            settle_at: None,
            retry_at: None,
            retry_date: None,
            auto_advance_at: None,
            flight: None,
            trails: HashSet::new(),
            alive: true,
            outputs: Outputs::default(),
        }
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn palette(&self) -> &RegionPalette {
        &self.palette
    }

    pub fn playback(&self) -> Playback {
        self.playback
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn clock_ms(&self) -> f32 {
        self.clock_ms
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn has_retry_staged(&self) -> bool {
        self.retry_at.is_some()
    }

    pub fn auto_advance_armed(&self) -> bool {
        self.auto_advance_at.is_some()
    }

    pub fn flight(&self) -> Option<&MarkerFlight> {
        self.flight.as_ref()
    }

    /// Render the first step and publish initial control state.
    pub fn start(&mut self, view: &dyn SceneView) -> &Outputs {
        self.outputs.clear();
        if !self.alive {
            return &self.outputs;
        }
        match self.timeline.event_at(0) {
            Some(first) => {
                let date = first.date;
                self.render_step(date, view);
                self.emit_controls();
                // Snap transitions settle synchronously.
                self.check_settle(view);
            }
            None => log::warn!("start requested on an empty timeline"),
        }
        &self.outputs
    }

    /// Step the engine by `dt_ms` with the given inputs, producing this
    /// tick's scene commands and events.
    pub fn update(&mut self, dt_ms: f32, inputs: Inputs, view: &dyn SceneView) -> &Outputs {
        self.outputs.clear();
        if !self.alive {
            return &self.outputs;
        }
        self.clock_ms += dt_ms.max(0.0);

        self.apply_inputs(inputs, view);
        self.check_retry(view);
        self.check_settle(view);
        self.tick_flight(view);
        self.check_auto_advance(view);

        &self.outputs
    }

    /// Teardown: synchronously removes every owned visual and resets all
    /// guards. Later ticks are inert even when a deadline has passed.
    pub fn destroy(&mut self) -> &Outputs {
        self.outputs.clear();
        if !self.alive {
            return &self.outputs;
        }
        self.alive = false;
        self.outputs.push_command(SceneCommand::ClearScene);
        self.playback = Playback::default();
        self.phase = Phase::Idle;
        self.staged_date = None;
        self.settle_at = None;
        self.retry_at = None;
        self.retry_date = None;
        self.auto_advance_at = None;
        self.flight = None;
        self.trails.clear();
        &self.outputs
    }

    // ----- input handling -----

    fn apply_inputs(&mut self, inputs: Inputs, view: &dyn SceneView) {
        for cmd in inputs.commands {
            match cmd {
                Command::TogglePlay => self.toggle_play(),
                Command::ShowDate(date) => self.render_step(date, view),
                Command::JumpToFirst
                | Command::JumpToLast
                | Command::StepBack
                | Command::StepForward => self.navigate(cmd, view),
            }
        }
        for event in inputs.scene_events {
            match event {
                SceneEvent::Rescaled => self.replace_visuals(view),
            }
        }
    }

    fn toggle_play(&mut self) {
        self.playback.playing = !self.playback.playing;
        self.emit_controls();
        if self.playback.playing {
            self.auto_advance_at = Some(self.clock_ms + self.cfg.auto_advance_ms);
            self.outputs.push_event(CoreEvent::PlaybackStarted);
        } else {
            self.auto_advance_at = None;
            self.outputs.push_event(CoreEvent::PlaybackStopped);
        }
    }

    fn navigate(&mut self, cmd: Command, view: &dyn SceneView) {
        if self.playback.playing {
            // Step controls are disabled while playing.
            log::debug!("ignoring {cmd:?} while playing");
            return;
        }
        let count = self.timeline.len();
        if count == 0 {
            log::warn!("ignoring {cmd:?} on an empty timeline");
            return;
        }
        let before = self.playback.index;
        match cmd {
            Command::JumpToFirst => self.playback.index = 0,
            Command::JumpToLast => self.playback.index = count - 1,
            Command::StepBack => self.playback.step_back(),
            Command::StepForward => self.playback.step_forward(count),
            _ => unreachable!("navigate only handles cursor commands"),
        }
        let moved = self.playback.index != before;
        // Jumps are no-ops when already at the target; steps always render.
        if !moved && matches!(cmd, Command::JumpToFirst | Command::JumpToLast) {
            return;
        }
        self.emit_controls();
        self.render_index_step(view);
    }

    fn render_index_step(&mut self, view: &dyn SceneView) {
        if let Some(event) = self.timeline.event_at(self.playback.index) {
            let date = event.date;
            self.render_step(date, view);
        }
    }

    // ----- step sequencing -----

    fn render_step(&mut self, date: NaiveDate, view: &dyn SceneView) {
        if self.phase == Phase::Transitioning {
            if self.retry_at.is_none() {
                self.retry_at = Some(self.clock_ms + self.cfg.retry_delay_ms);
                self.retry_date = Some(date);
                self.outputs.push_event(CoreEvent::RetryDeferred);
                log::debug!("step request for {date} deferred during transition");
            }
            return;
        }

        let (active, current) = {
            let prefix = self.timeline.active_prefix(date);
            let places: Vec<String> = prefix.iter().map(|e| e.place.clone()).collect();
            (places, prefix.last().cloned())
        };
        let Some(current) = current else {
            log::warn!("no events at or before {date}, ignoring step request");
            return;
        };

        // A superseded flight must not leave its icon behind.
        if self.flight.take().is_some() {
            self.outputs.push_command(SceneCommand::RemoveMarker);
            self.phase = Phase::Idle;
        }

        self.outputs
            .push_command(SceneCommand::SetDateLabel(date.format("%a %b %d %Y").to_string()));
        self.outputs.push_command(SceneCommand::HideDescription);

        // Drop the trail of every event that left the active set, and of the
        // event that is now the topmost entry (its trail is about to be
        // redrawn or is stale).
        let top = active.len().saturating_sub(1);
        for (j, event) in self.timeline.events().iter().enumerate() {
            if self.trails.contains(&event.place) && (j >= active.len() || j == top) {
                self.trails.remove(&event.place);
                self.outputs.push_command(SceneCommand::RemoveTrail {
                    place: event.place.clone(),
                });
            }
        }

        if let Some(html) = &current.description {
            self.outputs.push_command(SceneCommand::ShowDescription {
                html: html.clone(),
            });
        }
        self.outputs.push_command(SceneCommand::FadeTrails {
            opacity: self.cfg.faded_trail_opacity,
        });

        let plan = plan_transition(view.camera(), &current.extent, self.cfg.significance_threshold);
        if plan.animate && plan.duration_ms > 0.0 {
            // Lock the controls for the duration of the camera move.
            self.outputs
                .push_command(SceneCommand::UpdateControls(Default::default()));
        }
        self.outputs.push_command(SceneCommand::CameraTransition {
            extent: current.extent,
            duration_ms: plan.duration_ms,
        });

        self.phase = Phase::Transitioning;
        self.staged_date = Some(date);
        self.settle_at = Some(self.clock_ms + plan.duration_ms * self.cfg.settle_margin);
        self.outputs.push_event(CoreEvent::TransitionStarted {
            duration_ms: plan.duration_ms,
        });
        self.outputs.push_event(CoreEvent::StepShown {
            date,
            active: active.len(),
        });
    }

    fn check_settle(&mut self, view: &dyn SceneView) {
        if self.phase != Phase::Transitioning {
            return;
        }
        match self.settle_at {
            Some(at) if self.clock_ms >= at => {}
            _ => return,
        }
        self.settle_at = None;
        let Some(date) = self.staged_date.take() else {
            self.phase = Phase::Idle;
            return;
        };

        let (active, current) = {
            let prefix = self.timeline.active_prefix(date);
            let places: Vec<String> = prefix.iter().map(|e| e.place.clone()).collect();
            (places, prefix.last().cloned())
        };
        let Some(current) = current else {
            self.phase = Phase::Idle;
            return;
        };

        self.emit_controls();
        self.outputs.push_event(CoreEvent::TransitionSettled);

        // Redraw overlays for the active set. When a flight is about to
        // play over the destination, keep its overlay hidden until the
        // flight completes.
        let flying = current.source.is_some();
        for place in &active {
            if flying && *place == current.place {
                self.outputs.push_command(SceneCommand::HideRegion {
                    place: place.clone(),
                });
            } else {
                let style = self.region_style(place);
                self.outputs.push_command(SceneCommand::ShowRegion {
                    place: place.clone(),
                    style,
                });
            }
        }

        let source_coord = current
            .source
            .as_deref()
            .and_then(|src| self.timeline.event_named(src))
            .map(|e| e.coord);

        match (current.source.as_deref(), source_coord) {
            (Some(src), Some(from)) => {
                let trail_color = self.palette.trail_color_of(&current.place);
                let flight = MarkerFlight::begin(
                    from,
                    current.coord,
                    current.place.clone(),
                    trail_color,
                    self.clock_ms,
                    self.cfg.flight_duration_ms,
                    view,
                );
                self.trails.insert(current.place.clone());
                let line = flight.trail(view);
                let style = self.trail_style(trail_color, view);
                self.outputs.push_command(SceneCommand::DrawTrail {
                    place: current.place.clone(),
                    line,
                    style,
                });
                self.outputs.push_command(SceneCommand::SpawnMarker {
                    placement: flight.sprite(view),
                    rotation_deg: flight.rotation(),
                });
                self.outputs.push_event(CoreEvent::FlightStarted {
                    from_place: src.to_string(),
                    to_place: current.place.clone(),
                    duration_ms: self.cfg.flight_duration_ms,
                });
                self.flight = Some(flight);
                self.phase = Phase::Animating;
            }
            (Some(src), None) => {
                // Unreachable after load-time validation; degrade to the
                // no-flight path rather than panicking.
                log::warn!("source region '{src}' not found, skipping flight");
                self.phase = Phase::Idle;
            }
            (None, _) => {
                if self.trails.remove(&current.place) {
                    self.outputs.push_command(SceneCommand::RemoveTrail {
                        place: current.place.clone(),
                    });
                }
                self.phase = Phase::Idle;
            }
        }
    }

    fn tick_flight(&mut self, view: &dyn SceneView) {
        if self.phase != Phase::Animating {
            return;
        }
        let Some(flight) = self.flight.as_mut() else {
            return;
        };
        // A flight spawned this tick already emitted its initial placement.
        if flight.started_at_ms() == self.clock_ms {
            return;
        }
        flight.tick(self.clock_ms);

        let placement = flight.sprite(view);
        let line = flight.trail(view);
        let color = flight.trail_color();
        let place = flight.dest_place().to_string();
        let done = flight.is_complete(self.clock_ms);

        self.outputs
            .push_command(SceneCommand::MoveMarker { placement });
        let style = self.trail_style(color, view);
        self.outputs.push_command(SceneCommand::DrawTrail {
            place: place.clone(),
            line,
            style,
        });

        if done {
            // Completion reveals the destination overlay that the flight
            // was covering, then retires the icon. The trail stays until a
            // later step supersedes it.
            let style = self.region_style(&place);
            self.outputs.push_command(SceneCommand::ShowRegion {
                place: place.clone(),
                style,
            });
            self.outputs.push_command(SceneCommand::RemoveMarker);
            self.outputs
                .push_event(CoreEvent::FlightCompleted { place });
            self.flight = None;
            self.phase = Phase::Idle;
        }
    }

    /// Re-place the marker and its trail after a viewport change, from the
    /// flight's last known progress. The clock is not consulted.
    fn replace_visuals(&mut self, view: &dyn SceneView) {
        let Some(flight) = self.flight.as_ref() else {
            return;
        };
        let placement = flight.sprite(view);
        let line = flight.trail(view);
        let color = flight.trail_color();
        let place = flight.dest_place().to_string();
        self.outputs
            .push_command(SceneCommand::MoveMarker { placement });
        let style = self.trail_style(color, view);
        self.outputs.push_command(SceneCommand::DrawTrail {
            place,
            line,
            style,
        });
    }

    fn check_retry(&mut self, view: &dyn SceneView) {
        match self.retry_at {
            Some(at) if self.clock_ms >= at => {}
            _ => return,
        }
        self.retry_at = None;
        if let Some(date) = self.retry_date.take() {
            // May defer again if a transition is still in progress.
            self.render_step(date, view);
        }
    }

    fn check_auto_advance(&mut self, view: &dyn SceneView) {
        if !self.playback.playing {
            return;
        }
        match self.auto_advance_at {
            Some(at) if self.clock_ms >= at => {}
            _ => return,
        }
        self.playback.advance_wrapping(self.timeline.len());
        self.auto_advance_at = Some(self.clock_ms + self.cfg.auto_advance_ms);
        self.emit_controls();
        self.render_index_step(view);
    }

    // ----- helpers -----

    fn emit_controls(&mut self) {
        let states = self.playback.controls(self.timeline.len());
        self.outputs
            .push_command(SceneCommand::UpdateControls(states));
    }

    fn region_style(&self, place: &str) -> PolygonStyle {
        PolygonStyle {
            fill_color: ColorSpec::Constant(self.palette.color_of(place)),
            fill_opacity: self.cfg.region_fill_opacity,
            ..PolygonStyle::default()
        }
    }

    fn trail_style(&self, color: Color, view: &dyn SceneView) -> LineStyle {
        LineStyle {
            stroke_width: self.cfg.trail_width_px / view.scale_factor(),
            stroke_color: ColorSpec::Constant(color),
            stroke_opacity: 1.0,
            ..LineStyle::default()
        }
    }
}
