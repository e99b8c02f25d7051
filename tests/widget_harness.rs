//! Integration test harness for the soap film widgets
//!
//! Replays scripted user interactions against a full article state, the way
//! the presentation layer would drive it, and captures snapshots along the way.

use soap_film_widgets::WidgetConfig;
use soap_film_widgets::physics::steiner::ConnectionMode;
use soap_film_widgets::physics::thin_film::{FilmBand, RgbColor};
use soap_film_widgets::widgets::{ArticleState, WidgetTab};

/// Test harness for scenario testing
pub struct TestHarness {
    article: ArticleState,
    snapshots: Vec<Snapshot>,
}

/// Steps that can be executed in a test scenario
#[derive(Debug, Clone)]
pub enum TestStep {
    /// Capture a snapshot of all widget state
    Capture,
    /// Move both radius sliders
    SetRadii(f64, f64),
    OpenValve,
    CloseValve,
    /// Run this many animation frames
    Frames(u32),
    /// Press the reset button
    Reset,
    SelectTab(WidgetTab),
    ToggleSteinerMode,
    /// Move the thickness slider (nm)
    SetThickness(f64),
}

/// Observable widget state at one point of a scenario
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub tab: WidgetTab,
    pub radius_a: f64,
    pub radius_b: f64,
    pub valve_open: bool,
    pub locked: bool,
    pub pressure_a: f64,
    pub pressure_b: f64,
    pub total_volume: f64,
    pub steiner_mode: ConnectionMode,
    pub steiner_length: f64,
    pub thickness_nm: f64,
    pub film_band: FilmBand,
    pub film_color: RgbColor,
}

impl TestHarness {
    pub fn new() -> Self {
        Self::with_config(&WidgetConfig::default())
    }

    pub fn with_config(config: &WidgetConfig) -> Self {
        Self {
            article: ArticleState::new(config),
            snapshots: Vec::new(),
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        let pressure = &self.article.pressure;
        let step = pressure.last_step();
        let layout = self.article.steiner.layout();
        let sample = self.article.film.sample();

        Snapshot {
            tab: self.article.active_tab(),
            radius_a: pressure.radius_a().get(),
            radius_b: pressure.radius_b().get(),
            valve_open: pressure.is_valve_open(),
            locked: pressure.is_locked(),
            pressure_a: step.pressure_a,
            pressure_b: step.pressure_b,
            total_volume: pressure.pair().total_volume(),
            steiner_mode: layout.mode,
            steiner_length: layout.active_length(),
            thickness_nm: sample.thickness_nm,
            film_band: sample.band,
            film_color: sample.color,
        }
    }

    /// Get all captured snapshots
    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    /// Run a sequence of test steps and return the snapshots captured by it
    pub fn run_scenario(&mut self, steps: &[TestStep]) -> Vec<Snapshot> {
        let mut captured = Vec::new();

        for step in steps {
            match step {
                TestStep::Capture => {
                    let snapshot = self.snapshot();
                    captured.push(snapshot.clone());
                    self.snapshots.push(snapshot);
                }
                TestStep::SetRadii(a, b) => {
                    self.article.pressure.set_radius_a(*a);
                    self.article.pressure.set_radius_b(*b);
                }
                TestStep::OpenValve => {
                    self.article.pressure.open_valve();
                }
                TestStep::CloseValve => {
                    self.article.pressure.close_valve();
                }
                TestStep::Frames(count) => {
                    for _ in 0..*count {
                        self.article.frame();
                    }
                }
                TestStep::Reset => {
                    self.article.pressure.reset();
                }
                TestStep::SelectTab(tab) => {
                    self.article.select_tab(*tab);
                }
                TestStep::ToggleSteinerMode => {
                    self.article.steiner.toggle_mode();
                }
                TestStep::SetThickness(nm) => {
                    self.article.film.set_thickness(*nm);
                }
            }
        }

        captured
    }
}

fn relative_difference(a: f64, b: f64) -> f64 {
    (a - b).abs() / a.abs().max(b.abs()).max(f64::EPSILON)
}

// ============================================================================
// Integration Tests
// ============================================================================

#[test]
fn test_pressure_shown_before_valve_opens() {
    let mut harness = TestHarness::new();
    let snapshots = harness.run_scenario(&[TestStep::SetRadii(0.5, 1.5), TestStep::Capture]);

    let snapshot = &snapshots[0];
    assert!(!snapshot.valve_open);
    assert!(snapshot.pressure_a > snapshot.pressure_b);
    assert!((snapshot.pressure_a - 4.0).abs() < 1e-12);
}

#[test]
fn test_small_bubble_empties_into_large() {
    let mut harness = TestHarness::new();
    let snapshots = harness.run_scenario(&[
        TestStep::SetRadii(0.5, 1.5),
        TestStep::Capture,
        TestStep::OpenValve,
        TestStep::Frames(10),
        TestStep::Capture,
        TestStep::Frames(10),
        TestStep::Capture,
    ]);

    assert!(snapshots[1].radius_a < snapshots[0].radius_a);
    assert!(snapshots[1].radius_b > snapshots[0].radius_b);
    assert!(snapshots[2].radius_a < snapshots[1].radius_a);
    // Pressure gap widens as the small bubble shrinks
    let gap = |s: &Snapshot| s.pressure_a - s.pressure_b;
    assert!(gap(&snapshots[2]) > gap(&snapshots[1]));

    for snapshot in &snapshots[1..] {
        assert!(relative_difference(snapshot.total_volume, snapshots[0].total_volume) < 1e-9);
    }
}

#[test]
fn test_collapse_locks_until_reset() {
    let mut harness = TestHarness::new();
    let snapshots = harness.run_scenario(&[
        TestStep::SetRadii(0.3, 2.0),
        TestStep::Capture,
        TestStep::OpenValve,
        TestStep::Frames(5_000),
        TestStep::Capture,
        // Neither the valve nor the sliders respond while locked
        TestStep::OpenValve,
        TestStep::SetRadii(1.0, 1.0),
        TestStep::Frames(10),
        TestStep::Capture,
        TestStep::Reset,
        TestStep::Capture,
    ]);

    let (before, collapsed, still_locked, after_reset) =
        (&snapshots[0], &snapshots[1], &snapshots[2], &snapshots[3]);

    assert!(collapsed.locked);
    assert!(!collapsed.valve_open);
    assert!((collapsed.radius_a - 0.1).abs() < 1e-12);
    assert!(relative_difference(collapsed.total_volume, before.total_volume) < 1e-9);

    assert!(still_locked.locked);
    assert_eq!(still_locked.radius_a, collapsed.radius_a);
    assert_eq!(still_locked.radius_b, collapsed.radius_b);

    assert!(!after_reset.locked);
    assert_eq!(after_reset.radius_a, before.radius_a);
    assert_eq!(after_reset.radius_b, before.radius_b);
}

#[test]
fn test_equal_bubbles_are_in_equilibrium() {
    let mut harness = TestHarness::new();
    let snapshots = harness.run_scenario(&[
        TestStep::SetRadii(1.0, 1.0),
        TestStep::OpenValve,
        TestStep::Frames(600),
        TestStep::Capture,
    ]);

    assert!(snapshots[0].valve_open);
    assert_eq!(snapshots[0].radius_a, snapshots[0].radius_b);
    assert_eq!(snapshots[0].pressure_a, snapshots[0].pressure_b);
}

#[test]
fn test_closing_valve_freezes_radii() {
    let mut harness = TestHarness::new();
    let snapshots = harness.run_scenario(&[
        TestStep::SetRadii(0.5, 1.0),
        TestStep::OpenValve,
        TestStep::Frames(5),
        TestStep::CloseValve,
        TestStep::Capture,
        TestStep::Frames(100),
        TestStep::Capture,
    ]);

    assert_eq!(snapshots[0].radius_a, snapshots[1].radius_a);
    assert_eq!(snapshots[0].radius_b, snapshots[1].radius_b);
}

#[test]
fn test_switching_tab_stops_animation() {
    let mut harness = TestHarness::new();
    let snapshots = harness.run_scenario(&[
        TestStep::OpenValve,
        TestStep::Frames(3),
        TestStep::SelectTab(WidgetTab::Steiner),
        TestStep::Capture,
        TestStep::Frames(100),
        TestStep::SelectTab(WidgetTab::Pressure),
        TestStep::Capture,
    ]);

    assert!(!snapshots[0].valve_open);
    assert_eq!(snapshots[0].radius_a, snapshots[1].radius_a);
    assert_eq!(snapshots[1].tab, WidgetTab::Pressure);
}

#[test]
fn test_steiner_toggle() {
    let mut harness = TestHarness::new();
    let snapshots = harness.run_scenario(&[
        TestStep::SelectTab(WidgetTab::Steiner),
        TestStep::Capture,
        TestStep::ToggleSteinerMode,
        TestStep::Capture,
    ]);

    assert_eq!(snapshots[0].steiner_mode, ConnectionMode::Direct);
    assert!((snapshots[0].steiner_length - 2.0 * 2.0_f64.sqrt()).abs() < 1e-3);
    assert_eq!(snapshots[1].steiner_mode, ConnectionMode::SoapFilm);
    assert!((snapshots[1].steiner_length - (1.0 + 3.0_f64.sqrt())).abs() < 1e-3);
    assert!(snapshots[1].steiner_length < snapshots[0].steiner_length);
}

#[test]
fn test_thickness_slider_walks_color_series() {
    let mut harness = TestHarness::new();
    let mut steps = vec![TestStep::SelectTab(WidgetTab::ThinFilm)];
    for thickness in [0.0, 80.0, 200.0, 300.0, 400.0, 500.0, 600.0, 700.0, 900.0] {
        steps.push(TestStep::SetThickness(thickness));
        steps.push(TestStep::Capture);
    }

    let bands: Vec<FilmBand> = harness
        .run_scenario(&steps)
        .iter()
        .map(|snapshot| snapshot.film_band)
        .collect();

    assert_eq!(bands, FilmBand::ALL.to_vec());
}

#[test]
fn test_negative_thickness_matches_zero() {
    let mut harness = TestHarness::new();
    let snapshots = harness.run_scenario(&[
        TestStep::SetThickness(-50.0),
        TestStep::Capture,
        TestStep::SetThickness(0.0),
        TestStep::Capture,
    ]);

    assert_eq!(snapshots[0].film_color, snapshots[1].film_color);
    assert_eq!(snapshots[0].film_color, RgbColor::new(0, 0, 0));
}

#[test]
fn test_scenario_replay_is_deterministic() {
    let scenario = vec![
        TestStep::SetRadii(0.7, 1.1),
        TestStep::OpenValve,
        TestStep::Frames(25),
        TestStep::ToggleSteinerMode,
        TestStep::SetThickness(430.0),
        TestStep::Capture,
    ];

    let first = TestHarness::new().run_scenario(&scenario);
    let second = TestHarness::new().run_scenario(&scenario);
    assert_eq!(first, second);
}

#[test]
fn test_config_changes_flow_rate() {
    let mut fast = WidgetConfig::default();
    fast.pressure.flow_rate *= 4.0;

    let scenario = [
        TestStep::SetRadii(0.6, 1.2),
        TestStep::OpenValve,
        TestStep::Frames(10),
        TestStep::Capture,
    ];

    let slow_radius = TestHarness::new().run_scenario(&scenario)[0].radius_a;
    let fast_radius = TestHarness::with_config(&fast).run_scenario(&scenario)[0].radius_a;
    assert!(fast_radius < slow_radius);
}

#[test]
fn test_harness_records_snapshots() {
    let mut harness = TestHarness::new();
    harness.run_scenario(&[TestStep::Capture, TestStep::Capture]);
    harness.run_scenario(&[TestStep::Capture]);
    assert_eq!(harness.snapshots().len(), 3);
}
