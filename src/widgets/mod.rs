//! Widget state records
//!
//! Plain mutable state owned by the presentation layer. Each widget wraps
//! one physics model and re-invokes it on input events or animation frames:
//! - Pressure: radius sliders, valve, collapse lock
//! - Steiner: direct / soap-film toggle
//! - Film: thickness slider

pub mod film;
pub mod pressure;
pub mod steiner;

pub use film::FilmWidget;
pub use pressure::{PressureWidget, RunOutcome, StopReason};
pub use steiner::SteinerWidget;

use crate::config::WidgetConfig;
use crate::physics::pressure_flow::FlowStep;

/// Tabs of the interactive section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WidgetTab {
    #[default]
    Pressure,
    Steiner,
    ThinFilm,
}

/// All widget state for one article view.
#[derive(Debug, Clone)]
pub struct ArticleState {
    pub pressure: PressureWidget,
    pub steiner: SteinerWidget,
    pub film: FilmWidget,
    active_tab: WidgetTab,
}

impl ArticleState {
    pub fn new(config: &WidgetConfig) -> Self {
        Self {
            pressure: PressureWidget::new(&config.pressure),
            steiner: SteinerWidget::new(&config.steiner),
            film: FilmWidget::new(&config.film),
            active_tab: WidgetTab::default(),
        }
    }

    pub fn active_tab(&self) -> WidgetTab {
        self.active_tab
    }

    /// Switch tabs. Leaving the pressure tab unmounts its animation, which
    /// closes the valve.
    pub fn select_tab(&mut self, tab: WidgetTab) {
        if tab == self.active_tab {
            return;
        }
        log::debug!("Tab: {:?} -> {:?}", self.active_tab, tab);
        if self.active_tab == WidgetTab::Pressure {
            self.pressure.close_valve();
        }
        self.active_tab = tab;
    }

    /// Per-animation-frame callback.
    ///
    /// Ticks the pressure experiment while its tab is visible and the valve
    /// is open; returns the step when one ran.
    pub fn frame(&mut self) -> Option<FlowStep> {
        if self.active_tab == WidgetTab::Pressure && self.pressure.is_valve_open() {
            Some(self.pressure.tick())
        } else {
            None
        }
    }
}

impl Default for ArticleState {
    fn default() -> Self {
        Self::new(&WidgetConfig::default())
    }
}
