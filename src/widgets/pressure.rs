//! State of the connected-bubbles experiment.
//!
//! Owns the slider radii, the valve, and the lock that engages once a bubble
//! collapses. The animation loop calls [`PressureWidget::tick`] once per frame
//! while the valve is open; [`PressureWidget::run_while_open`] is the same loop
//! driven headlessly.

use crate::config::PressureFlowParameters;
use crate::physics::pressure_flow::{BubblePair, FlowStep, PressureFlowModel, Radius};

/// Why [`PressureWidget::run_while_open`] stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The valve was closed (or never open)
    ValveClosed,
    /// A bubble collapsed and the valve locked
    Terminated,
    /// The cancel callback asked to stop
    Cancelled,
    /// The tick budget ran out
    TickBudget,
}

/// Summary of a headless run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunOutcome {
    pub ticks: u64,
    pub reason: StopReason,
    pub last_step: FlowStep,
}

/// Mutable state behind the two-bubble widget.
#[derive(Debug, Clone)]
pub struct PressureWidget {
    model: PressureFlowModel,
    /// Fixed time step per frame (seconds)
    time_step: f64,
    /// Slider bounds for both radii
    slider_range: (f64, f64),
    /// Radii chosen on the sliders; `reset` returns here
    chosen: (Radius, Radius),
    radius_a: Radius,
    radius_b: Radius,
    valve_open: bool,
    /// Set when a bubble collapses; blocks the valve until `reset`
    locked: bool,
    last_step: FlowStep,
    /// Ticks that moved air since the last reset
    elapsed_ticks: u64,
}

impl PressureWidget {
    pub fn new(parameters: &PressureFlowParameters) -> Self {
        let model = PressureFlowModel::from_parameters(parameters);
        let slider_range = (
            parameters.min_slider_radius.min(parameters.max_slider_radius),
            parameters.max_slider_radius.max(parameters.min_slider_radius),
        );
        let clamp = |value: f64| Radius::new(value.clamp(slider_range.0, slider_range.1));
        let radius_a = clamp(parameters.initial_radius_a);
        let radius_b = clamp(parameters.initial_radius_b);
        let last_step = model.step(&BubblePair { radius_a, radius_b, valve_open: false }, 0.0);

        Self {
            model,
            time_step: parameters.time_step,
            slider_range,
            chosen: (radius_a, radius_b),
            radius_a,
            radius_b,
            valve_open: false,
            locked: false,
            last_step,
            elapsed_ticks: 0,
        }
    }

    pub fn model(&self) -> &PressureFlowModel {
        &self.model
    }

    /// Current state as the model's input record.
    pub fn pair(&self) -> BubblePair {
        BubblePair {
            radius_a: self.radius_a,
            radius_b: self.radius_b,
            valve_open: self.valve_open,
        }
    }

    pub fn radius_a(&self) -> Radius {
        self.radius_a
    }

    pub fn radius_b(&self) -> Radius {
        self.radius_b
    }

    pub fn is_valve_open(&self) -> bool {
        self.valve_open
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn last_step(&self) -> &FlowStep {
        &self.last_step
    }

    pub fn elapsed_ticks(&self) -> u64 {
        self.elapsed_ticks
    }

    /// Move slider A. Ignored while air is flowing or after a collapse.
    ///
    /// Returns whether the value was applied.
    pub fn set_radius_a(&mut self, radius: f64) -> bool {
        if !self.sliders_enabled() {
            return false;
        }
        self.radius_a = self.clamp_to_slider(radius);
        self.chosen.0 = self.radius_a;
        self.refresh_pressures();
        true
    }

    /// Move slider B. Ignored while air is flowing or after a collapse.
    pub fn set_radius_b(&mut self, radius: f64) -> bool {
        if !self.sliders_enabled() {
            return false;
        }
        self.radius_b = self.clamp_to_slider(radius);
        self.chosen.1 = self.radius_b;
        self.refresh_pressures();
        true
    }

    /// Open the valve. Refused while locked after a collapse.
    pub fn open_valve(&mut self) -> bool {
        if self.locked {
            log::warn!("Valve is locked after collapse; reset before reopening");
            return false;
        }
        if !self.valve_open {
            log::info!(
                "Valve opened: r_a={:.3}, r_b={:.3}, dP={:.3}",
                self.radius_a.get(),
                self.radius_b.get(),
                self.last_step.pressure_difference()
            );
        }
        self.valve_open = true;
        true
    }

    pub fn close_valve(&mut self) {
        if self.valve_open {
            log::info!("Valve closed after {} ticks", self.elapsed_ticks);
        }
        self.valve_open = false;
    }

    /// Advance one frame at the configured time step.
    ///
    /// With the valve closed this only refreshes the pressure readout.
    pub fn tick(&mut self) -> FlowStep {
        let step = self.model.step(&self.pair(), self.time_step);

        self.radius_a = step.new_radius_a;
        self.radius_b = step.new_radius_b;
        if self.valve_open {
            self.elapsed_ticks += 1;
        }
        if step.terminated && self.valve_open {
            log::warn!(
                "Bubble collapsed after {} ticks: r_a={:.3}, r_b={:.3}",
                self.elapsed_ticks,
                self.radius_a.get(),
                self.radius_b.get()
            );
            self.valve_open = false;
            self.locked = true;
        }

        self.last_step = step;
        step
    }

    /// Tick repeatedly while the valve stays open.
    ///
    /// Stops when the valve closes, a bubble collapses, `cancel` returns true
    /// after a tick, or `max_ticks` ticks have run.
    pub fn run_while_open<F>(&mut self, max_ticks: u64, mut cancel: F) -> RunOutcome
    where
        F: FnMut(&FlowStep) -> bool,
    {
        let mut ticks = 0;
        let reason = loop {
            if !self.valve_open {
                break StopReason::ValveClosed;
            }
            if ticks >= max_ticks {
                break StopReason::TickBudget;
            }

            let step = self.tick();
            ticks += 1;

            if step.terminated {
                break StopReason::Terminated;
            }
            if cancel(&step) {
                break StopReason::Cancelled;
            }
        };

        log::debug!("Run stopped after {} ticks: {:?}", ticks, reason);
        RunOutcome {
            ticks,
            reason,
            last_step: self.last_step,
        }
    }

    /// Restore the slider radii, close the valve, and clear the lock.
    pub fn reset(&mut self) {
        log::info!("Pressure experiment reset");
        self.radius_a = self.chosen.0;
        self.radius_b = self.chosen.1;
        self.valve_open = false;
        self.locked = false;
        self.elapsed_ticks = 0;
        self.refresh_pressures();
    }

    fn sliders_enabled(&self) -> bool {
        !self.valve_open && !self.locked
    }

    fn clamp_to_slider(&self, radius: f64) -> Radius {
        let (min, max) = self.slider_range;
        // NaN from a misbehaving input falls back to the lower bound
        let value = if radius.is_nan() { min } else { radius.clamp(min, max) };
        Radius::new(value)
    }

    fn refresh_pressures(&mut self) {
        self.last_step = self.model.step(&self.pair(), 0.0);
    }
}

impl Default for PressureWidget {
    fn default() -> Self {
        Self::new(&PressureFlowParameters::default())
    }
}
