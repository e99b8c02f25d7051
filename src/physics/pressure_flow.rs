//! Laplace pressure and airflow between two connected bubbles.
//!
//! Two bubbles joined by a tube with a valve. While the valve is closed each
//! bubble simply holds its pressure; once it opens, air flows from the bubble
//! with the higher internal pressure into the other one.
//!
//! # Physics Background
//!
//! ## Young-Laplace Equation
//! The excess pressure inside a curved film is inversely proportional to its
//! radius:
//!
//! ```text
//! P = 2 * sigma / r
//! ```
//!
//! so the *smaller* bubble has the *higher* pressure. Opening the valve makes
//! the small bubble shrink further and the large one grow, until the small one
//! collapses. This is the counter-intuitive result the experiment demonstrates.
//!
//! ## Flow Integration
//! Volume moves linearly with the pressure difference over one time step:
//!
//! ```text
//! dV = (P_a - P_b) * k * dt
//! V_a' = V_a - dV
//! V_b' = V_b + dV
//! ```
//!
//! Radii are recovered from volume with `r = (3V / 4pi)^(1/3)`.

use serde::Serialize;
use std::f64::consts::PI;

use crate::config::PressureFlowParameters;

/// Smallest radius a [`Radius`] can hold.
pub const MIN_RADIUS: f64 = 1e-3;

/// Strictly positive bubble radius.
///
/// Construction clamps to [`MIN_RADIUS`], so pressure (which divides by the
/// radius) is always finite.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Radius(f64);

impl Radius {
    /// Create a radius, clamping non-positive and NaN values to [`MIN_RADIUS`].
    pub fn new(value: f64) -> Self {
        // f64::max returns the non-NaN operand
        Self(MIN_RADIUS.max(value))
    }

    /// Raw radius value.
    pub fn get(self) -> f64 {
        self.0
    }

    /// Volume of a sphere with this radius.
    pub fn volume(self) -> f64 {
        sphere_volume(self.0)
    }
}

/// Volume of a sphere: `4/3 pi r^3`.
pub fn sphere_volume(radius: f64) -> f64 {
    (4.0 / 3.0) * PI * radius.powi(3)
}

/// Radius of a sphere holding `volume`: `(3V / 4pi)^(1/3)`.
pub fn radius_from_volume(volume: f64) -> Radius {
    Radius::new((3.0 * volume.max(0.0) / (4.0 * PI)).cbrt())
}

/// Input state for one simulation tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BubblePair {
    /// Radius of the left bubble
    pub radius_a: Radius,
    /// Radius of the right bubble
    pub radius_b: Radius,
    /// Whether the connecting valve is open
    pub valve_open: bool,
}

impl BubblePair {
    /// Create a pair from raw radii.
    pub fn new(radius_a: f64, radius_b: f64, valve_open: bool) -> Self {
        Self {
            radius_a: Radius::new(radius_a),
            radius_b: Radius::new(radius_b),
            valve_open,
        }
    }

    /// Combined air volume of both bubbles.
    pub fn total_volume(&self) -> f64 {
        self.radius_a.volume() + self.radius_b.volume()
    }
}

/// Which way air moved during a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FlowDirection {
    /// Bubble A lost volume to bubble B
    AToB,
    /// Bubble B lost volume to bubble A
    BToA,
    /// No air moved
    None,
}

/// Result of a single [`PressureFlowModel::step`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FlowStep {
    /// Laplace pressure inside bubble A (before the tick)
    pub pressure_a: f64,
    /// Laplace pressure inside bubble B (before the tick)
    pub pressure_b: f64,
    /// Volume change of bubble A (negative = shrank)
    pub volume_delta_a: f64,
    /// Volume change of bubble B (negative = shrank)
    pub volume_delta_b: f64,
    /// Radius of bubble A after the tick
    pub new_radius_a: Radius,
    /// Radius of bubble B after the tick
    pub new_radius_b: Radius,
    /// A bubble has reached the collapse floor; no further flow happens
    pub terminated: bool,
}

impl FlowStep {
    /// Pressure difference `P_a - P_b`.
    pub fn pressure_difference(&self) -> f64 {
        self.pressure_a - self.pressure_b
    }

    pub fn direction(&self) -> FlowDirection {
        if self.volume_delta_a < 0.0 {
            FlowDirection::AToB
        } else if self.volume_delta_b < 0.0 {
            FlowDirection::BToA
        } else {
            FlowDirection::None
        }
    }

    /// State to feed into the next tick.
    ///
    /// A terminated step always yields a closed valve; reopening is up to the caller.
    pub fn next_pair(&self, valve_open: bool) -> BubblePair {
        BubblePair {
            radius_a: self.new_radius_a,
            radius_b: self.new_radius_b,
            valve_open: valve_open && !self.terminated,
        }
    }
}

/// Pressure and flow model for two bubbles joined by a valve.
///
/// The model is stateless; every call to [`step`](Self::step) is a pure
/// function of the pair and the time step.
///
/// # Example
///
/// ```
/// use soap_film_widgets::physics::pressure_flow::{BubblePair, PressureFlowModel};
///
/// let model = PressureFlowModel::default();
/// let pair = BubblePair::new(0.5, 1.5, true);
///
/// let step = model.step(&pair, 1.0 / 60.0);
/// assert!(step.pressure_a > step.pressure_b);
/// assert!(step.new_radius_a < pair.radius_a);
/// ```
#[derive(Debug, Clone)]
pub struct PressureFlowModel {
    surface_tension: f64,
    flow_rate: f64,
    collapse_radius: f64,
}

impl PressureFlowModel {
    /// Create a model.
    ///
    /// # Arguments
    /// * `surface_tension` - sigma in `P = 2 sigma / r`
    /// * `flow_rate` - proportionality constant between pressure difference and flow
    /// * `collapse_radius` - radius at which a shrinking bubble is considered gone
    pub fn new(surface_tension: f64, flow_rate: f64, collapse_radius: f64) -> Self {
        Self {
            surface_tension,
            flow_rate,
            collapse_radius: collapse_radius.max(MIN_RADIUS),
        }
    }

    /// Create a model from the configuration group.
    pub fn from_parameters(parameters: &PressureFlowParameters) -> Self {
        Self::new(
            parameters.surface_tension,
            parameters.flow_rate,
            parameters.collapse_radius,
        )
    }

    pub fn surface_tension(&self) -> f64 {
        self.surface_tension
    }

    pub fn flow_rate(&self) -> f64 {
        self.flow_rate
    }

    pub fn collapse_radius(&self) -> f64 {
        self.collapse_radius
    }

    /// Laplace pressure inside a bubble: `P = 2 sigma / r`.
    pub fn pressure(&self, radius: Radius) -> f64 {
        2.0 * self.surface_tension / radius.get()
    }

    /// Whether a bubble of this radius has reached the collapse floor.
    pub fn is_collapsed(&self, radius: Radius) -> bool {
        radius.get() <= self.collapse_radius
    }

    /// Advance the pair by one tick of length `dt`.
    ///
    /// With the valve closed, or once either bubble sits at the collapse
    /// floor, pressures are still reported but no air moves. On the tick that
    /// would push a bubble below the floor, the transfer is cut short so the
    /// bubble lands exactly on the floor; total volume is conserved either way.
    pub fn step(&self, pair: &BubblePair, dt: f64) -> FlowStep {
        let pressure_a = self.pressure(pair.radius_a);
        let pressure_b = self.pressure(pair.radius_b);

        let collapsed = self.is_collapsed(pair.radius_a) || self.is_collapsed(pair.radius_b);
        if !pair.valve_open || collapsed {
            return FlowStep {
                pressure_a,
                pressure_b,
                volume_delta_a: 0.0,
                volume_delta_b: 0.0,
                new_radius_a: pair.radius_a,
                new_radius_b: pair.radius_b,
                terminated: collapsed,
            };
        }

        let volume_a = pair.radius_a.volume();
        let volume_b = pair.radius_b.volume();
        let floor_volume = sphere_volume(self.collapse_radius);

        // Positive transfer moves air from A into B
        let mut transfer = (pressure_a - pressure_b) * self.flow_rate * dt.max(0.0);
        let mut collapsed_a = false;
        let mut collapsed_b = false;

        if volume_a - transfer < floor_volume {
            transfer = volume_a - floor_volume;
            collapsed_a = true;
        } else if volume_b + transfer < floor_volume {
            transfer = floor_volume - volume_b;
            collapsed_b = true;
        }

        let floor = Radius::new(self.collapse_radius);
        let new_radius_a = if collapsed_a {
            floor
        } else {
            radius_from_volume(volume_a - transfer)
        };
        let new_radius_b = if collapsed_b {
            floor
        } else {
            radius_from_volume(volume_b + transfer)
        };

        FlowStep {
            pressure_a,
            pressure_b,
            volume_delta_a: -transfer,
            volume_delta_b: transfer,
            new_radius_a,
            new_radius_b,
            terminated: collapsed_a || collapsed_b,
        }
    }
}

impl Default for PressureFlowModel {
    fn default() -> Self {
        Self::from_parameters(&PressureFlowParameters::default())
    }
}
