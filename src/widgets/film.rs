//! State of the thickness slider.

use crate::config::FilmParameters;
use crate::physics::thin_film::{FilmSample, RgbColor, ThinFilmColorModel};

#[derive(Debug, Clone)]
pub struct FilmWidget {
    model: ThinFilmColorModel,
    min_nm: f64,
    max_nm: f64,
    step_nm: f64,
    thickness_nm: f64,
}

impl FilmWidget {
    pub fn new(parameters: &FilmParameters) -> Self {
        let min_nm = parameters.min_thickness_nm.min(parameters.max_thickness_nm);
        let max_nm = parameters.max_thickness_nm.max(parameters.min_thickness_nm);
        let mut widget = Self {
            model: ThinFilmColorModel::new(),
            min_nm,
            max_nm,
            step_nm: parameters.slider_step_nm.abs(),
            thickness_nm: min_nm,
        };
        widget.set_thickness(parameters.initial_thickness_nm);
        widget
    }

    pub fn thickness_nm(&self) -> f64 {
        self.thickness_nm
    }

    /// Move the slider, snapping to the nearest step inside the range.
    ///
    /// Returns the thickness actually applied.
    pub fn set_thickness(&mut self, thickness_nm: f64) -> f64 {
        let clamped = if thickness_nm.is_nan() {
            self.min_nm
        } else {
            thickness_nm.clamp(self.min_nm, self.max_nm)
        };
        let snapped = if self.step_nm > 0.0 {
            self.min_nm + ((clamped - self.min_nm) / self.step_nm).round() * self.step_nm
        } else {
            clamped
        };
        // Rounding up at the top edge can overshoot when the range is not a whole number of steps
        self.thickness_nm = snapped.min(self.max_nm);
        self.thickness_nm
    }

    /// Move the slider by a whole number of steps (arrow keys).
    pub fn nudge(&mut self, steps: i32) -> f64 {
        self.set_thickness(self.thickness_nm + steps as f64 * self.step_nm)
    }

    pub fn sample(&self) -> FilmSample {
        self.model.sample(self.thickness_nm)
    }

    /// Backdrop strip spanning the slider range.
    pub fn strip(&self, num_samples: usize) -> Vec<RgbColor> {
        self.model.color_strip(self.min_nm, self.max_nm, num_samples)
    }
}

impl Default for FilmWidget {
    fn default() -> Self {
        Self::new(&FilmParameters::default())
    }
}
