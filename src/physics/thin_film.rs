//! Banded thin-film interference colors for the thickness slider.
//!
//! A soap film shows color because light reflected from its outer and inner
//! surfaces interferes. Which wavelengths survive depends on the film
//! thickness, so as a film drains its color walks through Newton's color
//! series: black when very thin, then white, gold, purple, blue, green,
//! yellow, red, and pale mixed colors once higher orders overlap.
//!
//! # Model
//!
//! This is a step function over fixed thickness bands. Each band maps to one
//! fixed color and there is no interpolation between bands:
//!
//! | Thickness (nm) | Band           |
//! |----------------|----------------|
//! | 0 - 30         | black          |
//! | 30 - 120       | silvery white  |
//! | 120 - 250      | gold           |
//! | 250 - 350      | purple         |
//! | 350 - 450      | blue           |
//! | 450 - 550      | green          |
//! | 550 - 650      | yellow         |
//! | 650 - 800      | red / pink     |
//! | 800+           | higher order   |
//!
//! Lower bounds are inclusive. Negative thicknesses are treated as zero.

use serde::Serialize;

use crate::config::FilmParameters;

/// 8-bit sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct RgbColor {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl RgbColor {
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Convert to a tuple of bytes.
    pub fn to_u8_tuple(&self) -> (u8, u8, u8) {
        (self.red, self.green, self.blue)
    }

    /// Convert to normalized f32 components (useful for graphics APIs).
    pub fn to_f32_tuple(&self) -> (f32, f32, f32) {
        (
            self.red as f32 / 255.0,
            self.green as f32 / 255.0,
            self.blue as f32 / 255.0,
        )
    }

    /// Convert to a normalized f32 array with alpha channel (RGBA).
    pub fn to_f32_array_with_alpha(&self, alpha: f32) -> [f32; 4] {
        let (red, green, blue) = self.to_f32_tuple();
        [red, green, blue, alpha]
    }

    /// CSS hex notation, e.g. `#daa520`.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }
}

/// Ordered thickness bands of the color series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FilmBand {
    Black,
    SilveryWhite,
    Gold,
    Purple,
    Blue,
    Green,
    Yellow,
    RedPink,
    HigherOrder,
}

impl FilmBand {
    /// All bands, thinnest first.
    pub const ALL: [FilmBand; 9] = [
        FilmBand::Black,
        FilmBand::SilveryWhite,
        FilmBand::Gold,
        FilmBand::Purple,
        FilmBand::Blue,
        FilmBand::Green,
        FilmBand::Yellow,
        FilmBand::RedPink,
        FilmBand::HigherOrder,
    ];

    /// Thickness range `[start, end)` in nanometers.
    pub fn range_nm(self) -> (f64, f64) {
        match self {
            FilmBand::Black => (0.0, 30.0),
            FilmBand::SilveryWhite => (30.0, 120.0),
            FilmBand::Gold => (120.0, 250.0),
            FilmBand::Purple => (250.0, 350.0),
            FilmBand::Blue => (350.0, 450.0),
            FilmBand::Green => (450.0, 550.0),
            FilmBand::Yellow => (550.0, 650.0),
            FilmBand::RedPink => (650.0, 800.0),
            FilmBand::HigherOrder => (800.0, f64::INFINITY),
        }
    }

    /// Display color of the band.
    pub fn color(self) -> RgbColor {
        match self {
            FilmBand::Black => RgbColor::new(0, 0, 0),
            FilmBand::SilveryWhite => RgbColor::new(226, 230, 236),
            FilmBand::Gold => RgbColor::new(218, 165, 32),
            FilmBand::Purple => RgbColor::new(142, 68, 173),
            FilmBand::Blue => RgbColor::new(52, 120, 219),
            FilmBand::Green => RgbColor::new(46, 184, 114),
            FilmBand::Yellow => RgbColor::new(241, 206, 48),
            FilmBand::RedPink => RgbColor::new(226, 84, 128),
            FilmBand::HigherOrder => RgbColor::new(206, 186, 210),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FilmBand::Black => "black",
            FilmBand::SilveryWhite => "silvery white",
            FilmBand::Gold => "gold",
            FilmBand::Purple => "purple",
            FilmBand::Blue => "blue",
            FilmBand::Green => "green",
            FilmBand::Yellow => "yellow",
            FilmBand::RedPink => "red / pink",
            FilmBand::HigherOrder => "higher-order mix",
        }
    }
}

/// Color lookup result for one thickness.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FilmSample {
    /// Thickness after clamping to zero (nm)
    pub thickness_nm: f64,
    pub band: FilmBand,
    pub color: RgbColor,
}

/// Maps film thickness to the band color seen at that thickness.
///
/// # Example
///
/// ```
/// use soap_film_widgets::physics::thin_film::{FilmBand, ThinFilmColorModel};
///
/// let model = ThinFilmColorModel::new();
/// assert_eq!(model.band_for(500.0), FilmBand::Green);
/// assert_eq!(model.color_for(-50.0), model.color_for(0.0));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ThinFilmColorModel;

impl ThinFilmColorModel {
    pub fn new() -> Self {
        Self
    }

    /// Band containing `thickness_nm` (negative values clamp to zero).
    pub fn band_for(&self, thickness_nm: f64) -> FilmBand {
        let thickness = clamp_thickness(thickness_nm);
        FilmBand::ALL
            .into_iter()
            .find(|band| thickness < band.range_nm().1)
            .unwrap_or(FilmBand::HigherOrder)
    }

    pub fn color_for(&self, thickness_nm: f64) -> RgbColor {
        self.band_for(thickness_nm).color()
    }

    pub fn sample(&self, thickness_nm: f64) -> FilmSample {
        let band = self.band_for(thickness_nm);
        FilmSample {
            thickness_nm: clamp_thickness(thickness_nm),
            band,
            color: band.color(),
        }
    }

    /// Colors sampled evenly across a thickness range.
    ///
    /// Used as the backdrop of the thickness slider. The strip stays banded;
    /// neighboring samples are never blended.
    ///
    /// # Arguments
    /// * `min_thickness_nm` - Thickness at the first sample
    /// * `max_thickness_nm` - Thickness at the last sample
    /// * `num_samples` - Number of samples in the strip
    pub fn color_strip(
        &self,
        min_thickness_nm: f64,
        max_thickness_nm: f64,
        num_samples: usize,
    ) -> Vec<RgbColor> {
        let intervals = num_samples.saturating_sub(1).max(1);
        let thickness_step = (max_thickness_nm - min_thickness_nm) / intervals as f64;

        (0..num_samples)
            .map(|i| self.color_for(min_thickness_nm + i as f64 * thickness_step))
            .collect()
    }

    /// Strip covering the configured slider range.
    pub fn slider_strip(&self, parameters: &FilmParameters, num_samples: usize) -> Vec<RgbColor> {
        self.color_strip(
            parameters.min_thickness_nm,
            parameters.max_thickness_nm,
            num_samples,
        )
    }
}

fn clamp_thickness(thickness_nm: f64) -> f64 {
    // NaN also lands on zero
    if thickness_nm > 0.0 { thickness_nm } else { 0.0 }
}
