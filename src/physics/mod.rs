//! Physics models behind the widgets
//!
//! Each model is a pure, stateless computation:
//! - Pressure flow: Laplace pressure and airflow between two connected bubbles
//! - Steiner: minimal soap-film network spanning the corners of a square
//! - Thin film: thickness to interference color banding

pub mod pressure_flow;
pub mod steiner;
pub mod thin_film;

pub use pressure_flow::{BubblePair, FlowDirection, FlowStep, PressureFlowModel, Radius};
pub use steiner::{ConnectionMode, Orientation, Segment, Square, SteinerLayout, SteinerLengthModel};
pub use thin_film::{FilmBand, FilmSample, RgbColor, ThinFilmColorModel};
