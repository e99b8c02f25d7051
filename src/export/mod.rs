//! Export modules
//!
//! Writes widget output to PNG:
//! - Color strip: the banded thickness gradient
//! - Steiner diagram: pins, films, and junctions

pub mod image_export;

pub use image_export::{
    ExportError, export_color_strip, export_frame, export_steiner_diagram, render_color_strip,
    render_steiner_diagram,
};
