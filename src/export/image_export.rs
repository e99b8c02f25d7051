//! Image export functionality

use std::path::Path;

use glam::DVec2;

use crate::physics::steiner::{ConnectionMode, SteinerLayout};
use crate::physics::thin_film::{RgbColor, ThinFilmColorModel};

/// Errors that can occur during export
#[derive(Debug)]
pub enum ExportError {
    /// Failed to create image buffer
    BufferCreation(String),
    /// Failed to save image file
    SaveError(String),
    /// Invalid dimensions
    InvalidDimensions { width: u32, height: u32 },
}

impl std::fmt::Display for ExportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportError::BufferCreation(msg) => write!(f, "Failed to create image buffer: {}", msg),
            ExportError::SaveError(msg) => write!(f, "Failed to save image: {}", msg),
            ExportError::InvalidDimensions { width, height } => {
                write!(f, "Invalid dimensions: {}x{}", width, height)
            }
        }
    }
}

impl std::error::Error for ExportError {}

const BACKGROUND: [u8; 4] = [255, 255, 255, 255];
const FILM_COLOR: [u8; 4] = [52, 120, 219, 255];
const PIN_COLOR: [u8; 4] = [40, 40, 40, 255];
const JUNCTION_COLOR: [u8; 4] = [226, 84, 128, 255];

/// Export raw RGBA pixel data to a PNG file
///
/// # Arguments
/// * `path` - Output file path
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `data` - RGBA u8 pixel data (length must be width * height * 4)
pub fn export_frame<P: AsRef<Path>>(
    path: P,
    width: u32,
    height: u32,
    data: &[u8],
) -> Result<(), ExportError> {
    if width == 0 || height == 0 {
        return Err(ExportError::InvalidDimensions { width, height });
    }

    let expected_len = width as usize * height as usize * 4;
    if data.len() != expected_len {
        return Err(ExportError::BufferCreation(format!(
            "Data length {} doesn't match expected {} ({}x{}x4)",
            data.len(),
            expected_len,
            width,
            height
        )));
    }

    let image_buffer: image::ImageBuffer<image::Rgba<u8>, _> =
        image::ImageBuffer::from_raw(width, height, data.to_vec()).ok_or_else(|| {
            ExportError::BufferCreation("Failed to create image buffer from raw data".to_string())
        })?;

    image_buffer
        .save(path.as_ref())
        .map_err(|e| ExportError::SaveError(e.to_string()))?;

    Ok(())
}

/// Render the thickness color strip as RGBA pixels.
///
/// Thickness increases left to right from `min_thickness_nm` to
/// `max_thickness_nm`; every row is identical.
pub fn render_color_strip(
    model: &ThinFilmColorModel,
    min_thickness_nm: f64,
    max_thickness_nm: f64,
    width: u32,
    height: u32,
) -> Vec<u8> {
    let row: Vec<RgbColor> = model.color_strip(min_thickness_nm, max_thickness_nm, width as usize);
    let mut data = Vec::with_capacity(width as usize * height as usize * 4);

    for _ in 0..height {
        for color in &row {
            data.extend_from_slice(&[color.red, color.green, color.blue, 255]);
        }
    }

    data
}

/// Render and save the thickness color strip.
pub fn export_color_strip<P: AsRef<Path>>(
    path: P,
    model: &ThinFilmColorModel,
    min_thickness_nm: f64,
    max_thickness_nm: f64,
    width: u32,
    height: u32,
) -> Result<(), ExportError> {
    let data = render_color_strip(model, min_thickness_nm, max_thickness_nm, width, height);
    export_frame(path, width, height, &data)
}

/// Render the active network of a Steiner layout on a square canvas.
///
/// Films are drawn as lines, pins as dark dots, and (in soap-film mode)
/// junctions as colored dots.
pub fn render_steiner_diagram(layout: &SteinerLayout, size: u32) -> Vec<u8> {
    let mut canvas = Canvas::new(size);

    let origin = layout.corners[0];
    let side = (layout.corners[2] - layout.corners[0]).x.abs().max(f64::EPSILON);
    let margin = size as f64 * 0.1;
    let scale = (size as f64 - 2.0 * margin) / side;
    let stroke = (size as f64 / 150.0).max(1.0);

    // Flip y so the square's origin lands bottom-left
    let to_pixel = |point: DVec2| {
        let local = (point - origin) * scale;
        DVec2::new(margin + local.x, size as f64 - margin - local.y)
    };

    for segment in layout.segments() {
        canvas.line(to_pixel(segment.start), to_pixel(segment.end), stroke, FILM_COLOR);
    }
    if layout.mode == ConnectionMode::SoapFilm {
        for junction in layout.junctions {
            canvas.dot(to_pixel(junction), stroke * 2.5, JUNCTION_COLOR);
        }
    }
    for corner in layout.corners {
        canvas.dot(to_pixel(corner), stroke * 3.0, PIN_COLOR);
    }

    canvas.data
}

/// Render and save a Steiner diagram.
pub fn export_steiner_diagram<P: AsRef<Path>>(
    path: P,
    layout: &SteinerLayout,
    size: u32,
) -> Result<(), ExportError> {
    let data = render_steiner_diagram(layout, size);
    export_frame(path, size, size, &data)
}

struct Canvas {
    size: u32,
    data: Vec<u8>,
}

impl Canvas {
    fn new(size: u32) -> Self {
        let pixels = size as usize * size as usize;
        Self {
            size,
            data: BACKGROUND.repeat(pixels),
        }
    }

    fn put(&mut self, x: i64, y: i64, color: [u8; 4]) {
        if x < 0 || y < 0 || x >= self.size as i64 || y >= self.size as i64 {
            return;
        }
        let index = (y as usize * self.size as usize + x as usize) * 4;
        self.data[index..index + 4].copy_from_slice(&color);
    }

    fn dot(&mut self, center: DVec2, radius: f64, color: [u8; 4]) {
        let reach = radius.ceil() as i64;
        let (cx, cy) = (center.x.round() as i64, center.y.round() as i64);
        for dy in -reach..=reach {
            for dx in -reach..=reach {
                if ((dx * dx + dy * dy) as f64) <= radius * radius {
                    self.put(cx + dx, cy + dy, color);
                }
            }
        }
    }

    fn line(&mut self, start: DVec2, end: DVec2, width: f64, color: [u8; 4]) {
        let steps = start.distance(end).ceil().max(1.0) as usize;
        for i in 0..=steps {
            let point = start.lerp(end, i as f64 / steps as f64);
            self.dot(point, width / 2.0, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::steiner::SteinerLengthModel;
    use crate::physics::thin_film::FilmBand;
    use std::fs;

    fn pixel(data: &[u8], size: u32, x: u32, y: u32) -> [u8; 4] {
        let index = ((y * size + x) * 4) as usize;
        [data[index], data[index + 1], data[index + 2], data[index + 3]]
    }

    #[test]
    fn test_export_frame() {
        let width = 2;
        let height = 2;
        let red_pixel = [255u8, 0, 0, 255];
        let data: Vec<u8> = red_pixel.iter().cycle().take(16).copied().collect();

        let path = std::env::temp_dir().join("soap_film_widgets_export.png");
        let result = export_frame(&path, width, height, &data);
        assert!(result.is_ok());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_invalid_dimensions() {
        let result = export_frame("/tmp/test.png", 0, 100, &[]);
        assert!(matches!(result, Err(ExportError::InvalidDimensions { .. })));
    }

    #[test]
    fn test_wrong_data_length() {
        let result = export_frame("/tmp/test.png", 10, 10, &[0u8; 100]);
        assert!(matches!(result, Err(ExportError::BufferCreation(_))));
    }

    #[test]
    fn test_color_strip_pixels() {
        let model = ThinFilmColorModel::new();
        let data = render_color_strip(&model, 0.0, 1000.0, 101, 3);

        assert_eq!(data.len(), 101 * 3 * 4);
        let black = FilmBand::Black.color();
        let blue = FilmBand::Blue.color();
        assert_eq!(pixel(&data, 101, 0, 2), [black.red, black.green, black.blue, 255]);
        assert_eq!(pixel(&data, 101, 40, 1), [blue.red, blue.green, blue.blue, 255]);
    }

    #[test]
    fn test_steiner_diagram_draws_network() {
        let size = 100;
        let model = SteinerLengthModel::unit();

        let direct = render_steiner_diagram(&model.compute(ConnectionMode::Direct), size);
        let film = render_steiner_diagram(&model.compute(ConnectionMode::SoapFilm), size);

        assert_eq!(direct.len(), (size * size * 4) as usize);
        // Diagonals cross at the center and the bridge runs through it
        assert_eq!(pixel(&direct, size, 50, 50), FILM_COLOR);
        assert_eq!(pixel(&film, size, 50, 50), FILM_COLOR);
        assert_eq!(pixel(&film, size, 50, 30), BACKGROUND);
        assert_eq!(pixel(&direct, size, 50, 30), BACKGROUND);
        assert_ne!(pixel(&direct, size, 30, 30), BACKGROUND);
        // Corner pins
        assert_eq!(pixel(&film, size, 10, 90), PIN_COLOR);
    }
}
