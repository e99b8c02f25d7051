//! Steiner soap-film network connecting the corners of a square.
//!
//! Dipping a frame with four pins arranged in a square into soap solution
//! produces a film that connects the pins with the shortest possible network.
//! The film does not form the two diagonals; it adds two junction points
//! where three films meet at 120 degrees (Plateau's rule), which is shorter.
//!
//! This is the closed-form special case for a square, not a general
//! Steiner tree solver.
//!
//! ```text
//!  3 ─────────── 2        3               2
//!   \           /          \             /
//!    \         /            J0 ─────── J1
//!     \       /            /             \
//!  0 ─────────── 1        0               1
//!     direct                soap film
//! ```
//!
//! For a square of side `s`:
//! - Direct (diagonals): `2 * sqrt(2) * s ≈ 2.828 s`
//! - Soap film: `(1 + sqrt(3)) * s ≈ 2.732 s`

use glam::DVec2;
use serde::Serialize;

use crate::config::SteinerParameters;

/// Which network the widget is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum ConnectionMode {
    /// Both diagonals of the square
    #[default]
    Direct,
    /// Minimal network with two 120 degree junctions
    SoapFilm,
}

impl ConnectionMode {
    /// The other mode.
    pub fn toggled(self) -> Self {
        match self {
            ConnectionMode::Direct => ConnectionMode::SoapFilm,
            ConnectionMode::SoapFilm => ConnectionMode::Direct,
        }
    }
}

/// Which midline of the square carries the two junctions.
///
/// Both orientations give the same total length; the square has two
/// equally minimal soap-film networks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Orientation {
    /// Junctions on the horizontal midline, bridge runs left to right
    #[default]
    Horizontal,
    /// Junctions on the vertical midline, bridge runs bottom to top
    Vertical,
}

/// Axis-aligned square whose corners are to be connected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Square {
    /// Bottom-left corner
    pub origin: DVec2,
    /// Side length
    pub side: f64,
}

impl Square {
    pub fn new(origin: DVec2, side: f64) -> Self {
        Self {
            origin,
            side: side.abs(),
        }
    }

    /// Unit square with its bottom-left corner at the origin.
    pub fn unit() -> Self {
        Self::new(DVec2::ZERO, 1.0)
    }

    /// Corners counter-clockwise from the origin: bottom-left, bottom-right,
    /// top-right, top-left.
    pub fn corners(&self) -> [DVec2; 4] {
        let s = self.side;
        [
            self.origin,
            self.origin + DVec2::new(s, 0.0),
            self.origin + DVec2::new(s, s),
            self.origin + DVec2::new(0.0, s),
        ]
    }

    pub fn center(&self) -> DVec2 {
        self.origin + DVec2::splat(self.side / 2.0)
    }
}

/// Straight film segment between two points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Segment {
    pub start: DVec2,
    pub end: DVec2,
}

impl Segment {
    pub fn new(start: DVec2, end: DVec2) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }
}

/// Geometry and lengths of both networks for one square.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SteinerLayout {
    /// Mode the layout was computed for
    pub mode: ConnectionMode,
    /// Midline carrying the junctions
    pub orientation: Orientation,
    /// Square corners, counter-clockwise from the bottom-left
    pub corners: [DVec2; 4],
    /// The two triple junctions of the soap-film network
    pub junctions: [DVec2; 2],
    /// Total length of both diagonals
    pub direct_length: f64,
    /// Total length of the soap-film network
    pub soap_film_length: f64,
}

impl SteinerLayout {
    /// Length of the network for the active mode.
    pub fn active_length(&self) -> f64 {
        match self.mode {
            ConnectionMode::Direct => self.direct_length,
            ConnectionMode::SoapFilm => self.soap_film_length,
        }
    }

    /// Fraction of the direct length saved by the soap film (about 3.4%).
    pub fn savings(&self) -> f64 {
        1.0 - self.soap_film_length / self.direct_length
    }

    /// Segments to draw for the active mode.
    pub fn segments(&self) -> Vec<Segment> {
        match self.mode {
            ConnectionMode::Direct => self.direct_segments().to_vec(),
            ConnectionMode::SoapFilm => self.soap_film_segments().to_vec(),
        }
    }

    /// The two diagonals.
    pub fn direct_segments(&self) -> [Segment; 2] {
        let [c0, c1, c2, c3] = self.corners;
        [Segment::new(c0, c2), Segment::new(c1, c3)]
    }

    /// Four corner legs followed by the bridge between the junctions.
    pub fn soap_film_segments(&self) -> [Segment; 5] {
        let [j0, j1] = self.junctions;
        let ([a0, a1], [b0, b1]) = self.junction_corners();
        [
            Segment::new(a0, j0),
            Segment::new(a1, j0),
            Segment::new(b0, j1),
            Segment::new(b1, j1),
            Segment::new(j0, j1),
        ]
    }

    /// Angles in degrees between the three films meeting at each junction.
    ///
    /// Each entry lists the angle between the two corner legs, then between
    /// the second leg and the bridge, then between the bridge and the first leg.
    pub fn junction_angles(&self) -> [[f64; 3]; 2] {
        let [j0, j1] = self.junctions;
        let ([a0, a1], [b0, b1]) = self.junction_corners();
        [
            triple_angles(j0, a0, a1, j1),
            triple_angles(j1, b0, b1, j0),
        ]
    }

    /// Corners attached to the first and second junction.
    fn junction_corners(&self) -> ([DVec2; 2], [DVec2; 2]) {
        let [c0, c1, c2, c3] = self.corners;
        match self.orientation {
            Orientation::Horizontal => ([c0, c3], [c1, c2]),
            Orientation::Vertical => ([c0, c1], [c3, c2]),
        }
    }
}

fn triple_angles(junction: DVec2, first: DVec2, second: DVec2, third: DVec2) -> [f64; 3] {
    let u = first - junction;
    let v = second - junction;
    let w = third - junction;
    [angle_degrees(u, v), angle_degrees(v, w), angle_degrees(w, u)]
}

fn angle_degrees(u: DVec2, v: DVec2) -> f64 {
    let cos = u.dot(v) / (u.length() * v.length());
    cos.clamp(-1.0, 1.0).acos().to_degrees()
}

/// Closed-form Steiner comparison for the corners of a square.
///
/// # Example
///
/// ```
/// use soap_film_widgets::physics::steiner::{ConnectionMode, SteinerLengthModel};
///
/// let layout = SteinerLengthModel::unit().compute(ConnectionMode::SoapFilm);
/// assert!(layout.soap_film_length < layout.direct_length);
/// ```
#[derive(Debug, Clone)]
pub struct SteinerLengthModel {
    square: Square,
    orientation: Orientation,
}

impl SteinerLengthModel {
    pub fn new(square: Square) -> Self {
        Self {
            square,
            orientation: Orientation::default(),
        }
    }

    pub fn unit() -> Self {
        Self::new(Square::unit())
    }

    /// Create a model from the configuration group (square at the origin).
    pub fn from_parameters(parameters: &SteinerParameters) -> Self {
        Self::new(Square::new(DVec2::ZERO, parameters.side))
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn square(&self) -> &Square {
        &self.square
    }

    /// Total length of both diagonals: `2 sqrt(2) s`.
    pub fn direct_length(&self) -> f64 {
        2.0 * std::f64::consts::SQRT_2 * self.square.side
    }

    /// Total length of the soap-film network: `(1 + sqrt(3)) s`.
    pub fn soap_film_length(&self) -> f64 {
        (1.0 + 3.0_f64.sqrt()) * self.square.side
    }

    /// Junction points of the soap-film network.
    ///
    /// Each sits on the midline at `s / (2 sqrt(3))` from its nearer edge,
    /// which makes every corner leg `s / sqrt(3)` long and every junction
    /// angle exactly 120 degrees.
    pub fn junctions(&self) -> [DVec2; 2] {
        let s = self.square.side;
        let inset = s / (2.0 * 3.0_f64.sqrt());
        let half = s / 2.0;
        let origin = self.square.origin;
        match self.orientation {
            Orientation::Horizontal => [
                origin + DVec2::new(inset, half),
                origin + DVec2::new(s - inset, half),
            ],
            Orientation::Vertical => [
                origin + DVec2::new(half, inset),
                origin + DVec2::new(half, s - inset),
            ],
        }
    }

    /// Compute the layout for the given mode.
    pub fn compute(&self, mode: ConnectionMode) -> SteinerLayout {
        SteinerLayout {
            mode,
            orientation: self.orientation,
            corners: self.square.corners(),
            junctions: self.junctions(),
            direct_length: self.direct_length(),
            soap_film_length: self.soap_film_length(),
        }
    }
}

impl Default for SteinerLengthModel {
    fn default() -> Self {
        Self::unit()
    }
}
