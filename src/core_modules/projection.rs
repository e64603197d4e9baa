// THEORY:
// A projection answers one question for one cube face: given a point on the face,
// which point of the equirectangular panorama lies behind it?
//
// Face-local coordinates `(ri, rj)` run over `[-1, 1]` on both axes. Each
// projection turns them into a direction, the direction into a longitude offset
// `dx` and a latitude offset `dy` (both as fractions of a full turn / half turn),
// and finally scales those into source pixel space. The result is split into an
// integer texel coordinate and a fractional remainder for the bilinear sampler.
//
// Conventions baked into the offsets:
// - Side faces: the seam sits at `1.5 * width` and the equator at `0.5 * height`.
// - Top face: longitude starts at `1 * width`, latitude grows down from row 0.
// - Bottom face: longitude mirrors the sides, latitude grows up from the last row.
// The integer parts are returned unwrapped (they may exceed the source extent)
// and are folded back by the sampler's wrap addressing.

use std::f64::consts::PI;

/// A fractional source coordinate, split for the sampler.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourceCoord {
    pub x: i64,
    pub y: i64,
    /// In `[0, 1)`.
    pub x_frac: f64,
    /// In `[0, 1)`.
    pub y_frac: f64,
}

/// Splits `value` into `(floor(value), value - floor(value))`.
#[inline]
pub fn split_fraction(value: f64) -> (i64, f64) {
    let whole = value.floor();
    (whole as i64, value - whole)
}

#[inline]
fn source_coord(x: f64, y: f64) -> SourceCoord {
    let (x, x_frac) = split_fraction(x);
    let (y, y_frac) = split_fraction(y);
    SourceCoord {
        x,
        y,
        x_frac,
        y_frac,
    }
}

/// The three mapping families a cube face can use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Projection {
    /// North, south, east and west, told apart by their horizontal rotation.
    Side,
    Top,
    Bottom,
}

impl Projection {
    pub fn project(
        self,
        ri: f64,
        rj: f64,
        h_rot: f64,
        src_width: f64,
        src_height: f64,
    ) -> SourceCoord {
        match self {
            Projection::Side => side(ri, rj, h_rot, src_width, src_height),
            Projection::Top => top(ri, rj, h_rot, src_width, src_height),
            Projection::Bottom => bottom(ri, rj, h_rot, src_width, src_height),
        }
    }
}

pub fn side(ri: f64, rj: f64, h_rot: f64, src_width: f64, src_height: f64) -> SourceCoord {
    let dx = (ri.atan() + h_rot) / (2.0 * PI);
    let dy = rj.atan2((ri * ri + 1.0).sqrt()) / PI;
    source_coord(src_width * (1.5 - dx), src_height * (0.5 - dy))
}

/// Longitude and latitude offsets shared by the two polar faces.
#[inline]
fn polar_offsets(ri: f64, rj: f64, h_rot: f64) -> (f64, f64) {
    let dx = (ri.atan2(rj) + h_rot) / (2.0 * PI);
    let dy = (ri * ri + rj * rj).sqrt().atan() / PI;
    (dx, dy)
}

pub fn top(ri: f64, rj: f64, h_rot: f64, src_width: f64, src_height: f64) -> SourceCoord {
    let (dx, dy) = polar_offsets(ri, rj, h_rot);
    source_coord(src_width * (1.0 + dx), src_height * dy)
}

pub fn bottom(ri: f64, rj: f64, h_rot: f64, src_width: f64, src_height: f64) -> SourceCoord {
    let (dx, dy) = polar_offsets(ri, rj, h_rot);
    source_coord(src_width * (1.5 - dx), src_height * (1.0 - dy))
}
