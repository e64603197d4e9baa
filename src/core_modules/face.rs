// THEORY:
// A cube map has six faces, but only three kinds of projection. The four side
// faces share one mapping and differ only by a quarter-turn rotation around the
// vertical axis; top and bottom each have their own. `CubeFace` names the six
// faces in canonical order and knows its projection and base rotation, while
// `FaceSpec` is the immutable work order handed to an extraction task: which
// face, what to call it, how wide to render it, and the total rotation to use.

use crate::core_modules::projection::Projection;
use std::f64::consts::{FRAC_PI_2, PI};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CubeFace {
    North,
    South,
    West,
    East,
    Top,
    Bottom,
}

impl CubeFace {
    /// Canonical order. Face-name lists and run reports follow it.
    pub const ALL: [CubeFace; 6] = [
        CubeFace::North,
        CubeFace::South,
        CubeFace::West,
        CubeFace::East,
        CubeFace::Top,
        CubeFace::Bottom,
    ];

    pub fn projection(self) -> Projection {
        match self {
            CubeFace::North | CubeFace::South | CubeFace::West | CubeFace::East => Projection::Side,
            CubeFace::Top => Projection::Top,
            CubeFace::Bottom => Projection::Bottom,
        }
    }

    /// Rotation around the vertical axis, in radians, before any user offset.
    pub fn base_rotation(self) -> f64 {
        match self {
            CubeFace::North => 0.0,
            CubeFace::South => PI,
            CubeFace::West => -FRAC_PI_2,
            CubeFace::East => FRAC_PI_2,
            CubeFace::Top | CubeFace::Bottom => 0.0,
        }
    }

    pub fn default_name(self) -> &'static str {
        match self {
            CubeFace::North => "north",
            CubeFace::South => "south",
            CubeFace::West => "west",
            CubeFace::East => "east",
            CubeFace::Top => "top",
            CubeFace::Bottom => "bottom",
        }
    }
}

/// Everything an extraction task needs to know about one face.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceSpec {
    pub face: CubeFace,
    /// Used in log lines and output file names.
    pub name: String,
    /// Side length of the square output, in pixels.
    pub output_width: u32,
    pub projection: Projection,
    /// Base rotation plus the user's offset, in radians.
    pub horizontal_rotation: f64,
}

impl FaceSpec {
    pub fn new(
        face: CubeFace,
        name: impl Into<String>,
        output_width: u32,
        extra_rotation: f64,
    ) -> Self {
        Self {
            face,
            name: name.into(),
            output_width,
            projection: face.projection(),
            horizontal_rotation: face.base_rotation() + extra_rotation,
        }
    }

    /// Builds the six specs of a cube in canonical order.
    pub fn cube(names: &[String; 6], output_width: u32, extra_rotation: f64) -> Vec<FaceSpec> {
        CubeFace::ALL
            .iter()
            .zip(names.iter())
            .map(|(&face, name)| FaceSpec::new(face, name.clone(), output_width, extra_rotation))
            .collect()
    }

    /// `<prefix><name>.jpg`. The prefix may carry a directory.
    pub fn output_path(&self, prefix: &str) -> PathBuf {
        PathBuf::from(format!("{}{}.jpg", prefix, self.name))
    }
}
