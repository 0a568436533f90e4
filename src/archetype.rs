//! Face-shape and eye-type archetypes.
//!
//! Both classifiers are fixed decision trees over [`FaceMetrics`]; the first
//! matching branch wins.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::metrics::FaceMetrics;

/// Face shape categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FaceShape {
    /// Balanced proportions, slightly longer than wide
    Oval,
    /// Wide and soft-jawed
    Round,
    /// Wide jaw close to cheek width
    Square,
    /// Markedly longer than wide
    Long,
    /// Narrow jaw under a wider face
    Heart,
    /// Wide cheekbones, narrow forehead and jaw
    Diamond,
    /// Long with an angular, wide jaw
    Oblong,
}

impl FaceShape {
    pub const ALL: [FaceShape; 7] = [
        FaceShape::Oval,
        FaceShape::Round,
        FaceShape::Square,
        FaceShape::Long,
        FaceShape::Heart,
        FaceShape::Diamond,
        FaceShape::Oblong,
    ];

    /// Name used as a tag and in serialized output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Oval => "oval",
            Self::Round => "round",
            Self::Square => "square",
            Self::Long => "long",
            Self::Heart => "heart",
            Self::Diamond => "diamond",
            Self::Oblong => "oblong",
        }
    }
}

impl fmt::Display for FaceShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Eye shape categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EyeType {
    Standard,
    Round,
    Long,
    /// Outer corner higher than the inner one
    Up,
    /// Outer corner lower than the inner one
    Down,
}

impl EyeType {
    pub const ALL: [EyeType; 5] = [
        EyeType::Standard,
        EyeType::Round,
        EyeType::Long,
        EyeType::Up,
        EyeType::Down,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Round => "round",
            Self::Long => "long",
            Self::Up => "up",
            Self::Down => "down",
        }
    }
}

impl fmt::Display for EyeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Width-to-height bands.
const WIDE_FACE: f32 = 0.85;
const NARROW_FACE: f32 = 0.72;

const EYE_TILT: f32 = 3.0;
const ROUND_EYE: f32 = 0.48;
const LONG_EYE: f32 = 0.35;

pub fn classify_face_shape(metrics: &FaceMetrics) -> FaceShape {
    let d = &metrics.dimensions;

    if d.width_to_height > WIDE_FACE {
        if (d.jaw_angle > 25.0 && d.jaw_to_cheek > 0.9) || d.jaw_to_cheek > 0.92 {
            FaceShape::Square
        } else {
            FaceShape::Round
        }
    } else if d.width_to_height < NARROW_FACE {
        if d.jaw_angle > 20.0 && d.jaw_to_cheek > 0.88 {
            FaceShape::Oblong
        } else {
            FaceShape::Long
        }
    } else if d.jaw_to_cheek < 0.75 {
        FaceShape::Heart
    } else if d.jaw_to_cheek > 0.9 {
        FaceShape::Square
    } else {
        FaceShape::Oval
    }
}

pub fn classify_eye_type(metrics: &FaceMetrics) -> EyeType {
    let e = &metrics.eyes;

    if e.tilt < -EYE_TILT {
        EyeType::Up
    } else if e.tilt > EYE_TILT {
        EyeType::Down
    } else if e.roundness > ROUND_EYE {
        EyeType::Round
    } else if e.roundness < LONG_EYE {
        EyeType::Long
    } else {
        EyeType::Standard
    }
}
