//! Landmark groups and the input capability consumed by the extractor.
//!
//! A [`LandmarkSet`] is always complete: every group has exactly the number of
//! points the 68-point layout defines. Anything that cannot produce such a set
//! becomes [`LandmarkSource::Unavailable`], which the extractor answers with a
//! synthetic record instead of an error.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::types::{Point, Shape};

pub const JAW_POINTS: usize = 17;
pub const NOSE_POINTS: usize = 9;
pub const EYE_POINTS: usize = 6;
pub const MOUTH_POINTS: usize = 20;
pub const BROW_POINTS: usize = 5;

/// Total points in the dlib / face-api layout.
pub const SHAPE_POINTS: usize = 68;

/// Raw, unvalidated landmark groups as they arrive on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LandmarkGroups {
    pub jaw: Vec<Point>,
    pub nose: Vec<Point>,
    pub left_eye: Vec<Point>,
    pub right_eye: Vec<Point>,
    pub mouth: Vec<Point>,
    #[serde(rename = "leftEyeBrow", alias = "leftBrow")]
    pub left_brow: Vec<Point>,
    #[serde(rename = "rightEyeBrow", alias = "rightBrow")]
    pub right_brow: Vec<Point>,
}

/// A validated, immutable set of named landmark groups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LandmarkGroups", into = "LandmarkGroups")]
pub struct LandmarkSet {
    groups: LandmarkGroups,
}

impl LandmarkSet {
    /// Validate group sizes and wrap them.
    pub fn new(groups: LandmarkGroups) -> Result<Self> {
        check_group("jaw", &groups.jaw, JAW_POINTS)?;
        check_group("nose", &groups.nose, NOSE_POINTS)?;
        check_group("leftEye", &groups.left_eye, EYE_POINTS)?;
        check_group("rightEye", &groups.right_eye, EYE_POINTS)?;
        check_group("mouth", &groups.mouth, MOUTH_POINTS)?;
        check_group("leftEyeBrow", &groups.left_brow, BROW_POINTS)?;
        check_group("rightEyeBrow", &groups.right_brow, BROW_POINTS)?;
        Ok(Self { groups })
    }

    /// Split a flat 68-point shape into groups.
    ///
    /// Index layout: jaw 0-16, left brow 17-21, right brow 22-26, nose 27-35,
    /// left eye 36-41, right eye 42-47, mouth 48-67. Extra points (for example
    /// the forehead points of an 81-point model) are ignored.
    pub fn from_shape(shape: &Shape) -> Result<Self> {
        if shape.num_landmarks() < SHAPE_POINTS {
            return Err(Error::InvalidLandmarks {
                group: "shape",
                expected: SHAPE_POINTS,
                actual: shape.num_landmarks(),
            });
        }

        let p = &shape.points;
        Self::new(LandmarkGroups {
            jaw: p[0..=16].to_vec(),
            left_brow: p[17..=21].to_vec(),
            right_brow: p[22..=26].to_vec(),
            nose: p[27..=35].to_vec(),
            left_eye: p[36..=41].to_vec(),
            right_eye: p[42..=47].to_vec(),
            mouth: p[48..=67].to_vec(),
        })
    }

    pub fn jaw(&self) -> &[Point] {
        &self.groups.jaw
    }

    pub fn nose(&self) -> &[Point] {
        &self.groups.nose
    }

    pub fn left_eye(&self) -> &[Point] {
        &self.groups.left_eye
    }

    pub fn right_eye(&self) -> &[Point] {
        &self.groups.right_eye
    }

    pub fn mouth(&self) -> &[Point] {
        &self.groups.mouth
    }

    pub fn left_brow(&self) -> &[Point] {
        &self.groups.left_brow
    }

    pub fn right_brow(&self) -> &[Point] {
        &self.groups.right_brow
    }
}

impl TryFrom<LandmarkGroups> for LandmarkSet {
    type Error = Error;

    fn try_from(groups: LandmarkGroups) -> Result<Self> {
        Self::new(groups)
    }
}

impl From<LandmarkSet> for LandmarkGroups {
    fn from(set: LandmarkSet) -> Self {
        set.groups
    }
}

fn check_group(group: &'static str, points: &[Point], expected: usize) -> Result<()> {
    if points.len() == expected {
        Ok(())
    } else {
        Err(Error::InvalidLandmarks {
            group,
            expected,
            actual: points.len(),
        })
    }
}

/// A detector result that carries its landmarks under a `landmarks` field.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    pub landmarks: Option<LandmarkSet>,
    pub score: Option<f32>,
}

/// What the extractor is given: either a usable landmark set or nothing.
#[derive(Debug, Clone, PartialEq)]
pub enum LandmarkSource {
    Provided(LandmarkSet),
    Unavailable,
}

impl LandmarkSource {
    /// Parse a JSON landmark document.
    ///
    /// Syntax errors are returned. A well-formed document in an unrecognised
    /// shape, or one with the wrong point counts, becomes `Unavailable`.
    pub fn from_json(text: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        match serde_json::from_value::<Option<LandmarkInput>>(value) {
            Ok(input) => Ok(input.into()),
            Err(e) => {
                debug!(error = %e, "landmark document not recognised");
                Ok(Self::Unavailable)
            }
        }
    }

    pub fn is_provided(&self) -> bool {
        matches!(self, Self::Provided(_))
    }
}

impl From<LandmarkSet> for LandmarkSource {
    fn from(set: LandmarkSet) -> Self {
        Self::Provided(set)
    }
}

impl From<Option<LandmarkSet>> for LandmarkSource {
    fn from(set: Option<LandmarkSet>) -> Self {
        set.map_or(Self::Unavailable, Self::Provided)
    }
}

impl From<Detection> for LandmarkSource {
    fn from(detection: Detection) -> Self {
        detection.landmarks.into()
    }
}

impl From<&Shape> for LandmarkSource {
    fn from(shape: &Shape) -> Self {
        match LandmarkSet::from_shape(shape) {
            Ok(set) => Self::Provided(set),
            Err(e) => {
                debug!(error = %e, "shape rejected");
                Self::Unavailable
            }
        }
    }
}

/// Any of the accepted JSON landmark layouts.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LandmarkInput {
    Groups(LandmarkGroups),
    Flat(Shape),
    /// `[x0, y0, x1, y1, ...]`
    Coords(Vec<f32>),
    Detection(DetectionInput),
}

/// Wire form of [`Detection`]; the nested landmarks may use any layout.
#[derive(Debug, Clone, Deserialize)]
pub struct DetectionInput {
    pub landmarks: Option<Box<LandmarkInput>>,
    #[serde(default)]
    pub score: Option<f32>,
}

impl From<LandmarkInput> for LandmarkSource {
    fn from(input: LandmarkInput) -> Self {
        match input {
            LandmarkInput::Groups(groups) => match LandmarkSet::new(groups) {
                Ok(set) => Self::Provided(set),
                Err(e) => {
                    debug!(error = %e, "landmark groups rejected");
                    Self::Unavailable
                }
            },
            LandmarkInput::Flat(shape) => Self::from(&shape),
            LandmarkInput::Coords(coords) if coords.len() % 2 == 0 => {
                Self::from(&Shape::from_flat_vec(&coords))
            }
            LandmarkInput::Coords(coords) => {
                debug!(len = coords.len(), "odd coordinate count");
                Self::Unavailable
            }
            LandmarkInput::Detection(detection) => match detection.landmarks {
                Some(inner) => (*inner).into(),
                None => Self::Unavailable,
            },
        }
    }
}

impl From<Option<LandmarkInput>> for LandmarkSource {
    fn from(input: Option<LandmarkInput>) -> Self {
        input.map_or(Self::Unavailable, Self::from)
    }
}
