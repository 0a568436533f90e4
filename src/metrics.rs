//! Facial proportion metrics.
//!
//! This module turns a [`LandmarkSet`] into a [`FaceMetrics`] record of
//! dimensionless ratios. When no landmarks are available it produces a
//! synthetic record instead, so downstream consumers always get a complete
//! set of fields.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::geometry::{average, distance, ratio, turning_angle_degrees};
use crate::landmarks::{LandmarkSet, LandmarkSource};

/// The visible lower face (brows to chin) is taken as two thirds of the full
/// face height; the forehead is not covered by the 68 landmarks.
const FACE_HEIGHT_FACTOR: f32 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dimensions {
    /// Face width at the ears, in pixels
    pub width: f32,
    pub width_to_height: f32,
    /// Lower jaw width over face width
    pub jaw_to_cheek: f32,
    /// Lower jaw width, in pixels
    pub jaw_width: f32,
    /// Chin width, in pixels
    pub chin_width: f32,
    /// Turning angle along the jawline toward the chin, in degrees
    pub jaw_angle: f32,
}

/// Vertical thirds (三庭) as fractions of their sum.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Courts {
    pub upper: f32,
    pub middle: f32,
    pub lower: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Brows {
    /// Positive when the brow peak sits higher than its ends, in pixels
    pub arch: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Eyes {
    /// Inner-corner gap over mean eye width; 1.0 is the "five eyes" ideal
    pub spacing_ratio: f32,
    pub roundness: f32,
    /// Outer corner y minus inner corner y; positive is down-turned
    pub tilt: f32,
    pub coverage: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Nose {
    pub width_ratio: f32,
    pub length_ratio: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lips {
    pub fullness: f32,
    pub width_ratio: f32,
}

/// Proportions of a single face.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FaceMetrics {
    pub dimensions: Dimensions,
    pub courts: Courts,
    pub brows: Brows,
    pub eyes: Eyes,
    pub nose: Nose,
    pub lips: Lips,
}

impl FaceMetrics {
    /// Compute metrics from a complete landmark set.
    pub fn from_landmarks(lm: &LandmarkSet) -> Self {
        let jaw = lm.jaw();
        let nose = lm.nose();
        let left_eye = lm.left_eye();
        let right_eye = lm.right_eye();
        let mouth = lm.mouth();
        let left_brow = lm.left_brow();
        let right_brow = lm.right_brow();

        // Dimensions
        let face_width = distance(&jaw[0], &jaw[16]);
        let jaw_width = distance(&jaw[4], &jaw[12]);
        let chin_width = distance(&jaw[6], &jaw[10]);
        let mid_brow_y = (left_brow[4].y + right_brow[0].y) / 2.0;
        let chin_y = jaw[8].y;
        let face_height = (chin_y - mid_brow_y) * FACE_HEIGHT_FACTOR;

        // Courts. The hairline is not observable, so the upper court is
        // estimated as the mean of the middle and lower courts.
        let nose_base_y = nose[6].y;
        let middle_court = nose_base_y - mid_brow_y;
        let lower_court = chin_y - nose_base_y;
        let upper_court = (middle_court + lower_court) / 2.0;
        let total_court = upper_court + middle_court + lower_court;

        // Eyes: index 0 is the outer corner of the left eye, 3 the inner one.
        let left_eye_width = distance(&left_eye[0], &left_eye[3]);
        let right_eye_width = distance(&right_eye[0], &right_eye[3]);
        let avg_eye_width = (left_eye_width + right_eye_width) / 2.0;
        let inter_eye = distance(&left_eye[3], &right_eye[0]);
        let eye_height = distance(&left_eye[1], &left_eye[5]);

        // Nose
        let nose_width = distance(&nose[4], &nose[8]);
        let nose_height = distance(&nose[0], &nose[6]);

        // Lips: top of the upper lip (3) to the bottom centre (9), then on to 11.
        let mouth_width = distance(&mouth[0], &mouth[6]);
        let upper_lip = distance(&mouth[3], &mouth[9]);
        let lower_lip = distance(&mouth[9], &mouth[11]);

        let brow_arch = average(&[left_brow[0].y, left_brow[4].y]) - left_brow[2].y;

        Self {
            dimensions: Dimensions {
                width: face_width,
                width_to_height: ratio(face_width, face_height),
                jaw_to_cheek: ratio(jaw_width, face_width),
                jaw_width,
                chin_width,
                jaw_angle: turning_angle_degrees(&jaw[4], &jaw[6], &jaw[8]),
            },
            courts: Courts {
                upper: ratio(upper_court, total_court),
                middle: ratio(middle_court, total_court),
                lower: ratio(lower_court, total_court),
            },
            brows: Brows { arch: brow_arch },
            eyes: Eyes {
                spacing_ratio: ratio(inter_eye, avg_eye_width),
                roundness: ratio(eye_height, left_eye_width),
                tilt: left_eye[0].y - left_eye[3].y,
                coverage: ratio(avg_eye_width, face_width),
            },
            nose: Nose {
                width_ratio: ratio(nose_width, face_width),
                length_ratio: ratio(nose_height, total_court),
            },
            lips: Lips {
                fullness: ratio(upper_lip + lower_lip, mouth_width),
                width_ratio: ratio(mouth_width, face_width),
            },
        }
    }

    /// Every field is a finite number.
    pub fn is_finite(&self) -> bool {
        self.fields().iter().all(|v| v.is_finite())
    }

    fn fields(&self) -> [f32; 18] {
        let d = &self.dimensions;
        [
            d.width,
            d.width_to_height,
            d.jaw_to_cheek,
            d.jaw_width,
            d.chin_width,
            d.jaw_angle,
            self.courts.upper,
            self.courts.middle,
            self.courts.lower,
            self.brows.arch,
            self.eyes.spacing_ratio,
            self.eyes.roundness,
            self.eyes.tilt,
            self.eyes.coverage,
            self.nose.width_ratio,
            self.nose.length_ratio,
            self.lips.fullness,
            self.lips.width_ratio,
        ]
    }
}

/// Metrics plus whether they were synthesized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extraction {
    pub metrics: FaceMetrics,
    /// `true` when no landmarks were available and the values are synthetic
    pub synthetic: bool,
}

/// Extract metrics, falling back to a synthetic record when the source has no
/// landmarks. The fallback is reported through `Extraction::synthetic` and a
/// warning event, never as an error.
pub fn extract<R: Rng + ?Sized>(source: &LandmarkSource, rng: &mut R) -> Extraction {
    match source {
        LandmarkSource::Provided(lm) => Extraction {
            metrics: FaceMetrics::from_landmarks(lm),
            synthetic: false,
        },
        LandmarkSource::Unavailable => {
            warn!("no valid landmarks, using synthetic metrics");
            Extraction {
                metrics: synthetic_metrics(rng),
                synthetic: true,
            }
        }
    }
}

/// An inclusive `[min, max]` range; equal ends mean a fixed value.
pub type Range = (f32, f32);

/// Value ranges for the synthetic fallback record.
///
/// These are plausible demo values, not derived from any measured
/// distribution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SyntheticRanges {
    pub width: Range,
    pub width_to_height: Range,
    pub jaw_to_cheek: Range,
    pub jaw_width: Range,
    pub chin_width: Range,
    pub jaw_angle: Range,
    pub court: Range,
    pub brow_arch: Range,
    pub eye_spacing: Range,
    pub eye_roundness: Range,
    pub eye_tilt: Range,
    pub eye_coverage: Range,
    pub nose_width: Range,
    pub nose_length: Range,
    pub lip_fullness: Range,
    pub lip_width: Range,
}

pub const SYNTHETIC_RANGES: SyntheticRanges = SyntheticRanges {
    width: (200.0, 200.0),
    width_to_height: (0.75, 0.85),
    jaw_to_cheek: (0.8, 0.9),
    jaw_width: (160.0, 160.0),
    chin_width: (60.0, 60.0),
    jaw_angle: (25.0, 40.0),
    court: (0.305, 0.355),
    brow_arch: (5.0, 15.0),
    eye_spacing: (0.9, 1.1),
    eye_roundness: (0.4, 0.6),
    eye_tilt: (-5.0, 5.0),
    eye_coverage: (0.2, 0.2),
    nose_width: (0.2, 0.25),
    nose_length: (0.3, 0.35),
    lip_fullness: (0.3, 0.5),
    lip_width: (0.35, 0.45),
};

fn draw<R: Rng + ?Sized>(rng: &mut R, (min, max): Range) -> f32 {
    if max > min {
        rng.gen_range(min..=max)
    } else {
        min
    }
}

/// Draw every field independently from [`SYNTHETIC_RANGES`].
pub fn synthetic_metrics<R: Rng + ?Sized>(rng: &mut R) -> FaceMetrics {
    let r = &SYNTHETIC_RANGES;
    FaceMetrics {
        dimensions: Dimensions {
            width: draw(rng, r.width),
            width_to_height: draw(rng, r.width_to_height),
            jaw_to_cheek: draw(rng, r.jaw_to_cheek),
            jaw_width: draw(rng, r.jaw_width),
            chin_width: draw(rng, r.chin_width),
            jaw_angle: draw(rng, r.jaw_angle),
        },
        courts: Courts {
            upper: draw(rng, r.court),
            middle: draw(rng, r.court),
            lower: draw(rng, r.court),
        },
        brows: Brows {
            arch: draw(rng, r.brow_arch),
        },
        eyes: Eyes {
            spacing_ratio: draw(rng, r.eye_spacing),
            roundness: draw(rng, r.eye_roundness),
            tilt: draw(rng, r.eye_tilt),
            coverage: draw(rng, r.eye_coverage),
        },
        nose: Nose {
            width_ratio: draw(rng, r.nose_width),
            length_ratio: draw(rng, r.nose_length),
        },
        lips: Lips {
            fullness: draw(rng, r.lip_fullness),
            width_ratio: draw(rng, r.lip_width),
        },
    }
}
