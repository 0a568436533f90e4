//! Bounded "objective score" from weighted deviations against per-shape ideals.
//!
//! The score is a deterministic heuristic in `[70, 96]`, not a validated
//! anthropometric model.

use serde::Serialize;

use crate::archetype::FaceShape;
use crate::geometry::{average, ratio};
use crate::metrics::FaceMetrics;

pub const MIN_SCORE: u8 = 70;
pub const MAX_SCORE: u8 = 96;

/// Normalized deviations are capped at this many tolerances.
const MAX_DEVIATION: f32 = 2.0;

const ONE_THIRD: f32 = 1.0 / 3.0;
const COURT_TOLERANCE: f32 = 0.07;

/// Ideal proportions for one face shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeIdeal {
    pub width_to_height: f32,
    pub jaw_to_cheek: f32,
}

/// One row per [`FaceShape`].
pub const SHAPE_IDEALS: [(FaceShape, ShapeIdeal); 7] = [
    (FaceShape::Oval, ShapeIdeal { width_to_height: 0.78, jaw_to_cheek: 0.82 }),
    (FaceShape::Round, ShapeIdeal { width_to_height: 0.9, jaw_to_cheek: 0.88 }),
    (FaceShape::Square, ShapeIdeal { width_to_height: 0.88, jaw_to_cheek: 0.94 }),
    (FaceShape::Long, ShapeIdeal { width_to_height: 0.68, jaw_to_cheek: 0.82 }),
    (FaceShape::Heart, ShapeIdeal { width_to_height: 0.8, jaw_to_cheek: 0.7 }),
    (FaceShape::Diamond, ShapeIdeal { width_to_height: 0.76, jaw_to_cheek: 0.78 }),
    (FaceShape::Oblong, ShapeIdeal { width_to_height: 0.68, jaw_to_cheek: 0.9 }),
];

pub fn ideal_for(shape: FaceShape) -> ShapeIdeal {
    SHAPE_IDEALS
        .iter()
        .find(|(s, _)| *s == shape)
        .map(|(_, ideal)| *ideal)
        .unwrap_or(SHAPE_IDEALS[0].1)
}

/// `|value - ideal| / tolerance`, clamped to `[0, 2]`.
pub fn normalize_diff(value: f32, ideal: f32, tolerance: f32) -> f32 {
    ratio((value - ideal).abs(), tolerance).clamp(0.0, MAX_DEVIATION)
}

/// The four deviation components behind a score.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Deviations {
    pub court: f32,
    pub five_eye: f32,
    pub shape: f32,
    pub detail: f32,
}

impl Deviations {
    pub fn compute(m: &FaceMetrics, shape: FaceShape) -> Self {
        let ideal = ideal_for(shape);
        let d = &m.dimensions;

        let court = average(&[
            normalize_diff(m.courts.upper, ONE_THIRD, COURT_TOLERANCE),
            normalize_diff(m.courts.middle, ONE_THIRD, COURT_TOLERANCE),
            normalize_diff(m.courts.lower, ONE_THIRD, COURT_TOLERANCE),
        ]);

        let five_eye = normalize_diff(m.eyes.spacing_ratio, 1.0, 0.22);

        let shape = average(&[
            normalize_diff(d.width_to_height, ideal.width_to_height, 0.08),
            normalize_diff(d.jaw_to_cheek, ideal.jaw_to_cheek, 0.1),
        ]);

        let detail = average(&[
            normalize_diff(ratio(d.chin_width, d.jaw_width), 0.32, 0.18),
            normalize_diff(m.nose.width_ratio, 0.21, 0.07),
            normalize_diff(m.nose.length_ratio, 0.33, 0.08),
            normalize_diff(ratio(m.brows.arch, d.width), 0.04, 0.03),
            normalize_diff(m.lips.width_ratio, 0.38, 0.1),
            normalize_diff(m.eyes.roundness, 0.42, 0.18),
        ]);

        Self {
            court,
            five_eye,
            shape,
            detail,
        }
    }

    pub fn weighted(&self) -> f32 {
        0.38 * self.court + 0.28 * self.five_eye + 0.2 * self.shape + 0.14 * self.detail
    }
}

/// Score a face against the ideals of its classified shape.
pub fn score(metrics: &FaceMetrics, shape: FaceShape) -> u8 {
    let dev = Deviations::compute(metrics, shape);
    let raw = 98.0 - dev.weighted() * 18.0 - (dev.court * 6.0 + dev.five_eye * 4.0);
    if !raw.is_finite() {
        return MIN_SCORE;
    }
    raw.clamp(MIN_SCORE as f32, MAX_SCORE as f32).round() as u8
}
