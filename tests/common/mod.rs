//! Shared landmark fixtures.

#![allow(dead_code)]

use face_style::{LandmarkSet, Point, Shape};

pub const CHIN: usize = 8;

/// A symmetric frontal face, 200px between the jaw ends, in 68-point order.
pub fn frontal_points() -> Vec<Point> {
    let coords: [(f32, f32); 68] = [
        // jaw
        (0.0, 100.0),
        (2.0, 130.0),
        (8.0, 160.0),
        (18.0, 190.0),
        (40.0, 215.0),
        (60.0, 235.0),
        (75.0, 250.0),
        (88.0, 258.0),
        (100.0, 260.0),
        (112.0, 258.0),
        (125.0, 250.0),
        (140.0, 235.0),
        (160.0, 215.0),
        (182.0, 190.0),
        (192.0, 160.0),
        (198.0, 130.0),
        (200.0, 100.0),
        // left brow
        (30.0, 72.0),
        (45.0, 64.0),
        (60.0, 62.0),
        (75.0, 64.0),
        (88.0, 70.0),
        // right brow
        (112.0, 70.0),
        (125.0, 64.0),
        (140.0, 62.0),
        (155.0, 64.0),
        (170.0, 72.0),
        // nose
        (100.0, 80.0),
        (100.0, 100.0),
        (100.0, 120.0),
        (100.0, 140.0),
        (80.0, 150.0),
        (90.0, 153.0),
        (100.0, 155.0),
        (110.0, 153.0),
        (120.0, 150.0),
        // left eye
        (40.0, 95.0),
        (50.0, 90.0),
        (62.0, 90.0),
        (75.0, 95.0),
        (62.0, 99.0),
        (50.0, 99.0),
        // right eye
        (125.0, 95.0),
        (138.0, 90.0),
        (150.0, 90.0),
        (160.0, 95.0),
        (150.0, 99.0),
        (138.0, 99.0),
        // outer mouth
        (70.0, 200.0),
        (78.0, 194.0),
        (90.0, 190.0),
        (100.0, 192.0),
        (110.0, 190.0),
        (122.0, 194.0),
        (130.0, 200.0),
        (122.0, 208.0),
        (110.0, 212.0),
        (100.0, 213.0),
        (90.0, 212.0),
        (78.0, 208.0),
        // inner mouth
        (74.0, 200.0),
        (90.0, 198.0),
        (100.0, 199.0),
        (110.0, 198.0),
        (126.0, 200.0),
        (110.0, 203.0),
        (100.0, 204.0),
        (90.0, 203.0),
    ];
    coords.iter().map(|&(x, y)| Point::new(x, y)).collect()
}

/// Jaw ends at x 0 and 200, jaw corners at x 40 and 160 on the same line,
/// chin lowered so width/height lands near 0.8.
pub fn heart_points() -> Vec<Point> {
    let mut points = frontal_points();
    points[4] = Point::new(40.0, 100.0);
    points[12] = Point::new(160.0, 100.0);
    points[CHIN] = Point::new(100.0, 237.0);
    points
}

pub fn landmark_set(points: Vec<Point>) -> LandmarkSet {
    LandmarkSet::from_shape(&Shape::new(points)).expect("68 points")
}
