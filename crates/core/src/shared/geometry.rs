use serde::{Deserialize, Serialize};

use crate::shared::constants::LANDMARK_COUNT;

/// Integer pixel coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Clamps both coordinates to >= 0. Landmark estimators can report
    /// slightly negative positions near frame edges; the presenter
    /// protocol only accepts non-negative coordinates.
    pub fn clamp_non_negative(self) -> Self {
        Self {
            x: self.x.max(0),
            y: self.y.max(0),
        }
    }
}

/// Axis-aligned detection box, left-top and right-bottom corners.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rectangle {
    pub lt: Point,
    pub rb: Point,
}

impl Rectangle {
    pub fn new(lt: Point, rb: Point) -> Self {
        Self { lt, rb }
    }

    /// A rectangle that collapsed to a single point is never a valid
    /// detection.
    pub fn is_degenerate(&self) -> bool {
        self.lt == self.rb
    }
}

/// Fixed-length ordered facial landmark set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LandmarkSet {
    points: [Point; LANDMARK_COUNT],
}

impl LandmarkSet {
    pub fn new(points: [Point; LANDMARK_COUNT]) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Point; LANDMARK_COUNT] {
        &self.points
    }

    /// Returns a copy with every coordinate clamped to >= 0.
    pub fn clamped(&self) -> Self {
        Self {
            points: self.points.map(Point::clamp_non_negative),
        }
    }
}

/// Head pose angles in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PoseEstimate {
    pub pitch: f32,
    pub yaw: f32,
    pub roll: f32,
}

impl PoseEstimate {
    pub fn new(pitch: f32, yaw: f32, roll: f32) -> Self {
        Self { pitch, yaw, roll }
    }

    /// Label text rendered next to the detection box on the presenter side.
    pub fn label(&self) -> String {
        format!("pitch:{},yaw:{},roll:{}", self.pitch, self.yaw, self.roll)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::both_negative(Point::new(-5, -3), Point::new(0, 0))]
    #[case::positive_unchanged(Point::new(10, 20), Point::new(10, 20))]
    #[case::zero_unchanged(Point::new(0, 0), Point::new(0, 0))]
    #[case::mixed(Point::new(-1, 7), Point::new(0, 7))]
    fn test_clamp_non_negative(#[case] input: Point, #[case] expected: Point) {
        assert_eq!(input.clamp_non_negative(), expected);
    }

    #[test]
    fn test_degenerate_rectangle() {
        let p = Point::new(42, 42);
        assert!(Rectangle::new(p, p).is_degenerate());
    }

    #[test]
    fn test_non_degenerate_rectangle() {
        let rect = Rectangle::new(Point::new(0, 0), Point::new(100, 80));
        assert!(!rect.is_degenerate());
    }

    #[test]
    fn test_same_x_different_y_not_degenerate() {
        // Only a full point collapse counts, matching lt == rb exactly.
        let rect = Rectangle::new(Point::new(5, 0), Point::new(5, 10));
        assert!(!rect.is_degenerate());
    }

    #[test]
    fn test_landmark_set_clamped() {
        let mut points = [Point::new(10, 20); LANDMARK_COUNT];
        points[0] = Point::new(-5, -3);
        points[67] = Point::new(-1, 300);

        let clamped = LandmarkSet::new(points).clamped();
        assert_eq!(clamped.points()[0], Point::new(0, 0));
        assert_eq!(clamped.points()[1], Point::new(10, 20));
        assert_eq!(clamped.points()[67], Point::new(0, 300));
    }

    #[test]
    fn test_pose_label_format() {
        let pose = PoseEstimate::new(1.5, -2.25, 0.0);
        assert_eq!(pose.label(), "pitch:1.5,yaw:-2.25,roll:0");
    }
}
