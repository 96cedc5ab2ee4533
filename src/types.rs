use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::landmarks::{Landmark, LANDMARK_COUNT};

/// A 2D landmark coordinate in image pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Round both coordinates to 3 decimal places, the precision profiles are stored at.
    pub fn rounded(self) -> Self {
        Self {
            x: round3(self.x),
            y: round3(self.y),
        }
    }

    pub fn distance(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn midpoint(&self, other: &Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl std::ops::Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}

/// Face bounding box reported by the detector: top-left corner, width and height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Exactly 68 facial landmarks in the standard point order.
///
/// The count is checked on construction and on deserialization, so every
/// `LandmarkSet` in circulation can be indexed by any [`Landmark`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Point>", into = "Vec<Point>")]
pub struct LandmarkSet {
    points: Vec<Point>,
}

impl LandmarkSet {
    pub fn new(points: Vec<Point>) -> Result<Self, Error> {
        if points.len() != LANDMARK_COUNT {
            return Err(Error::LandmarkCount {
                expected: LANDMARK_COUNT,
                actual: points.len(),
            });
        }
        Ok(Self { points })
    }

    /// Caller guarantees `points.len() == LANDMARK_COUNT`.
    pub(crate) fn from_points_unchecked(points: Vec<Point>) -> Self {
        debug_assert_eq!(points.len(), LANDMARK_COUNT);
        Self { points }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn point(&self, landmark: Landmark) -> Point {
        self.points[landmark.index()]
    }

    /// Copy with every coordinate rounded to 3 decimal places.
    pub fn rounded(&self) -> Self {
        Self {
            points: self.points.iter().map(|p| p.rounded()).collect(),
        }
    }
}

impl TryFrom<Vec<Point>> for LandmarkSet {
    type Error = Error;

    fn try_from(points: Vec<Point>) -> Result<Self, Self::Error> {
        Self::new(points)
    }
}

impl From<LandmarkSet> for Vec<Point> {
    fn from(set: LandmarkSet) -> Self {
        set.points
    }
}

impl std::ops::Index<usize> for LandmarkSet {
    type Output = Point;

    fn index(&self, idx: usize) -> &Self::Output {
        &self.points[idx]
    }
}

impl std::ops::Index<Landmark> for LandmarkSet {
    type Output = Point;

    fn index(&self, landmark: Landmark) -> &Self::Output {
        &self.points[landmark.index()]
    }
}

/// Neural face embedding. Only ever used for distance computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct Descriptor {
    values: Vec<f64>,
}

impl Descriptor {
    pub fn new(values: Vec<f64>) -> Result<Self, Error> {
        if values.is_empty() {
            return Err(Error::EmptyDescriptor);
        }
        Ok(Self { values })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Euclidean distance to another descriptor of the same length.
    pub fn distance(&self, other: &Descriptor) -> Result<f64, Error> {
        if self.len() != other.len() {
            return Err(Error::DescriptorLength {
                left: self.len(),
                right: other.len(),
            });
        }
        let sum: f64 = self
            .values
            .iter()
            .zip(other.values.iter())
            .map(|(a, b)| (a - b) * (a - b))
            .sum();
        Ok(sum.sqrt())
    }
}

impl TryFrom<Vec<f64>> for Descriptor {
    type Error = Error;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        Self::new(values)
    }
}

impl From<Descriptor> for Vec<f64> {
    fn from(d: Descriptor) -> Self {
        d.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_rounding() {
        let p = Point::new(12.34567, -0.00049).rounded();
        assert_eq!(p.x, 12.346);
        assert_eq!(p.y, -0.0);
    }

    #[test]
    fn point_distance_and_midpoint() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(a.distance(&b), 5.0);
        assert_eq!(a.midpoint(&b), Point::new(1.5, 2.0));

        let diff = b - a;
        assert_eq!(diff, Point::new(3.0, 4.0));
    }

    #[test]
    fn landmark_set_requires_68_points() {
        let err = LandmarkSet::new(vec![Point::new(0.0, 0.0); 5]).unwrap_err();
        assert!(matches!(
            err,
            Error::LandmarkCount {
                expected: 68,
                actual: 5
            }
        ));

        let set = LandmarkSet::new(vec![Point::new(1.0, 2.0); 68]).unwrap();
        assert_eq!(set[Landmark::Chin], Point::new(1.0, 2.0));
    }

    #[test]
    fn landmark_set_deserialization_checks_count() {
        let json = serde_json::to_string(&vec![Point::new(0.0, 0.0); 67]).unwrap();
        assert!(serde_json::from_str::<LandmarkSet>(&json).is_err());
    }

    #[test]
    fn descriptor_distance() {
        let a = Descriptor::new(vec![0.0, 0.0, 0.0]).unwrap();
        let b = Descriptor::new(vec![0.0, 3.0, 4.0]).unwrap();
        assert_eq!(a.distance(&b).unwrap(), 5.0);
        assert_eq!(b.distance(&a).unwrap(), 5.0);

        let short = Descriptor::new(vec![1.0]).unwrap();
        assert!(a.distance(&short).unwrap_err().is_input_shape());
        assert!(matches!(Descriptor::new(vec![]), Err(Error::EmptyDescriptor)));
    }

    #[test]
    fn bounding_box_center() {
        let bbox = BoundingBox::new(100.0, 100.0, 200.0, 100.0);
        assert_eq!(bbox.center(), Point::new(200.0, 150.0));
    }
}
