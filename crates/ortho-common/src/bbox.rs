//! Bounding boxes in a raster's native coordinate system.

use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box in native CRS units.
///
/// Follows the raster convention of naming edges rather than min/max
/// corners: `top` is the northern edge and `left` the western edge for a
/// north-up raster.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NativeBounds {
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
    pub top: f64,
}

impl NativeBounds {
    /// Create a new bounding box from its edges.
    pub fn new(left: f64, bottom: f64, right: f64, top: f64) -> Self {
        Self {
            left,
            bottom,
            right,
            top,
        }
    }

    /// Smallest box containing every given (x, y) point.
    ///
    /// Returns `None` for an empty iterator.
    pub fn envelope<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        points.into_iter().fold(None, |acc, (x, y)| {
            Some(match acc {
                None => Self::new(x, y, x, y),
                Some(b) => Self::new(b.left.min(x), b.bottom.min(y), b.right.max(x), b.top.max(y)),
            })
        })
    }

    /// Native-CRS midpoint as (x, y): the mean of left/right and of
    /// top/bottom taken independently.
    pub fn midpoint(&self) -> (f64, f64) {
        ((self.left + self.right) / 2.0, (self.top + self.bottom) / 2.0)
    }

    pub fn top_left(&self) -> (f64, f64) {
        (self.left, self.top)
    }

    pub fn bottom_right(&self) -> (f64, f64) {
        (self.right, self.bottom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_midpoint_is_independent_mean() {
        let b = NativeBounds::new(500000.0, 4649000.0, 501000.0, 4650000.0);
        assert_eq!(b.midpoint(), (500500.0, 4649500.0));
    }

    #[test]
    fn test_envelope() {
        let b = NativeBounds::envelope([(10.0, 5.0), (0.0, 20.0), (4.0, -1.0)]).unwrap();
        assert_eq!(b, NativeBounds::new(0.0, -1.0, 10.0, 20.0));
        assert!(NativeBounds::envelope(std::iter::empty()).is_none());
    }
}
