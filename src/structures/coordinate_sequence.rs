/*
This code is part of the WhiteboxTools geospatial analysis library.
Authors: Dr. John Lindsay
Created: 19/10/2026
Last Modified: 19/10/2026
License: MIT
*/

use super::{BoundingBox, Coordinate};
use std::ops::Index;
use std::slice::Iter;

/// An ordered list of coordinates sharing one dimensionality. The `has_z`
/// and `has_m` flags say which ordinates the sequence carries; a coordinate
/// whose flagged ordinate is NaN simply has no value for it.
#[derive(Default, Clone, Debug, PartialEq)]
pub struct CoordinateSequence {
    coords: Vec<Coordinate>,
    has_z: bool,
    has_m: bool,
}

impl Index<usize> for CoordinateSequence {
    type Output = Coordinate;

    fn index<'a>(&'a self, index: usize) -> &'a Coordinate {
        &self.coords[index]
    }
}

impl CoordinateSequence {
    pub fn new(has_z: bool, has_m: bool) -> CoordinateSequence {
        CoordinateSequence {
            coords: vec![],
            has_z: has_z,
            has_m: has_m,
        }
    }

    pub fn with_capacity(capacity: usize, has_z: bool, has_m: bool) -> CoordinateSequence {
        CoordinateSequence {
            coords: Vec::with_capacity(capacity),
            has_z: has_z,
            has_m: has_m,
        }
    }

    /// Builds a sequence, dropping any ordinate the flags exclude so that
    /// every coordinate has the same ordinate count.
    pub fn from_coords(coords: Vec<Coordinate>, has_z: bool, has_m: bool) -> CoordinateSequence {
        let mut seq = CoordinateSequence::with_capacity(coords.len(), has_z, has_m);
        for c in coords {
            seq.push(c);
        }
        seq
    }

    /// A 2-D sequence from (x, y) pairs.
    pub fn from_xy(points: &[(f64, f64)]) -> CoordinateSequence {
        let mut seq = CoordinateSequence::with_capacity(points.len(), false, false);
        for &(x, y) in points {
            seq.push(Coordinate::new(x, y));
        }
        seq
    }

    pub fn push(&mut self, mut c: Coordinate) {
        if !self.has_z {
            c.z = f64::NAN;
        }
        if !self.has_m {
            c.m = f64::NAN;
        }
        self.coords.push(c);
    }

    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    pub fn has_z(&self) -> bool {
        self.has_z
    }

    pub fn has_m(&self) -> bool {
        self.has_m
    }

    /// The number of ordinates per coordinate, 2 to 4.
    pub fn dimension(&self) -> usize {
        2 + self.has_z as usize + self.has_m as usize
    }

    pub fn iter(&self) -> Iter<'_, Coordinate> {
        self.coords.iter()
    }

    pub fn coords(&self) -> &[Coordinate] {
        &self.coords
    }

    pub fn first(&self) -> Option<&Coordinate> {
        self.coords.first()
    }

    pub fn last(&self) -> Option<&Coordinate> {
        self.coords.last()
    }

    /// True when the first and last coordinates coincide in the plane.
    pub fn is_closed(&self) -> bool {
        match (self.first(), self.last()) {
            (Some(a), Some(b)) => a.equals_2d(b),
            _ => false,
        }
    }

    /// Returns a new sequence with the coordinate order reversed.
    pub fn reversed(&self) -> CoordinateSequence {
        let mut coords = self.coords.clone();
        coords.reverse();
        CoordinateSequence {
            coords: coords,
            has_z: self.has_z,
            has_m: self.has_m,
        }
    }

    pub fn get_bounding_box(&self) -> BoundingBox {
        BoundingBox::from_coordinates(self.coords.iter())
    }
}

#[cfg(test)]
mod test {
    use super::CoordinateSequence;
    use crate::structures::Coordinate;

    #[test]
    fn test_flags_control_dimension() {
        let mut seq = CoordinateSequence::new(false, true);
        seq.push(Coordinate::new_zm(1.0, 2.0, 3.0, 4.0));
        assert_eq!(seq.dimension(), 3);
        assert!(seq[0].z.is_nan());
        assert_eq!(seq[0].m, 4.0);
    }

    #[test]
    fn test_reversed_and_closed() {
        let seq = CoordinateSequence::from_xy(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 0.0)]);
        assert!(seq.is_closed());
        let rev = seq.reversed();
        assert_eq!(rev[1], Coordinate::new(1.0, 1.0));
        assert_eq!(seq[1], Coordinate::new(1.0, 0.0));
        assert!(!CoordinateSequence::new(false, false).is_closed());
    }
}
