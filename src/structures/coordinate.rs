/*
This code is part of the WhiteboxTools geospatial analysis library.
Authors: Dr. John Lindsay
Created: 30/08/2018
Last Modified: 19/10/2026
License: MIT
*/
use std::f64;
use std::fmt;

/// A coordinate with x and y fields and optional z (elevation) and
/// m (measure) ordinates. A missing z or m is stored as NaN.
#[derive(Copy, Clone, Debug)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub m: f64,
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "(x: {}, y: {}, z: {}, m: {})",
            self.x, self.y, self.z, self.m
        )
    }
}

impl Default for Coordinate {
    fn default() -> Coordinate {
        Coordinate::new(0f64, 0f64)
    }
}

impl Coordinate {
    /// Creates a new 2-D Coordinate.
    pub fn new(x: f64, y: f64) -> Coordinate {
        Coordinate {
            x: x,
            y: y,
            z: f64::NAN,
            m: f64::NAN,
        }
    }

    pub fn new_z(x: f64, y: f64, z: f64) -> Coordinate {
        Coordinate {
            x: x,
            y: y,
            z: z,
            m: f64::NAN,
        }
    }

    pub fn new_m(x: f64, y: f64, m: f64) -> Coordinate {
        Coordinate {
            x: x,
            y: y,
            z: f64::NAN,
            m: m,
        }
    }

    pub fn new_zm(x: f64, y: f64, z: f64, m: f64) -> Coordinate {
        Coordinate {
            x: x,
            y: y,
            z: z,
            m: m,
        }
    }

    /// Exact equality on x and y only.
    pub fn equals_2d(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y
    }

    /// Tests if this coordinate is Left|On|Right of the infinite line through p0 and p1.
    ///
    /// Return: > 0 left of the line
    ///         = 0 on the line
    ///         < 0 right of the line
    pub fn is_left(&self, p0: &Coordinate, p1: &Coordinate) -> f64 {
        (p1.x - p0.x) * (self.y - p0.y) - (self.x - p0.x) * (p1.y - p0.y)
    }
}

fn same_ordinate(a: f64, b: f64) -> bool {
    (a.is_nan() && b.is_nan()) || a == b
}

// Missing ordinates compare equal to one another.
impl PartialEq for Coordinate {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x
            && self.y == other.y
            && same_ordinate(self.z, other.z)
            && same_ordinate(self.m, other.m)
    }
}

#[cfg(test)]
mod test {
    use super::Coordinate;
    use std::f64;

    #[test]
    fn test_missing_ordinates_are_equal() {
        assert_eq!(Coordinate::new(1.0, 2.0), Coordinate::new(1.0, 2.0));
        assert_ne!(Coordinate::new(1.0, 2.0), Coordinate::new_z(1.0, 2.0, 3.0));
        assert!(Coordinate::new(1.0, 2.0).equals_2d(&Coordinate::new_zm(1.0, 2.0, 3.0, 4.0)));
        assert!(Coordinate::new_m(0.0, 0.0, 2.5).z.is_nan());
    }

    #[test]
    fn test_is_left() {
        let p0 = Coordinate::new(0.0, 0.0);
        let p1 = Coordinate::new(10.0, 0.0);
        assert!(Coordinate::new(5.0, 1.0).is_left(&p0, &p1) > 0f64);
        assert!(Coordinate::new(5.0, -1.0).is_left(&p0, &p1) < 0f64);
        assert_eq!(Coordinate::new(5.0, 0.0).is_left(&p0, &p1), 0f64);
    }
}
