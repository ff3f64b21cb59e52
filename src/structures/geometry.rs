/*
This code is part of the WhiteboxTools geospatial analysis library.
Authors: Dr. John Lindsay
Created: 19/10/2026
Last Modified: 19/10/2026
License: MIT
*/

use super::{BoundingBox, Coordinate, CoordinateSequence};

/// A single position. An empty point holds no coordinate.
#[derive(Default, Clone, Debug, PartialEq)]
pub struct Point {
    pub coords: CoordinateSequence,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Point {
        Point::from_coordinate(Coordinate::new(x, y), false, false)
    }

    pub fn from_coordinate(c: Coordinate, has_z: bool, has_m: bool) -> Point {
        let mut coords = CoordinateSequence::with_capacity(1, has_z, has_m);
        coords.push(c);
        Point { coords: coords }
    }

    pub fn empty() -> Point {
        Point::default()
    }

    pub fn coordinate(&self) -> Option<&Coordinate> {
        self.coords.first()
    }
}

#[derive(Default, Clone, Debug, PartialEq)]
pub struct MultiPoint {
    pub coords: CoordinateSequence,
}

impl MultiPoint {
    pub fn new(coords: CoordinateSequence) -> MultiPoint {
        MultiPoint { coords: coords }
    }

    pub fn num_points(&self) -> usize {
        self.coords.len()
    }
}

#[derive(Default, Clone, Debug, PartialEq)]
pub struct LineString {
    pub coords: CoordinateSequence,
}

impl LineString {
    pub fn new(coords: CoordinateSequence) -> LineString {
        LineString { coords: coords }
    }

    pub fn from_xy(points: &[(f64, f64)]) -> LineString {
        LineString::new(CoordinateSequence::from_xy(points))
    }
}

/// A closed line string; the first coordinate is repeated at the end.
#[derive(Default, Clone, Debug, PartialEq)]
pub struct LinearRing {
    pub coords: CoordinateSequence,
}

impl LinearRing {
    /// Creates a ring, appending the first coordinate if the sequence is not
    /// already closed.
    pub fn new(mut coords: CoordinateSequence) -> LinearRing {
        if !coords.is_empty() && !coords.is_closed() {
            let first = coords[0];
            coords.push(first);
        }
        LinearRing { coords: coords }
    }

    pub fn from_xy(points: &[(f64, f64)]) -> LinearRing {
        LinearRing::new(CoordinateSequence::from_xy(points))
    }

    pub fn num_points(&self) -> usize {
        self.coords.len()
    }

    pub fn get_bounding_box(&self) -> BoundingBox {
        self.coords.get_bounding_box()
    }
}

#[derive(Default, Clone, Debug, PartialEq)]
pub struct MultiLineString {
    pub lines: Vec<LineString>,
}

impl MultiLineString {
    pub fn new(lines: Vec<LineString>) -> MultiLineString {
        MultiLineString { lines: lines }
    }

    pub fn num_geometries(&self) -> usize {
        self.lines.len()
    }
}

/// A shell with zero or more holes.
#[derive(Default, Clone, Debug, PartialEq)]
pub struct Polygon {
    pub shell: LinearRing,
    pub holes: Vec<LinearRing>,
}

impl Polygon {
    pub fn new(shell: LinearRing, holes: Vec<LinearRing>) -> Polygon {
        Polygon {
            shell: shell,
            holes: holes,
        }
    }

    pub fn exterior(&self) -> &LinearRing {
        &self.shell
    }

    pub fn num_interior_rings(&self) -> usize {
        self.holes.len()
    }

    pub fn interior_ring_n(&self, n: usize) -> &LinearRing {
        &self.holes[n]
    }

    /// Shell first, then holes in order.
    pub fn rings(&self) -> impl Iterator<Item = &LinearRing> {
        std::iter::once(&self.shell).chain(self.holes.iter())
    }
}

#[derive(Default, Clone, Debug, PartialEq)]
pub struct MultiPolygon {
    pub polygons: Vec<Polygon>,
}

impl MultiPolygon {
    pub fn new(polygons: Vec<Polygon>) -> MultiPolygon {
        MultiPolygon { polygons: polygons }
    }

    pub fn num_geometries(&self) -> usize {
        self.polygons.len()
    }
}

/// The geometry values exchanged with the shape handlers.
#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
    Point(Point),
    MultiPoint(MultiPoint),
    LineString(LineString),
    LinearRing(LinearRing),
    MultiLineString(MultiLineString),
    Polygon(Polygon),
    MultiPolygon(MultiPolygon),
    GeometryCollection(Vec<Geometry>),
}

impl Geometry {
    pub fn kind(&self) -> &'static str {
        match self {
            Geometry::Point(_) => "Point",
            Geometry::MultiPoint(_) => "MultiPoint",
            Geometry::LineString(_) => "LineString",
            Geometry::LinearRing(_) => "LinearRing",
            Geometry::MultiLineString(_) => "MultiLineString",
            Geometry::Polygon(_) => "Polygon",
            Geometry::MultiPolygon(_) => "MultiPolygon",
            Geometry::GeometryCollection(_) => "GeometryCollection",
        }
    }

    /// Visits every coordinate of the geometry, ring and part order preserved.
    pub fn for_each_coordinate<F: FnMut(&Coordinate)>(&self, f: &mut F) {
        match self {
            Geometry::Point(p) => p.coords.iter().for_each(|c| f(c)),
            Geometry::MultiPoint(mp) => mp.coords.iter().for_each(|c| f(c)),
            Geometry::LineString(ls) => ls.coords.iter().for_each(|c| f(c)),
            Geometry::LinearRing(lr) => lr.coords.iter().for_each(|c| f(c)),
            Geometry::MultiLineString(mls) => {
                for ls in &mls.lines {
                    ls.coords.iter().for_each(|c| f(c));
                }
            }
            Geometry::Polygon(poly) => {
                for ring in poly.rings() {
                    ring.coords.iter().for_each(|c| f(c));
                }
            }
            Geometry::MultiPolygon(mp) => {
                for poly in &mp.polygons {
                    for ring in poly.rings() {
                        ring.coords.iter().for_each(|c| f(c));
                    }
                }
            }
            Geometry::GeometryCollection(geoms) => {
                for g in geoms {
                    g.for_each_coordinate(f);
                }
            }
        }
    }

    pub fn num_points(&self) -> usize {
        let mut n = 0;
        self.for_each_coordinate(&mut |_| n += 1);
        n
    }

    pub fn is_empty(&self) -> bool {
        self.num_points() == 0
    }

    pub fn get_bounding_box(&self) -> BoundingBox {
        let mut bb = BoundingBox::empty();
        self.for_each_coordinate(&mut |c| bb.expand_to_include(c));
        bb
    }
}

impl From<Point> for Geometry {
    fn from(p: Point) -> Geometry {
        Geometry::Point(p)
    }
}

impl From<MultiPoint> for Geometry {
    fn from(mp: MultiPoint) -> Geometry {
        Geometry::MultiPoint(mp)
    }
}

impl From<LineString> for Geometry {
    fn from(ls: LineString) -> Geometry {
        Geometry::LineString(ls)
    }
}

impl From<LinearRing> for Geometry {
    fn from(lr: LinearRing) -> Geometry {
        Geometry::LinearRing(lr)
    }
}

impl From<MultiLineString> for Geometry {
    fn from(mls: MultiLineString) -> Geometry {
        Geometry::MultiLineString(mls)
    }
}

impl From<Polygon> for Geometry {
    fn from(p: Polygon) -> Geometry {
        Geometry::Polygon(p)
    }
}

impl From<MultiPolygon> for Geometry {
    fn from(mp: MultiPolygon) -> Geometry {
        Geometry::MultiPolygon(mp)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_ring_is_closed_on_construction() {
        let ring = LinearRing::from_xy(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0)]);
        assert_eq!(ring.num_points(), 4);
        assert!(ring.coords.is_closed());

        let closed = LinearRing::from_xy(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (0.0, 0.0)]);
        assert_eq!(closed.num_points(), 4);
    }

    #[test]
    fn test_geometry_bounds_and_counts() {
        let poly = Polygon::new(
            LinearRing::from_xy(&[(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0)]),
            vec![LinearRing::from_xy(&[(2.0, 2.0), (4.0, 2.0), (4.0, 4.0), (2.0, 4.0)])],
        );
        let g = Geometry::from(poly);
        assert_eq!(g.num_points(), 10);
        let bb = g.get_bounding_box();
        assert_eq!((bb.min_x, bb.max_x, bb.min_y, bb.max_y), (0.0, 10.0, 0.0, 10.0));
        assert!(Geometry::from(Point::empty()).is_empty());
        assert_eq!(g.kind(), "Polygon");
    }
}
