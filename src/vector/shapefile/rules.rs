/*
This code is part of the WhiteboxTools geospatial analysis library.
Authors: Dr. John Lindsay
Created: 19/10/2026
Last Modified: 19/10/2026
License: MIT

Notes: Ring orientation, dimension inference and shell/hole assembly used by
the shape handlers.
*/

use super::{ShapeType, ShapeTypeDimension};
use crate::algorithms::{is_clockwise_order, is_vertex_of, point_in_poly, signed_area};
use crate::error::{Result, ShapefileError};
use crate::structures::{Coordinate, CoordinateSequence, Geometry, LinearRing, Polygon};

fn min_max<I: Iterator<Item = f64>>(values: I) -> (f64, f64) {
    let mut min = f64::NAN;
    let mut max = f64::NAN;
    for v in values.filter(|v| !v.is_nan()) {
        if min.is_nan() || v < min {
            min = v;
        }
        if max.is_nan() || v > max {
            max = v;
        }
    }
    (min, max)
}

/// The range of the Z ordinates, ignoring NaN. Both values are NaN when no
/// coordinate has a Z.
pub fn z_min_max<'a, I: IntoIterator<Item = &'a Coordinate>>(coords: I) -> (f64, f64) {
    min_max(coords.into_iter().map(|c| c.z))
}

/// The range of the M ordinates, ignoring NaN.
pub fn m_min_max<'a, I: IntoIterator<Item = &'a Coordinate>>(coords: I) -> (f64, f64) {
    min_max(coords.into_iter().map(|c| c.m))
}

/// Maps a geometry to the shape type that encodes it at the given dimension.
/// Geometry collections have no Shapefile representation.
pub fn infer_shape_type(geometry: &Geometry, dimension: ShapeTypeDimension) -> Result<ShapeType> {
    let base = match geometry {
        Geometry::Point(_) => ShapeType::Point,
        Geometry::MultiPoint(_) => ShapeType::MultiPoint,
        Geometry::LineString(_) | Geometry::LinearRing(_) | Geometry::MultiLineString(_) => {
            ShapeType::PolyLine
        }
        Geometry::Polygon(_) | Geometry::MultiPolygon(_) => ShapeType::Polygon,
        Geometry::GeometryCollection(_) => {
            return Err(ShapefileError::UnsupportedGeometry {
                kind: geometry.kind(),
                shape_type: ShapeType::Undefined,
            })
        }
    };
    Ok(ShapeType::with_dimension(base, dimension))
}

/// Z if any coordinate has a Z value, else Measure if any has an M value,
/// else XY.
pub fn guess_dimension(geometry: &Geometry) -> ShapeTypeDimension {
    let mut has_z = false;
    let mut has_m = false;
    geometry.for_each_coordinate(&mut |c| {
        has_z |= !c.z.is_nan();
        has_m |= !c.m.is_nan();
    });
    if has_z {
        ShapeTypeDimension::Z
    } else if has_m {
        ShapeTypeDimension::Measure
    } else {
        ShapeTypeDimension::XY
    }
}

pub fn reverse_ring(ring: &LinearRing) -> LinearRing {
    LinearRing {
        coords: ring.coords.reversed(),
    }
}

/// True for counter-clockwise rings, which the format uses for holes.
/// Rings with zero area count as clockwise.
pub fn is_ccw(ring: &LinearRing) -> bool {
    signed_area(ring.coords.coords()) > 0f64
}

/// Returns a copy of the polygon with a clockwise shell and
/// counter-clockwise holes.
pub fn normalize_polygon(polygon: &Polygon) -> Polygon {
    let shell = if is_clockwise_order(polygon.shell.coords.coords()) {
        polygon.shell.clone()
    } else {
        reverse_ring(&polygon.shell)
    };
    let holes = polygon
        .holes
        .iter()
        .map(|h| {
            if is_clockwise_order(h.coords.coords()) {
                reverse_ring(h)
            } else {
                h.clone()
            }
        })
        .collect();
    Polygon::new(shell, holes)
}

/// A vertex of `ring` that is not a vertex of `other`, falling back to the
/// first vertex when every vertex is shared.
fn point_not_in_list<'a>(ring: &'a CoordinateSequence, other: &CoordinateSequence) -> Option<&'a Coordinate> {
    ring.iter()
        .find(|c| !is_vertex_of(c, other.coords()))
        .or_else(|| ring.first())
}

/// Distributes holes among shells. Each hole goes to the shell with the
/// smallest envelope that contains the hole's envelope and one of its
/// points. A hole no shell contains is reversed and appended to `shells`.
/// The returned list holds the holes of each shell, index for index.
pub fn assign_holes_to_shells(
    shells: &mut Vec<LinearRing>,
    holes: Vec<LinearRing>,
) -> Vec<Vec<LinearRing>> {
    let mut holes_for_shells: Vec<Vec<LinearRing>> = vec![vec![]; shells.len()];
    for hole in holes {
        let hole_env = hole.get_bounding_box();
        let mut min_shell: Option<(usize, f64)> = None;

        for (i, shell) in shells.iter().enumerate() {
            let shell_env = shell.get_bounding_box();
            if !shell_env.contains(hole_env) {
                continue;
            }
            let is_contained = match point_not_in_list(&hole.coords, &shell.coords) {
                Some(p) => {
                    point_in_poly(p, shell.coords.coords()) || is_vertex_of(p, shell.coords.coords())
                }
                None => false,
            };
            if !is_contained {
                continue;
            }
            let area = shell_env.area();
            match min_shell {
                Some((_, min_area)) if min_area <= area => {}
                _ => min_shell = Some((i, area)),
            }
        }

        match min_shell {
            Some((i, _)) => holes_for_shells[i].push(hole),
            None => {
                tracing::warn!(
                    "polygon hole with {} points has no enclosing shell; promoting it to a shell",
                    hole.num_points()
                );
                shells.push(reverse_ring(&hole));
                holes_for_shells.push(vec![]);
            }
        }
    }
    holes_for_shells
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::structures::{LineString, MultiPoint, Point};

    fn square(x: f64, y: f64, size: f64) -> LinearRing {
        // clockwise
        LinearRing::from_xy(&[(x, y), (x, y + size), (x + size, y + size), (x + size, y)])
    }

    #[test]
    fn test_z_min_max_ignores_nan() {
        let coords = vec![
            Coordinate::new_z(0.0, 0.0, 5.0),
            Coordinate::new(1.0, 1.0),
            Coordinate::new_z(2.0, 2.0, -3.0),
        ];
        assert_eq!(z_min_max(&coords), (-3.0, 5.0));
        let (zmin, zmax) = z_min_max(&[Coordinate::new(0.0, 0.0)]);
        assert!(zmin.is_nan() && zmax.is_nan());
    }

    #[test]
    fn test_infer_shape_type() {
        let line = Geometry::from(LineString::from_xy(&[(0.0, 0.0), (1.0, 1.0)]));
        assert_eq!(
            infer_shape_type(&line, ShapeTypeDimension::Z).unwrap(),
            ShapeType::PolyLineZ
        );
        let mp = Geometry::from(MultiPoint::default());
        assert_eq!(
            infer_shape_type(&mp, ShapeTypeDimension::Measure).unwrap(),
            ShapeType::MultiPointM
        );
        let gc = Geometry::GeometryCollection(vec![Geometry::from(Point::new(1.0, 2.0))]);
        assert!(infer_shape_type(&gc, ShapeTypeDimension::XY).is_err());
    }

    #[test]
    fn test_guess_dimension() {
        let p = Point::from_coordinate(Coordinate::new_m(1.0, 2.0, 3.0), false, true);
        assert_eq!(guess_dimension(&Geometry::from(p)), ShapeTypeDimension::Measure);
        let p = Point::new(1.0, 2.0);
        assert_eq!(guess_dimension(&Geometry::from(p)), ShapeTypeDimension::XY);
    }

    #[test]
    fn test_normalize_polygon() {
        let shell = reverse_ring(&square(0.0, 0.0, 10.0));
        let hole = reverse_ring(&square(2.0, 2.0, 2.0));
        let poly = normalize_polygon(&Polygon::new(shell, vec![hole]));
        assert!(!is_ccw(&poly.shell));
        assert!(is_ccw(&poly.holes[0]));
    }

    #[test]
    fn test_hole_goes_to_tightest_shell() {
        let mut shells = vec![square(0.0, 0.0, 100.0), square(0.0, 0.0, 10.0)];
        let holes = vec![reverse_ring(&square(2.0, 2.0, 2.0))];
        let assigned = assign_holes_to_shells(&mut shells, holes);
        assert_eq!(assigned.len(), 2);
        assert!(assigned[0].is_empty());
        assert_eq!(assigned[1].len(), 1);
    }

    #[test]
    fn test_orphan_hole_is_promoted() {
        let mut shells = vec![square(0.0, 0.0, 10.0)];
        let holes = vec![reverse_ring(&square(50.0, 50.0, 2.0))];
        let assigned = assign_holes_to_shells(&mut shells, holes);
        assert_eq!(shells.len(), 2);
        assert_eq!(assigned.len(), 2);
        assert!(!is_ccw(&shells[1]));
    }

    #[test]
    fn test_hole_touching_shell_vertex() {
        let mut shells = vec![square(0.0, 0.0, 10.0)];
        let hole = LinearRing::from_xy(&[(0.0, 0.0), (5.0, 2.0), (2.0, 5.0)]);
        let assigned = assign_holes_to_shells(&mut shells, vec![hole]);
        assert_eq!(shells.len(), 1);
        assert_eq!(assigned[0].len(), 1);
    }
}
