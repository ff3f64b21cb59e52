/*
This code is part of the WhiteboxTools geospatial analysis library.
Authors: Dr. John Lindsay
Created: 19/10/2026
Last Modified: 19/10/2026
License: MIT

Notes: Polygon records store rings as a flat list of parts. Clockwise rings
are shells and counter-clockwise rings are holes.
*/

use super::multiline::{parts_length, read_parts, write_parts};
use crate::error::{Result, ShapefileError};
use crate::io_utils::{ByteOrderReader, ByteOrderWriter};
use crate::structures::{CoordinateSequence, Geometry, LinearRing, MultiPolygon, Polygon};
use crate::vector::shapefile::rules::{assign_holes_to_shells, is_ccw, normalize_polygon};
use crate::vector::shapefile::ShapeType;
use std::io::prelude::*;

pub(super) fn read<R: Read + Seek>(
    bor: &mut ByteOrderReader<R>,
    shape_type: ShapeType,
    flatten: bool,
) -> Result<Geometry> {
    if shape_type == ShapeType::Null {
        return Ok(Geometry::from(MultiPolygon::default()));
    }

    let mut shells: Vec<LinearRing> = vec![];
    let mut holes: Vec<LinearRing> = vec![];
    for part in read_parts(bor, shape_type, flatten)? {
        let ring = LinearRing::new(part);
        if ring.num_points() < 4 {
            tracing::debug!(
                "skipping polygon ring with only {} points after closing",
                ring.num_points()
            );
            continue;
        }
        if is_ccw(&ring) {
            holes.push(ring);
        } else {
            shells.push(ring);
        }
    }

    let holes_for_shells = assign_holes_to_shells(&mut shells, holes);
    let polygons = shells
        .into_iter()
        .zip(holes_for_shells.into_iter())
        .map(|(shell, holes)| Polygon::new(shell, holes))
        .collect();
    Ok(Geometry::from(MultiPolygon::new(polygons)))
}

/// Polygons with their rings oriented for writing.
fn normalized(geometry: &Geometry, shape_type: ShapeType) -> Result<Vec<Polygon>> {
    match geometry {
        Geometry::Polygon(p) => Ok(vec![normalize_polygon(p)]),
        Geometry::MultiPolygon(mp) => Ok(mp.polygons.iter().map(normalize_polygon).collect()),
        _ => Err(ShapefileError::UnsupportedGeometry {
            kind: geometry.kind(),
            shape_type: shape_type,
        }),
    }
}

fn rings(polygons: &[Polygon]) -> Vec<&CoordinateSequence> {
    polygons
        .iter()
        .flat_map(|p| p.rings())
        .map(|r| &r.coords)
        .collect()
}

pub(super) fn write<W: Write>(
    bow: &mut ByteOrderWriter<W>,
    geometry: &Geometry,
    shape_type: ShapeType,
) -> Result<()> {
    let polygons = normalized(geometry, shape_type)?;
    write_parts(bow, &rings(&polygons), shape_type)
}

pub(super) fn get_length(geometry: &Geometry, shape_type: ShapeType) -> Result<usize> {
    let polygons = match geometry {
        Geometry::Polygon(p) => std::slice::from_ref(p),
        Geometry::MultiPolygon(mp) => &mp.polygons[..],
        _ => {
            return Err(ShapefileError::UnsupportedGeometry {
                kind: geometry.kind(),
                shape_type: shape_type,
            })
        }
    };
    Ok(parts_length(&rings(polygons), shape_type))
}

#[cfg(test)]
mod test {
    use crate::io_utils::{ByteOrderReader, ByteOrderWriter, Endianness};
    use crate::structures::{Geometry, LinearRing, Polygon};
    use crate::vector::shapefile::rules::{is_ccw, reverse_ring};
    use crate::vector::shapefile::ShapeType;
    use std::io::Cursor;

    const SHELL: [(f64, f64); 5] = [(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)];
    const HOLE: [(f64, f64); 5] = [(2.0, 2.0), (2.0, 4.0), (4.0, 4.0), (4.0, 2.0), (2.0, 2.0)];

    /// Encodes rings as raw parts, in the given order and winding.
    fn raw_polygon(rings: &[&[(f64, f64)]]) -> Vec<u8> {
        let mut bow = ByteOrderWriter::new(vec![], Endianness::LittleEndian);
        for v in &[0.0, 0.0, 10.0, 10.0] {
            bow.write_f64(*v).unwrap();
        }
        let n: usize = rings.iter().map(|r| r.len()).sum();
        bow.write_i32(rings.len() as i32).unwrap();
        bow.write_i32(n as i32).unwrap();
        let mut offset = 0;
        for r in rings {
            bow.write_i32(offset).unwrap();
            offset += r.len() as i32;
        }
        for r in rings {
            for &(x, y) in r.iter() {
                bow.write_f64(x).unwrap();
                bow.write_f64(y).unwrap();
            }
        }
        bow.into_inner()
    }

    fn decode(bytes: Vec<u8>) -> Geometry {
        let mut bor = ByteOrderReader::new(Cursor::new(bytes), Endianness::LittleEndian).unwrap();
        let handler = ShapeType::Polygon.handler().unwrap();
        handler.read(&mut bor, ShapeType::Polygon, false).unwrap()
    }

    fn reversed(ring: &[(f64, f64)]) -> Vec<(f64, f64)> {
        ring.iter().rev().copied().collect()
    }

    #[test]
    fn test_hole_first_reconstruction() {
        // shell clockwise, hole counter-clockwise, hole stored first
        let shell = reversed(&SHELL);
        let hole = reversed(&HOLE);
        match decode(raw_polygon(&[&hole[..], &shell[..]])) {
            Geometry::MultiPolygon(mp) => {
                assert_eq!(mp.num_geometries(), 1);
                assert_eq!(mp.polygons[0].num_interior_rings(), 1);
                assert!(!is_ccw(mp.polygons[0].exterior()));
            }
            g => panic!("unexpected {}", g.kind()),
        }
    }

    #[test]
    fn test_either_winding_through_writer() {
        let shell = LinearRing::from_xy(&SHELL);
        let hole = LinearRing::from_xy(&HOLE);
        let handler = ShapeType::Polygon.handler().unwrap();
        for (s, h) in vec![
            (shell.clone(), hole.clone()),
            (reverse_ring(&shell), reverse_ring(&hole)),
            (reverse_ring(&shell), hole.clone()),
        ] {
            let geometry = Geometry::from(Polygon::new(s, vec![h]));
            let mut bow = ByteOrderWriter::new(vec![], Endianness::LittleEndian);
            handler.write(&mut bow, &geometry).unwrap();
            let bytes = bow.into_inner();
            assert_eq!(bytes.len(), handler.get_length(&geometry).unwrap());
            // skip the shape type
            match decode(bytes[4..].to_vec()) {
                Geometry::MultiPolygon(mp) => {
                    assert_eq!(mp.num_geometries(), 1);
                    assert_eq!(mp.polygons[0].num_interior_rings(), 1);
                    assert!(is_ccw(mp.polygons[0].interior_ring_n(0)));
                }
                g => panic!("unexpected {}", g.kind()),
            }
        }
    }

    #[test]
    fn test_unclosed_and_degenerate_rings() {
        let open_shell = reversed(&SHELL[0..4]);
        let sliver = [(50.0, 50.0), (51.0, 51.0)];
        match decode(raw_polygon(&[&open_shell[..], &sliver[..]])) {
            Geometry::MultiPolygon(mp) => {
                assert_eq!(mp.num_geometries(), 1);
                assert_eq!(mp.polygons[0].exterior().num_points(), 5);
            }
            g => panic!("unexpected {}", g.kind()),
        }
    }

    #[test]
    fn test_lone_hole_becomes_shell() {
        let hole = reversed(&HOLE);
        match decode(raw_polygon(&[&hole[..]])) {
            Geometry::MultiPolygon(mp) => {
                assert_eq!(mp.num_geometries(), 1);
                assert_eq!(mp.polygons[0].num_interior_rings(), 0);
                assert!(!is_ccw(mp.polygons[0].exterior()));
            }
            g => panic!("unexpected {}", g.kind()),
        }
    }
}
