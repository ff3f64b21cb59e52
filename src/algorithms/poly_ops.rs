/*
This code is part of the WhiteboxTools geospatial analysis library.
Authors: Dr. John Lindsay
Created: 19/10/2026
Last Modified: 19/10/2026
License: MIT
*/

use crate::structures::Coordinate;

/// Tests whether a point is within a polygon using the winding number (wn).
/// Points on the edge of the polygon may be deemed outside.
/// Input:   p = a point,
///          poly[] = vertex points of a closed ring with poly[n]=poly[0]
pub fn point_in_poly(p: &Coordinate, poly: &[Coordinate]) -> bool {
    winding_number(p, poly) % 2 != 0i32
}

/// Calculates the winding number of a closed ring about a point. An open
/// ring or one with fewer than four vertices has a winding number of zero.
pub fn winding_number(p: &Coordinate, poly: &[Coordinate]) -> i32 {
    if poly.len() < 4 || !poly[0].equals_2d(&poly[poly.len() - 1]) {
        return 0i32;
    }
    let mut wn = 0i32;
    for i in 0..poly.len() - 1 {
        if poly[i].y <= p.y {
            // an upward crossing with p left of the edge
            if poly[i + 1].y > p.y && p.is_left(&poly[i], &poly[i + 1]) > 0f64 {
                wn += 1i32;
            }
        } else if poly[i + 1].y <= p.y && p.is_left(&poly[i], &poly[i + 1]) < 0f64 {
            // a downward crossing with p right of the edge
            wn -= 1i32;
        }
    }
    wn
}

/// True if `p` coincides in the plane with any vertex of `poly`.
pub fn is_vertex_of(p: &Coordinate, poly: &[Coordinate]) -> bool {
    poly.iter().any(|v| v.equals_2d(p))
}
