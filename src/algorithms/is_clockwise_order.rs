/*
This code is part of the WhiteboxTools geospatial analysis library.
Authors: Dr. John Lindsay
Created: 19/10/2026
Last Modified: 19/10/2026
License: MIT
*/

use crate::structures::Coordinate;

/// Checks whether a ring of coordinates is in clockwise order. The ring may
/// be open or closed; rings with fewer than three distinct vertices are
/// reported as not clockwise.
pub fn is_clockwise_order(points: &[Coordinate]) -> bool {
    // Paul Bourke, March 1998, http://paulbourke.net/geometry/clockwise/index.html
    if points.len() < 3 {
        return false;
    }

    let end_point = if points[0].equals_2d(&points[points.len() - 1]) {
        points.len() - 2
    } else {
        points.len() - 1
    };

    let n = end_point + 1;
    if n < 3 {
        return false;
    }

    // convex rings are decided by the sign of the edge cross products
    let mut crossproducts = vec![0f64; n];
    for j in 0..n {
        let n1 = if j == 0 { n - 1 } else { j - 1 };
        let n3 = if j == n - 1 { 0 } else { j + 1 };
        crossproducts[j] = (points[j].x - points[n1].x) * (points[n3].y - points[j].y)
            - (points[j].y - points[n1].y) * (points[n3].x - points[j].x);
    }

    let test_sign = crossproducts[0] >= 0f64;
    let is_convex = crossproducts[1..]
        .iter()
        .all(|&cp| (cp >= 0f64) == test_sign);

    if is_convex {
        // positive means counter-clockwise
        !test_sign
    } else {
        let mut area = 0f64;
        for j in 0..n {
            let k = if j < n - 1 { j + 1 } else { 0 };
            area += points[j].x * points[k].y - points[k].x * points[j].y;
        }
        area < 0f64
    }
}
