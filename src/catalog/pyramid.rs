//! Pyramid family: a regular tetrahedron with third turns.
//!
//! The body is centred on the origin with its apex `LRF` pointing up (-y).
//! Each vertex is named after the three faces meeting there, so the face
//! opposite a vertex is the one letter its name lacks.
//!
//! Splitting every edge into N parts tiles the body with N-scaled copies of
//! the tetrahedron. Copies touching a vertex are corners, copies along an edge
//! are ribs, and whatever remains visible on a face is covered by flat
//! triangular centers: inverted triangles, plus upright ones away from the
//! face's border.

use super::{keys, CatalogParts, PieceTemplate};
use crate::face::{Face, FaceSet, PuzzleFamily};
use crate::geometry::{Point, Vector};
use crate::pieces::{Skeleton, Vertex};

pub const TURN_ANGLE: f64 = 120.0;

pub const CORNER_EXCHANGES: [(Face, &[FaceSet]); 4] = [
    (Face::F, &keys(["LRF", "RFD", "LFD"])),
    (Face::L, &keys(["LRF", "LFD", "LRD"])),
    (Face::R, &keys(["LRF", "LRD", "RFD"])),
    (Face::D, &keys(["LFD", "RFD", "LRD"])),
];

pub const RIB_EXCHANGES: [(Face, &[FaceSet]); 4] = [
    (Face::F, &keys(["DF", "LF", "RF"])),
    (Face::L, &keys(["DL", "RL", "FL"])),
    (Face::R, &keys(["DR", "FR", "LR"])),
    (Face::D, &keys(["RD", "LD", "FD"])),
];

pub const FACE_CYCLES: [(Face, &[Face]); 4] = [
    (Face::F, &[Face::D, Face::L, Face::R]),
    (Face::L, &[Face::D, Face::R, Face::F]),
    (Face::R, &[Face::D, Face::F, Face::L]),
    (Face::D, &[Face::R, Face::L, Face::F]),
];

pub const PLANE_POINTS: [(Face, &[FaceSet; 3]); 4] = [
    (Face::F, &keys(["LRF", "LFD", "RFD"])),
    (Face::L, &keys(["LRF", "LFD", "LRD"])),
    (Face::R, &keys(["LRF", "RFD", "LRD"])),
    (Face::D, &keys(["LFD", "RFD", "LRD"])),
];

const VERTICES: [FaceSet; 4] = keys(["LRF", "LFD", "RFD", "LRD"]);

/// Vertices of the regular tetrahedron with edge `3 * size`.
fn body_vertices(size: f64) -> [Point; 4] {
    let a = 3.0 * size;
    let height = a * (2.0f64 / 3.0).sqrt();
    let inradius = a / (2.0 * 3.0f64.sqrt());
    [
        Point::new(0.0, -0.75 * height, 0.0),
        Point::new(-a / 2.0, 0.25 * height, inradius),
        Point::new(a / 2.0, 0.25 * height, inradius),
        Point::new(0.0, 0.25 * height, -2.0 * inradius),
    ]
}

/// The face that does not touch vertex `k`.
fn face_opposite(k: usize) -> Face {
    let label = VERTICES[k];
    PuzzleFamily::Pyramid
        .faces()
        .iter()
        .copied()
        .find(|&face| !label.contains(face))
        .unwrap_or(Face::D)
}

/// All `[x, y, z]` with every entry at least `min` summing to `total`.
fn compositions(total: usize, min: usize) -> Vec<[usize; 3]> {
    let mut out = Vec::new();
    for x in min..=total {
        for y in min..=total - x {
            let z = total - x - y;
            if z >= min {
                out.push([x, y, z]);
            }
        }
    }
    out
}

/// Barycentric point `sum(weights[j] * vertices[j]) / n`.
fn blend(vertices: &[Point; 4], weights: [usize; 4], n: usize) -> Point {
    let sum = vertices
        .iter()
        .zip(weights)
        .fold(Vector::ZERO, |acc, (v, w)| acc + v.to_vector() * w as f64);
    Point::ORIGIN + sum * (1.0 / n as f64)
}

pub(crate) fn build(order: usize, size: f64) -> CatalogParts {
    let n = order;
    let body = body_vertices(size);
    let scale = 1.0 / n as f64;

    let eccentric = Skeleton::from_vertices(
        VERTICES
            .iter()
            .zip(&body)
            .map(|(&label, point)| Vertex::new(label, Point::ORIGIN + point.to_vector() * scale))
            .collect(),
    );

    let corners = (0..4)
        .map(|k| PieceTemplate {
            key: VERTICES[k],
            skeleton: eccentric.clone(),
            offset: body[k].to_vector() * ((n - 1) as f64 * scale),
        })
        .collect();

    let mut ribs = Vec::new();
    for p in 0..4 {
        for q in p + 1..4 {
            let key = VERTICES[p] & VERTICES[q];
            for i in 1..n - 1 {
                let mut weights = [0; 4];
                weights[p] = i;
                weights[q] = n - 1 - i;
                ribs.push(PieceTemplate {
                    key,
                    skeleton: eccentric.clone(),
                    offset: blend(&body, weights, n).to_vector(),
                });
            }
        }
    }

    let mut centers = Vec::new();
    for k in 0..4 {
        let key = FaceSet::single(face_opposite(k));
        let others: Vec<usize> = (0..4).filter(|&j| j != k).collect();
        let weights_of = |parts: [usize; 3]| {
            let mut weights = [0; 4];
            for (&j, part) in others.iter().zip(parts) {
                weights[j] = part;
            }
            weights
        };

        // inverted: the vertex across from `m` sits one step along both
        // other directions
        for base in compositions(n - 2, 0) {
            let triangle = others
                .iter()
                .map(|&m| {
                    let mut weights = weights_of(base);
                    for &j in others.iter().filter(|&&j| j != m) {
                        weights[j] += 1;
                    }
                    Vertex::new(VERTICES[m], blend(&body, weights, n))
                })
                .collect();
            centers.push(PieceTemplate {
                key,
                skeleton: Skeleton::from_vertices(triangle),
                offset: Vector::ZERO,
            });
        }

        // upright, clear of the border rows taken by corners and ribs
        for base in compositions(n - 1, 1) {
            let triangle = others
                .iter()
                .map(|&m| {
                    let mut weights = weights_of(base);
                    weights[m] += 1;
                    Vertex::new(VERTICES[m], blend(&body, weights, n))
                })
                .collect();
            centers.push(PieceTemplate {
                key,
                skeleton: Skeleton::from_vertices(triangle),
                offset: Vector::ZERO,
            });
        }
    }

    let carcass = VERTICES.iter().copied().zip(body).collect();
    let face_centers = PuzzleFamily::Pyramid
        .faces()
        .iter()
        .map(|&face| {
            let k = (0..4).find(|&k| !VERTICES[k].contains(face)).unwrap_or(0);
            (face, Point::ORIGIN + body[k].to_vector() * (-1.0 / 3.0))
        })
        .collect();

    CatalogParts {
        corners,
        ribs,
        centers,
        carcass,
        face_centers,
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_body_is_regular_and_centred() {
        let body = body_vertices(150.0);
        for i in 0..4 {
            for j in i + 1..4 {
                assert_abs_diff_eq!(body[i].distance_to(&body[j]), 450.0, epsilon = 1e-9);
            }
        }
        let centroid = Point::centroid(&body);
        assert_abs_diff_eq!(centroid.distance_to(&Point::ORIGIN), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_opposite_faces() {
        assert_eq!(face_opposite(0), Face::D);
        assert_eq!(face_opposite(1), Face::R);
        assert_eq!(face_opposite(2), Face::L);
        assert_eq!(face_opposite(3), Face::F);
    }

    #[test]
    fn test_face_cycles_turn_positively() {
        let parts = build(2, 150.0);
        let normal = |face: Face| {
            parts
                .face_centers
                .iter()
                .find(|(f, _)| *f == face)
                .map(|(_, p)| p.to_vector())
                .unwrap()
        };
        for &(face, cycle) in &FACE_CYCLES {
            let axis = normal(face);
            for i in 0..cycle.len() {
                let here = normal(cycle[i]);
                let next = normal(cycle[(i + 1) % cycle.len()]);
                assert!(axis.cross(&here).dot(&next) > 0.0, "{face} turns backwards");
            }
        }
    }

    #[test]
    fn test_stickers_tile_each_face() {
        for n in 2..=6 {
            let parts = build(n, 150.0);
            let per_face = parts.centers.len() / 4;
            // every face is split into n^2 small triangles
            assert_eq!(3 + 3 * (n - 2) + per_face, n * n);
        }
    }

    #[test]
    fn test_center_triangles_lie_on_their_face() {
        let parts = build(5, 150.0);
        let body = body_vertices(150.0);
        for template in &parts.centers {
            let face = template.key.iter().next().unwrap();
            let k = (0..4).find(|&k| !VERTICES[k].contains(face)).unwrap();
            let normal = body[k].to_vector() * -1.0;
            let plane_offset = body[(k + 1) % 4].to_vector().dot(&normal);
            for point in template.skeleton.points() {
                assert_abs_diff_eq!(point.to_vector().dot(&normal), plane_offset, epsilon = 1e-6);
            }
            assert_eq!(template.skeleton.edges.len(), 3);
        }
    }

    #[test]
    fn test_corner_reaches_body_vertex() {
        let parts = build(3, 150.0);
        let body = body_vertices(150.0);
        let apex = parts.corners.iter().find(|t| t.key == VERTICES[0]).unwrap();
        let tip = apex
            .skeleton
            .vertices
            .iter()
            .find(|v| v.label == VERTICES[0])
            .map(|v| v.point + apex.offset)
            .unwrap();
        assert_abs_diff_eq!(tip.distance_to(&body[0]), 0.0, epsilon = 1e-9);
    }
}
