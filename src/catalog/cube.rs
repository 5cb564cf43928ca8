//! Cube family: six faces, quarter turns.
//!
//! Faces point along the screen axes: R = +x, L = -x, U = -y, D = +y, F = +z
//! and B = -z. Every corner and rib of an order-N cube is a small cube of
//! half-size `size / N`; centers are flat squares lying on their face.

use super::{keys, CatalogParts, PieceTemplate};
use crate::face::{Face, FaceSet, PuzzleFamily};
use crate::geometry::{Point, Vector};
use crate::pieces::{Skeleton, Vertex};

pub const TURN_ANGLE: f64 = 90.0;

pub const CORNER_EXCHANGES: [(Face, &[FaceSet]); 6] = [
    (Face::R, &keys(["RFU", "RBU", "RBD", "RFD"])),
    (Face::L, &keys(["LFU", "LFD", "LBD", "LBU"])),
    (Face::U, &keys(["ULF", "ULB", "URB", "URF"])),
    (Face::D, &keys(["DLF", "DRF", "DRB", "DLB"])),
    (Face::F, &keys(["FLU", "FRU", "FRD", "FLD"])),
    (Face::B, &keys(["BLU", "BLD", "BRD", "BRU"])),
];

pub const RIB_EXCHANGES: [(Face, &[FaceSet]); 6] = [
    (Face::R, &keys(["RU", "RB", "RD", "RF"])),
    (Face::L, &keys(["LU", "LF", "LD", "LB"])),
    (Face::U, &keys(["UF", "UL", "UB", "UR"])),
    (Face::D, &keys(["DF", "DR", "DB", "DL"])),
    (Face::F, &keys(["FU", "FR", "FD", "FL"])),
    (Face::B, &keys(["BU", "BL", "BD", "BR"])),
];

pub const FACE_CYCLES: [(Face, &[Face]); 6] = [
    (Face::R, &[Face::U, Face::B, Face::D, Face::F]),
    (Face::L, &[Face::U, Face::F, Face::D, Face::B]),
    (Face::U, &[Face::F, Face::L, Face::B, Face::R]),
    (Face::D, &[Face::F, Face::R, Face::B, Face::L]),
    (Face::F, &[Face::U, Face::R, Face::D, Face::L]),
    (Face::B, &[Face::U, Face::L, Face::D, Face::R]),
];

pub const PLANE_POINTS: [(Face, &[FaceSet; 3]); 6] = [
    (Face::U, &keys(["LFU", "RBU", "RFU"])),
    (Face::D, &keys(["LFD", "RBD", "RFD"])),
    (Face::R, &keys(["RFD", "RBU", "RBD"])),
    (Face::L, &keys(["LFD", "LBU", "LBD"])),
    (Face::F, &keys(["LFD", "RFU", "LFU"])),
    (Face::B, &keys(["LBD", "RBU", "LBU"])),
];

const CORNERS: [FaceSet; 8] = keys(["LFU", "LFD", "LBU", "LBD", "RFU", "RFD", "RBU", "RBD"]);

const RIBS: [FaceSet; 12] = keys([
    "RF", "UF", "LF", "DF", "RU", "RD", "LD", "LU", "RB", "UB", "LB", "DB",
]);

pub const fn opposite(face: Face) -> Face {
    match face {
        Face::R => Face::L,
        Face::L => Face::R,
        Face::U => Face::D,
        Face::D => Face::U,
        Face::F => Face::B,
        Face::B => Face::F,
    }
}

/// Coordinate axis a face is perpendicular to: 0 = x, 1 = y, 2 = z.
const fn axis_of(face: Face) -> usize {
    match face {
        Face::R | Face::L => 0,
        Face::U | Face::D => 1,
        Face::F | Face::B => 2,
    }
}

fn unit(axis: usize) -> Vector {
    match axis {
        0 => Vector::new(1.0, 0.0, 0.0),
        1 => Vector::new(0.0, 1.0, 0.0),
        _ => Vector::new(0.0, 0.0, 1.0),
    }
}

/// Outward unit normal of a face.
pub fn direction(face: Face) -> Vector {
    match face {
        Face::R => Vector::new(1.0, 0.0, 0.0),
        Face::L => Vector::new(-1.0, 0.0, 0.0),
        Face::U => Vector::new(0.0, -1.0, 0.0),
        Face::D => Vector::new(0.0, 1.0, 0.0),
        Face::F => Vector::new(0.0, 0.0, 1.0),
        Face::B => Vector::new(0.0, 0.0, -1.0),
    }
}

/// Sum of the face directions in `label`, scaled.
fn spot(label: FaceSet, scale: f64) -> Vector {
    label
        .iter()
        .fold(Vector::ZERO, |acc, face| acc + direction(face) * scale)
}

fn vertex(label: FaceSet, scale: f64) -> Vertex {
    Vertex::new(label, Point::ORIGIN + spot(label, scale))
}

pub(crate) fn build(order: usize, size: f64) -> CatalogParts {
    let n = order as f64;
    let piece = size / n;
    let reach = size - piece;
    // centre coordinates of the inner slices along one axis
    let layers: Vec<f64> = (1..order - 1)
        .map(|k| (2 * k + 1) as f64 - n)
        .map(|k| k * piece)
        .collect();

    let eccentric =
        Skeleton::from_vertices(CORNERS.iter().map(|&label| vertex(label, piece)).collect());

    let corners = CORNERS
        .iter()
        .map(|&key| PieceTemplate {
            key,
            skeleton: eccentric.clone(),
            offset: spot(key, reach),
        })
        .collect();

    let mut ribs = Vec::new();
    for &key in &RIBS {
        let covered: usize = key.iter().map(axis_of).sum();
        let free = unit(3 - covered);
        for &layer in &layers {
            ribs.push(PieceTemplate {
                key,
                skeleton: eccentric.clone(),
                offset: spot(key, reach) + free * layer,
            });
        }
    }

    let mut centers = Vec::new();
    if !layers.is_empty() {
        for &(face, cycle) in &FACE_CYCLES {
            let square = (0..cycle.len())
                .map(|i| {
                    let label = FaceSet::single(face)
                        .with(cycle[i])
                        .with(cycle[(i + 1) % cycle.len()]);
                    vertex(label, piece)
                })
                .collect();
            let skeleton = Skeleton::from_vertices(square);
            let [first, second] = match axis_of(face) {
                0 => [1, 2],
                1 => [0, 2],
                _ => [0, 1],
            };
            for &u in &layers {
                for &v in &layers {
                    centers.push(PieceTemplate {
                        key: FaceSet::single(face),
                        skeleton: skeleton.clone(),
                        offset: direction(face) * reach + unit(first) * u + unit(second) * v,
                    });
                }
            }
        }
    }

    let carcass = CORNERS
        .iter()
        .map(|&label| (label, Point::ORIGIN + spot(label, size)))
        .collect();
    let face_centers = PuzzleFamily::Cube
        .faces()
        .iter()
        .map(|&face| (face, Point::ORIGIN + direction(face) * size))
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
    fn test_opposites_are_involutions() {
        for face in PuzzleFamily::Cube.faces() {
            assert_eq!(opposite(opposite(*face)), *face);
            assert_abs_diff_eq!(direction(*face).dot(&direction(opposite(*face))), -1.0);
        }
    }

    #[test]
    fn test_face_cycles_are_right_handed() {
        // a positive quarter turn about the outward normal carries each
        // neighbour onto the next one in the cycle
        for &(face, cycle) in &FACE_CYCLES {
            let axis = direction(face);
            for i in 0..cycle.len() {
                let here = direction(cycle[i]);
                let next = direction(cycle[(i + 1) % cycle.len()]);
                assert_abs_diff_eq!(axis.cross(&here).dot(&next), 1.0);
            }
        }
    }

    #[test]
    fn test_rib_offsets_for_order_four() {
        let parts = build(4, 150.0);
        let along_x: Vec<f64> = parts
            .ribs
            .iter()
            .filter(|t| t.key == FaceSet::from_letters("UF"))
            .map(|t| t.offset.x)
            .collect();
        assert_eq!(along_x, vec![-37.5, 37.5]);
        for template in parts.ribs.iter().filter(|t| t.key == FaceSet::from_letters("UF")) {
            assert_abs_diff_eq!(template.offset.y, -112.5);
            assert_abs_diff_eq!(template.offset.z, 112.5);
        }
    }

    #[test]
    fn test_center_squares_lie_on_their_face() {
        let parts = build(5, 150.0);
        for template in &parts.centers {
            let face = template.key.iter().next().unwrap();
            let normal = direction(face);
            for point in template.skeleton.points() {
                assert_abs_diff_eq!((point + template.offset).to_vector().dot(&normal), 150.0);
            }
        }
    }

    #[test]
    fn test_two_by_two_has_only_corners() {
        let parts = build(2, 150.0);
        assert_eq!(parts.corners.len(), 8);
        assert!(parts.ribs.is_empty());
        assert!(parts.centers.is_empty());
        let key = FaceSet::from_letters("RFU");
        let corner = parts.corners.iter().find(|t| t.key == key).unwrap();
        assert_eq!(corner.offset, Vector::new(75.0, -75.0, 75.0));
    }
}
