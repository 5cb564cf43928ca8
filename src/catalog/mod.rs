//! Shape catalog: the immutable description of one puzzle family at one order.
//!
//! A catalog knows where every piece rests, what its skeleton looks like and
//! how a turn of each face permutes the pieces. Exchange tables are the single
//! source of truth for permutations: turning face `f` in direction `d` is a
//! cyclic shift of exactly the listed keys by one position in direction `d`.
//!
//! All coordinates here are relative to the body centre; the model translates
//! them into place.

pub mod cube;
pub mod pyramid;

use crate::error::{Error, Result};
use crate::face::{Face, FaceSet, PuzzleFamily};
use crate::geometry::{Point, Vector};
use crate::lighting::Rgb;
use crate::pieces::Skeleton;

/// Smallest supported puzzle order.
pub const MIN_ORDER: usize = 2;
/// Largest supported puzzle order.
pub const MAX_ORDER: usize = 8;

/// Builds an array of keys from their letters at compile time.
pub(crate) const fn keys<const N: usize>(letters: [&str; N]) -> [FaceSet; N] {
    let mut out = [FaceSet::EMPTY; N];
    let mut i = 0;
    while i < N {
        out[i] = FaceSet::from_letters(letters[i]);
        i += 1;
    }
    out
}

/// Standard sticker colour of a face.
pub const fn sticker_color(face: Face) -> Rgb {
    match face {
        Face::F => Rgb(255, 255, 255),
        Face::B => Rgb(255, 255, 0),
        Face::R => Rgb(255, 0, 0),
        Face::L => Rgb(255, 165, 0),
        Face::U => Rgb(0, 0, 255),
        Face::D => Rgb(0, 128, 0),
    }
}

/// Where one piece starts and what it is made of.
#[derive(Debug, Clone)]
pub struct PieceTemplate {
    pub key: FaceSet,
    pub skeleton: Skeleton,
    pub offset: Vector,
}

fn lookup<T: ?Sized, const N: usize>(
    table: &'static [(Face, &'static T); N],
    face: Face,
) -> Option<&'static T> {
    table
        .iter()
        .find(|(candidate, _)| *candidate == face)
        .map(|&(_, entry)| entry)
}

/// Immutable geometry and permutation tables for a (family, order) pair.
#[derive(Debug, Clone)]
pub struct ShapeCatalog {
    family: PuzzleFamily,
    order: usize,
    size: f64,
    corners: Vec<PieceTemplate>,
    ribs: Vec<PieceTemplate>,
    centers: Vec<PieceTemplate>,
    carcass: Vec<(FaceSet, Point)>,
    face_centers: Vec<(Face, Point)>,
}

impl ShapeCatalog {
    /// Builds the catalog for `family` at `order`, with body half-size `size`.
    pub fn new(family: PuzzleFamily, order: usize, size: f64) -> Result<Self> {
        if !(MIN_ORDER..=MAX_ORDER).contains(&order) {
            return Err(Error::OrderOutOfRange {
                order,
                min: MIN_ORDER,
                max: MAX_ORDER,
            });
        }
        let parts = match family {
            PuzzleFamily::Cube => cube::build(order, size),
            PuzzleFamily::Pyramid => pyramid::build(order, size),
            PuzzleFamily::Megaminx => return Err(Error::UnsupportedFamily(family)),
        };
        Ok(Self {
            family,
            order,
            size,
            corners: parts.corners,
            ribs: parts.ribs,
            centers: parts.centers,
            carcass: parts.carcass,
            face_centers: parts.face_centers,
        })
    }

    pub fn family(&self) -> PuzzleFamily {
        self.family
    }

    pub fn order(&self) -> usize {
        self.order
    }

    /// Half-size of the whole body at scale 1.
    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn faces(&self) -> &'static [Face] {
        self.family.faces()
    }

    /// Degrees of a full face turn.
    pub fn turn_angle(&self) -> f64 {
        match self.family {
            PuzzleFamily::Cube => cube::TURN_ANGLE,
            PuzzleFamily::Pyramid => pyramid::TURN_ANGLE,
            PuzzleFamily::Megaminx => 0.0,
        }
    }

    /// Corner keys cycled by a turn of `face`; empty for foreign faces.
    pub fn corner_exchange(&self, face: Face) -> &'static [FaceSet] {
        let entry = match self.family {
            PuzzleFamily::Cube => lookup(&cube::CORNER_EXCHANGES, face),
            PuzzleFamily::Pyramid => lookup(&pyramid::CORNER_EXCHANGES, face),
            PuzzleFamily::Megaminx => None,
        };
        entry.unwrap_or(&[])
    }

    /// Rib keys cycled by a turn of `face`; empty for foreign faces.
    pub fn rib_exchange(&self, face: Face) -> &'static [FaceSet] {
        let entry = match self.family {
            PuzzleFamily::Cube => lookup(&cube::RIB_EXCHANGES, face),
            PuzzleFamily::Pyramid => lookup(&pyramid::RIB_EXCHANGES, face),
            PuzzleFamily::Megaminx => None,
        };
        entry.unwrap_or(&[])
    }

    /// Neighbouring faces of `face` in turn order.
    pub fn face_cycle(&self, face: Face) -> &'static [Face] {
        let entry = match self.family {
            PuzzleFamily::Cube => lookup(&cube::FACE_CYCLES, face),
            PuzzleFamily::Pyramid => lookup(&pyramid::FACE_CYCLES, face),
            PuzzleFamily::Megaminx => None,
        };
        entry.unwrap_or(&[])
    }

    pub fn opposite(&self, face: Face) -> Option<Face> {
        match self.family {
            PuzzleFamily::Cube => Some(cube::opposite(face)),
            PuzzleFamily::Pyramid | PuzzleFamily::Megaminx => None,
        }
    }

    pub fn color(&self, face: Face) -> Rgb {
        sticker_color(face)
    }

    /// Three carcass vertices spanning the plane of `face`.
    pub fn plane_points(&self, face: Face) -> Option<[FaceSet; 3]> {
        let entry = match self.family {
            PuzzleFamily::Cube => lookup(&cube::PLANE_POINTS, face),
            PuzzleFamily::Pyramid => lookup(&pyramid::PLANE_POINTS, face),
            PuzzleFamily::Megaminx => None,
        };
        entry.copied()
    }

    /// The carcass vertex a face vertex sits above, for cutting the layer
    /// away from the rest of the body.
    pub fn below_vertex(&self, face: Face, vertex: FaceSet) -> FaceSet {
        match self.family {
            PuzzleFamily::Cube => vertex.replace(face, cube::opposite(face)),
            PuzzleFamily::Pyramid | PuzzleFamily::Megaminx => self
                .carcass
                .iter()
                .map(|&(label, _)| label)
                .find(|label| !label.contains(face))
                .unwrap_or(vertex),
        }
    }

    pub fn corners(&self) -> &[PieceTemplate] {
        &self.corners
    }

    pub fn ribs(&self) -> &[PieceTemplate] {
        &self.ribs
    }

    pub fn centers(&self) -> &[PieceTemplate] {
        &self.centers
    }

    /// Whole-body vertices.
    pub fn carcass(&self) -> &[(FaceSet, Point)] {
        &self.carcass
    }

    /// Centre point of each macroscopic face.
    pub fn face_centers(&self) -> &[(Face, Point)] {
        &self.face_centers
    }
}

/// What a family builder hands back to [`ShapeCatalog::new`].
pub(crate) struct CatalogParts {
    pub corners: Vec<PieceTemplate>,
    pub ribs: Vec<PieceTemplate>,
    pub centers: Vec<PieceTemplate>,
    pub carcass: Vec<(FaceSet, Point)>,
    pub face_centers: Vec<(Face, Point)>,
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::pieces::cycle_step;

    fn catalogs() -> Vec<ShapeCatalog> {
        let mut all = Vec::new();
        for family in [PuzzleFamily::Cube, PuzzleFamily::Pyramid] {
            for order in MIN_ORDER..=MAX_ORDER {
                all.push(ShapeCatalog::new(family, order, 150.0).unwrap());
            }
        }
        all
    }

    #[test]
    fn test_rejects_bad_requests() {
        assert_eq!(
            ShapeCatalog::new(PuzzleFamily::Megaminx, 3, 150.0).unwrap_err(),
            Error::UnsupportedFamily(PuzzleFamily::Megaminx)
        );
        assert_eq!(
            ShapeCatalog::new(PuzzleFamily::Cube, 9, 150.0).unwrap_err(),
            Error::OrderOutOfRange { order: 9, min: 2, max: 8 }
        );
        assert!(ShapeCatalog::new(PuzzleFamily::Pyramid, 1, 150.0).is_err());
    }

    #[test]
    fn test_exchanges_are_images_under_the_face_cycle() {
        for catalog in catalogs() {
            for &face in catalog.faces() {
                let cycle = catalog.face_cycle(face);
                for exchange in [catalog.corner_exchange(face), catalog.rib_exchange(face)] {
                    assert_eq!(exchange.len(), cycle.len());
                    for (i, key) in exchange.iter().enumerate() {
                        let image: FaceSet =
                            key.iter().map(|f| cycle_step(cycle, f, 1)).collect();
                        assert_eq!(
                            image,
                            exchange[(i + 1) % exchange.len()],
                            "{} {face}: {key} does not map onto its successor",
                            catalog.family()
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_exchange_keys_exist_in_catalog() {
        for catalog in catalogs() {
            for &face in catalog.faces() {
                for key in catalog.corner_exchange(face) {
                    assert!(key.contains(face));
                    assert!(catalog.corners().iter().any(|t| t.key == *key));
                }
                if catalog.ribs().is_empty() {
                    continue;
                }
                for key in catalog.rib_exchange(face) {
                    assert!(key.contains(face));
                    assert!(catalog.ribs().iter().any(|t| t.key == *key));
                }
            }
        }
    }

    #[test]
    fn test_piece_counts() {
        for catalog in catalogs() {
            let n = catalog.order();
            match catalog.family() {
                PuzzleFamily::Cube => {
                    assert_eq!(catalog.corners().len(), 8);
                    assert_eq!(catalog.ribs().len(), 12 * (n - 2));
                    assert_eq!(catalog.centers().len(), 6 * (n - 2) * (n - 2));
                }
                PuzzleFamily::Pyramid => {
                    assert_eq!(catalog.corners().len(), 4);
                    assert_eq!(catalog.ribs().len(), 6 * (n - 2));
                    let per_face = n * (n - 1) / 2 + (n - 2) * n.saturating_sub(3) / 2;
                    assert_eq!(catalog.centers().len(), 4 * per_face);
                }
                PuzzleFamily::Megaminx => unreachable!(),
            }
        }
    }

    #[test]
    fn test_face_centers_lie_on_face_planes() {
        for catalog in catalogs() {
            for &(face, center) in catalog.face_centers() {
                let labels = catalog.plane_points(face).unwrap();
                let points: Vec<Point> = labels
                    .iter()
                    .map(|label| {
                        catalog
                            .carcass()
                            .iter()
                            .find(|(l, _)| l == label)
                            .map(|&(_, p)| p)
                            .unwrap()
                    })
                    .collect();
                let plane = crate::plane::FacePlane::through(points[0], points[1], points[2]);
                assert_abs_diff_eq!(plane.signed_distance(&center), 0.0, epsilon = 1e-9);
                assert!(plane.signed_distance(&Point::ORIGIN).abs() > 1.0);
            }
        }
    }

    #[test]
    fn test_below_vertex() {
        let cube = ShapeCatalog::new(PuzzleFamily::Cube, 3, 150.0).unwrap();
        assert_eq!(
            cube.below_vertex(Face::R, FaceSet::from_letters("RFU")),
            FaceSet::from_letters("LFU")
        );
        let pyramid = ShapeCatalog::new(PuzzleFamily::Pyramid, 3, 150.0).unwrap();
        assert_eq!(
            pyramid.below_vertex(Face::F, FaceSet::from_letters("LRF")),
            FaceSet::from_letters("LRD")
        );
        assert_eq!(pyramid.opposite(Face::F), None);
    }
}
