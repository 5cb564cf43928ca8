//! The puzzle model: every piece, the whole-body carcass, lights and the set
//! of faces the viewer can currently see.
//!
//! Whole-body operations (rotation, scaling) move everything, carcass and
//! face centres included, and refresh visibility. Layer turns move only the
//! pieces of one layer; the carcass stays where it is, so visibility is not
//! affected by a turn.

use log::{debug, warn};

use crate::catalog::{PieceTemplate, ShapeCatalog};
use crate::collection::PieceCollection;
use crate::config::EngineConfig;
use crate::error::Result;
use crate::face::{Face, FaceSet, PuzzleFamily};
use crate::geometry::{Axis, Point, Trig, Vector, LENGTH_EPSILON};
use crate::lighting::{self, Light};
use crate::pieces::{Piece, PieceId, PieceKind};
use crate::plane::{Body, FacePlane};

/// Two lights closer than this are the same light.
const LIGHT_TOLERANCE: f64 = 1e-6;

fn collect_pieces(
    kind: PieceKind,
    templates: &[PieceTemplate],
    faces: &[Face],
    origin: Vector,
    next_id: &mut u32,
) -> PieceCollection {
    let mut collection = PieceCollection::new(kind);
    for template in templates {
        let id = PieceId(*next_id);
        *next_id += 1;
        let piece = Piece::new(
            id,
            kind,
            template.key,
            &template.skeleton,
            template.offset + origin,
            faces,
        );
        collection.insert(template.key, piece);
    }
    collection
}

#[derive(Debug, Clone)]
pub struct Model {
    catalog: ShapeCatalog,
    center: Point,
    viewer: Point,
    visibility_epsilon: f64,
    shadow_floor: f64,
    corners: PieceCollection,
    ribs: PieceCollection,
    centers: PieceCollection,
    carcass: Vec<(FaceSet, Point)>,
    face_centers: Vec<(Face, Point)>,
    scale: f64,
    lights: Vec<Light>,
    body: Body<Face>,
    visible: Vec<Face>,
}

impl Model {
    /// Builds a solved puzzle centred on `config.center`.
    pub fn new(family: PuzzleFamily, order: usize, config: &EngineConfig) -> Result<Self> {
        let catalog = ShapeCatalog::new(family, order, config.size)?;
        let origin = config.center.to_vector();
        let faces = catalog.faces();

        let mut next_id = 0;
        let mut collect = |kind, templates: &[PieceTemplate]| {
            collect_pieces(kind, templates, faces, origin, &mut next_id)
        };
        let corners = collect(PieceKind::Corner, catalog.corners());
        let ribs = collect(PieceKind::Rib, catalog.ribs());
        let centers = collect(PieceKind::Center, catalog.centers());

        let carcass = catalog
            .carcass()
            .iter()
            .map(|&(label, point)| (label, point + origin))
            .collect();
        let face_centers = catalog
            .face_centers()
            .iter()
            .map(|&(face, point)| (face, point + origin))
            .collect();

        debug!(
            "built {family} of order {order}: {} corners, {} ribs, {} centers",
            corners.len(),
            ribs.len(),
            centers.len()
        );

        let mut model = Self {
            catalog,
            center: config.center,
            viewer: config.viewer(),
            visibility_epsilon: config.visibility_epsilon,
            shadow_floor: config.shadow_floor,
            corners,
            ribs,
            centers,
            carcass,
            face_centers,
            scale: 1.0,
            lights: config.lights.iter().copied().map(Light::new).collect(),
            body: Body::new(),
            visible: Vec::new(),
        };
        model.refresh_visibility();
        Ok(model)
    }

    pub fn catalog(&self) -> &ShapeCatalog {
        &self.catalog
    }

    pub fn family(&self) -> PuzzleFamily {
        self.catalog.family()
    }

    pub fn order(&self) -> usize {
        self.catalog.order()
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn viewer(&self) -> Point {
        self.viewer
    }

    pub fn visibility_epsilon(&self) -> f64 {
        self.visibility_epsilon
    }

    /// Current scale relative to the size the model was built at.
    pub fn scale_factor(&self) -> f64 {
        self.scale
    }

    pub fn corners(&self) -> &PieceCollection {
        &self.corners
    }

    pub fn ribs(&self) -> &PieceCollection {
        &self.ribs
    }

    pub fn centers(&self) -> &PieceCollection {
        &self.centers
    }

    /// Corners, ribs and centers, in that order.
    pub fn collections(&self) -> [&PieceCollection; 3] {
        [&self.corners, &self.ribs, &self.centers]
    }

    fn collections_mut(&mut self) -> [&mut PieceCollection; 3] {
        [&mut self.corners, &mut self.ribs, &mut self.centers]
    }

    /// Every piece with the key it occupies.
    pub fn pieces(&self) -> impl Iterator<Item = (FaceSet, &Piece)> {
        self.collections().into_iter().flat_map(PieceCollection::iter)
    }

    pub fn carcass(&self) -> &[(FaceSet, Point)] {
        &self.carcass
    }

    pub fn carcass_point(&self, label: FaceSet) -> Option<Point> {
        self.carcass
            .iter()
            .find(|(candidate, _)| *candidate == label)
            .map(|&(_, point)| point)
    }

    pub fn face_center(&self, face: Face) -> Option<Point> {
        self.face_centers
            .iter()
            .find(|(candidate, _)| *candidate == face)
            .map(|&(_, point)| point)
    }

    pub fn body(&self) -> &Body<Face> {
        &self.body
    }

    /// Faces currently turned toward the viewer.
    pub fn visible_faces(&self) -> &[Face] {
        &self.visible
    }

    pub fn is_visible(&self, face: Face) -> bool {
        self.visible.contains(&face)
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn add_light(&mut self, position: Point) {
        self.lights.push(Light::new(position));
    }

    /// Removes the light at `position`. Returns whether one was there.
    pub fn remove_light(&mut self, position: Point) -> bool {
        let found = self
            .lights
            .iter()
            .position(|light| light.position.distance_to(&position) < LIGHT_TOLERANCE);
        match found {
            Some(i) => {
                self.lights.remove(i);
                true
            }
            None => false,
        }
    }

    /// Brightness of `polygon` under the current lights.
    pub fn shade(&self, polygon: &[Point]) -> f64 {
        lighting::shade(polygon, self.center, &self.lights, self.shadow_floor)
    }

    fn translate_all(&mut self, offset: Vector) {
        for collection in self.collections_mut() {
            for piece in collection.pieces_mut() {
                piece.translate(offset);
            }
        }
        for (_, point) in &mut self.carcass {
            point.translate(offset);
        }
        for (_, point) in &mut self.face_centers {
            point.translate(offset);
        }
    }

    /// Rotates the whole body about the model centre.
    pub fn rotate(&mut self, axis: Axis, degrees: f64) {
        let trig = Trig::from_degrees(degrees);
        let origin = self.center.to_vector();
        self.translate_all(-origin);
        for collection in self.collections_mut() {
            for piece in collection.pieces_mut() {
                piece.rotate(axis, trig);
            }
        }
        for (_, point) in &mut self.carcass {
            point.rotate(axis, trig);
        }
        for (_, point) in &mut self.face_centers {
            point.rotate(axis, trig);
        }
        self.translate_all(origin);
        self.refresh_visibility();
    }

    /// Scales the body to `factor` times its built size.
    ///
    /// Factors are absolute, not cumulative. Non-positive factors fall back
    /// to 1.
    pub fn scale(&mut self, factor: f64) {
        let factor = if factor > 0.0 && factor.is_finite() {
            factor
        } else {
            warn!("ignoring scale factor {factor}, using 1");
            1.0
        };
        let ratio = factor / self.scale;
        let pivot = self.center;
        for collection in self.collections_mut() {
            for piece in collection.pieces_mut() {
                piece.scale(ratio, pivot);
            }
        }
        for (_, point) in &mut self.carcass {
            point.scale(ratio, pivot);
        }
        for (_, point) in &mut self.face_centers {
            point.scale(ratio, pivot);
        }
        self.scale = factor;
        self.refresh_visibility();
    }

    /// Rotates the layer of `face` by `degrees` about the axis from the model
    /// centre through the face centre.
    ///
    /// The axis is first carried onto +y (about z, then about x), the layer
    /// is rotated about y and the change of basis is undone. Only pieces of
    /// the layer are touched.
    pub fn turn_side(&mut self, face: Face, degrees: f64) {
        let Some(target) = self.face_center(face) else {
            return;
        };
        let axis = Vector::between(self.center, target).normalized();
        let xy = axis.length_xy();
        let alpha = if xy > LENGTH_EPSILON {
            Trig {
                sin: axis.x / xy,
                cos: axis.y / xy,
            }
        } else {
            Trig::IDENTITY
        };
        let beta = Trig {
            sin: -axis.z,
            cos: xy,
        };
        let turn = Trig::from_degrees(degrees);
        let origin = self.center.to_vector();

        for collection in self.collections_mut() {
            for piece in collection.layer_mut(face) {
                piece.translate(-origin);
                piece.rotate(Axis::Z, alpha);
                piece.rotate(Axis::X, beta);
                piece.rotate(Axis::Y, turn);
                piece.rotate(Axis::X, beta.inverse());
                piece.rotate(Axis::Z, alpha.inverse());
                piece.translate(origin);
            }
        }
    }

    /// Commits a finished turn of `face`: moves pieces between keys and
    /// relabels their stickers.
    pub fn update_sides(&mut self, face: Face, direction: i32) -> Result<()> {
        let face = self.family().check_face(face)?;
        let cycle = self.catalog.face_cycle(face);
        self.corners
            .update_sides(self.catalog.corner_exchange(face), face, cycle, direction)?;
        self.ribs
            .update_sides(self.catalog.rib_exchange(face), face, cycle, direction)?;
        self.centers.rotate_layer(face, cycle, direction);
        debug!("committed {face} turn in direction {direction}");
        Ok(())
    }

    /// Cross-section where the layer of `face` separates from the rest of the
    /// body, one point per face vertex.
    pub fn plastic_cut(&self, face: Face) -> Vec<Point> {
        let ratio = (self.order() - 1) as f64;
        self.catalog
            .corner_exchange(face)
            .iter()
            .filter_map(|&vertex| {
                let up = self.carcass_point(vertex)?;
                let low = self.carcass_point(self.catalog.below_vertex(face, vertex))?;
                Some(Point::divide(low, up, ratio))
            })
            .collect()
    }

    /// Rebuilds the body planes from the carcass and re-tests the viewer.
    fn refresh_visibility(&mut self) {
        let mut body: Body<Face> = self
            .catalog
            .faces()
            .iter()
            .filter_map(|&face| {
                let [a, b, c] = self.catalog.plane_points(face)?;
                let plane = FacePlane::through(
                    self.carcass_point(a)?,
                    self.carcass_point(b)?,
                    self.carcass_point(c)?,
                );
                Some((face, plane))
            })
            .collect();
        body.adjust(&self.center);
        self.visible = body.visible(&self.viewer, self.visibility_epsilon);
        self.body = body;
    }
}
