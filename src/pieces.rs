//! Puzzle pieces: small polyhedra (or flat polygons) with coloured stickers.
//!
//! Each piece owns its vertex arena. Edges refer to vertices by index and every
//! vertex is labelled with the faces whose corner it represents, so the faces
//! an edge borders are the intersection of its endpoint labels.

use std::fmt;
use std::mem;

use rustc_hash::FxHashMap;

use crate::face::{Face, FaceSet};
use crate::geometry::{Axis, Point, Trig, Vector};

/// Stable identity of a piece, assigned once at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId(pub u32);

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which collection a piece belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    /// Three stickers.
    Corner,
    /// Two stickers.
    Rib,
    /// One sticker, flat on a face.
    Center,
}

impl PieceKind {
    /// Number of stickers a piece of this kind carries.
    pub const fn sticker_count(self) -> usize {
        match self {
            PieceKind::Corner => 3,
            PieceKind::Rib => 2,
            PieceKind::Center => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub label: FaceSet,
    pub point: Point,
}

impl Vertex {
    pub const fn new(label: FaceSet, point: Point) -> Self {
        Self { label, point }
    }
}

/// A segment between two vertices of the owning arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub start: usize,
    pub finish: usize,
}

impl Edge {
    /// Faces shared by both endpoints.
    pub fn faces(&self, vertices: &[Vertex]) -> FaceSet {
        vertices[self.start].label & vertices[self.finish].label
    }

    pub fn points(&self, vertices: &[Vertex]) -> (Point, Point) {
        (vertices[self.start].point, vertices[self.finish].point)
    }

    /// Whether both endpoints carry every face in `faces`.
    pub fn joins(&self, vertices: &[Vertex], faces: FaceSet) -> bool {
        self.faces(vertices).contains_all(faces)
    }
}

/// Orders a closed set of edges into a vertex loop.
///
/// Returns vertex indices without repeating the first one. An open chain is
/// returned as far as it connects.
pub fn chain_edges(edges: &[Edge]) -> Vec<usize> {
    let Some((first, rest)) = edges.split_first() else {
        return Vec::new();
    };
    let mut chain = vec![first.start, first.finish];
    let mut remaining: Vec<&Edge> = rest.iter().collect();
    while let Some(&tail) = chain.last() {
        let Some(position) = remaining
            .iter()
            .position(|edge| edge.start == tail || edge.finish == tail)
        else {
            break;
        };
        let edge = remaining.swap_remove(position);
        chain.push(if edge.start == tail { edge.finish } else { edge.start });
    }
    if chain.len() > 2 && chain.first() == chain.last() {
        chain.pop();
    }
    chain
}

/// The face a turn of the cycle carries `face` to.
///
/// `cycle` lists the neighbours of the turning face; direction `+1` moves each
/// entry to the next one. Faces outside the cycle stay put.
pub fn cycle_step(cycle: &[Face], face: Face, direction: i32) -> Face {
    match cycle.iter().position(|&f| f == face) {
        Some(i) => {
            let len = cycle.len() as i32;
            cycle[(i as i32 + direction).rem_euclid(len) as usize]
        }
        None => face,
    }
}

/// Vertex arena and edges shared by every piece built from the same shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Skeleton {
    pub vertices: Vec<Vertex>,
    pub edges: Vec<Edge>,
}

impl Skeleton {
    /// Connects every pair of vertices whose labels share exactly two faces.
    pub fn from_vertices(vertices: Vec<Vertex>) -> Self {
        let mut edges = Vec::new();
        for start in 0..vertices.len() {
            for finish in start + 1..vertices.len() {
                if (vertices[start].label & vertices[finish].label).len() == 2 {
                    edges.push(Edge { start, finish });
                }
            }
        }
        Self { vertices, edges }
    }

    /// Vertex positions, in arena order.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.vertices.iter().map(|vertex| vertex.point)
    }
}

/// One physical piece of the puzzle.
#[derive(Debug, Clone)]
pub struct Piece {
    id: PieceId,
    kind: PieceKind,
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
    /// Face each sticker currently lies on.
    name: Vec<Face>,
    prev_name: Vec<Face>,
    /// Original colour of the sticker at the same position of `name`.
    name_for_color: Vec<Face>,
    /// Direction -> edges bounding that side of the piece.
    sides: FxHashMap<Face, Vec<usize>>,
}

impl Piece {
    /// Builds a piece from `skeleton`, shifted by `offset`.
    ///
    /// `faces` are the family's faces; the side table gets an entry for every
    /// face some edge borders. Centers skip their own face, so their table
    /// maps neighbouring faces to the edge along that border.
    pub fn new(
        id: PieceId,
        kind: PieceKind,
        key: FaceSet,
        skeleton: &Skeleton,
        offset: Vector,
        faces: &[Face],
    ) -> Self {
        let mut vertices = skeleton.vertices.clone();
        for vertex in &mut vertices {
            vertex.point.translate(offset);
        }
        let edges = skeleton.edges.clone();

        let mut sides = FxHashMap::default();
        for &face in faces {
            if kind == PieceKind::Center && key.contains(face) {
                continue;
            }
            let bounding: Vec<usize> = edges
                .iter()
                .enumerate()
                .filter(|(_, edge)| edge.faces(&vertices).contains(face))
                .map(|(i, _)| i)
                .collect();
            if !bounding.is_empty() {
                sides.insert(face, bounding);
            }
        }

        let name = key.faces();
        Self {
            id,
            kind,
            vertices,
            edges,
            prev_name: name.clone(),
            name_for_color: name.clone(),
            name,
            sides,
        }
    }

    pub fn id(&self) -> PieceId {
        self.id
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn name(&self) -> &[Face] {
        &self.name
    }

    pub fn prev_name(&self) -> &[Face] {
        &self.prev_name
    }

    pub fn name_for_color(&self) -> &[Face] {
        &self.name_for_color
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Faces that currently have an entry in the side table.
    pub fn side_faces(&self) -> impl Iterator<Item = Face> + '_ {
        self.sides.keys().copied()
    }

    pub fn side_edges(&self, face: Face) -> Option<&[usize]> {
        self.sides.get(&face).map(Vec::as_slice)
    }

    /// The first edge lying between all of `faces`.
    pub fn edge_between(&self, faces: FaceSet) -> Option<&Edge> {
        self.edges
            .iter()
            .find(|edge| edge.joins(&self.vertices, faces))
    }

    /// Colour of the sticker facing `face`, if the piece has one there.
    pub fn color_facing(&self, face: Face) -> Option<Face> {
        let position = self.name.iter().position(|&f| f == face)?;
        self.name_for_color.get(position).copied()
    }

    pub fn translate(&mut self, offset: Vector) {
        for vertex in &mut self.vertices {
            vertex.point.translate(offset);
        }
    }

    pub fn scale(&mut self, factor: f64, pivot: Point) {
        for vertex in &mut self.vertices {
            vertex.point.scale(factor, pivot);
        }
    }

    pub fn rotate(&mut self, axis: Axis, trig: Trig) {
        for vertex in &mut self.vertices {
            vertex.point.rotate(axis, trig);
        }
    }

    pub fn centroid(&self) -> Point {
        Point::centroid(self.vertices.iter().map(|vertex| &vertex.point))
    }

    /// Records that the piece now occupies `key`.
    ///
    /// The previous name is kept so [`Piece::update_sides`] can relabel the
    /// stickers in their original order.
    pub fn set_name(&mut self, key: FaceSet) {
        self.prev_name = mem::replace(&mut self.name, key.faces());
    }

    /// Follows a turn around `cycle`: the edges that bounded side `x` now bound
    /// the side `x` was carried to, and every sticker is relabelled the same
    /// way. The colour order is never touched.
    pub fn update_sides(&mut self, cycle: &[Face], direction: i32) {
        let sides = mem::take(&mut self.sides);
        self.sides = sides
            .into_iter()
            .map(|(face, edges)| (cycle_step(cycle, face, direction), edges))
            .collect();
        self.name = self
            .prev_name
            .iter()
            .map(|&face| cycle_step(cycle, face, direction))
            .collect();
    }

    /// Vertex loop of the side facing `face`.
    pub fn side_polygon(&self, face: Face) -> Option<Vec<Point>> {
        let edges: Vec<Edge> = self
            .side_edges(face)?
            .iter()
            .map(|&i| self.edges[i])
            .collect();
        Some(self.loop_points(&edges))
    }

    /// The whole outline, for flat pieces.
    pub fn outline(&self) -> Vec<Point> {
        self.loop_points(&self.edges)
    }

    /// Polygon of the sticker lying on `face`, if the piece has one there.
    pub fn sticker_polygon(&self, face: Face) -> Option<Vec<Point>> {
        if !self.name.contains(&face) {
            return None;
        }
        match self.kind {
            PieceKind::Center => Some(self.outline()),
            PieceKind::Corner | PieceKind::Rib => self.side_polygon(face),
        }
    }

    fn loop_points(&self, edges: &[Edge]) -> Vec<Point> {
        chain_edges(edges)
            .into_iter()
            .map(|i| self.vertices[i].point)
            .collect()
    }
}
