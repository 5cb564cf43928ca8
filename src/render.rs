//! Frame assembly: which polygons to draw, in which colour and order.
//!
//! Depth is handled with the painter's algorithm only. Polygons of one group
//! are sorted by mean z, far first; during a turn the static part and the
//! turning layer are separate groups whose order depends on whether the
//! turning face looks toward the viewer.

use crate::catalog::sticker_color;
use crate::face::{Face, FaceSet};
use crate::geometry::{Point, Vector};
use crate::lighting::{polygon_normal, Rgb};
use crate::model::Model;
use crate::pieces::{Piece, PieceKind};
use crate::turn::{LayerSnapshot, TurnState};

/// Where frames end up.
pub trait DrawingSurface {
    fn draw_line(&mut self, from: Point, to: Point);
    fn fill_polygon(&mut self, vertices: &[Point]);
    fn set_fill_color(&mut self, color: Rgb);
    fn set_stroke_style(&mut self, color: Rgb, width: f64);
}

#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub points: Vec<Point>,
    pub fill: Rgb,
}

impl Polygon {
    /// Mean z of the vertices.
    pub fn depth(&self) -> f64 {
        if self.points.is_empty() {
            return 0.0;
        }
        self.points.iter().map(|p| p.z).sum::<f64>() / self.points.len() as f64
    }

    /// Closed outline as consecutive vertex pairs.
    pub fn outline(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let count = self.points.len();
        (0..count).map(move |i| (self.points[i], self.points[(i + 1) % count]))
    }
}

fn sort_far_first(polygons: &mut [Polygon]) {
    polygons.sort_by(|a, b| a.depth().total_cmp(&b.depth()));
}

/// Shaded sticker of `piece` on `face`, if it has one there.
fn sticker(model: &Model, piece: &Piece, face: Face) -> Option<Polygon> {
    let points = piece.sticker_polygon(face)?;
    let color = sticker_color(piece.color_facing(face)?);
    Some(Polygon {
        fill: color.shaded(model.shade(&points)),
        points,
    })
}

/// Stickers lying on visible faces, for pieces accepted by `keep`.
fn visible_stickers(model: &Model, keep: impl Fn(&Piece, FaceSet) -> bool) -> Vec<Polygon> {
    let mut polygons = Vec::new();
    for (key, piece) in model.pieces() {
        if !keep(piece, key) {
            continue;
        }
        for &face in piece.name() {
            if model.is_visible(face) {
                polygons.extend(sticker(model, piece, face));
            }
        }
    }
    polygons
}

/// Whether a polygon of `piece` is turned toward the viewer.
fn faces_viewer(model: &Model, piece: &Piece, points: &[Point]) -> bool {
    let Some(normal) = polygon_normal(points, piece.centroid()) else {
        return false;
    };
    normal.dot(&Vector::between(Point::centroid(points), model.viewer())) > 0.0
}

/// Every viewer-facing polygon of the layer pieces.
fn layer_polygons(model: &Model, layer: &LayerSnapshot) -> Vec<Polygon> {
    let mut polygons = Vec::new();
    for (key, piece) in model.pieces() {
        if !layer.contains(key) {
            continue;
        }
        match piece.kind() {
            PieceKind::Center => polygons.extend(sticker(model, piece, layer.face)),
            PieceKind::Corner | PieceKind::Rib => {
                for face in piece.side_faces() {
                    let Some(points) = piece.side_polygon(face) else {
                        continue;
                    };
                    if !faces_viewer(model, piece, &points) {
                        continue;
                    }
                    let polygon = match sticker(model, piece, face) {
                        Some(sticker) => sticker,
                        None => Polygon {
                            points,
                            fill: Rgb::BLACK,
                        },
                    };
                    polygons.push(polygon);
                }
            }
        }
    }
    polygons
}

/// One frame's polygons, grouped for drawing.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Frame {
    /// Everything outside the turning layer; the whole puzzle when idle.
    pub static_part: Vec<Polygon>,
    /// Cross-section where the layer separates from the rest.
    pub plastic: Option<Polygon>,
    pub layer: Vec<Polygon>,
    /// Draw the layer after the static part.
    pub layer_on_top: bool,
}

impl Frame {
    pub fn build(model: &Model, state: &TurnState) -> Self {
        match state.layer() {
            None => Self::idle(model),
            Some(layer) => Self::turning(model, layer),
        }
    }

    pub fn idle(model: &Model) -> Self {
        let mut static_part = visible_stickers(model, |_, _| true);
        sort_far_first(&mut static_part);
        Self {
            static_part,
            ..Self::default()
        }
    }

    pub fn turning(model: &Model, layer: &LayerSnapshot) -> Self {
        let mut static_part = visible_stickers(model, |_, key| !layer.contains(key));
        sort_far_first(&mut static_part);
        let mut layer_part = layer_polygons(model, layer);
        sort_far_first(&mut layer_part);

        let face_visible = model.is_visible(layer.face);
        let plastic = face_visible
            .then(|| model.plastic_cut(layer.face))
            .filter(|points| points.len() >= 3)
            .map(|points| Polygon {
                points,
                fill: Rgb::BLACK,
            });
        Self {
            static_part,
            plastic,
            layer: layer_part,
            layer_on_top: face_visible,
        }
    }

    /// All polygons in drawing order.
    pub fn polygons(&self) -> Vec<&Polygon> {
        let (first, last) = if self.layer_on_top {
            (&self.static_part, &self.layer)
        } else {
            (&self.layer, &self.static_part)
        };
        let mut ordered: Vec<&Polygon> = first.iter().collect();
        if self.layer_on_top {
            ordered.extend(&self.plastic);
        }
        ordered.extend(last);
        ordered
    }

    /// Fills every polygon and strokes its outline in black.
    pub fn paint<S: DrawingSurface + ?Sized>(&self, surface: &mut S, stroke_width: f64) {
        surface.set_stroke_style(Rgb::BLACK, stroke_width);
        for polygon in self.polygons() {
            surface.set_fill_color(polygon.fill);
            surface.fill_polygon(&polygon.points);
            for (from, to) in polygon.outline() {
                surface.draw_line(from, to);
            }
        }
    }
}
