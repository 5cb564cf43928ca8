//! Interactive viewer using kiss3d.
//!
//! The engine paints flat polygons in surface coordinates. Here every filled
//! polygon becomes a thin square tile of the same area at the polygon's
//! centroid, stacked toward the camera in painting order so later polygons
//! cover earlier ones. Outlines come from the gaps between tiles.

use kiss3d::prelude::*;
use log::warn;

use twirl::face::{Face, PuzzleFamily};
use twirl::geometry::{Axis, Point};
use twirl::lighting::Rgb;
use twirl::render::DrawingSurface;
use twirl::Puzzle;

/// Fraction of a polygon's area its tile covers, leaving a visible seam.
const TILE_FILL: f32 = 0.85;
/// Tile thickness in world units.
const TILE_DEPTH: f32 = 0.01;
/// World-space gap between consecutive tiles along the view axis.
const LAYER_STEP: f32 = 0.002;
/// Zoom change per keypress.
const ZOOM_STEP: f64 = 1.1;

struct Tile {
    position: Vec3,
    side: f32,
    color: Color,
}

/// Collects painted polygons as tiles.
struct TileSurface {
    origin: Point,
    unit: f64,
    fill: Rgb,
    tiles: Vec<Tile>,
}

impl TileSurface {
    fn new(origin: Point, unit: f64) -> Self {
        Self {
            origin,
            unit,
            fill: Rgb::BLACK,
            tiles: Vec::new(),
        }
    }

    /// Adds one cube node per tile to `scene`.
    fn place(self, scene: &mut SceneNode3d) -> Vec<SceneNode3d> {
        self.tiles
            .into_iter()
            .map(|tile| {
                scene
                    .add_cube(tile.side, tile.side, TILE_DEPTH)
                    .set_color(tile.color)
                    .set_position(tile.position)
            })
            .collect()
    }
}

impl DrawingSurface for TileSurface {
    fn draw_line(&mut self, _from: Point, _to: Point) {}

    fn fill_polygon(&mut self, vertices: &[Point]) {
        if vertices.len() < 3 {
            return;
        }
        // shoelace area of the projection onto the screen
        let count = vertices.len();
        let twice_area: f64 = (0..count)
            .map(|i| {
                let (a, b) = (vertices[i], vertices[(i + 1) % count]);
                a.x * b.y - b.x * a.y
            })
            .sum();
        let side = (twice_area.abs() / 2.0).sqrt() / self.unit;
        let centroid = Point::centroid(vertices);
        let [r, g, b] = self.fill.to_unit();
        let layer = self.tiles.len() as f32 * LAYER_STEP;
        self.tiles.push(Tile {
            position: Vec3::new(
                ((centroid.x - self.origin.x) / self.unit) as f32,
                (-(centroid.y - self.origin.y) / self.unit) as f32,
                layer,
            ),
            side: side as f32 * TILE_FILL,
            color: Color::new(r, g, b, 1.0),
        });
    }

    fn set_fill_color(&mut self, color: Rgb) {
        self.fill = color;
    }

    fn set_stroke_style(&mut self, _color: Rgb, _width: f64) {}
}

/// Face and direction bound to a key. W/S turn the upper face of a cube and
/// the front face of a pyramid; R/F and T/G turn a cube's front and back.
fn turn_for_key(family: PuzzleFamily, key: kiss3d::event::Key) -> Option<(Face, i32)> {
    use kiss3d::event::Key;
    let cube = family == PuzzleFamily::Cube;
    let top = if cube { Face::U } else { Face::F };
    match key {
        Key::Q => Some((Face::L, 1)),
        Key::W => Some((top, 1)),
        Key::E => Some((Face::R, 1)),
        Key::Z => Some((Face::D, 1)),
        Key::R if cube => Some((Face::F, 1)),
        Key::T if cube => Some((Face::B, 1)),
        Key::A => Some((Face::L, -1)),
        Key::S => Some((top, -1)),
        Key::D => Some((Face::R, -1)),
        Key::X => Some((Face::D, -1)),
        Key::F if cube => Some((Face::F, -1)),
        Key::G if cube => Some((Face::B, -1)),
        _ => None,
    }
}

/// Runs the viewer until its window is closed.
pub fn display(puzzle: Puzzle) {
    pollster::block_on(display_async(puzzle));
}

async fn display_async(mut puzzle: Puzzle) {
    let title = |puzzle: &Puzzle| {
        let model = puzzle.model();
        let status = if puzzle.is_solved() { "solved" } else { "scrambled" };
        format!("{} {} - {status}", model.family(), model.order())
    };
    let mut window = Window::new(&title(&puzzle)).await;

    let mut camera = OrbitCamera3d::default();
    camera.set_dist(6.0);

    let mut scene = SceneNode3d::empty();
    scene
        .add_light(Light::point(100.0))
        .set_position(Vec3::new(0.0, 0.0, 10.0));

    let origin = puzzle.config().center;
    let unit = puzzle.model().catalog().size();
    let step = puzzle.config().rotation_step;
    let mut zoom = 1.0;
    let mut nodes: Vec<SceneNode3d> = Vec::new();
    let mut was_solved = puzzle.is_solved();

    loop {
        for event in window.events().iter() {
            if let kiss3d::event::WindowEvent::Key(key, action, _) = event.value {
                use kiss3d::event::{Action, Key};
                if action != Action::Press {
                    continue;
                }
                match key {
                    Key::Left => puzzle.rotate(Axis::Y, -step),
                    Key::Right => puzzle.rotate(Axis::Y, step),
                    Key::Up => puzzle.rotate(Axis::X, step),
                    Key::Down => puzzle.rotate(Axis::X, -step),
                    Key::Equals => {
                        zoom *= ZOOM_STEP;
                        puzzle.scale(zoom);
                    }
                    Key::Minus => {
                        zoom /= ZOOM_STEP;
                        puzzle.scale(zoom);
                    }
                    other => {
                        let family = puzzle.model().family();
                        if let Some((face, direction)) = turn_for_key(family, other) {
                            if let Err(e) = puzzle.request_turn(face, direction) {
                                warn!("{e}");
                            }
                        }
                    }
                }
            }
        }

        if let Err(e) = puzzle.tick() {
            warn!("turn failed: {e}");
        }
        if puzzle.is_solved() != was_solved {
            was_solved = !was_solved;
            window.set_title(&title(&puzzle));
        }

        for mut node in nodes.drain(..) {
            node.remove();
        }
        let mut surface = TileSurface::new(origin, unit);
        puzzle.paint(&mut surface);
        nodes = surface.place(&mut scene);

        if !window.render_3d(&mut scene, &mut camera).await {
            break;
        }
    }
}
