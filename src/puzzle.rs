//! The puzzle a front end talks to: a model plus its turn engine.

use log::info;

use crate::config::EngineConfig;
use crate::error::Result;
use crate::face::{Face, PuzzleFamily};
use crate::geometry::{Axis, Point};
use crate::model::Model;
use crate::notation::Move;
use crate::render::{DrawingSurface, Frame};
use crate::text;
use crate::turn::TurnEngine;

#[derive(Debug, Clone)]
pub struct Puzzle {
    config: EngineConfig,
    model: Model,
    engine: TurnEngine,
}

impl Puzzle {
    /// Builds a solved puzzle, turned to the configured initial view.
    pub fn new(family: PuzzleFamily, order: usize, config: EngineConfig) -> Result<Self> {
        let model = Self::build_model(family, order, &config)?;
        let engine = TurnEngine::new(config.degrees_per_tick);
        Ok(Self {
            config,
            model,
            engine,
        })
    }

    fn build_model(family: PuzzleFamily, order: usize, config: &EngineConfig) -> Result<Model> {
        let mut model = Model::new(family, order, config)?;
        model.rotate(Axis::Y, config.initial_yaw);
        model.rotate(Axis::X, config.initial_pitch);
        Ok(model)
    }

    /// Swaps in a fresh model. On error the current puzzle is left as it was.
    pub fn reload(&mut self, family: PuzzleFamily, order: usize) -> Result<()> {
        let model = Self::build_model(family, order, &self.config)?;
        info!("loaded {family} of order {order}");
        self.model = model;
        self.engine = TurnEngine::new(self.config.degrees_per_tick);
        Ok(())
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn engine(&self) -> &TurnEngine {
        &self.engine
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Starts a turn; `Ok(false)` if one is already running.
    pub fn request_turn(&mut self, face: Face, direction: i32) -> Result<bool> {
        self.engine.request(&self.model, face, direction)
    }

    pub fn tick(&mut self) -> Result<()> {
        self.engine.tick(&mut self.model)
    }

    /// Finishes any running turn, then plays `moves` one after another
    /// without animation.
    pub fn apply_moves(&mut self, moves: &[Move]) -> Result<()> {
        self.engine.run_to_completion(&mut self.model)?;
        for m in moves {
            self.engine.request(&self.model, m.face, m.direction)?;
            self.engine.run_to_completion(&mut self.model)?;
        }
        Ok(())
    }

    pub fn rotate(&mut self, axis: Axis, degrees: f64) {
        self.model.rotate(axis, degrees);
    }

    pub fn scale(&mut self, factor: f64) {
        self.model.scale(factor);
    }

    pub fn add_light(&mut self, position: Point) {
        self.model.add_light(position);
    }

    pub fn remove_light(&mut self, position: Point) -> bool {
        self.model.remove_light(position)
    }

    pub fn frame(&self) -> Frame {
        Frame::build(&self.model, self.engine.state())
    }

    pub fn paint<S: DrawingSurface + ?Sized>(&self, surface: &mut S) {
        self.frame().paint(surface, self.config.stroke_width);
    }

    pub fn is_solved(&self) -> bool {
        text::is_solved(&self.model)
    }

    pub fn sticker_text(&self) -> String {
        text::sticker_text(&self.model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::notation::parse_moves;

    fn puzzle() -> Puzzle {
        Puzzle::new(PuzzleFamily::Cube, 3, EngineConfig::default()).unwrap()
    }

    #[test]
    fn test_initial_view_shows_three_faces() {
        let puzzle = puzzle();
        assert_eq!(puzzle.model().visible_faces().len(), 3);
        assert!(puzzle.is_solved());
    }

    #[test]
    fn test_sexy_move_six_times_is_identity() {
        let mut puzzle = puzzle();
        let moves = parse_moves(PuzzleFamily::Cube, "R U R' U'").unwrap();
        for _ in 0..5 {
            puzzle.apply_moves(&moves).unwrap();
            assert!(!puzzle.is_solved());
        }
        puzzle.apply_moves(&moves).unwrap();
        assert!(puzzle.is_solved());
        assert_eq!(puzzle.engine().committed(), 24);
    }

    #[test]
    fn test_failed_reload_keeps_the_puzzle() {
        let mut puzzle = puzzle();
        let moves = parse_moves(PuzzleFamily::Cube, "F").unwrap();
        puzzle.apply_moves(&moves).unwrap();
        let before = puzzle.sticker_text();

        assert_eq!(
            puzzle.reload(PuzzleFamily::Cube, 9),
            Err(Error::OrderOutOfRange {
                order: 9,
                min: 2,
                max: 8
            })
        );
        assert!(puzzle.reload(PuzzleFamily::Megaminx, 3).is_err());
        assert_eq!(puzzle.sticker_text(), before);

        puzzle.reload(PuzzleFamily::Pyramid, 4).unwrap();
        assert_eq!(puzzle.model().family(), PuzzleFamily::Pyramid);
        assert!(puzzle.is_solved());
    }

    #[test]
    fn test_ticks_drive_a_requested_turn() {
        let mut puzzle = puzzle();
        assert!(puzzle.request_turn(Face::U, -1).unwrap());
        for _ in 0..91 {
            puzzle.tick().unwrap();
        }
        assert!(puzzle.engine().is_idle());
        assert!(!puzzle.is_solved());
    }
}
