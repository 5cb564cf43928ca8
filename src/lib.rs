//! Twisty Puzzle Engine
//!
//! Geometry and state for cube- and pyramid-shaped twisty puzzles: piece
//! skeletons, layer turns with animation, sticker relabelling, visible-face
//! culling and flat shading. Drawing is delegated to a [`render::DrawingSurface`]
//! supplied by the caller.
//!
//! ```no_run
//! use twirl::{EngineConfig, Puzzle, PuzzleFamily};
//!
//! let mut puzzle = Puzzle::new(PuzzleFamily::Cube, 3, EngineConfig::default())?;
//! let moves = twirl::notation::parse_moves(PuzzleFamily::Cube, "R U R' U'")?;
//! puzzle.apply_moves(&moves)?;
//! println!("{}", puzzle.sticker_text());
//! # Ok::<(), twirl::Error>(())
//! ```

pub mod catalog;
pub mod collection;
pub mod config;
pub mod error;
pub mod face;
pub mod geometry;
pub mod lighting;
pub mod model;
pub mod notation;
pub mod pieces;
pub mod plane;
pub mod puzzle;
pub mod render;
pub mod text;
pub mod turn;

pub use config::EngineConfig;
pub use error::{Error, Result};
pub use face::{Face, FaceSet, PuzzleFamily};
pub use puzzle::Puzzle;
