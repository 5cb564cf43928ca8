//! Layer-turn animation.
//!
//! A turn goes Idle -> Turning -> Committing -> Idle. While turning, every
//! tick rotates the layer a little further about the face axis; once the full
//! angle is reached the next tick commits the permutation and the engine is
//! ready for another request.

use log::{debug, trace, warn};

use crate::config::DEFAULT_DEGREES_PER_TICK;
use crate::error::{Error, Result};
use crate::face::{Face, FaceSet};
use crate::model::Model;

/// Keys of the layer being turned, taken when the turn starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerSnapshot {
    pub face: Face,
    pub corners: Vec<FaceSet>,
    pub ribs: Vec<FaceSet>,
    pub centers: Vec<FaceSet>,
}

impl LayerSnapshot {
    pub fn take(model: &Model, face: Face) -> Self {
        Self {
            face,
            corners: model.corners().layer_keys(face),
            ribs: model.ribs().layer_keys(face),
            centers: model.centers().layer_keys(face),
        }
    }

    /// Whether `key` was part of the layer when the turn started.
    pub fn contains(&self, key: FaceSet) -> bool {
        [&self.corners, &self.ribs, &self.centers]
            .into_iter()
            .any(|keys| keys.contains(&key))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TurnState {
    Idle,
    Turning {
        layer: LayerSnapshot,
        direction: i32,
        /// Degrees turned so far, always non-negative.
        angle: f64,
    },
    Committing {
        layer: LayerSnapshot,
        direction: i32,
    },
}

impl TurnState {
    /// The layer in motion, if any.
    pub fn layer(&self) -> Option<&LayerSnapshot> {
        match self {
            TurnState::Idle => None,
            TurnState::Turning { layer, .. } | TurnState::Committing { layer, .. } => Some(layer),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TurnEngine {
    state: TurnState,
    degrees_per_tick: f64,
    committed: usize,
}

impl TurnEngine {
    /// A speed that is not a positive finite number falls back to the
    /// default.
    pub fn new(degrees_per_tick: f64) -> Self {
        let degrees_per_tick = if degrees_per_tick > 0.0 && degrees_per_tick.is_finite() {
            degrees_per_tick
        } else {
            warn!("ignoring turn speed {degrees_per_tick}, using {DEFAULT_DEGREES_PER_TICK}");
            DEFAULT_DEGREES_PER_TICK
        };
        Self {
            state: TurnState::Idle,
            degrees_per_tick,
            committed: 0,
        }
    }

    pub fn state(&self) -> &TurnState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == TurnState::Idle
    }

    /// Number of turns committed since the engine was created.
    pub fn committed(&self) -> usize {
        self.committed
    }

    pub fn degrees_per_tick(&self) -> f64 {
        self.degrees_per_tick
    }

    /// Starts turning `face`.
    ///
    /// Returns `Ok(false)` without doing anything if a turn is already in
    /// progress.
    pub fn request(&mut self, model: &Model, face: Face, direction: i32) -> Result<bool> {
        if direction != 1 && direction != -1 {
            return Err(Error::InvalidDirection(direction));
        }
        let face = model.family().check_face(face)?;
        if !self.is_idle() {
            warn!("ignoring {face} turn request, a turn is already in progress");
            return Ok(false);
        }
        debug!("starting {face} turn in direction {direction}");
        self.state = TurnState::Turning {
            layer: LayerSnapshot::take(model, face),
            direction,
            angle: 0.0,
        };
        Ok(true)
    }

    /// Advances the animation by one step.
    pub fn tick(&mut self, model: &mut Model) -> Result<()> {
        match &mut self.state {
            TurnState::Idle => {}
            TurnState::Turning {
                layer,
                direction,
                angle,
            } => {
                let full = model.catalog().turn_angle();
                let remaining = full - *angle;
                let step = self.degrees_per_tick.min(remaining);
                model.turn_side(layer.face, step * f64::from(*direction));
                *angle += step;
                trace!("{} layer at {angle} of {full} degrees", layer.face);
                if step >= remaining {
                    self.state = TurnState::Committing {
                        layer: layer.clone(),
                        direction: *direction,
                    };
                }
            }
            TurnState::Committing { layer, direction } => {
                // back to idle even if the commit fails
                let (face, direction) = (layer.face, *direction);
                self.state = TurnState::Idle;
                model.update_sides(face, direction)?;
                self.committed += 1;
            }
        }
        Ok(())
    }

    /// Ticks until the engine is idle again.
    pub fn run_to_completion(&mut self, model: &mut Model) -> Result<()> {
        while !self.is_idle() {
            self.tick(model)?;
        }
        Ok(())
    }
}
