//! Error type shared by the whole engine.
//!
//! Only construction and request validation can fail. Degenerate geometry is
//! handled with fallback values and a turn requested mid-turn is ignored, so
//! neither shows up here.

use thiserror::Error;

use crate::face::{Face, PuzzleFamily};

/// Result alias used across the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Everything the engine can reject.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A character that is not a face letter at all.
    #[error("unknown face letter '{0}'")]
    UnknownFace(char),
    /// A face letter that exists, but not on this kind of puzzle.
    #[error("face {face} does not exist on a {family}")]
    FaceNotInFamily { face: Face, family: PuzzleFamily },
    /// A piece key that is empty, repeats a letter or names opposite faces.
    #[error("malformed piece key \"{0}\"")]
    MalformedKey(String),
    /// A family name that could not be parsed.
    #[error("unknown puzzle family \"{0}\"")]
    UnknownFamily(String),
    /// A recognised family the engine has no catalog for.
    #[error("{0} puzzles are not supported")]
    UnsupportedFamily(PuzzleFamily),
    #[error("puzzle order {order} is out of range ({min}..={max})")]
    OrderOutOfRange { order: usize, min: usize, max: usize },
    /// A move token that is not `X`, `X'` or `X2`.
    #[error("malformed move \"{0}\"")]
    MalformedMove(String),
    /// Turn directions are +1 or -1.
    #[error("turn direction must be +1 or -1, got {0}")]
    InvalidDirection(i32),
    /// An axis name other than x, y or z.
    #[error("unknown axis \"{0}\"")]
    UnknownAxis(String),
}
