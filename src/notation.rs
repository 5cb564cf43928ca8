//! Face-turn notation: `R` is a positive quarter (or third) turn of R, `R'`
//! the inverse and `R2` a double turn.

use std::fmt;

use crate::error::{Error, Result};
use crate::face::{Face, PuzzleFamily};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub face: Face,
    pub direction: i32,
}

impl Move {
    pub const fn new(face: Face, direction: i32) -> Self {
        Self { face, direction }
    }

    pub const fn inverse(self) -> Self {
        Self::new(self.face, -self.direction)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.direction < 0 {
            write!(f, "{}'", self.face)
        } else {
            write!(f, "{}", self.face)
        }
    }
}

fn parse_token(family: PuzzleFamily, token: &str) -> Result<Vec<Move>> {
    let malformed = || Error::MalformedMove(token.to_owned());
    let mut chars = token.chars();
    let letter = chars.next().ok_or_else(malformed)?;
    let face = Face::from_letter(letter).map_err(|_| malformed())?;
    let face = family.check_face(face)?;
    match chars.as_str() {
        "" => Ok(vec![Move::new(face, 1)]),
        "'" => Ok(vec![Move::new(face, -1)]),
        "2" => Ok(vec![Move::new(face, 1); 2]),
        _ => Err(malformed()),
    }
}

/// Parses a whitespace-separated move sequence, expanding doubles.
pub fn parse_moves(family: PuzzleFamily, text: &str) -> Result<Vec<Move>> {
    let mut moves = Vec::new();
    for token in text.split_whitespace() {
        moves.extend(parse_token(family, token)?);
    }
    Ok(moves)
}

/// Sequence that undoes `moves`.
pub fn invert(moves: &[Move]) -> Vec<Move> {
    moves.iter().rev().map(|m| m.inverse()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_tokens() {
        let moves = parse_moves(PuzzleFamily::Cube, "R U' F2").unwrap();
        assert_eq!(
            moves,
            vec![
                Move::new(Face::R, 1),
                Move::new(Face::U, -1),
                Move::new(Face::F, 1),
                Move::new(Face::F, 1),
            ]
        );
    }

    #[test]
    fn test_empty_input_is_no_moves() {
        assert_eq!(parse_moves(PuzzleFamily::Cube, "   "), Ok(vec![]));
    }

    #[test]
    fn test_malformed_tokens() {
        assert_eq!(
            parse_moves(PuzzleFamily::Cube, "R X"),
            Err(Error::MalformedMove("X".into()))
        );
        assert_eq!(
            parse_moves(PuzzleFamily::Cube, "R3"),
            Err(Error::MalformedMove("R3".into()))
        );
        assert_eq!(
            parse_moves(PuzzleFamily::Cube, "r"),
            Err(Error::MalformedMove("r".into()))
        );
    }

    #[test]
    fn test_faces_are_checked_against_family() {
        assert_eq!(
            parse_moves(PuzzleFamily::Pyramid, "F U"),
            Err(Error::FaceNotInFamily {
                face: Face::U,
                family: PuzzleFamily::Pyramid
            })
        );
    }

    #[test]
    fn test_display_and_invert() {
        let moves = parse_moves(PuzzleFamily::Cube, "R U'").unwrap();
        let undo: Vec<String> = invert(&moves).iter().map(ToString::to_string).collect();
        assert_eq!(undo, ["U", "R'"]);
    }
}
