//! Face letters, order-free piece keys and puzzle families.
//!
//! A piece key such as `RFU` names the faces a piece touches. Keys are stored
//! as a bitmask so that `RFU`, `URF` and `FUR` are the same key; they always
//! display in the canonical letter order `L R F B U D`.

use std::fmt;
use std::ops::{BitAnd, BitOr};
use std::str::FromStr;

use crate::error::{Error, Result};

/// One macroscopic side of a puzzle.
///
/// Declaration order is the canonical display order of keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Face {
    L,
    R,
    F,
    B,
    U,
    D,
}

impl Face {
    /// Every face letter, in canonical order.
    pub const ALL: [Face; 6] = [Face::L, Face::R, Face::F, Face::B, Face::U, Face::D];

    pub const fn letter(self) -> char {
        match self {
            Face::L => 'L',
            Face::R => 'R',
            Face::F => 'F',
            Face::B => 'B',
            Face::U => 'U',
            Face::D => 'D',
        }
    }

    /// Parses an ASCII letter; usable in `const` tables.
    pub const fn from_byte(byte: u8) -> Option<Face> {
        match byte {
            b'L' => Some(Face::L),
            b'R' => Some(Face::R),
            b'F' => Some(Face::F),
            b'B' => Some(Face::B),
            b'U' => Some(Face::U),
            b'D' => Some(Face::D),
            _ => None,
        }
    }

    pub fn from_letter(letter: char) -> Result<Face> {
        u8::try_from(letter)
            .ok()
            .and_then(Face::from_byte)
            .ok_or(Error::UnknownFace(letter))
    }

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[inline]
    const fn bit(self) -> u8 {
        1 << self as u8
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl TryFrom<char> for Face {
    type Error = Error;

    fn try_from(letter: char) -> Result<Self> {
        Face::from_letter(letter)
    }
}

/// An unordered set of faces, used as a collection key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct FaceSet(u8);

impl FaceSet {
    pub const EMPTY: FaceSet = FaceSet(0);

    /// Builds a key from its letters at compile time.
    ///
    /// Panics (and so fails the build when used in a `const`) on unknown or
    /// repeated letters.
    pub const fn from_letters(letters: &str) -> FaceSet {
        let bytes = letters.as_bytes();
        let mut bits = 0u8;
        let mut i = 0;
        while i < bytes.len() {
            let face = match Face::from_byte(bytes[i]) {
                Some(face) => face,
                None => panic!("unknown face letter in key"),
            };
            assert!(bits & face.bit() == 0, "repeated face letter in key");
            bits |= face.bit();
            i += 1;
        }
        FaceSet(bits)
    }

    pub const fn single(face: Face) -> FaceSet {
        FaceSet(face.bit())
    }

    #[inline]
    pub const fn contains(self, face: Face) -> bool {
        self.0 & face.bit() != 0
    }

    /// Whether every face of `other` is also in `self`.
    #[inline]
    pub const fn contains_all(self, other: FaceSet) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub const fn with(self, face: Face) -> FaceSet {
        FaceSet(self.0 | face.bit())
    }

    #[inline]
    pub const fn without(self, face: Face) -> FaceSet {
        FaceSet(self.0 & !face.bit())
    }

    #[inline]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Swaps one letter for another, leaving the rest of the key alone.
    pub const fn replace(self, from: Face, to: Face) -> FaceSet {
        if self.contains(from) {
            self.without(from).with(to)
        } else {
            self
        }
    }

    /// Faces of the set in canonical order.
    pub fn iter(self) -> impl Iterator<Item = Face> {
        Face::ALL.into_iter().filter(move |&face| self.contains(face))
    }

    pub fn faces(self) -> Vec<Face> {
        self.iter().collect()
    }
}

impl BitAnd for FaceSet {
    type Output = FaceSet;

    fn bitand(self, rhs: FaceSet) -> FaceSet {
        FaceSet(self.0 & rhs.0)
    }
}

impl BitOr for FaceSet {
    type Output = FaceSet;

    fn bitor(self, rhs: FaceSet) -> FaceSet {
        FaceSet(self.0 | rhs.0)
    }
}

impl FromIterator<Face> for FaceSet {
    fn from_iter<I: IntoIterator<Item = Face>>(iter: I) -> Self {
        iter.into_iter().fold(FaceSet::EMPTY, FaceSet::with)
    }
}

impl fmt::Display for FaceSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for face in self.iter() {
            write!(f, "{}", face.letter())?;
        }
        Ok(())
    }
}

impl FromStr for FaceSet {
    type Err = Error;

    fn from_str(key: &str) -> Result<Self> {
        if key.is_empty() {
            return Err(Error::MalformedKey(key.to_owned()));
        }
        let mut set = FaceSet::EMPTY;
        for letter in key.chars() {
            let face = Face::from_letter(letter)?;
            if set.contains(face) {
                return Err(Error::MalformedKey(key.to_owned()));
            }
            set = set.with(face);
        }
        Ok(set)
    }
}

/// The kind of puzzle a model is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PuzzleFamily {
    Cube,
    Pyramid,
    /// Dodecahedral puzzles; named so requests for them can be rejected
    /// explicitly.
    Megaminx,
}

impl PuzzleFamily {
    /// Turnable faces of the family, in catalog order.
    pub const fn faces(self) -> &'static [Face] {
        match self {
            PuzzleFamily::Cube => &[Face::R, Face::L, Face::U, Face::D, Face::F, Face::B],
            PuzzleFamily::Pyramid => &[Face::F, Face::L, Face::R, Face::D],
            PuzzleFamily::Megaminx => &[],
        }
    }

    /// Returns `face` if the family has it.
    pub fn check_face(self, face: Face) -> Result<Face> {
        if self.faces().contains(&face) {
            Ok(face)
        } else {
            Err(Error::FaceNotInFamily { face, family: self })
        }
    }

    pub fn face_from_letter(self, letter: char) -> Result<Face> {
        self.check_face(Face::from_letter(letter)?)
    }
}

impl fmt::Display for PuzzleFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PuzzleFamily::Cube => "cube",
            PuzzleFamily::Pyramid => "pyramid",
            PuzzleFamily::Megaminx => "megaminx",
        };
        f.write_str(name)
    }
}

impl FromStr for PuzzleFamily {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "cube" => Ok(PuzzleFamily::Cube),
            "pyramid" | "pyraminx" => Ok(PuzzleFamily::Pyramid),
            "megaminx" => Ok(PuzzleFamily::Megaminx),
            _ => Err(Error::UnknownFamily(name.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_is_order_free() {
        let a: FaceSet = "RFU".parse().unwrap();
        let b: FaceSet = "URF".parse().unwrap();
        assert_eq!(a, b);
        assert_eq!(a, FaceSet::from_letters("FUR"));
        assert_eq!(a.to_string(), "RFU");
    }

    #[test]
    fn test_canonical_display_order() {
        assert_eq!(FaceSet::from_letters("DLF").to_string(), "LFD");
        assert_eq!(FaceSet::from_letters("UF").to_string(), "FU");
        assert_eq!(FaceSet::from_letters("FRL").to_string(), "LRF");
    }

    #[test]
    fn test_malformed_keys_are_rejected() {
        assert_eq!("".parse::<FaceSet>(), Err(Error::MalformedKey(String::new())));
        assert_eq!("RR".parse::<FaceSet>(), Err(Error::MalformedKey("RR".into())));
        assert_eq!("RX".parse::<FaceSet>(), Err(Error::UnknownFace('X')));
    }

    #[test]
    fn test_replace_only_touches_present_letter() {
        let key = FaceSet::from_letters("RF");
        assert_eq!(key.replace(Face::F, Face::U), FaceSet::from_letters("RU"));
        assert_eq!(key.replace(Face::D, Face::U), key);
    }

    #[test]
    fn test_family_faces() {
        assert_eq!(PuzzleFamily::Cube.faces().len(), 6);
        assert!(PuzzleFamily::Pyramid.check_face(Face::U).is_err());
        assert_eq!(PuzzleFamily::Pyramid.face_from_letter('D'), Ok(Face::D));
        assert_eq!("Pyramid".parse::<PuzzleFamily>(), Ok(PuzzleFamily::Pyramid));
        assert!("tetrahedron".parse::<PuzzleFamily>().is_err());
    }
}
