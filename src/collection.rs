//! Key -> pieces map with the permutation step.
//!
//! A collection holds every piece of one kind. Its key set is fixed when the
//! model is built; turning only moves pieces between keys.

use std::mem;

use log::trace;
use rustc_hash::FxHashMap;

use crate::error::{Error, Result};
use crate::face::{Face, FaceSet};
use crate::pieces::{Piece, PieceId, PieceKind};

/// All pieces of one kind, grouped under their current key.
#[derive(Debug, Clone)]
pub struct PieceCollection {
    kind: PieceKind,
    slots: Vec<(FaceSet, Vec<Piece>)>,
    index: FxHashMap<FaceSet, usize>,
}

impl PieceCollection {
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            slots: Vec::new(),
            index: FxHashMap::default(),
        }
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    /// Adds a piece under `key`, creating the slot on first use.
    pub fn insert(&mut self, key: FaceSet, piece: Piece) {
        let slot = *self.index.entry(key).or_insert_with(|| {
            self.slots.push((key, Vec::new()));
            self.slots.len() - 1
        });
        self.slots[slot].1.push(piece);
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of pieces (not keys).
    pub fn len(&self) -> usize {
        self.slots.iter().map(|(_, pieces)| pieces.len()).sum()
    }

    pub fn contains_key(&self, key: FaceSet) -> bool {
        self.index.contains_key(&key)
    }

    pub fn get(&self, key: FaceSet) -> Option<&[Piece]> {
        self.index
            .get(&key)
            .map(|&slot| self.slots[slot].1.as_slice())
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = FaceSet> + '_ {
        self.slots.iter().map(|&(key, _)| key)
    }

    /// Every piece with the key it currently occupies.
    pub fn iter(&self) -> impl Iterator<Item = (FaceSet, &Piece)> {
        self.slots
            .iter()
            .flat_map(|(key, pieces)| pieces.iter().map(move |piece| (*key, piece)))
    }

    pub fn pieces_mut(&mut self) -> impl Iterator<Item = &mut Piece> {
        self.slots.iter_mut().flat_map(|(_, pieces)| pieces.iter_mut())
    }

    /// Pieces whose key contains `face`.
    pub fn layer(&self, face: Face) -> impl Iterator<Item = &Piece> {
        self.slots
            .iter()
            .filter(move |(key, _)| key.contains(face))
            .flat_map(|(_, pieces)| pieces.iter())
    }

    pub fn layer_mut(&mut self, face: Face) -> impl Iterator<Item = &mut Piece> {
        self.slots
            .iter_mut()
            .filter(move |(key, _)| key.contains(face))
            .flat_map(|(_, pieces)| pieces.iter_mut())
    }

    /// Keys of the layer of `face`.
    pub fn layer_keys(&self, face: Face) -> Vec<FaceSet> {
        self.keys().filter(|key| key.contains(face)).collect()
    }

    /// Key currently holding the piece with `id`.
    pub fn key_of(&self, id: PieceId) -> Option<FaceSet> {
        self.iter()
            .find(|(_, piece)| piece.id() == id)
            .map(|(key, _)| key)
    }

    /// Moves the occupants of `exchange` one position along it, then turns
    /// every piece of the layer of `face` around `cycle`.
    ///
    /// All keys are resolved before anything moves, so an unknown key leaves
    /// the collection untouched.
    pub fn update_sides(
        &mut self,
        exchange: &[FaceSet],
        face: Face,
        cycle: &[Face],
        direction: i32,
    ) -> Result<()> {
        if direction != 1 && direction != -1 {
            return Err(Error::InvalidDirection(direction));
        }
        if self.is_empty() {
            return Ok(());
        }
        let slots = exchange
            .iter()
            .map(|key| {
                self.index
                    .get(key)
                    .copied()
                    .ok_or_else(|| Error::MalformedKey(key.to_string()))
            })
            .collect::<Result<Vec<_>>>()?;

        let mut occupants: Vec<Vec<Piece>> = slots
            .iter()
            .map(|&slot| mem::take(&mut self.slots[slot].1))
            .collect();
        if direction > 0 {
            occupants.rotate_right(1);
        } else {
            occupants.rotate_left(1);
        }
        for (&slot, mut pieces) in slots.iter().zip(occupants) {
            let key = self.slots[slot].0;
            for piece in &mut pieces {
                piece.set_name(key);
            }
            self.slots[slot].1 = pieces;
        }

        self.rotate_layer(face, cycle, direction);
        trace!("{:?} layer {face} shifted by {direction}", self.kind);
        Ok(())
    }

    /// Turns the pieces of the layer of `face` in place: their side tables and
    /// names follow `cycle`, their keys stay.
    pub fn rotate_layer(&mut self, face: Face, cycle: &[Face], direction: i32) {
        for piece in self.layer_mut(face) {
            piece.update_sides(cycle, direction);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Point, Vector};
    use crate::pieces::{Skeleton, Vertex};

    const R_CORNERS: [&str; 4] = ["RFU", "RBU", "RBD", "RFD"];
    const R_CYCLE: [Face; 4] = [Face::U, Face::B, Face::D, Face::F];
    const FACES: [Face; 6] = [Face::R, Face::L, Face::U, Face::D, Face::F, Face::B];

    fn corners() -> PieceCollection {
        let skeleton = Skeleton::from_vertices(vec![Vertex::new(FaceSet::EMPTY, Point::ORIGIN)]);
        let mut collection = PieceCollection::new(PieceKind::Corner);
        let all = ["RFU", "RBU", "RBD", "RFD", "LFU", "LBU", "LBD", "LFD"];
        for (i, letters) in all.iter().enumerate() {
            let key: FaceSet = letters.parse().unwrap();
            let id = PieceId(i as u32);
            let piece = Piece::new(id, PieceKind::Corner, key, &skeleton, Vector::ZERO, &FACES);
            collection.insert(key, piece);
        }
        collection
    }

    fn exchange() -> Vec<FaceSet> {
        R_CORNERS.iter().map(|k| k.parse().unwrap()).collect()
    }

    fn occupant(collection: &PieceCollection, key: &str) -> PieceId {
        collection.get(key.parse().unwrap()).unwrap()[0].id()
    }

    #[test]
    fn test_positive_shift_moves_forward() {
        let mut collection = corners();
        collection.update_sides(&exchange(), Face::R, &R_CYCLE, 1).unwrap();
        assert_eq!(occupant(&collection, "RBU"), PieceId(0));
        assert_eq!(occupant(&collection, "RBD"), PieceId(1));
        assert_eq!(occupant(&collection, "RFD"), PieceId(2));
        assert_eq!(occupant(&collection, "RFU"), PieceId(3));
        assert_eq!(occupant(&collection, "LFU"), PieceId(4));
        assert_eq!(collection.key_of(PieceId(0)), Some("RBU".parse().unwrap()));
    }

    #[test]
    fn test_shift_and_back_restores_everything() {
        let mut collection = corners();
        let before: Vec<(FaceSet, PieceId, Vec<Face>)> = collection
            .iter()
            .map(|(key, piece)| (key, piece.id(), piece.name().to_vec()))
            .collect();

        collection.update_sides(&exchange(), Face::R, &R_CYCLE, 1).unwrap();
        collection.update_sides(&exchange(), Face::R, &R_CYCLE, -1).unwrap();

        let after: Vec<(FaceSet, PieceId, Vec<Face>)> = collection
            .iter()
            .map(|(key, piece)| (key, piece.id(), piece.name().to_vec()))
            .collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_names_match_keys_after_turns() {
        let mut collection = corners();
        for _ in 0..3 {
            collection.update_sides(&exchange(), Face::R, &R_CYCLE, 1).unwrap();
            for (key, piece) in collection.iter() {
                let name: FaceSet = piece.name().iter().copied().collect();
                assert_eq!(name, key);
                assert_eq!(piece.name().len(), piece.name_for_color().len());
            }
        }
    }

    #[test]
    fn test_unknown_key_leaves_collection_untouched() {
        let mut collection = corners();
        let mut bad = exchange();
        bad[2] = "RB".parse().unwrap();
        let err = collection.update_sides(&bad, Face::R, &R_CYCLE, 1).unwrap_err();
        assert_eq!(err, Error::MalformedKey("RB".into()));
        assert_eq!(occupant(&collection, "RFU"), PieceId(0));
        assert_eq!(collection.len(), 8);
    }

    #[test]
    fn test_invalid_direction_is_rejected() {
        let mut collection = corners();
        assert_eq!(
            collection.update_sides(&exchange(), Face::R, &R_CYCLE, 0),
            Err(Error::InvalidDirection(0))
        );
        assert_eq!(
            collection.update_sides(&exchange(), Face::R, &R_CYCLE, 2),
            Err(Error::InvalidDirection(2))
        );
    }

    #[test]
    fn test_empty_collection_is_a_noop() {
        let mut ribs = PieceCollection::new(PieceKind::Rib);
        let exchange: Vec<FaceSet> = ["RU", "RB", "RD", "RF"]
            .iter()
            .map(|k| k.parse().unwrap())
            .collect();
        assert_eq!(ribs.update_sides(&exchange, Face::R, &R_CYCLE, 1), Ok(()));
        assert!(ribs.is_empty());
    }

    #[test]
    fn test_layer_keys() {
        let collection = corners();
        let mut keys: Vec<String> = collection
            .layer_keys(Face::R)
            .iter()
            .map(ToString::to_string)
            .collect();
        keys.sort();
        assert_eq!(keys, ["RBD", "RBU", "RFD", "RFU"]);
        assert_eq!(collection.layer(Face::L).count(), 4);
    }
}
