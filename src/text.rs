//! Plain-text sticker state.
//!
//! One line per face, in catalog order:
//!
//! ```text
//! R: R=R RB=R RBD=R RBU=R RD=R RF=R RFD=R RFU=R RU=R
//! ```
//!
//! Every key containing the face is listed with the colour letter of each
//! sticker facing that face. Keys holding several pieces (inner ribs, center
//! tiles) print one letter per piece in slot order.

use std::fmt::{self, Write};

use crate::face::{Face, FaceSet};
use crate::model::Model;

/// Colour letters facing `face` at `key`, one per piece.
fn colors_at(model: &Model, key: FaceSet, face: Face) -> String {
    model
        .collections()
        .into_iter()
        .filter_map(|collection| collection.get(key))
        .flatten()
        .filter_map(|piece| piece.color_facing(face))
        .map(Face::letter)
        .collect()
}

/// Formats the sticker state of `model`.
pub struct StickerText<'a>(pub &'a Model);

impl fmt::Display for StickerText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let model = self.0;
        for (i, &face) in model.catalog().faces().iter().enumerate() {
            if i > 0 {
                f.write_char('\n')?;
            }
            let mut keys: Vec<(String, FaceSet)> = model
                .collections()
                .into_iter()
                .flat_map(|collection| collection.keys())
                .filter(|key| key.contains(face))
                .map(|key| (key.to_string(), key))
                .collect();
            keys.sort_by(|a, b| a.0.cmp(&b.0));
            write!(f, "{face}:")?;
            for (label, key) in keys {
                write!(f, " {label}={}", colors_at(model, key, face))?;
            }
        }
        Ok(())
    }
}

pub fn sticker_text(model: &Model) -> String {
    StickerText(model).to_string()
}

/// Whether every sticker shows the colour of the face it lies on.
pub fn is_solved(model: &Model) -> bool {
    model.pieces().all(|(_, piece)| {
        piece
            .name()
            .iter()
            .all(|&face| piece.color_facing(face) == Some(face))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::face::PuzzleFamily;

    #[test]
    fn test_solved_two_by_two() {
        let model = Model::new(PuzzleFamily::Cube, 2, &EngineConfig::default()).unwrap();
        assert!(is_solved(&model));
        insta::assert_snapshot!(sticker_text(&model), @r"
        R: RBD=R RBU=R RFD=R RFU=R
        L: LBD=L LBU=L LFD=L LFU=L
        U: LBU=U LFU=U RBU=U RFU=U
        D: LBD=D LFD=D RBD=D RFD=D
        F: LFD=F LFU=F RFD=F RFU=F
        B: LBD=B LBU=B RBD=B RBU=B
        ");
    }

    #[test]
    fn test_multi_piece_slots_concatenate() {
        let model = Model::new(PuzzleFamily::Cube, 4, &EngineConfig::default()).unwrap();
        let text = sticker_text(&model);
        let front = text.lines().find(|line| line.starts_with("F:")).unwrap();
        assert!(front.contains(" F=FFFF"));
        assert!(front.contains(" RF=FF"));
    }
}
