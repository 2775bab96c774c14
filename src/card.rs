use crate::geometry::Pattern;
use crate::structs::Rotation;

/// A polyomino shape with its four rotations computed up front.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub number: u32,
    pub name: String,
    patterns: [Pattern; 4],
    pub ink_cost: u32,
    pub special_cost: u32,
}

impl Card {
    /// The base pattern is normalized so its bounding box starts at the origin.
    pub fn new(
        number: u32,
        name: impl Into<String>,
        pattern: &Pattern,
        ink_cost: u32,
        special_cost: u32,
    ) -> Self {
        let top = pattern.normalized();
        let right = top.rotate_90();
        let bottom = right.rotate_90();
        let left = bottom.rotate_90();

        Card {
            number,
            name: name.into(),
            patterns: [top, right, bottom, left],
            ink_cost,
            special_cost,
        }
    }

    pub fn pattern(&self, rotation: Rotation) -> &Pattern {
        &self.patterns[rotation.index()]
    }

    pub fn base_pattern(&self) -> &Pattern {
        &self.patterns[0]
    }

    pub fn cell_count(&self) -> usize {
        self.patterns[0].len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Cell, Point};

    #[test]
    fn test_rotations_are_cached_and_normalized() {
        let base: Pattern = [
            Cell::normal(5, 5),
            Cell::normal(6, 5),
            Cell::normal(7, 5),
            Cell::special(7, 6),
        ]
        .into_iter()
        .collect();
        let card = Card::new(3, "Kojake", &base, 4, 1);

        assert_eq!(card.cell_count(), 4);
        for rotation in Rotation::ALL {
            let bb = card.pattern(rotation).bounding_box().unwrap();
            assert_eq!(bb.min, Point::ORIGIN);
            assert_eq!(card.pattern(rotation).len(), 4);
        }

        let right = card.pattern(Rotation::Right);
        let bb = right.bounding_box().unwrap();
        assert_eq!((bb.width(), bb.height()), (2, 3));
        assert_eq!(card.base_pattern().rotate_90(), *right);
        assert_eq!(card.pattern(Rotation::Left).rotate_90(), *card.base_pattern());
    }
}
