use crate::card::Card;
use crate::geometry::{Pattern, Point};
use crate::structs::Rotation;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// A card fixed at an anchor and rotation. Cheap to clone.
#[derive(Clone)]
pub struct Placement {
    pub card: Arc<Card>,
    pub point: Point,
    pub rotation: Rotation,
}

impl Placement {
    pub fn new(card: Arc<Card>, point: Point, rotation: Rotation) -> Self {
        Placement {
            card,
            point,
            rotation,
        }
    }

    /// The rotated card pattern in board coordinates.
    pub fn get_pattern(&self) -> Pattern {
        self.card.pattern(self.rotation).translate(self.point)
    }

    pub fn cell_count(&self) -> usize {
        self.card.cell_count()
    }

    /// Width and height of the rotated card.
    pub fn extent(&self) -> (i32, i32) {
        self.card
            .pattern(self.rotation)
            .bounding_box()
            .map(|bb| (bb.max.x + 1, bb.max.y + 1))
            .unwrap_or((0, 0))
    }

    pub fn shifted(&self, offset: Point) -> Placement {
        Placement::new(Arc::clone(&self.card), self.point + offset, self.rotation)
    }

    fn key(&self) -> (u32, Point, Rotation) {
        (self.card.number, self.point, self.rotation)
    }
}

impl PartialEq for Placement {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Placement {}

impl Hash for Placement {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Debug for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Card: {}, ink_cost={}, x={}, y={}, rotation={:?}>",
            self.card.number, self.card.ink_cost, self.point.x, self.point.y, self.rotation
        )
    }
}
