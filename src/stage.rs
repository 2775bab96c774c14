use crate::config::FLEXIBLE_MARGIN;
use crate::error::PlacementError;
use crate::geometry::{Pattern, Point, MOORE_OFFSETS};
use crate::placement::Placement;

/// Board state. Transitions return a new `Stage`; a stage is never mutated
/// after construction, so search branches never alias state.
#[derive(Debug, Clone)]
pub struct Stage {
    pub number: u32,
    pub name: String,
    pattern: Pattern,
    init_pattern: Pattern,
    place_hist: Vec<Placement>,
    width: i32,
    height: i32,
    flexible: bool,
}

impl Stage {
    /// A fixed-size board with pre-existing terrain.
    pub fn new(
        number: u32,
        name: impl Into<String>,
        init_pattern: Pattern,
        width: i32,
        height: i32,
    ) -> Self {
        Stage {
            number,
            name: name.into(),
            pattern: init_pattern.clone(),
            init_pattern,
            place_hist: Vec::new(),
            width,
            height,
            flexible: false,
        }
    }

    pub fn empty(width: i32, height: i32) -> Self {
        Stage::new(0, "", Pattern::new(), width, height)
    }

    /// An unbounded board whose extent follows the occupied cells.
    pub fn flexible() -> Self {
        Stage {
            number: 0,
            name: String::new(),
            pattern: Pattern::new(),
            init_pattern: Pattern::new(),
            place_hist: Vec::new(),
            width: 0,
            height: 0,
            flexible: true,
        }
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn initial_pattern(&self) -> &Pattern {
        &self.init_pattern
    }

    pub fn place_hist(&self) -> &[Placement] {
        &self.place_hist
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn is_flexible(&self) -> bool {
        self.flexible
    }

    pub fn occupied_count(&self) -> usize {
        self.pattern.len()
    }

    fn fits(&self, placement: &Placement) -> bool {
        if self.flexible {
            return true;
        }
        let (w, h) = placement.extent();
        placement.point.x >= 0
            && placement.point.y >= 0
            && placement.point.x + w <= self.width
            && placement.point.y + h <= self.height
    }

    /// Bounds (fixed mode only) and overlap check.
    pub fn can_be_put(&self, placement: &Placement) -> bool {
        self.fits(placement) && !placement.get_pattern().intersects(&self.pattern)
    }

    /// True iff the placement touches an occupied cell, edge or corner.
    ///
    /// An empty board has nothing to touch, so every placement passes.
    pub fn neighbor_pattern(&self, placement: &Placement) -> bool {
        if self.pattern.is_empty() {
            return true;
        }
        // p lies in the Moore expansion of the board iff p or one of its 8
        // neighbors is occupied.
        placement.get_pattern().points().any(|p| {
            self.pattern.has(p) || MOORE_OFFSETS.iter().any(|&o| self.pattern.has(p + o))
        })
    }

    /// Unoccupied points inside the bounds, row-major.
    ///
    /// A flexible stage grows its bounds by `FLEXIBLE_MARGIN` on every side
    /// so cards can attach on the left and top as well. An empty flexible
    /// stage offers just the origin.
    pub fn get_points(&self) -> impl Iterator<Item = Point> + Clone + '_ {
        let (min, max) = if !self.flexible {
            (Point::ORIGIN, Point::new(self.width, self.height))
        } else if self.pattern.is_empty() {
            (Point::ORIGIN, Point::new(1, 1))
        } else {
            (
                Point::new(-FLEXIBLE_MARGIN, -FLEXIBLE_MARGIN),
                Point::new(self.width + FLEXIBLE_MARGIN, self.height + FLEXIBLE_MARGIN),
            )
        };
        (min.y..max.y)
            .flat_map(move |y| (min.x..max.x).map(move |x| Point::new(x, y)))
            .filter(move |p| !self.pattern.has(*p))
    }

    /// Places a card and returns the resulting stage.
    ///
    /// The caller must have checked `can_be_put`; an overlapping placement
    /// silently merges into the occupied cells. Use `try_put_card` for a
    /// checked transition.
    pub fn put_card(&self, placement: &Placement) -> Stage {
        debug_assert!(
            !placement.get_pattern().intersects(&self.pattern),
            "put_card on overlapping placement {placement:?}"
        );
        let mut next = self.clone();
        next.pattern.extend_from(&placement.get_pattern());
        next.place_hist.push(placement.clone());
        if next.flexible {
            next.recenter();
        }
        next
    }

    pub fn try_put_card(&self, placement: &Placement) -> Result<Stage, PlacementError> {
        if !self.fits(placement) {
            return Err(PlacementError::OutOfBounds {
                card: placement.card.number,
                width: self.width,
                height: self.height,
            });
        }
        let overlap = placement.get_pattern().intersect(&self.pattern).len();
        if overlap > 0 {
            return Err(PlacementError::Overlap {
                card: placement.card.number,
                cells: overlap,
            });
        }
        Ok(self.put_card(placement))
    }

    // Moves everything so the occupied minimum is the origin and resizes the
    // bounds to the occupied extent.
    fn recenter(&mut self) {
        let Some(bb) = self.pattern.bounding_box() else {
            self.width = 0;
            self.height = 0;
            return;
        };
        let offset = Point::ORIGIN - bb.min;
        if offset != Point::ORIGIN {
            self.pattern = self.pattern.translate(offset);
            self.init_pattern = self.init_pattern.translate(offset);
            self.place_hist = self.place_hist.iter().map(|p| p.shifted(offset)).collect();
        }
        self.width = bb.width();
        self.height = bb.height();
    }
}
