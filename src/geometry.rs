use std::borrow::Borrow;
use std::collections::HashSet;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Sub};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }

    pub fn manhattan(self) -> i32 {
        self.x.abs() + self.y.abs()
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// The 8 offsets around a cell.
pub const MOORE_OFFSETS: [Point; 8] = [
    Point::new(-1, -1),
    Point::new(0, -1),
    Point::new(1, -1),
    Point::new(-1, 0),
    Point::new(1, 0),
    Point::new(-1, 1),
    Point::new(0, 1),
    Point::new(1, 1),
];

/// A grid position plus the "special" marker.
///
/// Equality and hashing only look at the position, so a pattern can never
/// hold two cells at the same place regardless of their flags.
#[derive(Debug, Clone, Copy)]
pub struct Cell {
    pub point: Point,
    pub special: bool,
}

impl Cell {
    pub const fn new(point: Point, special: bool) -> Self {
        Cell { point, special }
    }

    pub const fn normal(x: i32, y: i32) -> Self {
        Cell::new(Point::new(x, y), false)
    }

    pub const fn special(x: i32, y: i32) -> Self {
        Cell::new(Point::new(x, y), true)
    }
}

impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        self.point == other.point
    }
}

impl Eq for Cell {}

impl Hash for Cell {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.point.hash(state);
    }
}

// Hash and Eq of Cell agree with those of Point, so sets of cells can be
// probed by position.
impl Borrow<Point> for Cell {
    fn borrow(&self) -> &Point {
        &self.point
    }
}

/// Inclusive bounding box of a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub min: Point,
    pub max: Point,
}

impl BoundingBox {
    pub fn width(&self) -> i32 {
        self.max.x - self.min.x + 1
    }

    pub fn height(&self) -> i32 {
        self.max.y - self.min.y + 1
    }
}

/// A position-unique set of cells.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Pattern {
    cells: HashSet<Cell>,
}

impl Pattern {
    pub fn new() -> Self {
        Pattern::default()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Adds a cell. A cell already present at the same position is kept.
    pub fn add(&mut self, cell: Cell) -> bool {
        self.cells.insert(cell)
    }

    pub fn has(&self, point: Point) -> bool {
        self.cells.contains(&point)
    }

    pub fn get(&self, point: Point) -> Option<&Cell> {
        self.cells.get(&point)
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.cells.iter()
    }

    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.cells.iter().map(|c| c.point)
    }

    /// Cells sorted row-major, for stable output.
    pub fn sorted_cells(&self) -> Vec<Cell> {
        let mut cells: Vec<Cell> = self.cells.iter().copied().collect();
        cells.sort_by_key(|c| (c.point.y, c.point.x));
        cells
    }

    pub fn translate(&self, offset: Point) -> Pattern {
        self.cells
            .iter()
            .map(|c| Cell::new(c.point + offset, c.special))
            .collect()
    }

    /// Rotates by 90° with `(x, y) -> (y, -x)` and shifts so the smallest y is 0.
    pub fn rotate_90(&self) -> Pattern {
        let rotated: Vec<Cell> = self
            .cells
            .iter()
            .map(|c| Cell::new(Point::new(c.point.y, -c.point.x), c.special))
            .collect();
        let min_y = rotated.iter().map(|c| c.point.y).min().unwrap_or(0);
        rotated
            .into_iter()
            .map(|c| Cell::new(Point::new(c.point.x, c.point.y - min_y), c.special))
            .collect()
    }

    /// Shifts the pattern so its bounding box starts at the origin.
    pub fn normalized(&self) -> Pattern {
        match self.bounding_box() {
            Some(bb) => self.translate(Point::ORIGIN - bb.min),
            None => Pattern::new(),
        }
    }

    /// Cells of `self` whose position is also occupied in `other`.
    pub fn intersect(&self, other: &Pattern) -> Pattern {
        self.cells
            .iter()
            .filter(|c| other.cells.contains(&c.point))
            .copied()
            .collect()
    }

    pub fn intersects(&self, other: &Pattern) -> bool {
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        small.cells.iter().any(|c| large.cells.contains(&c.point))
    }

    /// Union; on a shared position the cell from `self` wins.
    pub fn union(&self, other: &Pattern) -> Pattern {
        let mut out = self.clone();
        out.extend_from(other);
        out
    }

    pub fn extend_from(&mut self, other: &Pattern) {
        self.cells.extend(other.cells.iter().copied());
    }

    pub fn bounding_box(&self) -> Option<BoundingBox> {
        let mut iter = self.cells.iter();
        let first = iter.next()?.point;
        let (min, max) = iter.fold((first, first), |(min, max), c| {
            (
                Point::new(min.x.min(c.point.x), min.y.min(c.point.y)),
                Point::new(max.x.max(c.point.x), max.y.max(c.point.y)),
            )
        });
        Some(BoundingBox { min, max })
    }

    /// Cells inside the half-open rectangle `[origin, origin + (width, height))`.
    pub fn select(&self, origin: Point, width: i32, height: i32) -> Pattern {
        self.cells
            .iter()
            .filter(|c| {
                c.point.x >= origin.x
                    && c.point.y >= origin.y
                    && c.point.x < origin.x + width
                    && c.point.y < origin.y + height
            })
            .copied()
            .collect()
    }

    /// Every cell plus its Moore neighborhood. Neighbors are never special.
    pub fn moore_expand(&self) -> Pattern {
        let mut out = self.clone();
        for cell in &self.cells {
            for offset in MOORE_OFFSETS {
                out.add(Cell::new(cell.point + offset, false));
            }
        }
        out
    }
}

impl FromIterator<Cell> for Pattern {
    fn from_iter<T: IntoIterator<Item = Cell>>(iter: T) -> Self {
        Pattern {
            cells: iter.into_iter().collect(),
        }
    }
}

impl Extend<Cell> for Pattern {
    fn extend<T: IntoIterator<Item = Cell>>(&mut self, iter: T) {
        for cell in iter {
            self.cells.insert(cell);
        }
    }
}
