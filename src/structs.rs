use crate::stage::Stage;

/// Quarter turns applied to a card, clockwise from its loaded orientation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Rotation {
    #[default]
    Top = 0,
    Right = 1,
    Bottom = 2,
    Left = 3,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [
        Rotation::Top,
        Rotation::Right,
        Rotation::Bottom,
        Rotation::Left,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone)]
pub struct SolverResult {
    pub best: Stage,
    pub score: f64,
    pub node_count: u64,
    pub exhausted: bool,
}
