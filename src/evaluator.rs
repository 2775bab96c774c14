use crate::card::Card;
use crate::config::DENSITY_WEIGHTS;
use crate::geometry::{Point, MOORE_OFFSETS};
use crate::placement::Placement;
use crate::stage::Stage;
use once_cell::sync::Lazy;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Scoring strategy used by the solver.
pub trait Evaluator: Send + Sync {
    /// Upper bound on `eval` for any stage reachable by placing some of `cards`.
    fn max_eval(&self, stage: &Stage, cards: &[Arc<Card>]) -> f64;

    fn eval(&self, stage: &Stage) -> f64;

    /// Score of `stage` with `placement` added, without building the stage.
    fn eval_put(&self, stage: &Stage, placement: &Placement) -> f64;

    /// Whether reaching `max_eval` proves a branch optimal.
    fn admissible(&self) -> bool {
        true
    }
}

fn cell_bound(stage: &Stage, cards: &[Arc<Card>]) -> f64 {
    (stage.occupied_count() + cards.iter().map(|c| c.cell_count()).sum::<usize>()) as f64
}

/// More covered cells is better.
#[derive(Debug, Default, Clone, Copy)]
pub struct FillEval;

impl Evaluator for FillEval {
    fn max_eval(&self, stage: &Stage, cards: &[Arc<Card>]) -> f64 {
        cell_bound(stage, cards)
    }

    fn eval(&self, stage: &Stage) -> f64 {
        stage.occupied_count() as f64
    }

    fn eval_put(&self, stage: &Stage, placement: &Placement) -> f64 {
        (stage.occupied_count() + placement.cell_count()) as f64
    }
}

// Offsets within Manhattan distance 3 with their weights.
static DENSITY_KERNEL: Lazy<Vec<(Point, u32)>> = Lazy::new(|| {
    let radius = DENSITY_WEIGHTS.len() as i32;
    let mut kernel = Vec::new();
    for y in -radius..=radius {
        for x in -radius..=radius {
            let offset = Point::new(x, y);
            let distance = offset.manhattan();
            if (1..=radius).contains(&distance) {
                kernel.push((offset, DENSITY_WEIGHTS[distance as usize - 1]));
            }
        }
    }
    kernel
});

/// Denser, more clustered boards are better.
#[derive(Debug, Default, Clone, Copy)]
pub struct SpaceEval;

impl SpaceEval {
    pub fn density_at(&self, stage: &Stage, point: Point) -> u32 {
        DENSITY_KERNEL
            .iter()
            .filter(|(offset, _)| stage.pattern().has(point + *offset))
            .map(|(_, weight)| weight)
            .sum()
    }
}

impl Evaluator for SpaceEval {
    fn max_eval(&self, stage: &Stage, cards: &[Arc<Card>]) -> f64 {
        cell_bound(stage, cards)
    }

    /// Occupied cells per free cell around the neighbor ring.
    fn eval(&self, stage: &Stage) -> f64 {
        let pattern = stage.pattern();
        if pattern.is_empty() {
            return 0.0;
        }
        let expanded = pattern.moore_expand();
        let free_around_ring: usize = expanded
            .points()
            .filter(|p| !pattern.has(*p))
            .map(|ring| {
                std::iter::once(Point::ORIGIN)
                    .chain(MOORE_OFFSETS)
                    .filter(|&o| !pattern.has(ring + o))
                    .count()
            })
            .sum();
        if free_around_ring == 0 {
            return 0.0;
        }
        pattern.len() as f64 / free_around_ring as f64
    }

    fn eval_put(&self, stage: &Stage, placement: &Placement) -> f64 {
        placement
            .get_pattern()
            .points()
            .map(|p| self.density_at(stage, p))
            .sum::<u32>() as f64
    }

    fn admissible(&self) -> bool {
        false
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum EvaluatorKind {
    #[default]
    Fill,
    Space,
}

impl EvaluatorKind {
    pub fn build(self) -> Box<dyn Evaluator> {
        match self {
            EvaluatorKind::Fill => Box::new(FillEval),
            EvaluatorKind::Space => Box::new(SpaceEval),
        }
    }
}

impl FromStr for EvaluatorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fill" => Ok(EvaluatorKind::Fill),
            "space" => Ok(EvaluatorKind::Space),
            other => Err(format!("unknown evaluator {other:?}, expected fill or space")),
        }
    }
}

impl fmt::Display for EvaluatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvaluatorKind::Fill => write!(f, "fill"),
            EvaluatorKind::Space => write!(f, "space"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Cell, Pattern};
    use crate::structs::Rotation;

    fn card(number: u32, size: i32) -> Arc<Card> {
        let pattern: Pattern = (0..size).map(|x| Cell::normal(x, 0)).collect();
        Arc::new(Card::new(number, "Kojake", &pattern, size as u32, 1))
    }

    fn stage_with(cells: &[(i32, i32)]) -> Stage {
        let terrain: Pattern = cells.iter().map(|&(x, y)| Cell::normal(x, y)).collect();
        Stage::new(1, "StraightStreet", terrain, 10, 10)
    }

    #[test]
    fn test_fill_max_eval() {
        let stage = stage_with(&[(0, 0), (1, 0), (2, 0), (3, 0), (4, 0)]);
        let cards = vec![card(1, 4), card(2, 6)];
        assert_eq!(FillEval.max_eval(&stage, &cards), 15.0);
        assert_eq!(FillEval.eval(&stage), 5.0);
        assert_eq!(FillEval.max_eval(&stage, &[]), 5.0);
    }

    #[test]
    fn test_fill_eval_put_matches_put_card() {
        let stage = stage_with(&[(0, 0)]);
        let placement = Placement::new(card(1, 3), Point::new(1, 1), Rotation::Top);
        let predicted = FillEval.eval_put(&stage, &placement);
        assert_eq!(predicted, 4.0);
        assert_eq!(FillEval.eval(&stage.put_card(&placement)), predicted);
    }

    #[test]
    fn test_density_kernel_shape() {
        assert_eq!(DENSITY_KERNEL.len(), 4 + 8 + 12);
        let total: u32 = DENSITY_KERNEL.iter().map(|(_, w)| w).sum();
        assert_eq!(total, 4 * 10 + 8 * 5 + 12 * 3);
    }

    #[test]
    fn test_space_eval_put() {
        let stage = stage_with(&[(5, 5)]);
        let space = SpaceEval;
        assert_eq!(space.density_at(&stage, Point::new(5, 6)), 10);
        assert_eq!(space.density_at(&stage, Point::new(6, 6)), 5);
        assert_eq!(space.density_at(&stage, Point::new(5, 8)), 3);
        assert_eq!(space.density_at(&stage, Point::new(5, 9)), 0);

        // Cells at (5,6) and (6,6).
        let placement = Placement::new(card(1, 2), Point::new(5, 6), Rotation::Top);
        assert_eq!(space.eval_put(&stage, &placement), 15.0);
        assert!(!space.admissible());
    }

    #[test]
    fn test_space_eval_prefers_compact() {
        let space = SpaceEval;
        assert_eq!(space.eval(&Stage::empty(4, 4)), 0.0);
        let square = stage_with(&[(3, 3), (4, 3), (3, 4), (4, 4)]);
        let line = stage_with(&[(1, 3), (2, 3), (3, 3), (4, 3)]);
        assert!(space.eval(&square) > space.eval(&line));
    }

    #[test]
    fn test_evaluator_kind_parse() {
        assert_eq!("fill".parse::<EvaluatorKind>(), Ok(EvaluatorKind::Fill));
        assert_eq!("Space".parse::<EvaluatorKind>(), Ok(EvaluatorKind::Space));
        assert!("greedy".parse::<EvaluatorKind>().is_err());
    }
}
