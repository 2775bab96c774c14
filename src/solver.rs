use crate::card::Card;
use crate::config::{BEAM_WIDTH, MAX_NODE_COUNT};
use crate::evaluator::Evaluator;
use crate::placement::Placement;
use crate::stage::Stage;
use crate::structs::{Rotation, SolverResult};
use crate::util::ordered_selections;
use log::{debug, trace, warn};
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Limits for one `search` or `search_combo` run. The time limit starts
/// counting when the run begins.
#[derive(Debug, Clone, Copy)]
pub struct SearchBudget {
    pub max_nodes: u64,
    pub time_limit: Option<Duration>,
}

impl SearchBudget {
    pub fn nodes(max_nodes: u64) -> Self {
        SearchBudget {
            max_nodes,
            time_limit: None,
        }
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }
}

impl Default for SearchBudget {
    fn default() -> Self {
        SearchBudget::nodes(MAX_NODE_COUNT)
    }
}

#[derive(Clone)]
struct Candidate {
    score: f64,
    card_index: usize,
    placement: Placement,
}

/// Beam-limited recursive placement search.
///
/// Node count and exhaustion are reset when `search` or `search_combo` is
/// entered, so one budget covers one whole run.
pub struct Solver {
    evaluator: Box<dyn Evaluator>,
    beam_width: usize,
    budget: SearchBudget,
    node_count: AtomicU64,
    exhausted: AtomicBool,
}

impl Solver {
    pub fn new(evaluator: Box<dyn Evaluator>) -> Self {
        Solver {
            evaluator,
            beam_width: BEAM_WIDTH,
            budget: SearchBudget::default(),
            node_count: AtomicU64::new(0),
            exhausted: AtomicBool::new(false),
        }
    }

    pub fn with_budget(mut self, budget: SearchBudget) -> Self {
        self.budget = budget;
        self
    }

    pub fn with_beam_width(mut self, beam_width: usize) -> Self {
        self.beam_width = beam_width.max(1);
        self
    }

    pub fn evaluator(&self) -> &dyn Evaluator {
        self.evaluator.as_ref()
    }

    pub fn node_count(&self) -> u64 {
        self.node_count.load(Ordering::Relaxed)
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted.load(Ordering::Relaxed)
    }

    // Resets the counters and returns the run's deadline.
    fn start_run(&self) -> Option<Instant> {
        self.node_count.store(0, Ordering::Relaxed);
        self.exhausted.store(false, Ordering::Relaxed);
        self.budget.time_limit.map(|limit| Instant::now() + limit)
    }

    // Counts one node. Returns false once the budget is spent.
    fn tick(&self, deadline: Option<Instant>) -> bool {
        if self.is_exhausted() {
            return false;
        }
        let nodes = self.node_count.fetch_add(1, Ordering::Relaxed) + 1;
        let out_of_time = deadline.is_some_and(|d| Instant::now() >= d);
        if nodes > self.budget.max_nodes || out_of_time {
            if !self.exhausted.swap(true, Ordering::Relaxed) {
                warn!(
                    "Search budget exhausted after {nodes} nodes (limit {}, out of time: {out_of_time})",
                    self.budget.max_nodes
                );
            }
            return false;
        }
        true
    }

    /// Best stage reachable from `stage` by placing some of `cards`, each at
    /// most once. Returns `stage` itself when no card can be placed.
    pub fn search(&self, stage: &Stage, cards: &[Arc<Card>]) -> Stage {
        let deadline = self.start_run();
        self.search_from(stage, cards, deadline)
    }

    fn search_from(&self, stage: &Stage, cards: &[Arc<Card>], deadline: Option<Instant>) -> Stage {
        if cards.is_empty() || !self.tick(deadline) {
            return stage.clone();
        }

        let mut cards = cards.to_vec();
        cards.sort_by_key(|c| c.ink_cost);

        let max_eval = self.evaluator.max_eval(stage, &cards);
        let beam = self.select_beam(stage, &cards);
        trace!(
            "depth {}: {} card(s) left, beam {:?}",
            stage.place_hist().len(),
            cards.len(),
            beam.iter()
                .map(|c| (c.score, &c.placement))
                .collect::<Vec<_>>()
        );

        let mut best: Option<(f64, Stage)> = None;
        for candidate in beam {
            let child = stage.put_card(&candidate.placement);
            let mut remaining = cards.clone();
            remaining.remove(candidate.card_index);

            let result = self.search_from(&child, &remaining, deadline);
            let score = self.evaluator.eval(&result);

            if self.evaluator.admissible() && score == max_eval {
                return result;
            }
            if best.as_ref().map_or(true, |(s, _)| score > *s) {
                best = Some((score, result));
            }
        }

        best.map(|(_, s)| s).unwrap_or_else(|| stage.clone())
    }

    // Top `beam_width` legal placements over every card, rotation and free
    // point. A newcomer only displaces a strictly lower score, and the
    // displaced entry is the first minimum found.
    fn select_beam(&self, stage: &Stage, cards: &[Arc<Card>]) -> Vec<Candidate> {
        let mut beam: Vec<Candidate> = Vec::with_capacity(self.beam_width);

        for (card_index, card) in cards.iter().enumerate() {
            for rotation in Rotation::ALL {
                for point in stage.get_points() {
                    let placement = Placement::new(Arc::clone(card), point, rotation);
                    if !stage.can_be_put(&placement) || !stage.neighbor_pattern(&placement) {
                        continue;
                    }
                    let score = self.evaluator.eval_put(stage, &placement);
                    let candidate = Candidate {
                        score,
                        card_index,
                        placement,
                    };

                    if beam.len() < self.beam_width {
                        beam.push(candidate);
                        continue;
                    }
                    let mut min_index = 0;
                    for (i, c) in beam.iter().enumerate().skip(1) {
                        if c.score < beam[min_index].score {
                            min_index = i;
                        }
                    }
                    if score > beam[min_index].score {
                        beam[min_index] = candidate;
                    }
                }
            }
        }

        // Best first, stable so equal scores keep discovery order.
        beam.sort_by(|a, b| b.score.total_cmp(&a.score));
        beam
    }

    /// Runs `search` for every ordering of every size-`n` subset of `cards`
    /// and keeps the best result. Orderings run in parallel on the current
    /// rayon pool; ties go to the ordering enumerated first.
    pub fn search_combo(&self, stage: &Stage, n: usize, cards: &[Arc<Card>]) -> SolverResult {
        let deadline = self.start_run();
        let best = ordered_selections(cards.len(), n)
            .enumerate()
            .par_bridge()
            .filter_map(|(index, order)| {
                if self.is_exhausted() {
                    return None;
                }
                let picked: Vec<Arc<Card>> = order.iter().map(|&i| Arc::clone(&cards[i])).collect();
                let result = self.search_from(stage, &picked, deadline);
                let score = self.evaluator.eval(&result);
                debug!(
                    "order #{index} {:?}: score {score}",
                    picked.iter().map(|c| c.number).collect::<Vec<_>>()
                );
                Some((index, score, result))
            })
            .reduce_with(|a, b| {
                let b_wins = b.1 > a.1 || (b.1 == a.1 && b.0 < a.0);
                if b_wins {
                    b
                } else {
                    a
                }
            });

        let (score, best) = match best {
            Some((_, score, stage)) => (score, stage),
            None => (self.evaluator.eval(stage), stage.clone()),
        };

        SolverResult {
            best,
            score,
            node_count: self.node_count(),
            exhausted: self.is_exhausted(),
        }
    }
}
