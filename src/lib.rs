//! Beam search for high-scoring placements of rotatable polyomino cards on a
//! board. Every card must touch what is already on the board and may not
//! overlap it.

pub mod card;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod geometry;
pub mod loader;
pub mod placement;
pub mod render;
pub mod solver;
pub mod stage;
pub mod structs;
pub mod util;

pub use card::Card;
pub use error::{ConfigError, LoadError, PlacementError};
pub use evaluator::{Evaluator, EvaluatorKind, FillEval, SpaceEval};
pub use geometry::{Cell, Pattern, Point};
pub use placement::Placement;
pub use solver::{SearchBudget, Solver};
pub use stage::Stage;
pub use structs::{Rotation, SolverResult};
