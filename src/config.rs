use crate::error::ConfigError;
use crate::evaluator::EvaluatorKind;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Candidate placements kept per search level.
pub const BEAM_WIDTH: usize = 2;
pub const MAX_NODE_COUNT: u64 = 50_000_000;
/// Weights for occupied neighbors at Manhattan distance 1, 2 and 3.
pub const DENSITY_WEIGHTS: [u32; 3] = [10, 5, 3];
/// Extra rows and columns a flexible stage offers around its occupied extent.
pub const FLEXIBLE_MARGIN: i32 = 8;
pub const DEFAULT_SPECIAL_COST: u32 = 1;
pub const DEFAULT_COMBO_SIZE: usize = 3;

pub const CARD_NAME: &str = "Kojake";
pub const STAGE_NAME: &str = "StraightStreet";

#[derive(Debug, Clone)]
pub struct SolverConfig {
    pub stage_path: Option<PathBuf>,
    pub cards_dir: PathBuf,
    pub combo_size: usize,
    pub evaluator: EvaluatorKind,
    pub max_nodes: u64,
    pub time_limit: Option<Duration>,
    pub cores: usize,
    pub save: bool,
}

impl SolverConfig {
    /// Reads overrides from `STAGE`, `CARDS`, `COMBO`, `EVAL`, `MAX_NODES`,
    /// `TIME_LIMIT_SECS`, `CORES` and `SAVE`. Without `STAGE` the search
    /// runs on a flexible board.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(SolverConfig {
            stage_path: env::var("STAGE").ok().map(PathBuf::from),
            cards_dir: env::var("CARDS")
                .map(PathBuf::from)
                .map_err(|_| ConfigError::Missing { name: "CARDS" })?,
            combo_size: parse_var("COMBO")?.unwrap_or(DEFAULT_COMBO_SIZE),
            evaluator: parse_var("EVAL")?.unwrap_or(EvaluatorKind::Fill),
            max_nodes: parse_var("MAX_NODES")?.unwrap_or(MAX_NODE_COUNT),
            time_limit: parse_var::<u64>("TIME_LIMIT_SECS")?.map(Duration::from_secs),
            cores: parse_var("CORES")?.unwrap_or_else(num_cpus::get),
            save: parse_var("SAVE")?.unwrap_or(false),
        })
    }
}

fn parse_var<T>(name: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(value) => match value.trim().parse::<T>() {
            Ok(parsed) => Ok(Some(parsed)),
            Err(e) => Err(ConfigError::Invalid {
                name,
                reason: e.to_string(),
                value,
            }),
        },
        Err(_) => Ok(None),
    }
}
