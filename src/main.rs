use log::info;
use std::error::Error;
use std::time::Instant;
use thousands::Separable;
use tile_search::config::SolverConfig;
use tile_search::loader::{load_cards, load_stage};
use tile_search::render::{render, save_stage};
use tile_search::solver::{SearchBudget, Solver};
use tile_search::stage::Stage;
use tile_search::util::ordered_selection_count;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let config = SolverConfig::from_env()?;
    let stage = match &config.stage_path {
        Some(path) => load_stage(path)?,
        None => Stage::flexible(),
    };
    let cards = load_cards(&config.cards_dir)?;

    let orderings = ordered_selection_count(cards.len(), config.combo_size)
        .map(|n| n.separate_with_commas())
        .unwrap_or_else(|| "too many".to_string());
    println!(
        "Using {} cores, {} cards, {orderings} orderings of {} with the {} evaluator",
        config.cores,
        cards.len(),
        config.combo_size,
        config.evaluator
    );

    let mut budget = SearchBudget::nodes(config.max_nodes);
    if let Some(limit) = config.time_limit {
        budget = budget.with_time_limit(limit);
    }
    let solver = Solver::new(config.evaluator.build()).with_budget(budget);

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.cores)
        .build()?;
    let stopwatch = Instant::now();
    let result = pool.install(|| solver.search_combo(&stage, config.combo_size, &cards));
    let elapsed = stopwatch.elapsed();

    let rate = (result.node_count as f64 / elapsed.as_secs_f64().max(1e-9)) as u64;
    info!(
        "Searched {} nodes in {:.2} seconds, {} per second",
        result.node_count.separate_with_commas(),
        elapsed.as_secs_f64(),
        rate.separate_with_commas()
    );
    if result.exhausted {
        println!("Search budget exhausted; showing the best board found so far");
    }

    print!("{}", render(&result.best, true));
    println!(
        "Score {} with {} card(s) placed",
        result.score,
        result.best.place_hist().len()
    );
    for placement in result.best.place_hist() {
        println!("{placement:?}");
    }

    if config.save {
        save_stage(&result.best, result.score);
    }
    Ok(())
}
