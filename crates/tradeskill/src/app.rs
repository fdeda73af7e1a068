//! # Application Flow
//!
//! ```text
//! load tables -> RecipeManager -> ItemCache -> Crafter (seeded) -> leveling -> report
//! ```

use std::io::Write;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tradeskill_economy::{
    level_profession, Crafter, ItemCache, ManagerConfig, ProfessionData, RecipeManager,
    ResourceDir,
};

use crate::args::Args;
use crate::error::CliError;

/// Runs a full pricing and leveling pass, writing the report to `out`.
///
/// # Errors
///
/// Any failure loading data, building the recipe set, pricing an item or
/// simulating the run.
pub fn run<W: Write>(args: &Args, out: &mut W) -> Result<(), CliError> {
    let mut res = ResourceDir::new(&args.data_dir);
    let profession: ProfessionData = res.register(&args.profession, None)?;
    let sources = res.price_sources(Some(args.prices.as_path()))?;

    let config = ManagerConfig {
        exclude: args.exclude.clone(),
        include: args.include.clone(),
        specialization: args.spec.clone(),
        enforce_specialization: args.enforce_spec,
    };
    let manager = RecipeManager::new(&profession, config)?;
    let mut cache = ItemCache::new(&manager, &sources);

    writeln!(out, "┌─ {} {} → {} ─────────────────────────────", args.profession, args.start, args.target)?;
    writeln!(out, "│ Recipes usable:     {}", manager.recipes().len())?;
    if let Some(spec) = manager.specialization() {
        let mode = if args.enforce_spec { "enforced" } else { "not enforced" };
        writeln!(out, "│ Specialization:     {spec} ({mode})")?;
    }
    writeln!(out, "│ Seed:               {}", args.seed)?;
    writeln!(out, "└──────────────────────────────────────────────")?;

    tracing::info!("simulating {} with seed {}", args.profession, args.seed);
    let mut crafter = Crafter::new(args.start, args.target, ChaCha8Rng::seed_from_u64(args.seed));
    let report = level_profession(&manager, &mut crafter, args.strategy, args.max_crafts)?;

    writeln!(out)?;
    writeln!(out, "┌─ LEVELING ({} crafts) ───────────────────────", report.crafts)?;
    for (name, count) in &report.recipes {
        let recipe = manager.get(name).map_or_else(|| name.clone(), ToString::to_string);
        writeln!(out, "│ {count:>6} x {recipe}")?;
    }
    writeln!(out, "├─ REAGENTS ───────────────────────────────────")?;
    for (reagent, quantity) in &report.reagents {
        let unit = cache.eval_item(reagent)?;
        writeln!(out, "│ {quantity:>6} x {reagent} @ {}", format_cost(unit))?;
    }
    let total = report.reagent_cost(&mut cache)?;
    writeln!(out, "│ Total:              {}", format_cost(total))?;
    writeln!(out, "└──────────────────────────────────────────────")?;

    let mut appraisals: Vec<&str> = manager.inclusions().keys().map(String::as_str).collect();
    appraisals.extend(args.eval.iter().map(String::as_str));
    if !appraisals.is_empty() {
        writeln!(out)?;
        writeln!(out, "┌─ APPRAISALS ─────────────────────────────────")?;
        for item in appraisals {
            let valuation = cache.appraise(item)?;
            writeln!(out, "│ {item}: {} ({})", format_cost(valuation.cost), valuation.source)?;
        }
        writeln!(out, "└──────────────────────────────────────────────")?;
    }

    let stats = cache.stats();
    tracing::debug!(
        "item cache: {} resolved, {} hits",
        stats.resolutions(),
        stats.hits
    );
    Ok(())
}

/// Renders copper as `12g 34s 56c`.
#[must_use]
pub fn format_cost(copper: u64) -> String {
    let gold = copper / 10_000;
    let silver = copper / 100 % 100;
    let copper = copper % 100;
    match (gold, silver) {
        (0, 0) => format!("{copper}c"),
        (0, _) => format!("{silver}s {copper}c"),
        _ => format!("{gold}g {silver}s {copper}c"),
    }
}
