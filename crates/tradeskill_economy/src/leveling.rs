//! # Leveling Driver
//!
//! Repeats crafts until a crafter reaches its target skill.
//!
//! ```text
//! loop:
//!   candidates = manager.relevant_recipes(level)
//!   recipe     = selector.select(level, candidates)
//!   done       = crafter.craft(recipe)
//! ```
//!
//! The driver follows the selector blindly; it does not search for a cheaper
//! sequence of crafts. The report tallies what was crafted and which
//! reagents were consumed so the run can be priced afterwards.

use rand::Rng;
use std::collections::BTreeMap;

use crate::crafter::Crafter;
use crate::error::{EconomyError, EconomyResult};
use crate::item_cache::ItemCache;
use crate::manager::RecipeManager;
use crate::recipe::Recipe;
use crate::tables::{Cost, Skill};

/// Default craft budget for a single leveling run.
pub const DEFAULT_MAX_CRAFTS: u64 = 100_000;

/// Rule for picking the next recipe among the relevant ones.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Selector {
    /// First relevant recipe in name order.
    FirstRelevant,
    /// Recipe with the highest skill-up chance, ties broken by name.
    #[default]
    HighestChance,
}

impl Selector {
    /// Picks a recipe to craft at `skill`.
    ///
    /// `candidates` are expected in name order, as returned by
    /// [`RecipeManager::relevant_recipes`].
    #[must_use]
    pub fn select<'r>(self, skill: Skill, candidates: &[&'r Recipe]) -> Option<&'r Recipe> {
        match self {
            Self::FirstRelevant => candidates.first().copied(),
            Self::HighestChance => {
                let mut best: Option<(&Recipe, f64)> = None;
                for &recipe in candidates {
                    let Ok(chance) = recipe.skill_chance(skill) else {
                        continue;
                    };
                    if best.map_or(true, |(_, top)| chance > top) {
                        best = Some((recipe, chance));
                    }
                }
                best.map(|(recipe, _)| recipe)
            }
        }
    }
}

/// Outcome of a leveling run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LevelingReport {
    /// Skill level before the first craft.
    pub start: Skill,
    /// Skill level after the last craft.
    pub end: Skill,
    /// Total number of crafts.
    pub crafts: u64,
    /// Crafts per recipe.
    pub recipes: BTreeMap<String, u64>,
    /// Reagents consumed across all crafts.
    pub reagents: BTreeMap<String, u64>,
}

impl LevelingReport {
    fn record(&mut self, recipe: &Recipe) {
        self.crafts += 1;
        *self.recipes.entry(recipe.name().to_string()).or_insert(0) += 1;
        for (reagent, &quantity) in recipe.reagents() {
            *self.reagents.entry(reagent.clone()).or_insert(0) += u64::from(quantity);
        }
    }

    /// Prices the consumed reagents.
    ///
    /// # Errors
    ///
    /// Any valuation error from the cache, or `ArithmeticOverflow` if the
    /// total does not fit in a `u64`.
    pub fn reagent_cost(&self, cache: &mut ItemCache<'_>) -> EconomyResult<Cost> {
        let mut total: Cost = 0;
        for (reagent, &quantity) in &self.reagents {
            let unit = cache.eval_item(reagent)?;
            total = unit
                .checked_mul(quantity)
                .and_then(|cost| total.checked_add(cost))
                .ok_or_else(|| EconomyError::ArithmeticOverflow(reagent.clone()))?;
        }
        Ok(total)
    }
}

/// Crafts until `crafter` reaches its target.
///
/// # Errors
///
/// - `NoRelevantRecipe` if no usable recipe can grant a skill-up at the
///   current level
/// - `CraftLimitReached` if `max_crafts` crafts were made without reaching
///   the target
pub fn level_profession<R: Rng>(
    manager: &RecipeManager,
    crafter: &mut Crafter<R>,
    selector: Selector,
    max_crafts: u64,
) -> EconomyResult<LevelingReport> {
    let mut report = LevelingReport {
        start: crafter.level(),
        end: crafter.level(),
        ..LevelingReport::default()
    };

    tracing::info!(
        "leveling from {} to {} ({:?})",
        crafter.level(),
        crafter.target(),
        selector
    );

    while !crafter.is_done() {
        if report.crafts >= max_crafts {
            return Err(EconomyError::CraftLimitReached {
                limit: max_crafts,
                skill: crafter.level(),
            });
        }

        let level = crafter.level();
        let candidates = manager.relevant_recipes(level);
        let recipe = selector
            .select(level, &candidates)
            .ok_or(EconomyError::NoRelevantRecipe(level))?;

        let done = crafter.craft(recipe)?;
        report.record(recipe);
        report.end = crafter.level();

        if report.end > level {
            tracing::debug!("skill {} reached with {}", report.end, recipe);
        }
        if done {
            break;
        }
    }

    tracing::info!("reached {} after {} crafts", report.end, report.crafts);
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manager::ManagerConfig;
    use crate::tables::{PriceSources, ProfessionData, RecipeDefinition};
    use rand::rngs::mock::StepRng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn blacksmithing() -> RecipeManager {
        let mut data = ProfessionData::new();
        data.insert(
            "Rough Sharpening Stone".to_string(),
            RecipeDefinition::new([1, 15, 35], 1).with_reagent("Rough Stone", 1),
        );
        data.insert(
            "Copper Chain Belt".to_string(),
            RecipeDefinition::new([35, 75, 95], 1).with_reagent("Copper Bar", 6),
        );
        data.insert(
            "Copper Bracers".to_string(),
            RecipeDefinition::new([1, 20, 40], 1).with_reagent("Copper Bar", 2),
        );
        RecipeManager::new(&data, ManagerConfig::new()).unwrap()
    }

    #[test]
    fn test_highest_chance_prefers_certain_recipe() {
        let manager = blacksmithing();
        // At 20: bracers are yellow (1.0), stone is past yellow.
        let candidates = manager.relevant_recipes(20);
        let pick = Selector::HighestChance.select(20, &candidates).unwrap();
        assert_eq!(pick.name(), "Copper Bracers");

        let first = Selector::FirstRelevant.select(20, &candidates).unwrap();
        assert_eq!(first.name(), "Copper Bracers");

        assert!(Selector::HighestChance.select(20, &[]).is_none());
    }

    #[test]
    fn test_highest_chance_breaks_ties_by_name() {
        let manager = blacksmithing();
        // At 10 both bracers and stone are certain.
        let candidates = manager.relevant_recipes(10);
        let pick = Selector::HighestChance.select(10, &candidates).unwrap();
        assert_eq!(pick.name(), "Copper Bracers");
    }

    #[test]
    fn test_levels_with_certain_rolls() {
        let manager = blacksmithing();
        let mut crafter = Crafter::new(1, 50, StepRng::new(0, 0));

        let report =
            level_profession(&manager, &mut crafter, Selector::HighestChance, DEFAULT_MAX_CRAFTS)
                .unwrap();

        // Low rolls always succeed while the chance is above zero.
        assert_eq!(report.crafts, 49);
        assert_eq!(report.start, 1);
        assert_eq!(report.end, 50);
        assert_eq!(report.recipes.values().sum::<u64>(), 49);
        assert_eq!(crafter.level(), 50);
    }

    #[test]
    fn test_seeded_run_reaches_target() {
        let manager = blacksmithing();
        let mut crafter = Crafter::new(1, 90, ChaCha8Rng::seed_from_u64(37 * 11 * 93));

        let report =
            level_profession(&manager, &mut crafter, Selector::HighestChance, DEFAULT_MAX_CRAFTS)
                .unwrap();

        assert_eq!(report.end, 90);
        assert!(report.crafts >= 89);
        assert_eq!(report.crafts, crafter.crafts());
        assert_eq!(
            report.reagents.get("Copper Bar").copied().unwrap_or(0),
            2 * report.recipes.get("Copper Bracers").copied().unwrap_or(0)
                + 6 * report.recipes.get("Copper Chain Belt").copied().unwrap_or(0)
        );
    }

    #[test]
    fn test_no_relevant_recipe() {
        let manager = blacksmithing();
        let mut crafter = Crafter::new(95, 120, StepRng::new(0, 0));
        assert_eq!(
            level_profession(&manager, &mut crafter, Selector::FirstRelevant, 10),
            Err(EconomyError::NoRelevantRecipe(95))
        );
    }

    #[test]
    fn test_craft_limit() {
        let manager = blacksmithing();
        // High rolls never beat a partial chance.
        let mut crafter = Crafter::new(80, 95, StepRng::new(u64::MAX, 0));
        assert_eq!(
            level_profession(&manager, &mut crafter, Selector::FirstRelevant, 25),
            Err(EconomyError::CraftLimitReached { limit: 25, skill: 80 })
        );
    }

    #[test]
    fn test_already_at_target() {
        let manager = blacksmithing();
        let mut crafter = Crafter::new(50, 50, StepRng::new(0, 0));
        let report =
            level_profession(&manager, &mut crafter, Selector::FirstRelevant, 10).unwrap();
        assert_eq!(report.crafts, 0);
        assert_eq!(report.end, 50);
    }

    #[test]
    fn test_reagent_cost() {
        let manager = blacksmithing();
        let sources = PriceSources::new()
            .with_price("Copper Bar", 40)
            .with_vendor("Rough Stone", 5);
        let mut cache = ItemCache::new(&manager, &sources);

        let mut crafter = Crafter::new(1, 30, StepRng::new(0, 0));
        let report =
            level_profession(&manager, &mut crafter, Selector::FirstRelevant, 100).unwrap();

        // FirstRelevant picks bracers (name order) for every level 1..30.
        assert_eq!(report.recipes["Copper Bracers"], 29);
        assert_eq!(report.reagent_cost(&mut cache).unwrap(), 29 * 2 * 40);
    }
}
