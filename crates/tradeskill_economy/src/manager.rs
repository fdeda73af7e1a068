//! # Recipe Manager
//!
//! Builds the set of usable recipes from raw profession data.
//!
//! ```text
//! ProfessionData --(exclusions)--> filtered --(Recipe::from_definition)--> table
//!                                                 |
//!                  inclusions must name recipes --+
//! ```
//!
//! The specialization filter is opt-in: by default every recipe is usable
//! regardless of the specialization it requires.

use std::collections::{BTreeMap, HashSet};

use crate::error::{EconomyError, EconomyResult};
use crate::recipe::Recipe;
use crate::tables::{ProfessionData, Skill};

/// Options controlling which recipes are usable.
#[derive(Clone, Debug, Default)]
pub struct ManagerConfig {
    /// Recipe names removed from the usable set.
    pub exclude: HashSet<String>,
    /// Recipe names (with quantities) that must be part of the usable set.
    pub include: BTreeMap<String, u32>,
    /// Specialization chosen by the crafter.
    pub specialization: Option<String>,
    /// Drop recipes requiring a specialization other than `specialization`.
    pub enforce_specialization: bool,
}

impl ManagerConfig {
    /// Creates a configuration with no filters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Excludes a recipe.
    #[must_use]
    pub fn exclude(mut self, name: impl Into<String>) -> Self {
        self.exclude.insert(name.into());
        self
    }

    /// Requires a recipe to be usable.
    #[must_use]
    pub fn include(mut self, name: impl Into<String>, quantity: u32) -> Self {
        self.include.insert(name.into(), quantity);
        self
    }

    /// Sets the crafter's specialization.
    #[must_use]
    pub fn specialization(mut self, spec: impl Into<String>) -> Self {
        self.specialization = Some(spec.into());
        self
    }

    /// Turns the specialization filter on or off.
    #[must_use]
    pub const fn enforce_specialization(mut self, enforce: bool) -> Self {
        self.enforce_specialization = enforce;
        self
    }
}

/// Owner of the usable recipe table.
#[derive(Clone, Debug)]
pub struct RecipeManager {
    recipes: BTreeMap<String, Recipe>,
    include: BTreeMap<String, u32>,
    specialization: Option<String>,
}

impl RecipeManager {
    /// Builds the usable recipe table.
    ///
    /// # Errors
    ///
    /// - `InvalidConfig` if a raw definition is malformed
    /// - `UnknownRecipe` if an inclusion names a recipe outside the usable set
    pub fn new(data: &ProfessionData, config: ManagerConfig) -> EconomyResult<Self> {
        let spec = config.specialization.as_deref();
        let mut recipes = BTreeMap::new();

        for (name, definition) in data {
            if config.exclude.contains(name) {
                continue;
            }
            let recipe = Recipe::from_definition(name.clone(), definition)?;
            if config.enforce_specialization
                && recipe.specialization().is_some_and(|required| Some(required) != spec)
            {
                tracing::debug!("skipping {} (specialization mismatch)", recipe);
                continue;
            }
            recipes.insert(name.clone(), recipe);
        }

        if let Some(unknown) = config.include.keys().find(|name| !recipes.contains_key(*name)) {
            return Err(EconomyError::UnknownRecipe(unknown.clone()));
        }

        tracing::info!(
            "recipe manager ready: {} of {} recipes usable",
            recipes.len(),
            data.len()
        );

        Ok(Self {
            recipes,
            include: config.include,
            specialization: config.specialization,
        })
    }

    /// Recipes that can still grant a skill-up at `skill`, in name order.
    #[must_use]
    pub fn relevant_recipes(&self, skill: Skill) -> Vec<&Recipe> {
        self.recipes
            .values()
            .filter(|recipe| recipe.is_relevant(skill))
            .collect()
    }

    /// All usable recipes keyed by name.
    #[inline]
    #[must_use]
    pub fn recipes(&self) -> &BTreeMap<String, Recipe> {
        &self.recipes
    }

    /// Looks up a usable recipe.
    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Recipe> {
        self.recipes.get(name)
    }

    /// Validated inclusions and their requested quantities.
    #[inline]
    #[must_use]
    pub fn inclusions(&self) -> &BTreeMap<String, u32> {
        &self.include
    }

    /// Specialization the manager was built for.
    #[inline]
    #[must_use]
    pub fn specialization(&self) -> Option<&str> {
        self.specialization.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::RecipeDefinition;

    fn engineering() -> ProfessionData {
        let mut data = ProfessionData::new();
        data.insert(
            "Rough Blasting Powder".to_string(),
            RecipeDefinition::new([1, 20, 40], 1).with_reagent("Rough Stone", 1),
        );
        data.insert(
            "Handful of Copper Bolts".to_string(),
            RecipeDefinition::new([30, 45, 60], 1).with_reagent("Copper Bar", 1),
        );
        data.insert(
            "Goblin Rocket Boots".to_string(),
            RecipeDefinition::new([225, 245, 265], 1).with_specialization("Goblin"),
        );
        data.insert(
            "Gnomish Cloaking Device".to_string(),
            RecipeDefinition::new([200, 220, 240], 1).with_specialization("Gnomish"),
        );
        data
    }

    #[test]
    fn test_builds_every_recipe() {
        let manager = RecipeManager::new(&engineering(), ManagerConfig::new()).unwrap();
        assert_eq!(manager.recipes().len(), 4);
        for (name, recipe) in manager.recipes() {
            assert_eq!(name, recipe.name());
        }
    }

    #[test]
    fn test_exclusions() {
        let config = ManagerConfig::new().exclude("Rough Blasting Powder");
        let manager = RecipeManager::new(&engineering(), config).unwrap();
        assert!(manager.get("Rough Blasting Powder").is_none());
        assert_eq!(manager.recipes().len(), 3);
    }

    #[test]
    fn test_unknown_inclusion() {
        let config = ManagerConfig::new().include("Arcanite Dragonling", 1);
        let err = RecipeManager::new(&engineering(), config).unwrap_err();
        assert_eq!(err, EconomyError::UnknownRecipe("Arcanite Dragonling".to_string()));
    }

    #[test]
    fn test_excluded_inclusion_is_unknown() {
        let config = ManagerConfig::new()
            .exclude("Handful of Copper Bolts")
            .include("Handful of Copper Bolts", 2);
        assert!(matches!(
            RecipeManager::new(&engineering(), config),
            Err(EconomyError::UnknownRecipe(_))
        ));
    }

    #[test]
    fn test_inclusions_are_kept() {
        let config = ManagerConfig::new().include("Handful of Copper Bolts", 3);
        let manager = RecipeManager::new(&engineering(), config).unwrap();
        assert_eq!(manager.inclusions()["Handful of Copper Bolts"], 3);
    }

    #[test]
    fn test_relevant_recipes() {
        let manager = RecipeManager::new(&engineering(), ManagerConfig::new()).unwrap();

        let names = |skill| {
            manager
                .relevant_recipes(skill)
                .into_iter()
                .map(Recipe::name)
                .collect::<Vec<_>>()
        };

        assert_eq!(names(1), vec!["Rough Blasting Powder"]);
        assert_eq!(names(35), vec!["Handful of Copper Bolts", "Rough Blasting Powder"]);
        assert_eq!(names(40), vec!["Handful of Copper Bolts"]);
        assert!(names(60).is_empty());
    }

    #[test]
    fn test_specialization_filter_off_by_default() {
        let config = ManagerConfig::new().specialization("Gnomish");
        let manager = RecipeManager::new(&engineering(), config).unwrap();
        assert!(manager.get("Goblin Rocket Boots").is_some());
        assert_eq!(manager.specialization(), Some("Gnomish"));
    }

    #[test]
    fn test_specialization_filter_enforced() {
        let config = ManagerConfig::new()
            .specialization("Gnomish")
            .enforce_specialization(true);
        let manager = RecipeManager::new(&engineering(), config).unwrap();
        assert!(manager.get("Goblin Rocket Boots").is_none());
        assert!(manager.get("Gnomish Cloaking Device").is_some());
        assert!(manager.get("Rough Blasting Powder").is_some());

        let none = ManagerConfig::new().enforce_specialization(true);
        let manager = RecipeManager::new(&engineering(), none).unwrap();
        assert_eq!(manager.recipes().len(), 2);
    }
}
