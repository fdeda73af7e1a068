//! # Recipe
//!
//! An immutable craftable item with its skill thresholds.
//!
//! ## Skill-Up Curve
//!
//! ```text
//! chance
//!  1.0 |-----------\
//!      |            \
//!      |             \
//!  0.0 +--------------\--------
//!      orange     yellow   grey   skill
//! ```
//!
//! Between yellow and grey the chance decays linearly:
//! `(grey - skill) / (grey - yellow)`. At yellow the skill-up is certain,
//! at grey it is impossible. Crafting below orange is not possible at all.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::{EconomyError, EconomyResult};
use crate::tables::{RecipeDefinition, Skill};

/// A usable crafting recipe.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Recipe {
    name: String,
    orange: Skill,
    yellow: Skill,
    grey: Skill,
    supply: u32,
    specialization: Option<String>,
    reagents: BTreeMap<String, u32>,
}

impl Recipe {
    /// Builds a recipe from its raw definition.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` if the thresholds are not ordered
    /// (orange <= yellow <= grey), the supply is zero, or a reagent
    /// quantity is zero.
    pub fn from_definition(
        name: impl Into<String>,
        definition: &RecipeDefinition,
    ) -> EconomyResult<Self> {
        let name = name.into();
        let [orange, yellow, grey] = definition.skills;

        if !(orange <= yellow && yellow <= grey) {
            return Err(EconomyError::InvalidConfig(format!(
                "recipe '{name}' has unordered skills [{orange}, {yellow}, {grey}]"
            )));
        }
        if definition.supply == 0 {
            return Err(EconomyError::InvalidConfig(format!(
                "recipe '{name}' supplies nothing"
            )));
        }
        if let Some((reagent, _)) = definition.reagents.iter().find(|(_, &qty)| qty == 0) {
            return Err(EconomyError::InvalidConfig(format!(
                "recipe '{name}' requires zero of reagent '{reagent}'"
            )));
        }

        Ok(Self {
            name,
            orange,
            yellow,
            grey,
            supply: definition.supply,
            specialization: definition.specialization.clone(),
            reagents: definition.reagents.clone(),
        })
    }

    /// Chance for a skill-up when crafting at `skill`, between 0.0 and 1.0.
    ///
    /// # Errors
    ///
    /// `InsufficientSkill` if `skill` is below the orange threshold.
    pub fn skill_chance(&self, skill: Skill) -> EconomyResult<f64> {
        if skill < self.orange {
            return Err(EconomyError::InsufficientSkill {
                recipe: self.name.clone(),
                skill,
                required: self.orange,
            });
        }
        if skill <= self.yellow {
            return Ok(1.0);
        }
        if skill >= self.grey {
            return Ok(0.0);
        }
        Ok(f64::from(self.grey - skill) / f64::from(self.grey - self.yellow))
    }

    /// Returns true if crafting at `skill` can still grant a skill-up.
    #[inline]
    #[must_use]
    pub fn is_relevant(&self, skill: Skill) -> bool {
        self.orange <= skill && skill < self.grey
    }

    /// Name of the crafted item.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Units produced per craft.
    #[inline]
    #[must_use]
    pub const fn supply(&self) -> u32 {
        self.supply
    }

    /// Skill at which the recipe becomes orange (craftable).
    #[inline]
    #[must_use]
    pub const fn orange(&self) -> Skill {
        self.orange
    }

    /// Skill at which the recipe becomes yellow.
    #[inline]
    #[must_use]
    pub const fn yellow(&self) -> Skill {
        self.yellow
    }

    /// Skill at which the recipe becomes grey.
    #[inline]
    #[must_use]
    pub const fn grey(&self) -> Skill {
        self.grey
    }

    /// Reagents consumed per craft.
    #[inline]
    #[must_use]
    pub fn reagents(&self) -> &BTreeMap<String, u32> {
        &self.reagents
    }

    /// Specialization required to craft the recipe.
    #[inline]
    #[must_use]
    pub fn specialization(&self) -> Option<&str> {
        self.specialization.as_deref()
    }
}

impl fmt::Display for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let green = self.yellow + (self.grey - self.yellow) / 2;
        write!(
            f,
            "{}[{},{},{},{}]",
            self.name, self.orange, self.yellow, green, self.grey
        )?;
        if let Some(spec) = &self.specialization {
            write!(f, "({spec})")?;
        }
        Ok(())
    }
}
