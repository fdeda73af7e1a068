//! # Economy Error Types
//!
//! All errors that can occur in the economy system.

use thiserror::Error;

/// Errors that can occur in the economy system.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EconomyError {
    /// No vendor price, recipe, conversion or market price exists for an item.
    #[error("item '{0}' pricing data was undefined")]
    PricingUndefined(String),

    /// Skill chance requested below the level at which the recipe becomes craftable.
    #[error("insufficient skill to calculate skill chance for '{recipe}': {skill} (req. {required})")]
    InsufficientSkill {
        /// Recipe that was queried.
        recipe: String,
        /// Skill level supplied by the caller.
        skill: u16,
        /// Orange threshold of the recipe.
        required: u16,
    },

    /// An inclusion entry names a recipe that is not in the usable set.
    #[error("unknown recipe name: {0}")]
    UnknownRecipe(String),

    /// An item's cost depends on itself through reagents or conversions.
    #[error("cyclic dependency while pricing items: {}", .0.join(" -> "))]
    CycleDetected(Vec<String>),

    /// Arithmetic overflow in a cost calculation.
    #[error("arithmetic overflow while pricing item '{0}'")]
    ArithmeticOverflow(String),

    /// Invalid configuration data.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A data file could not be read.
    #[error("cannot read '{path}': {reason}")]
    Io {
        /// Path of the file.
        path: String,
        /// Underlying I/O error message.
        reason: String,
    },

    /// A data file could not be parsed.
    #[error("cannot parse '{path}': {reason}")]
    Parse {
        /// Path of the file.
        path: String,
        /// Underlying parser error message.
        reason: String,
    },

    /// A table was requested from the resource registry before it was loaded.
    #[error("register '{0}' does not exist")]
    UnknownRegister(String),

    /// No recipe can yield a skill-up at the current level.
    #[error("no relevant recipe at skill {0}")]
    NoRelevantRecipe(u16),

    /// The leveling loop ran out of its craft budget before reaching the target.
    #[error("craft limit of {limit} reached at skill {skill}")]
    CraftLimitReached {
        /// Configured craft budget.
        limit: u64,
        /// Skill level when the budget ran out.
        skill: u16,
    },
}

/// Result type for economy operations.
pub type EconomyResult<T> = Result<T, EconomyError>;
