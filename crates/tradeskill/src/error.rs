//! # CLI Error Types

use thiserror::Error;
use tradeskill_economy::{EconomyError, Skill};

/// Errors reported by the command-line front end.
#[derive(Error, Debug)]
pub enum CliError {
    /// A required positional argument is missing.
    #[error("missing argument <{0}>")]
    MissingArgument(&'static str),

    /// An argument was not recognized.
    #[error("unexpected argument '{0}'")]
    UnexpectedArgument(String),

    /// An option was given without its value.
    #[error("option '{0}' requires a value")]
    MissingValue(String),

    /// A value could not be parsed.
    #[error("invalid {name} '{value}'")]
    InvalidValue {
        /// What the value was for.
        name: &'static str,
        /// The offending text.
        value: String,
    },

    /// A skill level outside the profession's range.
    #[error("skill level must be within bounds [{min},{max}]: {value}")]
    SkillOutOfRange {
        /// Requested level.
        value: Skill,
        /// Lowest allowed level.
        min: Skill,
        /// Highest allowed level.
        max: Skill,
    },

    /// The start level is not below the target level.
    #[error("start skill {start} must be below target skill {target}")]
    EmptySkillRange {
        /// Start level.
        start: Skill,
        /// Target level.
        target: Skill,
    },

    /// The same recipe was included twice.
    #[error("optional 'include' parameter found duplicate recipe '{0}'")]
    DuplicateInclude(String),

    /// An include quantity with no recipe before it.
    #[error("optional 'include' parameter found quantity '{0}' without a preceding recipe")]
    OrphanQuantity(String),

    /// Failure inside the economy crate.
    #[error(transparent)]
    Economy(#[from] EconomyError),

    /// Failure writing the report.
    #[error("cannot write report: {0}")]
    Io(#[from] std::io::Error),
}
