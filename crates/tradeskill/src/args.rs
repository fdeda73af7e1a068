//! # Argument Parsing
//!
//! Simple hand-rolled parsing, no external deps.
//!
//! ```text
//! tradeskill <profession> <start> <target> <prices> [OPTIONS]
//! ```
//!
//! Multi-valued options (`-x`, `-i`, `-e`) take every following argument up
//! to the next one starting with `-`, so put them after the positionals.

use std::collections::{BTreeMap, HashSet};
use std::path::PathBuf;

use tradeskill_economy::{Selector, Skill, DEFAULT_MAX_CRAFTS, DEFAULT_RESOURCE_DIR};

use crate::error::CliError;

/// Lowest profession skill level.
pub const MIN_SKILL_LEVEL: Skill = 1;

/// Highest profession skill level.
pub const MAX_SKILL_LEVEL: Skill = 375;

/// Seed used when `--seed` is not given, for reproducible runs.
pub const DEFAULT_SEED: u64 = 37 * 11 * 93;

/// Help text.
pub const USAGE: &str = "\
Usage: tradeskill <profession> <start> <target> <prices> [OPTIONS]

Arguments:
  <profession>               Profession to be leveled (e.g. engineering)
  <start>                    Current profession skill level [1-375]
  <target>                   Target profession skill level [1-375]
  <prices>                   Path to the auction house price file (.toml or .json)

Options:
  -s, --spec <SPEC>          Specialization (e.g. 'Goblin', 'Gnomish')
      --enforce-spec         Drop recipes requiring another specialization
  -x, --exclude <NAME>...    Recipes to exclude from the crafting process
  -i, --include <NAME [QTY]>...
                             Recipes (with quantities) to include,
                             e.g. \"Fel Iron Bar\" 2 \"Adamantite Bar\"
  -e, --eval <ITEM>...       Items to appraise
  -d, --data <DIR>           Resource directory (default: res)
      --seed <N>             Simulation seed (default: 37851)
      --strategy <NAME>      Recipe choice: 'chance' (default) or 'first'
      --max-crafts <N>       Craft budget for the simulation (default: 100000)
  -h, --help                 Show this help";

/// Parsed command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Args {
    /// Capitalized profession name, also the data file stem.
    pub profession: String,
    /// Current skill level.
    pub start: Skill,
    /// Target skill level.
    pub target: Skill,
    /// Market price file.
    pub prices: PathBuf,
    /// Chosen specialization.
    pub spec: Option<String>,
    /// Whether to drop recipes of other specializations.
    pub enforce_spec: bool,
    /// Excluded recipes.
    pub exclude: HashSet<String>,
    /// Included recipes and quantities.
    pub include: BTreeMap<String, u32>,
    /// Items to appraise.
    pub eval: Vec<String>,
    /// Resource directory.
    pub data_dir: PathBuf,
    /// Simulation seed.
    pub seed: u64,
    /// Recipe choice during the simulation.
    pub strategy: Selector,
    /// Craft budget.
    pub max_crafts: u64,
}

/// What the user asked for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Price and simulate.
    Run(Box<Args>),
    /// Print usage.
    Help,
}

/// Parses arguments, excluding the program name.
///
/// # Errors
///
/// Any `CliError` describing the first malformed argument.
pub fn parse(args: &[String]) -> Result<Command, CliError> {
    let mut positionals: Vec<&str> = Vec::new();
    let mut spec = None;
    let mut enforce_spec = false;
    let mut exclude = HashSet::new();
    let mut include = IncludeParser::default();
    let mut eval = Vec::new();
    let mut data_dir = PathBuf::from(DEFAULT_RESOURCE_DIR);
    let mut seed = DEFAULT_SEED;
    let mut strategy = Selector::default();
    let mut max_crafts = DEFAULT_MAX_CRAFTS;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => return Ok(Command::Help),
            "--spec" | "-s" => spec = Some(value(args, &mut i)?.to_string()),
            "--enforce-spec" => enforce_spec = true,
            "--exclude" | "-x" => exclude.extend(values(args, &mut i).iter().cloned()),
            "--include" | "-i" => {
                for token in values(args, &mut i) {
                    include.push(token)?;
                }
            }
            "--eval" | "-e" => eval.extend(values(args, &mut i).iter().cloned()),
            "--data" | "-d" => data_dir = PathBuf::from(value(args, &mut i)?),
            "--seed" => seed = number("seed", value(args, &mut i)?)?,
            "--max-crafts" => max_crafts = number("craft budget", value(args, &mut i)?)?,
            "--strategy" => strategy = selector(value(args, &mut i)?)?,
            flag if flag.starts_with('-') && flag.len() > 1 && !is_numeric(&flag[1..]) => {
                return Err(CliError::UnexpectedArgument(flag.to_string()));
            }
            positional => positionals.push(positional),
        }
        i += 1;
    }

    let mut positionals = positionals.into_iter();
    let mut next = |name| positionals.next().ok_or(CliError::MissingArgument(name));

    let profession = capitalize(next("profession")?);
    let start = skill(next("start")?)?;
    let target = skill(next("target")?)?;
    let prices = PathBuf::from(next("prices")?);
    if let Some(extra) = positionals.next() {
        return Err(CliError::UnexpectedArgument(extra.to_string()));
    }
    if start >= target {
        return Err(CliError::EmptySkillRange { start, target });
    }

    Ok(Command::Run(Box::new(Args {
        profession,
        start,
        target,
        prices,
        spec,
        enforce_spec,
        exclude,
        include: include.finish(),
        eval,
        data_dir,
        seed,
        strategy,
        max_crafts,
    })))
}

/// Takes the single value following option `args[*i]`.
fn value<'a>(args: &'a [String], i: &mut usize) -> Result<&'a str, CliError> {
    match args.get(*i + 1) {
        Some(value) => {
            *i += 1;
            Ok(value)
        }
        None => Err(CliError::MissingValue(args[*i].clone())),
    }
}

/// Takes every value following option `args[*i]` up to the next option.
fn values<'a>(args: &'a [String], i: &mut usize) -> &'a [String] {
    let start = *i + 1;
    let len = args[start..]
        .iter()
        .take_while(|arg| !arg.starts_with('-'))
        .count();
    *i += len;
    &args[start..start + len]
}

fn is_numeric(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

fn number<T: std::str::FromStr>(name: &'static str, text: &str) -> Result<T, CliError> {
    text.parse().map_err(|_| CliError::InvalidValue {
        name,
        value: text.to_string(),
    })
}

fn skill(text: &str) -> Result<Skill, CliError> {
    let value: Skill = number("skill level", text)?;
    if !(MIN_SKILL_LEVEL..=MAX_SKILL_LEVEL).contains(&value) {
        return Err(CliError::SkillOutOfRange {
            value,
            min: MIN_SKILL_LEVEL,
            max: MAX_SKILL_LEVEL,
        });
    }
    Ok(value)
}

fn selector(text: &str) -> Result<Selector, CliError> {
    match text {
        "chance" => Ok(Selector::HighestChance),
        "first" => Ok(Selector::FirstRelevant),
        _ => Err(CliError::InvalidValue {
            name: "strategy",
            value: text.to_string(),
        }),
    }
}

/// `ENGINEERING` -> `Engineering`.
fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
    })
}

/// Recipe names, each optionally followed by a quantity.
#[derive(Debug, Default)]
struct IncludeParser {
    include: BTreeMap<String, u32>,
    last: Option<String>,
}

impl IncludeParser {
    fn push(&mut self, token: &str) -> Result<(), CliError> {
        if is_numeric(token) {
            let name = self
                .last
                .take()
                .ok_or_else(|| CliError::OrphanQuantity(token.to_string()))?;
            let quantity = number("include quantity", token)?;
            self.include.insert(name, quantity);
            return Ok(());
        }
        if self.include.contains_key(token) {
            return Err(CliError::DuplicateInclude(token.to_string()));
        }
        self.include.insert(token.to_string(), 1);
        self.last = Some(token.to_string());
        Ok(())
    }

    fn finish(self) -> BTreeMap<String, u32> {
        self.include
    }
}
