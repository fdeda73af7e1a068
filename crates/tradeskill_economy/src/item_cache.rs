//! # Item Cache - Recursive Item Valuation
//!
//! **Memoized cost resolution with cycle detection**
//!
//! Every item resolves to a single cost. Sources are consulted in strict
//! priority order:
//!
//! 1. **Vendor** - a fixed vendor price wins outright
//! 2. **Recipe** - `floor(sum(cost(reagent) * qty) / supply)`
//! 3. **Conversion** - `sum(cost(input) * qty)`, capped by the market price
//!    when one exists
//! 4. **Market** - the user supplied price, or the item is unpriceable
//!
//! Reagents and conversion inputs are priced recursively. Each item is
//! resolved at most once per cache; later lookups are served from the memo
//! table. The chain of items currently being resolved is tracked so that a
//! reagent graph that loops back on itself fails with `CycleDetected`
//! instead of recursing forever.
//!
//! ## Example
//!
//! ```rust,ignore
//! let manager = RecipeManager::new(&engineering, ManagerConfig::new())?;
//! let mut cache = ItemCache::new(&manager, &sources);
//!
//! let cost = cache.eval_item("Fel Iron Casing")?;
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::error::{EconomyError, EconomyResult};
use crate::manager::RecipeManager;
use crate::recipe::Recipe;
use crate::tables::{Cost, PriceSources};

/// Where an item's cost came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PriceSource {
    /// Fixed vendor price.
    Vendor,
    /// Crafting cost through a profession recipe.
    Recipe,
    /// Conversion from other items, cheaper than (or without) a market price.
    Conversion,
    /// Market price.
    Market,
}

impl fmt::Display for PriceSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Vendor => "vendor",
            Self::Recipe => "recipe",
            Self::Conversion => "conversion",
            Self::Market => "market",
        };
        f.write_str(label)
    }
}

/// A resolved item cost.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Valuation {
    /// Cost of one unit.
    pub cost: Cost,
    /// Source that produced the cost.
    pub source: PriceSource,
}

impl Valuation {
    #[inline]
    const fn new(cost: Cost, source: PriceSource) -> Self {
        Self { cost, source }
    }
}

/// Counters describing the work done by a cache.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from the memo table.
    pub hits: u64,
    /// Items resolved from a vendor price.
    pub vendor: u64,
    /// Items resolved through a recipe.
    pub recipe: u64,
    /// Items resolved through a conversion.
    pub conversion: u64,
    /// Items resolved from a market price.
    pub market: u64,
}

impl CacheStats {
    /// Total number of items resolved (cache misses that succeeded).
    #[must_use]
    pub const fn resolutions(&self) -> u64 {
        self.vendor + self.recipe + self.conversion + self.market
    }

    fn record(&mut self, source: PriceSource) {
        match source {
            PriceSource::Vendor => self.vendor += 1,
            PriceSource::Recipe => self.recipe += 1,
            PriceSource::Conversion => self.conversion += 1,
            PriceSource::Market => self.market += 1,
        }
    }
}

/// Memoized item valuation over a recipe table and price sources.
///
/// The tables are borrowed read-only for the lifetime of the cache; the memo
/// table is owned by the cache and only ever grows.
#[derive(Debug)]
pub struct ItemCache<'a> {
    recipes: &'a BTreeMap<String, Recipe>,
    sources: &'a PriceSources,
    cache: HashMap<String, Valuation>,
    stats: CacheStats,
}

impl<'a> ItemCache<'a> {
    /// Creates an empty cache over a manager's recipes and the price sources.
    #[must_use]
    pub fn new(manager: &'a RecipeManager, sources: &'a PriceSources) -> Self {
        Self {
            recipes: manager.recipes(),
            sources,
            cache: HashMap::new(),
            stats: CacheStats::default(),
        }
    }

    /// Evaluates the cost of one unit of `item`.
    ///
    /// # Errors
    ///
    /// - `PricingUndefined` if the item (or anything it is made from) has no
    ///   price source
    /// - `CycleDetected` if the item's cost depends on itself
    /// - `ArithmeticOverflow` if the cost does not fit in a `u64`
    pub fn eval_item(&mut self, item: &str) -> EconomyResult<Cost> {
        self.appraise(item).map(|valuation| valuation.cost)
    }

    /// Evaluates `item` and reports which source priced it.
    ///
    /// # Errors
    ///
    /// Same as [`ItemCache::eval_item`].
    pub fn appraise(&mut self, item: &str) -> EconomyResult<Valuation> {
        let mut chain = Vec::new();
        self.resolve(item, &mut chain)
    }

    /// Returns the memoized valuation of `item`, if it was already resolved.
    #[must_use]
    pub fn cached(&self, item: &str) -> Option<Valuation> {
        self.cache.get(item).copied()
    }

    /// Number of memoized items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Returns true if nothing has been resolved yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Work counters since the cache was created.
    #[must_use]
    pub const fn stats(&self) -> CacheStats {
        self.stats
    }

    fn resolve(&mut self, item: &str, chain: &mut Vec<String>) -> EconomyResult<Valuation> {
        if let Some(&valuation) = self.cache.get(item) {
            self.stats.hits += 1;
            tracing::debug!("already seen item '{}'", item);
            return Ok(valuation);
        }

        if let Some(start) = chain.iter().position(|seen| seen == item) {
            let mut cycle = chain[start..].to_vec();
            cycle.push(item.to_string());
            return Err(EconomyError::CycleDetected(cycle));
        }

        chain.push(item.to_string());
        let result = self.resolve_uncached(item, chain);
        chain.pop();
        let valuation = result?;

        tracing::debug!("priced '{}' at {} ({})", item, valuation.cost, valuation.source);
        self.stats.record(valuation.source);
        self.cache.insert(item.to_string(), valuation);
        Ok(valuation)
    }

    fn resolve_uncached(&mut self, item: &str, chain: &mut Vec<String>) -> EconomyResult<Valuation> {
        let recipes = self.recipes;
        let sources = self.sources;

        if let Some(&price) = sources.vendor.get(item) {
            return Ok(Valuation::new(price, PriceSource::Vendor));
        }

        if let Some(recipe) = recipes.get(item) {
            let total = self.sum_inputs(item, recipe.reagents(), chain)?;
            let cost = total / Cost::from(recipe.supply());
            return Ok(Valuation::new(cost, PriceSource::Recipe));
        }

        if let Some(inputs) = sources.conversions.get(item) {
            let converted = self.sum_inputs(item, inputs, chain)?;
            return Ok(match sources.prices.get(item) {
                Some(&market) if market < converted => Valuation::new(market, PriceSource::Market),
                _ => Valuation::new(converted, PriceSource::Conversion),
            });
        }

        sources
            .prices
            .get(item)
            .map(|&price| Valuation::new(price, PriceSource::Market))
            .ok_or_else(|| EconomyError::PricingUndefined(item.to_string()))
    }

    /// Sums `cost(input) * quantity` over `inputs`.
    fn sum_inputs(
        &mut self,
        item: &str,
        inputs: &BTreeMap<String, u32>,
        chain: &mut Vec<String>,
    ) -> EconomyResult<Cost> {
        let mut total: Cost = 0;
        for (input, &quantity) in inputs {
            let unit = self.resolve(input, chain)?.cost;
            total = unit
                .checked_mul(Cost::from(quantity))
                .and_then(|weighted| total.checked_add(weighted))
                .ok_or_else(|| EconomyError::ArithmeticOverflow(item.to_string()))?;
        }
        Ok(total)
    }
}
