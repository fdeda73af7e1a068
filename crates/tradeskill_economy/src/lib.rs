//! # Tradeskill Economy
//!
//! Item valuation and skill progression for leveling a crafting profession.
//!
//! ## Design Principles
//!
//! 1. **Integer costs** - every price is a `u64` in copper, arithmetic is checked
//! 2. **Resolve once** - item costs are memoized per cache instance
//! 3. **No hidden randomness** - the crafter rolls on a generator the caller owns
//! 4. **External configuration** - recipes and prices live in TOML or JSON files
//!
//! ## Thread Safety
//!
//! Everything here is single-owner. An [`ItemCache`] mutates its memo table
//! on every lookup and a [`Crafter`] mutates its level on every craft; share
//! them across threads only behind your own lock.
//!
//! ## Example
//!
//! ```rust,ignore
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//! use tradeskill_economy::{Crafter, ItemCache, ManagerConfig, RecipeManager, ResourceDir};
//!
//! let mut res = ResourceDir::new("res");
//! let manager = RecipeManager::new(&res.register("Engineering", None)?, ManagerConfig::new())?;
//! let sources = res.price_sources(Some("prices.toml".as_ref()))?;
//!
//! let mut cache = ItemCache::new(&manager, &sources);
//! let cost = cache.eval_item("Fel Iron Casing")?;
//!
//! let mut crafter = Crafter::new(300, 375, ChaCha8Rng::seed_from_u64(37 * 11 * 93));
//! let report = level_profession(&manager, &mut crafter, Selector::HighestChance, DEFAULT_MAX_CRAFTS)?;
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod crafter;
pub mod error;
pub mod item_cache;
pub mod leveling;
pub mod loader;
pub mod manager;
pub mod recipe;
pub mod tables;

pub use crafter::Crafter;
pub use error::{EconomyError, EconomyResult};
pub use item_cache::{CacheStats, ItemCache, PriceSource, Valuation};
pub use leveling::{level_profession, LevelingReport, Selector, DEFAULT_MAX_CRAFTS};
pub use loader::{
    load_table, DataFormat, ResourceDir, CONVERSION_TABLE, DEFAULT_RESOURCE_DIR, PRICE_TABLE,
    VENDOR_TABLE,
};
pub use manager::{ManagerConfig, RecipeManager};
pub use recipe::Recipe;
pub use tables::{
    ConversionTable, Cost, PriceSources, PriceTable, ProfessionData, RecipeDefinition, Skill,
    VendorTable,
};
