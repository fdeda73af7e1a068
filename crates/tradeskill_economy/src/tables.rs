//! # Data Tables
//!
//! Shapes of the four external tables the economy consumes.
//!
//! ```text
//! Profession  : recipe name -> { skills = [orange, yellow, grey], supply, reagents, specialization? }
//! Vendor      : item name   -> price
//! Conversions : item name   -> { input item -> quantity }
//! Prices      : item name   -> price   (user supplied market data)
//! ```
//!
//! Reagent and conversion inputs are ordered maps so that pricing walks
//! them in the same order on every run.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Monetary value of an item, in the smallest currency unit (copper).
pub type Cost = u64;

/// Skill level of a profession.
pub type Skill = u16;

/// Raw recipe definition as it appears in profession data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeDefinition {
    /// Orange, yellow and grey skill thresholds.
    pub skills: [Skill; 3],
    /// Units produced per craft.
    pub supply: u32,
    /// Reagents consumed per craft.
    #[serde(default)]
    pub reagents: BTreeMap<String, u32>,
    /// Specialization required to learn the recipe.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialization: Option<String>,
}

impl RecipeDefinition {
    /// Creates a definition without reagents or specialization.
    #[must_use]
    pub fn new(skills: [Skill; 3], supply: u32) -> Self {
        Self {
            skills,
            supply,
            reagents: BTreeMap::new(),
            specialization: None,
        }
    }

    /// Adds a reagent requirement.
    #[must_use]
    pub fn with_reagent(mut self, item: impl Into<String>, quantity: u32) -> Self {
        self.reagents.insert(item.into(), quantity);
        self
    }

    /// Sets the required specialization.
    #[must_use]
    pub fn with_specialization(mut self, spec: impl Into<String>) -> Self {
        self.specialization = Some(spec.into());
        self
    }
}

/// Every recipe of one profession, keyed by the name of the crafted item.
pub type ProfessionData = BTreeMap<String, RecipeDefinition>;

/// Fixed vendor prices.
pub type VendorTable = HashMap<String, Cost>;

/// Non-recipe transformations: target item -> inputs per unit produced.
pub type ConversionTable = HashMap<String, BTreeMap<String, u32>>;

/// Market prices.
pub type PriceTable = HashMap<String, Cost>;

/// The three auxiliary tables the item cache prices against.
#[derive(Clone, Debug, Default)]
pub struct PriceSources {
    /// Vendor prices, highest priority.
    pub vendor: VendorTable,
    /// Conversion inputs.
    pub conversions: ConversionTable,
    /// Market prices, the fallback.
    pub prices: PriceTable,
}

impl PriceSources {
    /// Creates empty price sources.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a vendor price.
    #[must_use]
    pub fn with_vendor(mut self, item: impl Into<String>, price: Cost) -> Self {
        self.vendor.insert(item.into(), price);
        self
    }

    /// Sets a market price.
    #[must_use]
    pub fn with_price(mut self, item: impl Into<String>, price: Cost) -> Self {
        self.prices.insert(item.into(), price);
        self
    }

    /// Adds one input of a conversion.
    #[must_use]
    pub fn with_conversion(
        mut self,
        item: impl Into<String>,
        input: impl Into<String>,
        quantity: u32,
    ) -> Self {
        self.conversions
            .entry(item.into())
            .or_default()
            .insert(input.into(), quantity);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_definition_from_toml() {
        let text = r#"
            ["Handful of Fel Iron Bolts"]
            skills = [300, 310, 330]
            supply = 4
            reagents = { "Fel Iron Bar" = 1 }

            ["Gnomish Battle Goggles"]
            skills = [340, 350, 365]
            supply = 1
            specialization = "Gnomish"
            reagents = { "Khorium Bar" = 2, "Handful of Fel Iron Bolts" = 4 }
        "#;

        let data: ProfessionData = toml::from_str(text).unwrap();
        assert_eq!(data.len(), 2);

        let bolts = &data["Handful of Fel Iron Bolts"];
        assert_eq!(bolts.skills, [300, 310, 330]);
        assert_eq!(bolts.supply, 4);
        assert_eq!(bolts.reagents["Fel Iron Bar"], 1);
        assert!(bolts.specialization.is_none());

        let goggles = &data["Gnomish Battle Goggles"];
        assert_eq!(goggles.specialization.as_deref(), Some("Gnomish"));
    }

    #[test]
    fn test_definition_from_json() {
        let text = r#"{
            "Rough Blasting Powder": { "skills": [1, 20, 40], "supply": 1,
                                       "reagents": { "Rough Stone": 1 } }
        }"#;

        let data: ProfessionData = serde_json::from_str(text).unwrap();
        assert_eq!(
            data["Rough Blasting Powder"],
            RecipeDefinition::new([1, 20, 40], 1).with_reagent("Rough Stone", 1)
        );
    }

    #[test]
    fn test_price_sources_builder() {
        let sources = PriceSources::new()
            .with_vendor("Coal", 500)
            .with_price("Primal Fire", 2_000)
            .with_conversion("Primal Fire", "Mote of Fire", 10);

        assert_eq!(sources.vendor["Coal"], 500);
        assert_eq!(sources.prices["Primal Fire"], 2_000);
        assert_eq!(sources.conversions["Primal Fire"]["Mote of Fire"], 10);
    }
}
