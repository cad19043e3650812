use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::dataset::Recipe;

/// Match quality of a recipe relative to a query, best first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MatchTier {
    #[serde(rename = "Exact Match")]
    ExactMatch,
    #[serde(rename = "Contains All Ingredients")]
    ContainsAll,
    #[serde(rename = "Contains Some Ingredients")]
    ContainsSome,
    #[serde(rename = "No Matching Ingredients")]
    NoMatch,
}

impl MatchTier {
    /// Every tier in priority order
    pub const ALL: [MatchTier; 4] = [
        MatchTier::ExactMatch,
        MatchTier::ContainsAll,
        MatchTier::ContainsSome,
        MatchTier::NoMatch,
    ];

    /// Label used as the key in API responses
    pub fn label(self) -> &'static str {
        match self {
            MatchTier::ExactMatch => "Exact Match",
            MatchTier::ContainsAll => "Contains All Ingredients",
            MatchTier::ContainsSome => "Contains Some Ingredients",
            MatchTier::NoMatch => "No Matching Ingredients",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for MatchTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A normalized query: lower-cased, trimmed, deduplicated ingredients
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngredientQuery {
    ingredients: HashSet<String>,
}

impl IngredientQuery {
    pub fn new<I, S>(ingredients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            ingredients: ingredients
                .into_iter()
                .map(|i| i.as_ref().trim().to_lowercase())
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.ingredients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ingredients.is_empty()
    }

    pub fn contains(&self, ingredient: &str) -> bool {
        self.ingredients.contains(ingredient)
    }

    /// Tier of an already parsed, lower-cased recipe ingredient set
    pub fn tier_for(&self, recipe_ingredients: &HashSet<String>) -> MatchTier {
        if self.ingredients == *recipe_ingredients {
            MatchTier::ExactMatch
        } else if self.ingredients.is_subset(recipe_ingredients) {
            MatchTier::ContainsAll
        } else if !self.ingredients.is_disjoint(recipe_ingredients) {
            MatchTier::ContainsSome
        } else {
            MatchTier::NoMatch
        }
    }
}

/// Parse a recipe's ingredient cell into a lower-cased set
pub fn recipe_ingredient_set(recipe: &Recipe) -> Option<HashSet<String>> {
    recipe
        .parse_ingredients()
        .ok()
        .map(|items| items.iter().map(|i| i.to_lowercase()).collect())
}

/// Classify a recipe against a query; unparseable ingredients are `NoMatch`
pub fn classify(query: &IngredientQuery, recipe: &Recipe) -> MatchTier {
    match recipe_ingredient_set(recipe) {
        Some(set) => query.tier_for(&set),
        None => MatchTier::NoMatch,
    }
}
