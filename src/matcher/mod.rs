// Ingredient matching and ranking over the recipe table

pub mod tier;

use crate::dataset::Recipe;
use tracing::debug;

pub use tier::{classify, recipe_ingredient_set, IngredientQuery, MatchTier};

/// Number of steps in a recipe's directions, `None` when unparseable
pub fn step_count(recipe: &Recipe) -> Option<usize> {
    recipe.parse_directions().ok().map(|steps| steps.len())
}

/// A recipe annotated with its tier and step count
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedRecipe<'a> {
    pub recipe: &'a Recipe,
    pub tier: MatchTier,
    pub num_steps: Option<usize>,
}

impl<'a> RankedRecipe<'a> {
    pub fn rank(query: &IngredientQuery, recipe: &'a Recipe) -> Self {
        Self {
            recipe,
            tier: classify(query, recipe),
            num_steps: step_count(recipe),
        }
    }

    /// Sort key within a tier: known step counts ascending, unknown last
    fn sort_key(&self) -> (bool, usize) {
        match self.num_steps {
            Some(n) => (false, n),
            None => (true, 0),
        }
    }
}

/// Recipes grouped by tier, each group ordered by simplicity
#[derive(Debug, Clone, Default)]
pub struct MatchResults<'a> {
    groups: [Vec<RankedRecipe<'a>>; 4],
}

impl<'a> MatchResults<'a> {
    pub fn tier(&self, tier: MatchTier) -> &[RankedRecipe<'a>] {
        &self.groups[tier.index()]
    }

    /// All four groups in priority order, including empty ones
    pub fn iter(&self) -> impl Iterator<Item = (MatchTier, &[RankedRecipe<'a>])> {
        MatchTier::ALL
            .into_iter()
            .map(move |tier| (tier, self.tier(tier)))
    }

    pub fn total(&self) -> usize {
        self.groups.iter().map(Vec::len).sum()
    }
}

/// Classify every recipe, group by tier and order each group by step count.
///
/// Sorting is stable, so recipes with equal step counts keep table order.
pub fn process<'a, I>(query: &IngredientQuery, recipes: I) -> MatchResults<'a>
where
    I: IntoIterator<Item = &'a Recipe>,
{
    let mut results = MatchResults::default();

    for recipe in recipes {
        let ranked = RankedRecipe::rank(query, recipe);
        results.groups[ranked.tier.index()].push(ranked);
    }

    for group in &mut results.groups {
        group.sort_by_key(|ranked| ranked.sort_key());
    }

    debug!(
        exact = results.tier(MatchTier::ExactMatch).len(),
        contains_all = results.tier(MatchTier::ContainsAll).len(),
        contains_some = results.tier(MatchTier::ContainsSome).len(),
        no_match = results.tier(MatchTier::NoMatch).len(),
        "Matched {} ingredients against {} recipes",
        query.len(),
        results.total()
    );

    results
}
