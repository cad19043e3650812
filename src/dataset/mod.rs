// Recipe dataset: CSV loading and the in-memory recipe table

pub mod literal;

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

pub use literal::{parse_string_list, ListParseError};

/// Placeholder stored when a recipe has no source or link
pub const SENTINEL: &str = "unknown";

/// Column names accepted for the ingredient list, in lookup order
const INGREDIENT_COLUMNS: &[&str] = &["NER", "ingredients"];

/// One row of the dataset.
///
/// `ingredients` and `directions` keep the raw serialized text; they are
/// parsed on demand so a malformed cell only affects its own recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recipe {
    pub title: String,
    pub ingredients: String,
    pub directions: String,
    pub source: String,
    pub link: String,
}

/// A CSV row as it appears on disk, before the ingredient column is chosen.
///
/// Rows may be shorter than the header; absent trailing cells read as empty.
#[derive(Debug, Deserialize)]
struct RawRecipe {
    #[serde(default)]
    title: Option<String>,
    #[serde(rename = "NER", default)]
    ner: Option<String>,
    #[serde(default)]
    ingredients: Option<String>,
    #[serde(default)]
    directions: Option<String>,
    #[serde(default = "default_sentinel", deserialize_with = "sentinel_if_empty")]
    source: String,
    #[serde(default = "default_sentinel", deserialize_with = "sentinel_if_empty")]
    link: String,
}

impl RawRecipe {
    /// When the file carries a `NER` column it is authoritative, even for
    /// rows where it is empty.
    fn into_recipe(self, has_ner_column: bool) -> Recipe {
        let ingredients = if has_ner_column {
            self.ner
        } else {
            self.ingredients
        };

        Recipe {
            title: self.title.unwrap_or_default(),
            ingredients: ingredients.unwrap_or_default(),
            directions: self.directions.unwrap_or_default(),
            source: self.source,
            link: self.link,
        }
    }
}

fn default_sentinel() -> String {
    SENTINEL.to_string()
}

fn sentinel_if_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(default_sentinel))
}

impl Recipe {
    /// Parse the ingredient cell into its elements
    pub fn parse_ingredients(&self) -> std::result::Result<Vec<String>, ListParseError> {
        parse_string_list(&self.ingredients)
    }

    /// Parse the directions cell into its ordered steps
    pub fn parse_directions(&self) -> std::result::Result<Vec<String>, ListParseError> {
        parse_string_list(&self.directions)
    }
}

/// Counts of rows whose list cells could not be parsed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DatasetStats {
    pub total: usize,
    pub unparseable_ingredients: usize,
    pub unparseable_directions: usize,
}

/// Immutable table of recipes, loaded once at startup
#[derive(Debug, Clone, Default)]
pub struct RecipeTable {
    recipes: Vec<Recipe>,
}

impl RecipeTable {
    pub fn new(recipes: Vec<Recipe>) -> Self {
        Self { recipes }
    }

    /// Load a table from a CSV file on disk
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading recipe dataset from {}", path.display());

        let file = File::open(path).map_err(|e| {
            Error::Dataset(format!("Failed to open {}: {}", path.display(), e))
        })?;

        let table = Self::from_reader(file)?;
        info!(
            "Loaded {} recipes from {}",
            table.len(),
            path.display()
        );
        Ok(table)
    }

    /// Load a table from any CSV source with a header row
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        check_required_columns(&headers)?;
        let has_ner_column = headers.iter().any(|h| h == INGREDIENT_COLUMNS[0]);

        let mut recipes = Vec::new();
        let mut short_rows = 0;
        for row in reader.records() {
            let record = row?;
            if record.len() < headers.len() {
                short_rows += 1;
            }
            let raw: RawRecipe = record.deserialize(Some(&headers))?;
            recipes.push(raw.into_recipe(has_ner_column));
        }

        if short_rows > 0 {
            warn!("{} rows have fewer cells than the header", short_rows);
        }

        Ok(Self { recipes })
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn iter(&self) -> impl Iterator<Item = &Recipe> {
        self.recipes.iter()
    }

    /// Count rows whose ingredient or direction cells fail to parse
    pub fn stats(&self) -> DatasetStats {
        let mut stats = DatasetStats {
            total: self.recipes.len(),
            ..DatasetStats::default()
        };

        for recipe in &self.recipes {
            if recipe.parse_ingredients().is_err() {
                stats.unparseable_ingredients += 1;
            }
            if recipe.parse_directions().is_err() {
                stats.unparseable_directions += 1;
            }
        }

        stats
    }
}

fn check_required_columns(headers: &csv::StringRecord) -> Result<()> {
    let has = |name: &str| headers.iter().any(|h| h == name);

    if !has("title") {
        return Err(Error::Dataset("Missing required column: title".to_string()));
    }
    if !INGREDIENT_COLUMNS.iter().any(|c| has(c)) {
        return Err(Error::Dataset(format!(
            "Missing ingredient column (expected one of: {})",
            INGREDIENT_COLUMNS.join(", ")
        )));
    }
    if !has("directions") {
        return Err(Error::Dataset(
            "Missing required column: directions".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
,title,ingredients,directions,link,source,NER
0,Pancakes,\"[\"\"1 egg\"\"]\",\"[\"\"Mix.\"\", \"\"Fry.\"\"]\",www.example.com/pancakes,Gathered,\"[\"\"egg\"\", \"\"flour\"\"]\"
1,Toast,\"[]\",\"['Toast it.']\",,,\"['bread']\"
";

    #[test]
    fn test_load_from_reader() {
        let table = RecipeTable::from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(table.len(), 2);

        let pancakes = &table.recipes()[0];
        assert_eq!(pancakes.title, "Pancakes");
        // NER wins over the raw ingredients column
        assert_eq!(pancakes.ingredients, r#"["egg", "flour"]"#);
        assert_eq!(pancakes.source, "Gathered");
        assert_eq!(pancakes.link, "www.example.com/pancakes");

        let toast = &table.recipes()[1];
        assert_eq!(toast.source, SENTINEL);
        assert_eq!(toast.link, SENTINEL);
        assert_eq!(toast.parse_directions().unwrap(), vec!["Toast it."]);
    }

    #[test]
    fn test_optional_columns_default_to_sentinel() {
        let csv = "title,ingredients,directions\nSoup,\"[\"\"water\"\"]\",\"[]\"\n";
        let table = RecipeTable::from_reader(csv.as_bytes()).unwrap();

        let soup = &table.recipes()[0];
        assert_eq!(soup.ingredients, r#"["water"]"#);
        assert_eq!(soup.source, SENTINEL);
        assert_eq!(soup.link, SENTINEL);
    }

    #[test]
    fn test_missing_columns_rejected() {
        let csv = "title,directions\nSoup,\"[]\"\n";
        let err = RecipeTable::from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::Dataset(_)));

        let csv = "name,NER,directions\nSoup,\"[]\",\"[]\"\n";
        assert!(RecipeTable::from_reader(csv.as_bytes()).is_err());
    }

    #[test]
    fn test_stats_counts_unparseable_cells() {
        let csv = "title,NER,directions\n\
                   A,\"[\"\"egg\"\"]\",\"[\"\"Boil.\"\"]\"\n\
                   B,not a list,\"[\"\"Boil.\"\"]\"\n\
                   C,\"[\"\"egg\"\"]\",oops\n";
        let table = RecipeTable::from_reader(csv.as_bytes()).unwrap();

        assert_eq!(
            table.stats(),
            DatasetStats {
                total: 3,
                unparseable_ingredients: 1,
                unparseable_directions: 1,
            }
        );
    }

    #[test]
    fn test_short_rows_keep_the_table() {
        let csv = "title,NER,directions,source,link\n\
                   Omelette,\"[\"\"egg\"\"]\",\"[\"\"Whisk.\"\", \"\"Fry.\"\"]\",Gathered\n\
                   Stub,\"[\"\"egg\"\"]\"\n\
                   Toast,\"[\"\"bread\"\"]\",\"[\"\"Toast.\"\"]\",Gathered,www.example.com/toast\n";
        let table = RecipeTable::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(table.len(), 3);

        let omelette = &table.recipes()[0];
        assert_eq!(omelette.source, "Gathered");
        assert_eq!(omelette.link, SENTINEL);
        assert_eq!(omelette.parse_directions().unwrap().len(), 2);

        let stub = &table.recipes()[1];
        assert_eq!(stub.directions, "");
        assert!(stub.parse_directions().is_err());
        assert_eq!(stub.source, SENTINEL);

        assert_eq!(table.recipes()[2].link, "www.example.com/toast");
    }

    #[test]
    fn test_missing_file() {
        let err = RecipeTable::from_path("/nonexistent/recipes.csv").unwrap_err();
        assert!(matches!(err, Error::Dataset(_)));
    }
}
