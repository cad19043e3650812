// Command-line interface

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "recipe-finder")]
#[command(about = "Recipe Finder - match the ingredients you have against a recipe dataset", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server
    Serve {
        /// Port to listen on
        #[arg(short, long, env = "PORT")]
        port: Option<u16>,

        /// Host to bind to
        #[arg(long, env = "HOST")]
        host: Option<String>,

        /// CSV file holding the recipe dataset
        #[arg(short, long, env = "DATASET_PATH")]
        dataset: Option<PathBuf>,
    },

    /// Match ingredients against a local dataset without starting a server
    Match {
        /// Ingredients, separated by commas or spaces
        #[arg(required = true, value_delimiter = ',')]
        ingredients: Vec<String>,

        /// CSV file holding the recipe dataset
        #[arg(short, long, env = "DATASET_PATH")]
        dataset: Option<PathBuf>,

        /// Maximum recipes to print per tier
        #[arg(short, long, default_value_t = 10)]
        limit: usize,

        /// Print the raw JSON response body instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Ask a running server for matches
    Find {
        /// Ingredients, separated by commas or spaces
        #[arg(required = true, value_delimiter = ',')]
        ingredients: Vec<String>,

        /// Base URL of the server
        #[arg(short, long, env = "RECIPE_FINDER_URL", default_value = "http://localhost:5000")]
        server: String,

        /// Maximum recipes to print per tier
        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },

    /// Load a dataset and report rows with unparseable list cells
    Check {
        /// CSV file holding the recipe dataset
        #[arg(short, long, env = "DATASET_PATH")]
        dataset: Option<PathBuf>,
    },
}
