use clap::{Parser, Subcommand};
use cookshelf::library::load_recipe_as;
use cookshelf::{analyze, load_config, load_library, load_recipe, SiteError};
use log::debug;
use serde::Serialize;
use std::path::PathBuf;
use std::process;

/// Recipe and Open Graph tooling for the site.
#[derive(Parser)]
#[command(name = "cookshelf", version, about)]
struct Cli {
    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse one .cook file and print it as JSON
    Recipe {
        /// Path to the recipe file
        file: PathBuf,
        /// Slug to use instead of the file name
        #[arg(long)]
        slug: Option<String>,
    },

    /// Parse every .cook file in a directory
    Recipes {
        /// Recipe directory (defaults to recipes_dir from config)
        dir: Option<PathBuf>,
    },

    /// Test a page's Open Graph tags
    Og {
        /// Page URL (http or https)
        url: String,
    },
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<(), SiteError> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", json);
    Ok(())
}

async fn run(cli: Cli) -> Result<(), SiteError> {
    let config = load_config()?;
    debug!("{:#?}", config);

    match cli.command {
        Commands::Recipe { file, slug } => {
            let recipe = match slug {
                Some(slug) => load_recipe_as(&file, &slug).await?,
                None => load_recipe(&file).await?,
            };
            print_json(&recipe, cli.pretty)
        }
        Commands::Recipes { dir } => {
            let dir = dir.unwrap_or(config.recipes_dir);
            let recipes = load_library(&dir).await?;
            print_json(&recipes, cli.pretty)
        }
        Commands::Og { url } => {
            let analysis = analyze(&url, &config.og).await;
            print_json(&analysis, cli.pretty)?;
            if !analysis.success {
                process::exit(2);
            }
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        eprintln!("error: {}", err);
        process::exit(1);
    }
}
