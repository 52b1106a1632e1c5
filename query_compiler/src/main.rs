//! Query Compiler - command line front end
//!
//! `map` compiles a map-modifier query from saved settings; `expedition`
//! values categories from a price feed and compiles a category query.

use clap::{Parser, Subcommand};
use query_compiler::feed::DEFAULT_LEAGUE;
use query_compiler::{
    default_settings_path, plan, search_valuations, select_by_name, ClauseBuilder, MapSettings,
    PriceFeed, Pricing, Result,
};
use search_common::{CategoryCatalog, ModifierCatalog};
use std::path::{Path, PathBuf};

/// Compile compact search queries from thresholds, flags and catalog selections
#[derive(Parser, Debug)]
#[command(name = "query_compiler")]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compile a map-modifier query from a settings file
    Map {
        /// Path to the settings JSON file (default: ~/.config/query_compiler/map_settings.json)
        #[arg(short, long)]
        settings: Option<PathBuf>,

        /// Path to the map modifier catalog
        #[arg(short, long)]
        mods: PathBuf,

        /// Path to the bonus modifier catalog
        #[arg(short, long)]
        bonus_mods: Option<PathBuf>,
    },
    /// Value categories from a price feed and compile a category query
    Expedition {
        /// Path to the category catalog
        #[arg(short, long)]
        catalog: PathBuf,

        /// Directory holding eco_<league>_Unique<kind>.json feed files
        #[arg(long, required_unless_present = "feed_url", conflicts_with = "feed_url")]
        feed_dir: Option<PathBuf>,

        /// Base URL serving the feed files
        #[arg(long)]
        feed_url: Option<String>,

        /// League whose feed files are read
        #[arg(short, long, default_value = DEFAULT_LEAGUE)]
        league: String,

        /// Entry name the query must match (repeatable)
        #[arg(short = 'S', long = "select")]
        selected: Vec<String>,

        /// Do not add valuable entries automatically
        #[arg(long, default_value_t = false)]
        no_filler: bool,

        /// Only list categories matching this text (3+ characters)
        #[arg(long, default_value = "")]
        search: String,

        /// Number of categories to list
        #[arg(long, default_value_t = 10)]
        show: usize,
    },
}

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let result = match args.command {
        Command::Map {
            settings,
            mods,
            bonus_mods,
        } => run_map(settings, &mods, bonus_mods.as_deref()),
        Command::Expedition {
            catalog,
            feed_dir,
            feed_url,
            league,
            selected,
            no_filler,
            search,
            show,
        } => {
            run_expedition(
                &catalog, feed_dir, feed_url, &league, &selected, !no_filler, &search, show,
            )
            .await
        }
    };

    match result {
        Ok(query) => println!("{query}"),
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    }
}

fn run_map(
    settings: Option<PathBuf>,
    mods: &Path,
    bonus_mods: Option<&Path>,
) -> Result<String> {
    let settings = match settings {
        Some(path) => MapSettings::load(path)?,
        None => MapSettings::load_or_default(default_settings_path())?,
    };

    let map_mods = ModifierCatalog::load(mods)?;
    let bonus_mods = match bonus_mods {
        Some(path) => ModifierCatalog::load(path)?,
        None => ModifierCatalog::default(),
    };

    let query = ClauseBuilder::new(&map_mods, &bonus_mods).build(&settings)?;
    log::info!("Query length: {} chars", query.chars().count());
    Ok(query)
}

#[allow(clippy::too_many_arguments)]
async fn run_expedition(
    catalog: &Path,
    feed_dir: Option<PathBuf>,
    feed_url: Option<String>,
    league: &str,
    selected: &[String],
    add_supplementary: bool,
    search: &str,
    show: usize,
) -> Result<String> {
    let catalog = CategoryCatalog::load(catalog)?;

    let feed = match (feed_dir, feed_url) {
        (Some(dir), _) => PriceFeed::load_dir(dir, league)?,
        (None, Some(url)) => PriceFeed::fetch(&url, league).await?,
        (None, None) => PriceFeed::default(),
    };
    let pool = feed.obtainable(&catalog);

    let selection = select_by_name(&pool, selected)?;
    let plan = plan(&catalog, &pool, &selection, add_supplementary)?;

    for valuation in search_valuations(&plan.valuations, search, show) {
        let value = match valuation.max_value {
            Pricing::Resolved(value) => format!("{value:.0}"),
            Pricing::Unresolved => "?".to_string(),
        };
        let best = valuation
            .best_member
            .as_ref()
            .map(|e| e.name.as_str())
            .unwrap_or("-");
        log::info!("{:>8}  {:<24} {}", value, valuation.canonical_name, best);
    }

    for entry in &plan.supplementary {
        log::info!(
            "{} {} ({:.0})",
            if add_supplementary { "added:" } else { "would add:" },
            entry.name,
            entry.value
        );
    }

    Ok(plan.query)
}
