use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use configuration::{CliOverrides, load_with_overrides};
use core_types::Metric;
use dashboard::render::{self, emit};
use dashboard::{Dashboard, EvolutionRequest, browse};
use dataset::{Dataset, DatasetLoader};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// The main entry point for the marquee movie dashboard.
#[tokio::main]
async fn main() -> Result<()> {
    // MARQUEE__* overrides may live in a .env file; it is optional.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = load_with_overrides(&cli.overrides).context("Failed to load configuration")?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.filter))
        .context("Invalid logging filter")?;
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let dataset = load_dataset(DatasetLoader::new(&config.dataset)).await?;
    let dashboard = Dashboard::new(dataset, config.dashboard);

    let command = cli.command.unwrap_or(Commands::Home);
    run(&dashboard, command, cli.json)
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// A terminal dashboard over the TMDb movie database.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    overrides: CliOverrides,

    /// Print the page as JSON instead of a table.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the home page with the dataset summary (the default).
    Home,
    /// Show the details and cast of one movie.
    Movie {
        /// The exact title of the movie.
        #[arg(long)]
        title: String,
    },
    /// List the movie titles, optionally filtered.
    Titles {
        /// Case- and accent-insensitive substring of the title.
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Count and search the actors of the dataset.
    Actors(ActorsArgs),
    /// Show an actor's picture and filmography.
    Actor {
        /// The exact name of the actor.
        #[arg(long)]
        name: String,
    },
    /// Bar chart of a metric averaged per country.
    Averages(AveragesArgs),
    /// Yearly evolution of a currency metric per country.
    Evolution(EvolutionArgs),
    /// Browse the pages interactively.
    Browse,
}

#[derive(Args)]
struct ActorsArgs {
    /// Case- and accent-insensitive substring of the actor name.
    #[arg(long, default_value = "")]
    search: String,

    /// Maximum number of matches to list (defaults to dashboard.search_limit).
    #[arg(long)]
    limit: Option<usize>,
}

#[derive(Args)]
struct AveragesArgs {
    /// A country to chart; repeat the flag for several countries.
    #[arg(long = "country", required = true)]
    countries: Vec<String>,

    /// Budget, Revenue, Profit, Note or Popularity.
    #[arg(long)]
    metric: Option<Metric>,
}

#[derive(Args)]
struct EvolutionArgs {
    /// A country to chart; repeat the flag for several countries.
    /// Defaults to dashboard.default_countries.
    #[arg(long = "country")]
    countries: Vec<String>,

    /// Budget, Revenue or Profit.
    #[arg(long)]
    metric: Option<Metric>,

    /// First release year, inclusive.
    #[arg(long)]
    from: Option<i32>,

    /// Last release year, inclusive.
    #[arg(long)]
    to: Option<i32>,
}

// ==============================================================================
// Command Logic
// ==============================================================================

/// Loads the dataset behind a spinner.
async fn load_dataset(loader: DatasetLoader) -> Result<Dataset> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    spinner.set_message(format!("Loading the movie dataset from {}...", loader.source()));
    spinner.enable_steady_tick(Duration::from_millis(120));

    let loaded = loader.load().await;
    spinner.finish_and_clear();

    loaded.with_context(|| format!("Failed to load the dataset from {}", loader.source()))
}

fn run(dashboard: &Dashboard, command: Commands, json: bool) -> Result<()> {
    let image_base = dashboard.settings().image_base_url.as_str();
    let output = match command {
        Commands::Home => emit(&dashboard.home(), json, render::render_home)?,
        Commands::Movie { title } => {
            let details = dashboard.movie(&title)?;
            emit(&details, json, |details| render::render_movie(details, image_base))?
        }
        Commands::Titles { search } => {
            let titles = dashboard.titles(&search);
            emit(&titles, json, |titles| render::render_titles(titles))?
        }
        Commands::Actors(args) => {
            let listing = dashboard.actor_listing(&args.search, args.limit);
            emit(&listing, json, render::render_actor_listing)?
        }
        Commands::Actor { name } => {
            let profile = dashboard.actor(&name)?;
            emit(&profile, json, |profile| render::render_actor(profile, image_base))?
        }
        Commands::Averages(args) => {
            let metric = args.metric.unwrap_or(dashboard.settings().default_metric);
            let page = dashboard.averages(&args.countries, metric)?;
            emit(&page, json, render::render_averages)?
        }
        Commands::Evolution(args) => {
            let request = EvolutionRequest {
                countries: (!args.countries.is_empty()).then_some(args.countries),
                metric: args.metric,
                from: args.from,
                to: args.to,
            };
            let page = dashboard.evolution(request)?;
            emit(&page, json, render::render_evolution)?
        }
        Commands::Browse => {
            browse(dashboard)?;
            return Ok(());
        }
    };

    println!("{output}");
    Ok(())
}
