//! movie-finder CLI - terminal front end for the recommendation API.

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use movie_finder::{render, ClientConfig, HttpMovieClient, MovieApi, Page, RenderOutcome};

/// movie-finder - describe a movie, get semantic and graph recommendations
#[derive(Parser)]
#[command(name = "movie-finder")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Recommendation API base URL (overrides MOVIE_FINDER_API_URL)
    #[arg(short, long, global = true)]
    api_url: Option<String>,

    /// Request timeout in seconds (default: wait indefinitely)
    #[arg(short, long, global = true)]
    timeout: Option<u64>,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    format: OutputFormat,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the trending feed
    Trending,

    /// Get recommendations for a description
    Recommend(RecommendArgs),

    /// Interactive session: trending first, then one search per line
    Session,

    /// Check that the API is up
    Health,
}

#[derive(Parser)]
struct RecommendArgs {
    /// Free-text movie description
    query: String,

    /// Number of semantic matches
    #[arg(long)]
    vector_limit: Option<u32>,

    /// Number of graph expansions per semantic match
    #[arg(long)]
    graph_limit: Option<u32>,

    /// Probe poster URLs and fall back to placeholders for broken ones
    #[arg(long)]
    check_posters: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output
    Json,
    /// Compact single-line output
    Compact,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();
    }

    let mut config = ClientConfig::from_env()?;
    if let Some(url) = &cli.api_url {
        config = config.with_base_url(url);
    }
    if let Some(secs) = cli.timeout {
        config = config.with_timeout_secs(secs);
    }
    config.validate()?;

    match cli.command {
        Commands::Trending => run_trending(&config, cli.format).await,
        Commands::Recommend(args) => run_recommend(config, args, cli.format).await,
        Commands::Session => run_session(&config, cli.format).await,
        Commands::Health => run_health(&config).await,
    }
}

fn connect(config: &ClientConfig) -> Result<Arc<HttpMovieClient>> {
    Ok(Arc::new(HttpMovieClient::new(config)?))
}

fn print_outcome(outcome: &RenderOutcome, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print!("{}", render::text(outcome)),
        OutputFormat::Json => println!("{}", render::json(outcome)?),
        OutputFormat::Compact => print!("{}", render::compact(outcome)),
    }
    Ok(())
}

async fn run_trending(config: &ClientConfig, format: OutputFormat) -> Result<()> {
    let page = Page::new(connect(config)?, config);
    page.mount().await;
    print_outcome(&page.render().await, format)
}

async fn run_recommend(mut config: ClientConfig, args: RecommendArgs, format: OutputFormat) -> Result<()> {
    let vector_limit = args.vector_limit.unwrap_or(config.vector_limit);
    let graph_limit = args.graph_limit.unwrap_or(config.graph_limit);
    config = config.with_limits(vector_limit, graph_limit);

    let page = Page::new(connect(&config)?, &config);
    if page.submit(args.query).await.is_none() {
        eprintln!("Nothing to search for: the query is blank");
        return Ok(());
    }

    if args.check_posters {
        let broken = page.check_posters().await;
        if broken > 0 && matches!(format, OutputFormat::Text) {
            eprintln!("{} poster(s) failed to load, showing placeholders", broken);
        }
    }

    print_outcome(&page.render().await, format)
}

async fn run_session(config: &ClientConfig, format: OutputFormat) -> Result<()> {
    let page = Page::new(connect(config)?, config);
    page.mount().await;
    print_outcome(&page.render().await, format)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        if matches!(format, OutputFormat::Text) {
            eprint!("\nDescribe a movie (Ctrl-D to quit): ");
        }
        let Some(line) = lines.next_line().await? else {
            break;
        };
        if page.submit(line).await.is_some() {
            print_outcome(&page.render().await, format)?;
        }
    }

    page.unmount();
    Ok(())
}

async fn run_health(config: &ClientConfig) -> Result<()> {
    let client = connect(config)?;
    let result = client.health().await;
    println!("{}", render::health(client.base_url().as_str(), &result));
    Ok(())
}
