//! Conference Deadlines - Main Entry Point
//!
//! Command-line front end for the `conf_deadlines` library: loads a catalog,
//! applies the filter arguments and prints the deadline-ordered listing.

use anyhow::Result;
use clap::{CommandFactory, Parser};
use conf_deadlines::countdown::TICK_PERIOD;
use conf_deadlines::{CountdownTicker, DeadlineBoard, FilterCriteria, formatting, query, validation};
use tracing_subscriber::{EnvFilter, prelude::*};

/// List academic conferences ordered by their next submission deadline
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the conference catalog (TOML, or JSON with a .json extension)
    file: String,

    /// Only conferences with one of these tags (comma-separated)
    #[arg(long)]
    tags: Option<String>,

    /// Only conferences in one of these countries (comma-separated)
    #[arg(long)]
    countries: Option<String>,

    /// Only conferences of one of these years (comma-separated)
    #[arg(long)]
    years: Option<String>,

    /// Only conferences with one of these ERA ratings (comma-separated)
    #[arg(long)]
    ratings: Option<String>,

    /// Case-insensitive search in title and full name
    #[arg(long)]
    search: Option<String>,

    /// Also list conferences whose deadlines have all passed
    #[arg(long)]
    include_past: bool,

    /// Seed the filters from a shared query string (e.g., "tags=robotics&years=2025")
    #[arg(long)]
    query: Option<String>,

    /// Timezone for deadlines that do not name one (defaults to the system zone)
    #[arg(long)]
    timezone: Option<String>,

    /// Print the available filter values and exit
    #[arg(long)]
    facets: bool,

    /// Keep refreshing deadline countdowns every second until Ctrl-C
    #[arg(long)]
    watch: bool,
}

impl Args {
    /// Build filter criteria: query string first, explicit flags override
    fn criteria(&self) -> Result<FilterCriteria> {
        let mut criteria = self
            .query
            .as_deref()
            .map(query::decode_query)
            .unwrap_or_default();

        if let Some(ref tags) = self.tags {
            criteria = criteria.with_tags(validation::parse_list(tags));
        }
        if let Some(ref countries) = self.countries {
            criteria = criteria.with_countries(validation::parse_list(countries));
        }
        if let Some(ref years) = self.years {
            criteria = criteria.with_years(validation::parse_year_list(years)?);
        }
        if let Some(ref ratings) = self.ratings {
            criteria = criteria.with_ratings(validation::parse_list(ratings));
        }
        if let Some(ref search) = self.search {
            criteria = criteria.with_search(search);
        }
        Ok(criteria.with_include_past(self.include_past))
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(env_filter),
        )
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Check if no arguments were provided (except the program name)
    if std::env::args().len() == 1 {
        // No arguments provided, show help and exit with error code
        let mut cmd = Args::command();
        cmd.print_help().ok();
        println!(); // Add a newline after help
        std::process::exit(2);
    }

    let args = Args::parse();
    init_tracing();

    let mut board = DeadlineBoard::new(&args.file)?;
    if let Some(ref tz) = args.timezone {
        board = board.with_local_zone(validation::parse_zone(tz)?);
    }

    if args.facets {
        print!("{}", formatting::format_facets(board.catalog()));
        return Ok(());
    }

    let criteria = args.criteria()?;
    let clock = board.clock();
    println!("{}", board.render(&criteria, &clock));

    let shared = board.share_query(&criteria);
    if !shared.is_empty() {
        println!("Share: ?{}", shared);
    }

    if args.watch {
        watch(&board, &criteria).await?;
    }

    Ok(())
}

/// Redraw countdowns every tick until Ctrl-C
async fn watch(board: &DeadlineBoard, criteria: &FilterCriteria) -> Result<()> {
    let clock = board.clock();
    // The listing is fixed for the session; only the countdowns move.
    let listed: Vec<_> = board
        .list_at(criteria, &clock)
        .into_iter()
        .cloned()
        .collect();

    let ticker = CountdownTicker::spawn(TICK_PERIOD, move |now| {
        let refs: Vec<_> = listed.iter().collect();
        print!("\x1b[2J\x1b[H{}", formatting::format_countdowns(&refs, &clock.at(now)));
    });

    tokio::signal::ctrl_c().await?;
    ticker.cancel();
    tracing::debug!("watch stopped");
    Ok(())
}
