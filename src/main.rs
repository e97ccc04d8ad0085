use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use swimseed::clean::TimeFailurePolicy;
use swimseed::model::{Gender, Stroke, Unit};
use swimseed::pipeline::{
    CleanOptions, ExpectOptions, ScrapeOptions, clean_dataset, expect_times, scrape_to_dir,
};
use swimseed::query::{SeedQuery, render_histogram};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "swimseed", about = "Masters swim results scraper and seed-time estimator")]
struct Cli {
    /// Log at debug level.
    #[arg(long, short, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Crawl meet-list pages and write meet_list.csv / meet_results.csv.
    Scrape {
        /// Exclusive end page; every page lists 100 meets.
        #[arg(long, short = 'n', default_value_t = 5)]
        pages: usize,
        #[arg(long, default_value_t = 0)]
        start_page: usize,
        #[arg(long, short, default_value = "data")]
        save_dir: PathBuf,
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Clean every meet*_results.csv in a directory and write summaries.
    Clean {
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,
        /// Drop rows with malformed final times instead of failing.
        #[arg(long, default_value_t = false)]
        drop_bad_times: bool,
    },
    /// Histogram of mean final times for swimmers matching an event and age.
    Expect {
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,
        #[arg(long, value_parser = parse_gender)]
        gender: Gender,
        #[arg(long, value_parser = parse_stroke)]
        stroke: Stroke,
        #[arg(long)]
        distance: u32,
        #[arg(long, value_parser = parse_unit)]
        unit: Unit,
        #[arg(long, default_value_t = 25)]
        age: u32,
        #[arg(long, default_value_t = 0)]
        age_range: u32,
        #[arg(long, default_value_t = false)]
        drop_bad_times: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    match cli.command {
        Commands::Scrape {
            pages,
            start_page,
            save_dir,
            config,
        } => {
            let report = scrape_to_dir(&ScrapeOptions {
                config_path: config,
                start_page,
                end_page: pages,
                save_dir,
            })?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Clean {
            data_dir,
            drop_bad_times,
        } => {
            let report = clean_dataset(&CleanOptions {
                data_dir,
                policy: policy(drop_bad_times),
            })?;
            info!(
                input = report.input_rows,
                kept = report.kept_rows,
                rejected = ?report.rejected,
                "clean complete"
            );
        }
        Commands::Expect {
            data_dir,
            gender,
            stroke,
            distance,
            unit,
            age,
            age_range,
            drop_bad_times,
        } => {
            let buckets = expect_times(&ExpectOptions {
                data_dir,
                policy: policy(drop_bad_times),
                query: SeedQuery {
                    gender,
                    stroke,
                    distance: distance.to_string(),
                    unit,
                    age,
                    age_range,
                },
            })?;
            if buckets.is_empty() {
                println!("no swimmers match this event and age");
            } else {
                println!("{}", render_histogram(&buckets));
            }
        }
    }

    Ok(())
}

fn policy(drop_bad_times: bool) -> TimeFailurePolicy {
    if drop_bad_times {
        TimeFailurePolicy::DropRow
    } else {
        TimeFailurePolicy::Abort
    }
}

fn parse_gender(value: &str) -> Result<Gender, String> {
    Gender::from_name(value).ok_or_else(|| format!("expected Men or Women, got {value}"))
}

fn parse_stroke(value: &str) -> Result<Stroke, String> {
    Stroke::from_name(value).ok_or_else(|| {
        let names = Stroke::ALL.map(|s| s.as_str()).join(", ");
        format!("expected one of {names}, got {value}")
    })
}

fn parse_unit(value: &str) -> Result<Unit, String> {
    Unit::from_name(value).ok_or_else(|| format!("expected Meters or Yards, got {value}"))
}

fn init_tracing(verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|err| anyhow::anyhow!(err.to_string()))?;
    Ok(())
}
