use crate::aggregate::aggregate;
use crate::clean::{CleanReport, TimeFailurePolicy, clean_results};
use crate::config::{CrawlConfig, load_crawl_config};
use crate::crawl::crawl;
use crate::fetch::{HttpFetcher, PageFetcher};
use crate::model::{CleanedRaceResult, CrawlReport, MeetInfo, SwimmerEventSummary};
use crate::query::{Bucket, SeedQuery, histogram};
use crate::store::{
    CLEANED_RESULTS_FILE, MEET_LIST_FILE, MEET_RESULTS_FILE, SUMMARY_FILE, find_meet_results,
    load_meet_lists, load_meet_results, write_rows,
};
use crate::timing::TimeParseError;
use anyhow::{Context, Result, bail};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("no meet*_results.csv files found in {}", .0.display())]
    NoResultFiles(PathBuf),

    #[error("cleaning aborted on a malformed final time")]
    Time(#[from] TimeParseError),
}

#[derive(Debug, Clone)]
pub struct ScrapeOptions {
    pub config_path: Option<PathBuf>,
    pub start_page: usize,
    pub end_page: usize,
    pub save_dir: PathBuf,
}

#[derive(Debug, Clone)]
pub struct CleanOptions {
    pub data_dir: PathBuf,
    pub policy: TimeFailurePolicy,
}

#[derive(Debug, Clone)]
pub struct ExpectOptions {
    pub data_dir: PathBuf,
    pub policy: TimeFailurePolicy,
    pub query: SeedQuery,
}

#[derive(Debug, Clone)]
pub struct Dataset {
    pub results: Vec<CleanedRaceResult>,
    pub summaries: Vec<SwimmerEventSummary>,
    pub report: CleanReport,
    /// Keyed by meet uuid; empty when no meet list files are present.
    pub meets: HashMap<String, MeetInfo>,
}

impl Dataset {
    pub fn meet_of(&self, result: &CleanedRaceResult) -> Option<&MeetInfo> {
        self.meets.get(&result.meet_list_uuid)
    }
}

pub fn load_config(path: Option<&std::path::Path>) -> Result<CrawlConfig> {
    match path {
        Some(path) => load_crawl_config(path),
        None => Ok(CrawlConfig::default()),
    }
}

pub fn scrape_to_dir(options: &ScrapeOptions) -> Result<CrawlReport> {
    let config = load_config(options.config_path.as_deref())?;
    let fetcher = HttpFetcher::new(&config)?;
    scrape_with_fetcher(&fetcher, &config, options)
}

pub fn scrape_with_fetcher(
    fetcher: &dyn PageFetcher,
    config: &CrawlConfig,
    options: &ScrapeOptions,
) -> Result<CrawlReport> {
    if options.end_page <= options.start_page {
        bail!(
            "nothing to scrape: start page {} is not before end page {}",
            options.start_page,
            options.end_page
        );
    }

    let output = crawl(fetcher, config, options.start_page..options.end_page)?;

    let list_path = options.save_dir.join(MEET_LIST_FILE);
    write_rows(&list_path, &output.meets)?;
    info!(file = %list_path.display(), rows = output.meets.len(), "meet list written");

    let results_path = options.save_dir.join(MEET_RESULTS_FILE);
    write_rows(&results_path, &output.results)?;
    info!(file = %results_path.display(), rows = output.results.len(), "meet results written");

    Ok(output.report)
}

/// Loads every results file in the directory, cleans and aggregates them, and
/// indexes the meet lists next to them for lookups by meet uuid.
pub fn load_dataset(options: &CleanOptions) -> Result<Dataset> {
    if find_meet_results(&options.data_dir)?.is_empty() {
        return Err(PipelineError::NoResultFiles(options.data_dir.clone()).into());
    }

    let raw = load_meet_results(&options.data_dir)?;
    let batch = clean_results(raw, options.policy).map_err(PipelineError::from)?;
    let summaries = aggregate(&batch.rows);

    let meets = load_meet_lists(&options.data_dir)?
        .iter()
        .map(|meet| (meet.meet_uuid.to_string(), MeetInfo::from(meet)))
        .collect::<HashMap<_, _>>();
    let unmatched = batch
        .rows
        .iter()
        .filter(|row| !meets.contains_key(&row.meet_list_uuid))
        .count();

    info!(
        rows = batch.report.input_rows,
        kept = batch.report.kept_rows,
        summaries = summaries.len(),
        meets = meets.len(),
        unmatched,
        "dataset prepared"
    );

    Ok(Dataset {
        results: batch.rows,
        summaries,
        report: batch.report,
        meets,
    })
}

pub fn clean_dataset(options: &CleanOptions) -> Result<CleanReport> {
    let dataset = load_dataset(options)?;

    let cleaned_path = options.data_dir.join(CLEANED_RESULTS_FILE);
    write_rows(&cleaned_path, &dataset.results)
        .with_context(|| format!("failed to save cleaned results to {}", cleaned_path.display()))?;

    let summary_path = options.data_dir.join(SUMMARY_FILE);
    write_rows(&summary_path, &dataset.summaries)
        .with_context(|| format!("failed to save summaries to {}", summary_path.display()))?;

    Ok(dataset.report)
}

pub fn expect_times(options: &ExpectOptions) -> Result<Vec<Bucket>> {
    let dataset = load_dataset(&CleanOptions {
        data_dir: options.data_dir.clone(),
        policy: options.policy,
    })?;

    let times = options.query.mean_times(&dataset.summaries);
    info!(swimmers = times.len(), "matched swimmers for query");
    Ok(histogram(&times))
}
