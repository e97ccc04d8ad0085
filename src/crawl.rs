use crate::config::CrawlConfig;
use crate::fetch::PageFetcher;
use crate::model::{CrawlReport, MeetListing, RaceResult};
use crate::parser::{
    extract_individual_results_with_style, extract_meet_listing_with_base,
    extract_participant_links_with_base,
};
use anyhow::Result;
use std::ops::Range;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Default)]
pub struct CrawlOutput {
    pub meets: Vec<MeetListing>,
    pub results: Vec<RaceResult>,
    pub report: CrawlReport,
}

/// Walks meet-list pages, then every meet, then every participant category,
/// one request at a time. A page that fails to fetch contributes no rows.
pub fn crawl(
    fetcher: &dyn PageFetcher,
    config: &CrawlConfig,
    pages: Range<usize>,
) -> Result<CrawlOutput> {
    let base = config.base()?;
    let mut output = CrawlOutput::default();

    for page in pages {
        let url = config.meet_list_url(page)?;
        match fetcher.fetch(&url) {
            Ok(body) => {
                let meets = extract_meet_listing_with_base(&body, &base);
                info!(page, meets = meets.len(), url = %url, "meet list page parsed");
                output.report.list_pages_fetched += 1;
                output.meets.extend(meets);
            }
            Err(err) => warn!(page, url = %url, error = %err, "meet list page fetch failed"),
        }
    }
    output.report.meets_listed = output.meets.len();

    for meet in &output.meets {
        let Some(meet_id) = meet.meet_id.as_deref() else {
            info!(meet = %meet.name, url = %meet.meet_url, "meet has no id; skipping results");
            continue;
        };

        info!(meet = %meet.name, meet_id, "fetching meet");
        let body = match fetcher.fetch(&meet.meet_url) {
            Ok(body) => body,
            Err(err) => {
                warn!(meet_id, error = %err, "meet page fetch failed");
                continue;
            }
        };
        output.report.meets_fetched += 1;

        let participant_urls = extract_participant_links_with_base(&body, meet_id, &base);
        info!(meet_id, participants = participant_urls.len(), "found participants");

        for participant_url in participant_urls {
            let body = match fetcher.fetch(&participant_url) {
                Ok(body) => body,
                Err(err) => {
                    output.report.participant_pages_failed += 1;
                    warn!(url = %participant_url, error = %err, "participant page fetch failed");
                    continue;
                }
            };
            output.report.participant_pages += 1;

            let mut rows =
                extract_individual_results_with_style(&body, &config.results_block_style);
            debug!(url = %participant_url, rows = rows.len(), "participant results parsed");
            for row in &mut rows {
                row.meet_list_uuid = Some(meet.meet_uuid.to_string());
            }
            output.results.extend(rows);
        }
    }
    output.report.results_parsed = output.results.len();

    Ok(output)
}
