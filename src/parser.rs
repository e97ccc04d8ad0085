use crate::config::{DEFAULT_BASE_URL, DEFAULT_RESULTS_BLOCK_STYLE};
use crate::model::{Gender, MeetListing, RaceResult, Unit};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use tracing::{debug, info};
use url::Url;
use uuid::Uuid;

const LISTING_HEADER_TEXT: &str = "DatesCourseLMSC";
const RELAY_MARKER: &str = "Relay";
const MEN_MARKER: &str = "Men's Results";
const WOMEN_MARKER: &str = "Women's Results";

/// `MeetID=<word chars>` as a query parameter. Anything else leaves the id unset.
static MEET_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[?&]MeetID=(?P<meet_id>\w+)").expect("meet id regex must compile")
});

/// Event header, e.g. `Event 3  Women 50 Meter Freestyle`.
///
/// Stroke words are joined by single spaces, so a wider column gap ends the
/// stroke name.
static EVENT_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?P<distance>\d+)\s+(?P<unit>Meter|Yard)s?\s+(?P<stroke_type>[A-Za-z]+(?: [A-Za-z]+)*)",
    )
    .expect("event header regex must compile")
});

/// Ranked result line: rank, name, age, club, seed time, final time.
static RESULT_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\s*\d+\s+(?P<name>[\w\s,'.\-]+?)\s+(?P<age>\d+)\s+(?P<club>[\w\-]+)\s+(?P<seed_time>NT|[\d.:]+)\s+(?P<final_time>[\d.:]+)",
    )
    .expect("result line regex must compile")
});

static LISTING_ROWS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("table.meetlist tr").expect("listing row selector"));
static CELL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("td").expect("cell selector"));
static CELL_LINK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("td a").expect("cell link selector"));
static SEARCH_FORM: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"form[action="meetsearch.php"]"#).expect("search form selector")
});
static CATEGORY_OPTIONS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"select[name="c"] option"#).expect("option selector"));
static PRE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("pre").expect("pre selector"));
static DEFAULT_BASE: LazyLock<Url> =
    LazyLock::new(|| Url::parse(DEFAULT_BASE_URL).expect("default base url must parse"));

pub fn extract_meet_listing(html: &str) -> Vec<MeetListing> {
    extract_meet_listing_with_base(html, &DEFAULT_BASE)
}

pub fn extract_meet_listing_with_base(html: &str, base: &Url) -> Vec<MeetListing> {
    let document = Html::parse_document(html);
    let mut out = Vec::new();

    for row in document.select(&LISTING_ROWS).skip(1) {
        let row_text = element_text(row);
        let compact = row_text
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>();
        if compact.starts_with(LISTING_HEADER_TEXT) {
            continue;
        }

        let cells = row.select(&CELL).map(element_text).collect::<Vec<_>>();
        let (Some(date), Some(course), Some(lmsc)) = (cells.first(), cells.get(1), cells.get(2))
        else {
            debug!(row = %row_text.trim(), "meet list row has fewer than 3 cells; skipping");
            continue;
        };
        let Some((link, href)) = row
            .select(&CELL_LINK)
            .next()
            .and_then(|link| link.value().attr("href").map(|href| (link, href)))
        else {
            debug!(row = %row_text.trim(), "meet list row has no meet link; skipping");
            continue;
        };

        let meet_url = absolutize_url(base, href);
        let meet_id = meet_id_from_url(&meet_url);
        if meet_id.is_none() {
            debug!(url = %meet_url, "meet url carries no MeetID parameter");
        }

        out.push(MeetListing {
            date: date.trim().to_string(),
            course: course.trim().to_string(),
            lmsc: lmsc.trim().to_string(),
            name: element_text(link).trim().to_string(),
            meet_id,
            meet_url,
            meet_uuid: Uuid::new_v4(),
        });
    }

    out
}

pub fn meet_id_from_url(url: &str) -> Option<String> {
    MEET_ID
        .captures(url)
        .and_then(|caps| caps.name("meet_id"))
        .map(|m| m.as_str().to_string())
}

pub fn extract_participant_links(html: &str, meet_id: &str) -> Vec<String> {
    extract_participant_links_with_base(html, meet_id, &DEFAULT_BASE)
}

pub fn extract_participant_links_with_base(html: &str, meet_id: &str, base: &Url) -> Vec<String> {
    let document = Html::parse_document(html);
    let Some(form) = document.select(&SEARCH_FORM).next() else {
        debug!(meet_id, "no participant search form on meet page");
        return Vec::new();
    };
    let Ok(search_url) = base.join("meetsearch.php") else {
        return Vec::new();
    };

    form.select(&CATEGORY_OPTIONS)
        .filter_map(|option| option.value().attr("value"))
        .filter(|value| !value.trim().is_empty())
        .map(|value| {
            let mut url = search_url.clone();
            url.query_pairs_mut()
                .append_pair("c", value.trim())
                .append_pair("MeetID", meet_id);
            url.to_string()
        })
        .collect()
}

pub fn extract_individual_results(html: &str) -> Vec<RaceResult> {
    extract_individual_results_with_style(html, DEFAULT_RESULTS_BLOCK_STYLE)
}

/// Finds the preformatted results block by its exact `style` attribute and
/// scans it. A page without the block has no results, which is not an error.
pub fn extract_individual_results_with_style(html: &str, block_style: &str) -> Vec<RaceResult> {
    let document = Html::parse_document(html);
    let block = document
        .select(&PRE)
        .find(|pre| pre.value().attr("style").map(str::trim) == Some(block_style.trim()));

    let Some(block) = block else {
        info!("no results found for individual");
        return Vec::new();
    };

    scan_results_text(&element_text(block))
}

/// Context inherited by result lines from the headers above them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanContext {
    pub gender: Option<Gender>,
    pub event_name: Option<String>,
    pub stroke_type: Option<String>,
    pub distance: Option<String>,
    pub unit: Option<Unit>,
}

impl ScanContext {
    /// Context after reading `line`. Header lines replace fields, others keep them.
    pub fn advance(self, line: &str) -> ScanContext {
        let gender = if line.contains(WOMEN_MARKER) {
            Some(Gender::Women)
        } else if line.contains(MEN_MARKER) {
            Some(Gender::Men)
        } else {
            self.gender
        };

        let header = (line.contains("Meter") || line.contains("Yard"))
            .then(|| EVENT_HEADER.captures(line))
            .flatten();

        match header {
            Some(caps) => ScanContext {
                gender,
                event_name: Some(line.to_string()),
                stroke_type: caps.name("stroke_type").map(|m| m.as_str().to_string()),
                distance: caps.name("distance").map(|m| m.as_str().to_string()),
                unit: caps.name("unit").and_then(|m| Unit::from_name(m.as_str())),
            },
            None => ScanContext { gender, ..self },
        }
    }

    pub fn has_event(&self) -> bool {
        self.event_name.is_some()
    }

    /// The result on `line`, if any, stamped with this context.
    pub fn result_for(&self, line: &str) -> Option<RaceResult> {
        let caps = RESULT_LINE.captures(line)?;
        let field = |name: &str| caps.name(name).map(|m| m.as_str().trim().to_string());

        if !self.has_event() {
            debug!(line, "result line before any event header");
        }

        Some(RaceResult {
            name: field("name"),
            age: field("age"),
            event_name: self.event_name.clone(),
            club: field("club"),
            seed_time: field("seed_time"),
            final_time: field("final_time"),
            gender: self.gender,
            stroke_type: self.stroke_type.clone(),
            distance: self.distance.clone(),
            unit: self.unit,
            meet_list_uuid: None,
        })
    }
}

/// Folds the lines of a results block into result rows, stopping at the
/// relay section.
pub fn scan_results_text(text: &str) -> Vec<RaceResult> {
    let (_, rows) = text
        .lines()
        .take_while(|line| !line.contains(RELAY_MARKER))
        .fold(
            (ScanContext::default(), Vec::new()),
            |(context, mut rows), line| {
                let context = context.advance(line);
                if let Some(row) = context.result_for(line) {
                    rows.push(row);
                }
                (context, rows)
            },
        );
    rows
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>()
}

fn absolutize_url(base: &Url, value: &str) -> String {
    let value = value.trim();
    if value.starts_with("http://") || value.starts_with("https://") {
        return value.to_string();
    }

    match base.join(value) {
        Ok(joined) => joined.to_string(),
        Err(_) => format!("{}{}", base, value.trim_start_matches('/')),
    }
}
