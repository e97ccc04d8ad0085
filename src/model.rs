use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Gender {
    Men,
    Women,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Men => "Men",
            Gender::Women => "Women",
        }
    }

    pub fn from_name(value: &str) -> Option<Self> {
        match value.trim() {
            "Men" => Some(Gender::Men),
            "Women" => Some(Gender::Women),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Unit {
    Meters,
    Yards,
}

impl Unit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Meters => "Meters",
            Unit::Yards => "Yards",
        }
    }

    pub fn from_name(value: &str) -> Option<Self> {
        match value.trim() {
            "Meters" | "Meter" => Some(Unit::Meters),
            "Yards" | "Yard" => Some(Unit::Yards),
            _ => None,
        }
    }
}

/// The five individual strokes a result can be aggregated under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Stroke {
    Freestyle,
    Breaststroke,
    Backstroke,
    #[serde(rename = "Individual Medley")]
    IndividualMedley,
    Butterfly,
}

impl Stroke {
    pub const ALL: [Stroke; 5] = [
        Stroke::Freestyle,
        Stroke::Breaststroke,
        Stroke::Backstroke,
        Stroke::IndividualMedley,
        Stroke::Butterfly,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stroke::Freestyle => "Freestyle",
            Stroke::Breaststroke => "Breaststroke",
            Stroke::Backstroke => "Backstroke",
            Stroke::IndividualMedley => "Individual Medley",
            Stroke::Butterfly => "Butterfly",
        }
    }

    /// Exact, case-sensitive match against the stroke vocabulary.
    pub fn from_name(value: &str) -> Option<Self> {
        Stroke::ALL.into_iter().find(|stroke| stroke.as_str() == value)
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Stroke {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the meet-list table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MeetListing {
    pub date: String,
    pub course: String,
    pub lmsc: String,
    pub name: String,
    pub meet_id: Option<String>,
    pub meet_url: String,
    pub meet_uuid: Uuid,
}

impl MeetListing {
    pub fn meet_date(&self) -> Option<NaiveDate> {
        self.meet_id.as_deref().and_then(meet_date_from_id)
    }
}

/// Meet details looked up for a result through its `meet_list_uuid`.
#[derive(Debug, Clone, PartialEq)]
pub struct MeetInfo {
    pub name: String,
    pub course: String,
    pub date: Option<NaiveDate>,
}

impl From<&MeetListing> for MeetInfo {
    fn from(meet: &MeetListing) -> Self {
        Self {
            name: meet.name.clone(),
            course: meet.course.clone(),
            date: meet.meet_date(),
        }
    }
}

/// Meet ids are prefixed with the start date as `YYYYMMDD`.
pub fn meet_date_from_id(meet_id: &str) -> Option<NaiveDate> {
    let prefix = meet_id.get(..8)?;
    NaiveDate::parse_from_str(prefix, "%Y%m%d").ok()
}

/// A raw result row, either scanned from a results page or read back from a
/// `meet*_results.csv` file. Anything can be missing at this stage.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RaceResult {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub age: Option<String>,
    #[serde(rename = "event name", alias = "event_name", default)]
    pub event_name: Option<String>,
    #[serde(default)]
    pub club: Option<String>,
    #[serde(rename = "seed time", alias = "seed_time", default)]
    pub seed_time: Option<String>,
    #[serde(rename = "final time", alias = "final_time", default)]
    pub final_time: Option<String>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub gender: Option<Gender>,
    #[serde(rename = "stroke type", alias = "stroke_type", default)]
    pub stroke_type: Option<String>,
    #[serde(default)]
    pub distance: Option<String>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub unit: Option<Unit>,
    #[serde(default)]
    pub meet_list_uuid: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CleanedRaceResult {
    pub name: String,
    pub age: u32,
    #[serde(rename = "event name")]
    pub event_name: String,
    pub club: String,
    #[serde(rename = "seed time")]
    pub seed_time: String,
    #[serde(rename = "final time")]
    pub final_time: String,
    pub gender: Gender,
    #[serde(rename = "stroke type")]
    pub stroke_type: Stroke,
    pub distance: String,
    pub unit: Unit,
    pub meet_list_uuid: String,
    pub final_time_s: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SwimmerEventSummary {
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    pub distance: String,
    pub unit: Unit,
    pub stroke_type: Stroke,
    pub mean_final_time_s: f64,
    pub std_final_time_s: Option<f64>,
    pub number_of_swims: usize,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CrawlReport {
    pub list_pages_fetched: usize,
    pub meets_listed: usize,
    pub meets_fetched: usize,
    pub participant_pages: usize,
    pub participant_pages_failed: usize,
    pub results_parsed: usize,
}
