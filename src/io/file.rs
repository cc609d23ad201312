use std::path::Path;

use serde::Deserialize;

use crate::error::Result;
use crate::model::{ConstraintSeries, Dataset, Sample, TimeIndex, TimeIndexEntry};

/// Schedule shipped with the application, used when no dataset is configured.
pub const BUNDLED_SCHEDULE: &str = include_str!("../../data/sample_schedule.json");

/// On-disk shape of the schedule feed.
#[derive(Debug, Deserialize)]
struct ScheduleFeed {
    /// `[tjd, sogs-date, abs-time]` rows, one per day.
    calendar: Vec<(f64, String, i64)>,
    #[serde(default)]
    constraints: Vec<ConstraintFeed>,
}

#[derive(Debug, Deserialize)]
struct ConstraintFeed {
    name: String,
    /// `[tjd, priority]` pairs; the first one is the "no data" marker.
    samples: Vec<(f64, f64)>,
}

/// Parse a schedule feed from JSON text.
pub fn parse_dataset(json: &str) -> Result<Dataset> {
    let feed: ScheduleFeed = serde_json::from_str(json)?;

    let time_index = TimeIndex::build(
        feed.calendar
            .into_iter()
            .map(|(day, label, millis)| TimeIndexEntry::new(day, label, millis))
            .collect(),
    )?;
    let first_day = time_index.first().day_count;

    let constraints = feed
        .constraints
        .into_iter()
        .map(|c| {
            let samples = c
                .samples
                .into_iter()
                .map(|(day, value)| Sample::new(day, value))
                .collect();
            ConstraintSeries::new(c.name, samples, first_day)
        })
        .collect::<Result<Vec<_>>>()?;

    let dataset = Dataset::new(time_index, constraints)?;
    log::info!(
        "Loaded {} calendar days and {} constraints",
        dataset.time_index.len(),
        dataset.len()
    );
    Ok(dataset)
}

/// Load a schedule feed from a JSON file.
pub fn load_dataset(path: &Path) -> Result<Dataset> {
    let json = std::fs::read_to_string(path)?;
    parse_dataset(&json)
}

/// The schedule bundled into the binary.
pub fn bundled_dataset() -> Result<Dataset> {
    parse_dataset(BUNDLED_SCHEDULE)
}
