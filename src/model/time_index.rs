use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Milliseconds in one calendar day.
pub const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// One row of the calendar table: the same instant in all three time formats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeIndexEntry {
    pub day_count: f64,
    /// Full calendar label as supplied by the feed, e.g. `2014.222:00:00:00`.
    pub short_label: String,
    /// Unix epoch milliseconds.
    pub absolute_millis: i64,
}

impl TimeIndexEntry {
    pub fn new(day_count: f64, short_label: impl Into<String>, absolute_millis: i64) -> Self {
        Self {
            day_count,
            short_label: short_label.into(),
            absolute_millis,
        }
    }

    /// The absolute time as a UTC timestamp, if representable.
    pub fn absolute_time(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        chrono::DateTime::from_timestamp_millis(self.absolute_millis)
    }
}

/// Ordered day-count → calendar lookup table, one entry per calendar day.
#[derive(Debug, Clone)]
pub struct TimeIndex {
    entries: Vec<TimeIndexEntry>,
}

/// Snap an arbitrary day count onto the whole-day-plus-half grid.
pub fn snap_to_grid(day_count: f64) -> f64 {
    day_count.floor() + 0.5
}

impl TimeIndex {
    /// Build the index from entries already sorted by day count.
    pub fn build(entries: Vec<TimeIndexEntry>) -> Result<Self> {
        if entries.is_empty() {
            return Err(Error::InvalidTimeIndex("no calendar entries".into()));
        }

        for pair in entries.windows(2) {
            let step = pair[1].day_count - pair[0].day_count;
            if (step - 1.0).abs() > 1e-9 {
                return Err(Error::InvalidTimeIndex(format!(
                    "entries {} and {} are not one day apart",
                    pair[0].day_count, pair[1].day_count
                )));
            }
        }

        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn first(&self) -> &TimeIndexEntry {
        &self.entries[0]
    }

    pub fn last(&self) -> &TimeIndexEntry {
        &self.entries[self.entries.len() - 1]
    }

    /// Exact-match lookup. The caller snaps pixel-derived values first.
    pub fn lookup_by_day_count(&self, day_count: f64) -> Result<&TimeIndexEntry> {
        self.entries
            .binary_search_by(|e| e.day_count.total_cmp(&day_count))
            .map(|i| &self.entries[i])
            .map_err(|_| Error::IndexMiss { day_count })
    }

    /// The entry with the greatest day count ≤ `day_count`.
    pub fn find_latest_at_or_before(&self, day_count: f64) -> Option<&TimeIndexEntry> {
        let upper = self.entries.partition_point(|e| e.day_count <= day_count);
        upper.checked_sub(1).map(|i| &self.entries[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_index() -> TimeIndex {
        TimeIndex::build(vec![
            TimeIndexEntry::new(12879.5, "2014.222:00:00:00", 1112788800000),
            TimeIndexEntry::new(12880.5, "2014.223:00:00:00", 1112875200000),
            TimeIndexEntry::new(12881.5, "2014.224:00:00:00", 1112961600000),
        ])
        .unwrap()
    }

    #[test]
    fn exact_lookup_hits_grid_values() {
        let index = sample_index();
        let entry = index.lookup_by_day_count(12880.5).unwrap();
        assert_eq!(entry.short_label, "2014.223:00:00:00");
        assert_eq!(entry.absolute_millis, 1112875200000);
    }

    #[test]
    fn exact_lookup_reports_index_miss() {
        let index = sample_index();
        let err = index.lookup_by_day_count(12880.2).unwrap_err();
        assert!(matches!(err, Error::IndexMiss { day_count } if day_count == 12880.2));
        assert!(index.lookup_by_day_count(13000.5).is_err());
    }

    #[test]
    fn latest_at_or_before() {
        let index = sample_index();
        assert_eq!(index.find_latest_at_or_before(12880.9).unwrap().day_count, 12880.5);
        assert_eq!(index.find_latest_at_or_before(12880.5).unwrap().day_count, 12880.5);
        assert_eq!(index.find_latest_at_or_before(99999.0).unwrap().day_count, 12881.5);
        assert!(index.find_latest_at_or_before(12879.4).is_none());
    }

    #[test]
    fn rejects_gaps_and_empty_input() {
        assert!(TimeIndex::build(Vec::new()).is_err());
        let gap = TimeIndex::build(vec![
            TimeIndexEntry::new(1.5, "a", 0),
            TimeIndexEntry::new(3.5, "b", 0),
        ]);
        assert!(matches!(gap, Err(Error::InvalidTimeIndex(_))));
    }

    #[test]
    fn snapping_lands_on_half_days() {
        assert_eq!(snap_to_grid(12900.0), 12900.5);
        assert_eq!(snap_to_grid(12900.99), 12900.5);
        assert_eq!(snap_to_grid(12879.5), 12879.5);
    }

    #[test]
    fn absolute_time_converts_millis() {
        let index = sample_index();
        let time = index.first().absolute_time().unwrap();
        assert_eq!(time.timestamp_millis(), 1112788800000);
    }
}
