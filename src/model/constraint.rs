use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::time_index::{TimeIndex, MILLIS_PER_DAY};

/// A single `(day count, priority)` step in a constraint's schedule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub day_count: f64,
    pub value: f64,
}

impl Sample {
    pub fn new(day_count: f64, value: f64) -> Self {
        Self { day_count, value }
    }
}

/// Result of evaluating a step function at a point in time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActiveValue {
    /// The query precedes the first change point.
    NoData,
    Value(f64),
}

impl ActiveValue {
    pub fn value(self) -> Option<f64> {
        match self {
            ActiveValue::NoData => None,
            ActiveValue::Value(v) => Some(v),
        }
    }
}

/// A named right-continuous step function of priority over time.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintSeries {
    pub name: String,
    samples: Vec<Sample>,
}

impl ConstraintSeries {
    /// Build a series from raw feed samples.
    ///
    /// A leading sample dated before `first_day` is the feed's "no data"
    /// marker and is dropped. Any other sample before `first_day` still sets
    /// the value at the start of the calendar, so the last of them is moved
    /// onto `first_day`. Day counts must be strictly increasing.
    pub fn new(name: impl Into<String>, raw: Vec<Sample>, first_day: f64) -> Result<Self> {
        let name = name.into();
        let mut samples = raw;
        if samples.first().is_some_and(|s| s.day_count < first_day) {
            samples.remove(0);
        }

        for pair in samples.windows(2) {
            if pair[1].day_count <= pair[0].day_count {
                return Err(Error::InvalidSeries {
                    name,
                    reason: format!(
                        "day counts must increase ({} follows {})",
                        pair[1].day_count, pair[0].day_count
                    ),
                });
            }
        }

        let before = samples.partition_point(|s| s.day_count < first_day);
        if before > 0 {
            let mut carried = samples[before - 1];
            let starts_on_first_day = samples
                .get(before)
                .is_some_and(|s| s.day_count == first_day);
            samples = samples.split_off(before);
            if !starts_on_first_day {
                log::debug!(
                    "Constraint '{}' carries {} from {} onto {}",
                    name,
                    carried.value,
                    carried.day_count,
                    first_day
                );
                carried.day_count = first_day;
                samples.insert(0, carried);
            }
        }

        for sample in samples.iter().filter(|s| !(0.0..=1.0).contains(&s.value)) {
            log::warn!(
                "Constraint '{}' has out-of-range priority {} at {}",
                name,
                sample.value,
                sample.day_count
            );
        }

        Ok(Self { name, samples })
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Consecutive `(start, end, value)` spans; the last one runs to `end_day`.
    pub fn spans(&self, end_day: f64) -> impl Iterator<Item = (f64, f64, f64)> + '_ {
        self.samples.iter().enumerate().map(move |(i, s)| {
            let next = self
                .samples
                .get(i + 1)
                .map_or(end_day, |n| n.day_count);
            (s.day_count, next, s.value)
        })
    }

    /// Evaluate the step function directly on the samples.
    pub fn active_value_at(&self, day_count: f64) -> ActiveValue {
        let upper = self.samples.partition_point(|s| s.day_count <= day_count);
        match upper.checked_sub(1) {
            Some(i) => ActiveValue::Value(self.samples[i].value),
            None => ActiveValue::NoData,
        }
    }
}

/// A change point resolved into all three time formats.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub day_count: f64,
    pub short_label: String,
    pub absolute_millis: i64,
    pub value: f64,
}

/// Change points of one series, ready for point-in-time queries.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionTable {
    pub name: String,
    transitions: Vec<Transition>,
    /// Last calendar row, holding the final value; closes the last span.
    end: Transition,
}

impl TransitionTable {
    pub fn build(series: &ConstraintSeries, index: &TimeIndex) -> Result<Self> {
        let transitions = series
            .samples()
            .iter()
            .map(|sample| resolve_transition(sample, index))
            .collect::<Result<Vec<_>>>()?;

        log::debug!(
            "Built transition table for '{}' ({} change points)",
            series.name,
            transitions.len()
        );

        let last = index.last();
        let end = Transition {
            day_count: last.day_count,
            short_label: last.short_label.clone(),
            absolute_millis: last.absolute_millis,
            value: transitions.last().map_or(0.0, |t| t.value),
        };

        Ok(Self {
            name: series.name.clone(),
            transitions,
            end,
        })
    }

    fn position_at(&self, day_count: f64) -> Option<usize> {
        self.transitions
            .partition_point(|t| t.day_count <= day_count)
            .checked_sub(1)
    }

    pub fn active_value_at(&self, day_count: f64) -> ActiveValue {
        match self.position_at(day_count) {
            Some(i) => ActiveValue::Value(self.transitions[i].value),
            None => ActiveValue::NoData,
        }
    }

    /// The active change point at `day_count` and the one that ends it. The
    /// last change point is closed by the final calendar row.
    pub fn span_at(&self, day_count: f64) -> Option<(&Transition, &Transition)> {
        let i = self.position_at(day_count)?;
        Some((
            &self.transitions[i],
            self.transitions.get(i + 1).unwrap_or(&self.end),
        ))
    }
}

/// Attach label and absolute time to a sample, interpolating within a day
/// when the change point is off the index grid.
fn resolve_transition(sample: &Sample, index: &TimeIndex) -> Result<Transition> {
    if let Ok(entry) = index.lookup_by_day_count(sample.day_count) {
        return Ok(Transition {
            day_count: sample.day_count,
            short_label: entry.short_label.clone(),
            absolute_millis: entry.absolute_millis,
            value: sample.value,
        });
    }

    let entry = index
        .find_latest_at_or_before(sample.day_count)
        .ok_or(Error::IndexMiss {
            day_count: sample.day_count,
        })?;
    let offset_days = sample.day_count - entry.day_count;
    if offset_days >= 1.0 {
        return Err(Error::IndexMiss {
            day_count: sample.day_count,
        });
    }
    let offset_millis = (offset_days * MILLIS_PER_DAY).round() as i64;

    Ok(Transition {
        day_count: sample.day_count,
        short_label: offset_label(&entry.short_label, offset_millis),
        absolute_millis: entry.absolute_millis + offset_millis,
        value: sample.value,
    })
}

/// Replace the time-of-day of a `YYYY.DDD:HH:MM:SS` label with an offset from midnight.
fn offset_label(label: &str, offset_millis: i64) -> String {
    let date = label.split(':').next().unwrap_or(label);
    let seconds = (offset_millis as f64 / 1000.0).round() as i64;
    format!(
        "{}:{:02}:{:02}:{:02}",
        date,
        seconds / 3600,
        (seconds % 3600) / 60,
        seconds % 60
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::time_index::TimeIndexEntry;

    const SENTINEL: f64 = -66666666666666.0;

    fn index() -> TimeIndex {
        let entries = (0..10)
            .map(|i| {
                TimeIndexEntry::new(
                    12914.5 + i as f64,
                    format!("2014.{:03}:00:00:00", 257 + i),
                    1115812800000 + i as i64 * 86_400_000,
                )
            })
            .collect();
        TimeIndex::build(entries).unwrap()
    }

    fn series() -> ConstraintSeries {
        ConstraintSeries::new(
            "Constraint 1",
            vec![
                Sample::new(SENTINEL, 0.0),
                Sample::new(12915.5, 0.10286),
                Sample::new(12916.5, 0.0),
                Sample::new(12917.5, 0.04286),
                Sample::new(12919.5, 0.21617),
            ],
            12914.5,
        )
        .unwrap()
    }

    #[test]
    fn sentinel_sample_is_not_plotted() {
        let s = series();
        assert_eq!(s.samples().len(), 4);
        assert_eq!(s.samples()[0].day_count, 12915.5);
    }

    #[test]
    fn step_function_holds_left_value() {
        let s = series();
        assert_eq!(s.active_value_at(12918.0), ActiveValue::Value(0.04286));
        assert_eq!(s.active_value_at(12917.5), ActiveValue::Value(0.04286));
        assert_eq!(s.active_value_at(12915.0), ActiveValue::NoData);
        assert_eq!(s.active_value_at(12923.0), ActiveValue::Value(0.21617));

        let table = TransitionTable::build(&s, &index()).unwrap();
        assert_eq!(table.active_value_at(12918.0), ActiveValue::Value(0.04286));
        assert_eq!(table.active_value_at(12916.7).value(), Some(0.0));
        assert_eq!(table.active_value_at(12900.0), ActiveValue::NoData);
    }

    #[test]
    fn spans_extend_last_sample_to_end() {
        let spans: Vec<_> = series().spans(12923.5).collect();
        assert_eq!(spans.len(), 4);
        assert_eq!(spans[2], (12917.5, 12919.5, 0.04286));
        assert_eq!(spans[3], (12919.5, 12923.5, 0.21617));
    }

    #[test]
    fn grid_transitions_use_index_labels() {
        let table = TransitionTable::build(&series(), &index()).unwrap();
        let (first, _) = table.span_at(12915.5).unwrap();
        assert_eq!(first.short_label, "2014.258:00:00:00");
        assert_eq!(first.absolute_millis, 1115899200000);
    }

    #[test]
    fn off_grid_transitions_are_interpolated() {
        let s = ConstraintSeries::new(
            "Constraint 3",
            vec![Sample::new(SENTINEL, 0.0), Sample::new(12915.1, 0.18759)],
            12914.5,
        )
        .unwrap();
        let table = TransitionTable::build(&s, &index()).unwrap();
        let (t, _) = table.span_at(12915.1).unwrap();
        assert_eq!(t.short_label, "2014.257:14:24:00");
        assert_eq!(t.absolute_millis, 1115864640000);
    }

    #[test]
    fn span_reports_next_transition() {
        let table = TransitionTable::build(&series(), &index()).unwrap();
        let (active, next) = table.span_at(12918.2).unwrap();
        assert_eq!(active.day_count, 12917.5);
        assert_eq!(next.day_count, 12919.5);

        let (last, end) = table.span_at(12922.0).unwrap();
        assert_eq!(last.day_count, 12919.5);
        assert_eq!(end.day_count, 12923.5);
        assert_eq!(end.short_label, "2014.266:00:00:00");
        assert_eq!(end.value, 0.21617);
        assert!(table.span_at(12915.0).is_none());
    }

    #[test]
    fn change_before_first_day_carries_into_range() {
        let s = ConstraintSeries::new(
            "Constraint 6",
            vec![
                Sample::new(SENTINEL, 0.0),
                Sample::new(12900.5, 0.3),
                Sample::new(12910.5, 0.2),
                Sample::new(12916.5, 0.1),
            ],
            12914.5,
        )
        .unwrap();
        assert_eq!(s.samples(), &[Sample::new(12914.5, 0.2), Sample::new(12916.5, 0.1)]);
        assert_eq!(s.active_value_at(12915.0), ActiveValue::Value(0.2));

        let table = TransitionTable::build(&s, &index()).unwrap();
        let (active, next) = table.span_at(12915.0).unwrap();
        assert_eq!(active.short_label, "2014.257:00:00:00");
        assert_eq!(active.value, 0.2);
        assert_eq!(next.day_count, 12916.5);
    }

    #[test]
    fn sample_on_first_day_wins_over_earlier_ones() {
        let s = ConstraintSeries::new(
            "Constraint 7",
            vec![
                Sample::new(SENTINEL, 0.0),
                Sample::new(12900.5, 0.3),
                Sample::new(12914.5, 0.4),
            ],
            12914.5,
        )
        .unwrap();
        assert_eq!(s.samples(), &[Sample::new(12914.5, 0.4)]);
    }

    #[test]
    fn out_of_order_samples_are_rejected() {
        let result = ConstraintSeries::new(
            "bad",
            vec![Sample::new(12916.5, 0.1), Sample::new(12915.5, 0.2)],
            12914.5,
        );
        assert!(matches!(result, Err(Error::InvalidSeries { .. })));
    }

    #[test]
    fn samples_outside_index_fail_loudly() {
        let late = ConstraintSeries::new("late", vec![Sample::new(20000.5, 0.3)], 12914.5).unwrap();
        assert!(matches!(
            TransitionTable::build(&late, &index()),
            Err(Error::IndexMiss { .. })
        ));

        let early = ConstraintSeries::new("early", vec![Sample::new(12914.5, 0.3)], 0.0).unwrap();
        let shifted = TimeIndex::build(vec![TimeIndexEntry::new(12915.5, "x", 0)]).unwrap();
        assert!(matches!(
            TransitionTable::build(&early, &shifted),
            Err(Error::IndexMiss { .. })
        ));
    }
}
