use crate::error::{Error, Result};
use crate::model::constraint::ConstraintSeries;
use crate::model::time_index::TimeIndex;
use crate::model::view::ViewRange;

/// Typed handle to a series inside a [`Dataset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SeriesId(pub usize);

/// Everything loaded at startup: the calendar table and the constraint series.
/// Read-only once built.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub time_index: TimeIndex,
    constraints: Vec<ConstraintSeries>,
}

impl Dataset {
    pub fn new(time_index: TimeIndex, constraints: Vec<ConstraintSeries>) -> Result<Self> {
        let global = ViewRange::new(time_index.first().day_count, time_index.last().day_count);

        for series in &constraints {
            if let Some(outside) = series
                .samples()
                .iter()
                .find(|s| s.day_count > global.end)
            {
                return Err(Error::InvalidSeries {
                    name: series.name.clone(),
                    reason: format!(
                        "change point {} is past the end of the calendar ({})",
                        outside.day_count, global.end
                    ),
                });
            }
        }

        Ok(Self {
            time_index,
            constraints,
        })
    }

    /// The full indexed span, `{ first entry, last entry }`.
    pub fn global_range(&self) -> ViewRange {
        ViewRange::new(
            self.time_index.first().day_count,
            self.time_index.last().day_count,
        )
    }

    pub fn series(&self, id: SeriesId) -> Option<&ConstraintSeries> {
        self.constraints.get(id.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (SeriesId, &ConstraintSeries)> {
        self.constraints
            .iter()
            .enumerate()
            .map(|(i, s)| (SeriesId(i), s))
    }

    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    /// Append a series (e.g. from a CSV import) after validating it against the calendar.
    pub fn push(&mut self, series: ConstraintSeries) -> Result<SeriesId> {
        let end = self.global_range().end;
        if series.samples().iter().any(|s| s.day_count > end) {
            return Err(Error::InvalidSeries {
                name: series.name,
                reason: format!("change points run past the end of the calendar ({})", end),
            });
        }
        self.constraints.push(series);
        Ok(SeriesId(self.constraints.len() - 1))
    }
}
