use chrono::{NaiveDate, NaiveDateTime};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::LocationId;
use crate::render::Color;

/// A kind of field work (tillage, planting, mowing, ...) drawn as one marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    pub id: String,
    pub name: String,
    /// Marker color. The style's default marker color is used when absent.
    #[serde(default)]
    pub color: Option<Color>,
}

impl Operation {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color: None,
        }
    }

    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }
}

/// Operations in one cell. Most cells hold one or two markers.
pub type CellOperations = SmallVec<[Operation; 4]>;

/// Everything recorded at one location on one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatedOperations {
    pub date: NaiveDateTime,
    pub operations: CellOperations,
}

impl DatedOperations {
    #[must_use]
    pub fn day(&self) -> NaiveDate {
        self.date.date()
    }
}

/// A flat task log entry, as produced by the data layer before grouping.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskRecord {
    pub location: LocationId,
    pub date: NaiveDateTime,
    pub operation: Operation,
}

/// Read-only lookup of operations by location and calendar day.
///
/// Each location's entries are kept ordered by day with at most one entry per
/// day, so lookups ignore the time-of-day component of stored timestamps.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TaskMatrix {
    by_location: IndexMap<LocationId, Vec<DatedOperations>>,
}

impl TaskMatrix {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Groups flat task records into per-location, per-day cells.
    ///
    /// Records on the same day at the same location merge into one cell in
    /// the order they were supplied.
    #[must_use]
    pub fn from_tasks(tasks: impl IntoIterator<Item = TaskRecord>) -> Self {
        let mut matrix = Self::new();
        for task in tasks {
            matrix.insert(task);
        }
        matrix
    }

    pub fn insert(&mut self, task: TaskRecord) {
        let entries = self.by_location.entry(task.location).or_default();
        let day = task.date.date();
        match entries.binary_search_by_key(&day, DatedOperations::day) {
            Ok(index) => entries[index].operations.push(task.operation),
            Err(index) => entries.insert(
                index,
                DatedOperations {
                    date: task.date,
                    operations: SmallVec::from_elem(task.operation, 1),
                },
            ),
        }
    }

    #[must_use]
    pub fn entries(&self, location: &LocationId) -> &[DatedOperations] {
        self.by_location
            .get(location)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Operations recorded at `location` on `day`, if any.
    #[must_use]
    pub fn operations_on(&self, location: &LocationId, day: NaiveDate) -> Option<&[Operation]> {
        let entries = self.entries(location);
        entries
            .binary_search_by_key(&day, DatedOperations::day)
            .ok()
            .map(|index| entries[index].operations.as_slice())
            .filter(|operations| !operations.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{Operation, TaskMatrix, TaskRecord};
    use crate::core::LocationId;

    fn at(day: u32, hour: u32) -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, day)
            .and_then(|date| date.and_hms_opt(hour, 0, 0))
            .expect("valid timestamp")
    }

    fn task(location: &str, day: u32, hour: u32, op: &str) -> TaskRecord {
        TaskRecord {
            location: LocationId::from(location),
            date: at(day, hour),
            operation: Operation::new(op, op),
        }
    }

    #[test]
    fn same_day_tasks_merge_into_one_cell_in_supply_order() {
        let matrix = TaskMatrix::from_tasks([
            task("lake", 3, 8, "till"),
            task("lake", 1, 9, "plant"),
            task("lake", 3, 17, "mow"),
        ]);

        let entries = matrix.entries(&LocationId::from("lake"));
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].day(), at(1, 0).date());

        let day3 = matrix
            .operations_on(&LocationId::from("lake"), at(3, 0).date())
            .expect("cell on day 3");
        let ids: Vec<&str> = day3.iter().map(|op| op.id.as_str()).collect();
        assert_eq!(ids, vec!["till", "mow"]);
    }

    #[test]
    fn missing_locations_and_days_are_empty() {
        let matrix = TaskMatrix::from_tasks([task("home", 2, 12, "till")]);
        assert!(matrix.operations_on(&LocationId::from("home"), at(4, 0).date()).is_none());
        assert!(matrix.operations_on(&LocationId::from("yak"), at(2, 0).date()).is_none());
        assert!(matrix.entries(&LocationId::from("yak")).is_empty());
    }
}
