use chrono::{NaiveDate, NaiveDateTime};

/// Every calendar day from `start` through `end`, both inclusive.
///
/// Returns an empty sequence when `start` is after `end`.
#[must_use]
pub fn date_sequence(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    start.iter_days().take_while(|day| *day <= end).collect()
}

/// True when both timestamps fall on the same calendar day.
#[must_use]
pub fn same_day(a: NaiveDateTime, b: NaiveDateTime) -> bool {
    a.date() == b.date()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{date_sequence, same_day};

    fn day(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, month, day).expect("valid date")
    }

    #[test]
    fn sequence_includes_both_ends_and_crosses_months() {
        let days = date_sequence(day(3, 30), day(4, 2));
        assert_eq!(days, vec![day(3, 30), day(3, 31), day(4, 1), day(4, 2)]);
    }

    #[test]
    fn sequence_is_empty_when_reversed_and_single_when_equal() {
        assert!(date_sequence(day(4, 2), day(3, 30)).is_empty());
        assert_eq!(date_sequence(day(5, 1), day(5, 1)), vec![day(5, 1)]);
    }

    #[test]
    fn same_day_ignores_time_of_day() {
        let morning = day(6, 1).and_hms_opt(6, 15, 0).expect("valid time");
        let evening = day(6, 1).and_hms_opt(21, 40, 0).expect("valid time");
        let next = day(6, 2).and_hms_opt(0, 0, 0).expect("valid time");
        assert!(same_day(morning, evening));
        assert!(!same_day(evening, next));
    }
}
