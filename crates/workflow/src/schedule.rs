use chrono::NaiveDate;

/// Whole days from `today` until `deadline`; negative once the deadline has passed.
pub fn remaining_days(deadline: Option<NaiveDate>, today: NaiveDate) -> Option<i64> {
    deadline.map(|deadline| (deadline - today).num_days())
}

pub fn is_overdue(deadline: Option<NaiveDate>, today: NaiveDate) -> bool {
    remaining_days(deadline, today).is_some_and(|days| days < 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn remaining_days_is_signed() {
        let today = date(2026, 3, 10);
        assert_eq!(remaining_days(Some(date(2026, 3, 20)), today), Some(10));
        assert_eq!(remaining_days(Some(today), today), Some(0));
        assert_eq!(remaining_days(Some(date(2026, 3, 7)), today), Some(-3));
        assert_eq!(remaining_days(Some(date(2027, 3, 10)), today), Some(365));
        assert_eq!(remaining_days(None, today), None);
    }

    #[test]
    fn overdue_only_after_deadline() {
        let today = date(2026, 1, 1);
        assert!(is_overdue(Some(date(2025, 12, 31)), today));
        assert!(!is_overdue(Some(today), today));
        assert!(!is_overdue(None, today));
    }
}
