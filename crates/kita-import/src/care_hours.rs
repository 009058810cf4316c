//! Weekly care hours normalization.
//!
//! Exports mix weekly figures with daily ones. A value below
//! [`DAILY_HOURS_THRESHOLD`] cannot be a weekly booking and is read as hours
//! per day.

use kita_model::ChildRecord;

/// Values below this are daily hours.
pub const DAILY_HOURS_THRESHOLD: f64 = 12.0;

/// Care days per week used to turn a daily figure into a weekly one.
pub const DAYS_PER_WEEK: f64 = 5.0;

/// Converts an imported care hours value to weekly hours.
///
/// Apply exactly once, when the row is submitted. Stored values are already
/// weekly and must not pass through here again.
pub fn normalize_care_hours(hours: f64) -> f64 {
    if hours < DAILY_HOURS_THRESHOLD {
        hours * DAYS_PER_WEEK
    } else {
        hours
    }
}

/// Copy of `child` with its care hours normalized.
pub fn normalized_child(child: &ChildRecord) -> ChildRecord {
    ChildRecord {
        care_hours: child.care_hours.map(normalize_care_hours),
        ..child.clone()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn daily_value_becomes_weekly() {
        assert_eq!(normalize_care_hours(6.0), 30.0);
        assert_eq!(normalize_care_hours(11.5), 57.5);
    }

    #[test]
    fn threshold_is_already_weekly() {
        assert_eq!(normalize_care_hours(12.0), 12.0);
        assert_eq!(normalize_care_hours(35.0), 35.0);
    }

    #[test]
    fn second_pass_changes_small_values() {
        // 2 -> 10 -> 50: normalizing stored values would corrupt them.
        let once = normalize_care_hours(2.0);
        assert_eq!(once, 10.0);
        assert_ne!(normalize_care_hours(once), once);
    }

    #[test]
    fn child_without_hours_is_unchanged() {
        let child = ChildRecord {
            member_number: "7".to_string(),
            ..ChildRecord::default()
        };
        assert_eq!(normalized_child(&child), child);
    }

    proptest! {
        #[test]
        fn idempotent_at_or_above_threshold(hours in 12.0f64..200.0) {
            let once = normalize_care_hours(hours);
            prop_assert_eq!(normalize_care_hours(once), once);
        }

        #[test]
        fn below_threshold_multiplies_by_five(hours in 0.0f64..12.0) {
            prop_assert_eq!(normalize_care_hours(hours), hours * 5.0);
        }
    }
}
