//! Weekdays greyed out in the visible month page.

use serde::Serialize;

/// Set of weekday indices (0 = Sunday .. 6 = Saturday).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(into = "Vec<u8>")]
pub struct DisabledWeekdays(u8);

impl DisabledWeekdays {
    pub fn none() -> Self {
        DisabledWeekdays(0)
    }

    pub fn only(weekday: u8) -> Self {
        debug_assert!(weekday < 7, "weekday index out of range: {weekday}");
        DisabledWeekdays(1 << (weekday % 7))
    }

    pub fn contains(&self, weekday: u8) -> bool {
        weekday < 7 && self.0 & (1 << weekday) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// The `disabledDaysIndexes` render input, ascending.
    pub fn as_indexes(&self) -> Vec<u8> {
        (0..7).filter(|d| self.contains(*d)).collect()
    }
}

impl From<DisabledWeekdays> for Vec<u8> {
    fn from(days: DisabledWeekdays) -> Self {
        days.as_indexes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_holds_a_single_weekday() {
        let days = DisabledWeekdays::only(5);
        assert_eq!(days.as_indexes(), vec![5]);
        assert!(days.contains(5));
        assert!(!days.contains(0));
    }

    #[test]
    fn test_none_is_empty() {
        assert!(DisabledWeekdays::none().is_empty());
        assert_eq!(DisabledWeekdays::none().as_indexes(), Vec::<u8>::new());
        assert_eq!(serde_json::to_string(&DisabledWeekdays::only(0)).unwrap(), "[0]");
    }
}
