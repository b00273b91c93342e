//! Render-facing map of highlighted dates.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::date::CalendarDate;

/// How a single date is drawn by the calendar renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Marking {
    pub selected: bool,
    pub disable_touch_event: bool,
}

impl Marking {
    pub const SELECTED: Marking = Marking {
        selected: true,
        disable_touch_event: false,
    };
}

/// `YYYY-MM-DD` -> marking. Serializes to the `markedDates` render input.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarkedDates(BTreeMap<String, Marking>);

impl MarkedDates {
    pub fn get(&self, key: &str) -> Option<&Marking> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Marking)> {
        self.0.iter()
    }

    pub fn is_marked(&self, date: &CalendarDate) -> bool {
        self.0.contains_key(&date.iso_key())
    }
}

/// Project the selected date into the map the renderer highlights.
///
/// Always rebuilt from scratch: the result holds exactly one entry.
pub fn compute_marked_dates(selected: &CalendarDate) -> MarkedDates {
    MarkedDates(BTreeMap::from([(selected.iso_key(), Marking::SELECTED)]))
}
