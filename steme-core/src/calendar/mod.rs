//! Calendar view state.
//!
//! `CalendarView` owns the selected date, the disabled weekday set, the
//! derived marked-dates map and the month-correctness flag. It reacts to the
//! renderer's events (`on_day_press`, `on_month_change`, `on_month_did_render`)
//! and recomputes everything it derives from "today" or the selection.
//! Every transition is synchronous and cannot fail.

mod marked;
mod weekdays;

pub use marked::{MarkedDates, Marking, compute_marked_dates};
pub use weekdays::DisabledWeekdays;

use serde::Serialize;
use tracing::{debug, trace};

use crate::config::CalendarOptions;
use crate::date::{CalendarDate, MonthPage};

/// Outcome of a day press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayPress {
    Selected,
    /// The date is disabled and the touch policy blocks it.
    Ignored,
}

/// Inputs handed to the calendar renderer after every change.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderInputs {
    pub disabled_days_indexes: Vec<u8>,
    pub marked_dates: MarkedDates,
}

#[derive(Debug, Clone)]
pub struct CalendarView {
    today: CalendarDate,
    selected: CalendarDate,
    disabled: DisabledWeekdays,
    month_correct: bool,
    visible: MonthPage,
    marked: MarkedDates,
    disable_touch_for_disabled_days: bool,
}

impl CalendarView {
    /// Seed all state from `today`.
    pub fn on_mount(today: CalendarDate, options: &CalendarOptions) -> Self {
        CalendarView {
            today,
            selected: today,
            disabled: DisabledWeekdays::only(today.weekday_index()),
            month_correct: true,
            visible: today.month_page(),
            marked: compute_marked_dates(&today),
            disable_touch_for_disabled_days: options.disable_all_touch_events_for_disabled_days,
        }
    }

    pub fn on_day_press(&mut self, date: CalendarDate) -> DayPress {
        if !self.is_touchable(&date) {
            debug!(date = %date, "ignoring press on disabled day");
            return DayPress::Ignored;
        }

        self.selected = date;
        self.marked = compute_marked_dates(&self.selected);
        DayPress::Selected
    }

    /// Disabling by weekday only applies while the real current month is
    /// visible. Any other page suspends it.
    pub fn on_month_change(&mut self, page: MonthPage) {
        self.visible = page;

        if page == self.today.month_page() {
            self.disabled = DisabledWeekdays::only(self.today.weekday_index());
            self.month_correct = true;
        } else {
            self.disabled = DisabledWeekdays::none();
            self.month_correct = false;
        }

        debug!(
            page = %page,
            month_correct = self.month_correct,
            "month changed"
        );
    }

    pub fn on_month_did_render(&self) {
        trace!(page = %self.visible, "month rendered");
    }

    pub fn today(&self) -> CalendarDate {
        self.today
    }

    pub fn selected(&self) -> CalendarDate {
        self.selected
    }

    pub fn disabled_weekdays(&self) -> DisabledWeekdays {
        self.disabled
    }

    pub fn marked_dates(&self) -> &MarkedDates {
        &self.marked
    }

    pub fn is_month_correct(&self) -> bool {
        self.month_correct
    }

    pub fn visible_month(&self) -> MonthPage {
        self.visible
    }

    /// Whether a press on `date` reaches the selection.
    pub fn is_touchable(&self, date: &CalendarDate) -> bool {
        !(self.disable_touch_for_disabled_days
            && self.month_correct
            && self.visible.contains(date)
            && self.disabled.contains(date.weekday_index()))
    }

    /// Whether `date` is drawn greyed out on the visible page.
    pub fn is_disabled(&self, date: &CalendarDate) -> bool {
        self.visible.contains(date) && self.disabled.contains(date.weekday_index())
    }

    pub fn render_inputs(&self) -> RenderInputs {
        RenderInputs {
            disabled_days_indexes: self.disabled.as_indexes(),
            marked_dates: self.marked.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> CalendarDate {
        CalendarDate::parse(s).unwrap()
    }

    fn page(month: u32, year: i32) -> MonthPage {
        MonthPage::new(month, year).unwrap()
    }

    /// 2024-03-15 is a Friday.
    fn mounted() -> CalendarView {
        CalendarView::on_mount(date("2024-03-15"), &CalendarOptions::default())
    }

    fn assert_flags_agree(view: &CalendarView) {
        let today_only = DisabledWeekdays::only(view.today().weekday_index());
        assert_eq!(view.is_month_correct(), view.disabled_weekdays() == today_only);
    }

    #[test]
    fn test_mount_seeds_from_today() {
        let view = mounted();

        assert_eq!(view.selected(), date("2024-03-15"));
        assert_eq!(view.disabled_weekdays().as_indexes(), vec![5]);
        assert!(view.is_month_correct());
        assert_eq!(view.marked_dates(), &compute_marked_dates(&date("2024-03-15")));
        assert_eq!(view.visible_month(), page(3, 2024));
    }

    #[test]
    fn test_month_change_away_clears_disabled_weekdays() {
        let mut view = mounted();
        view.on_month_change(page(4, 2024));

        assert!(view.disabled_weekdays().is_empty());
        assert!(!view.is_month_correct());
        assert_flags_agree(&view);
    }

    #[test]
    fn test_day_press_leaves_month_state_alone() {
        let mut view = mounted();
        view.on_month_change(page(4, 2024));

        assert_eq!(view.on_day_press(date("2024-04-03")), DayPress::Selected);
        assert_eq!(view.selected(), date("2024-04-03"));
        assert_eq!(view.marked_dates().len(), 1);
        assert_eq!(view.marked_dates().get("2024-04-03"), Some(&Marking::SELECTED));
        assert!(view.disabled_weekdays().is_empty());
        assert!(!view.is_month_correct());
    }

    #[test]
    fn test_returning_to_current_month_restores_from_today() {
        let mut view = mounted();
        view.on_month_change(page(4, 2024));
        view.on_day_press(date("2024-04-03"));
        view.on_month_change(page(3, 2024));

        assert_eq!(view.disabled_weekdays().as_indexes(), vec![5]);
        assert!(view.is_month_correct());
        // Selection is independent of month paging
        assert_eq!(view.selected(), date("2024-04-03"));
        assert_flags_agree(&view);
    }

    #[test]
    fn test_same_month_in_another_year_is_not_current() {
        let mut view = mounted();
        view.on_month_change(page(3, 2025));

        assert!(!view.is_month_correct());
        assert!(view.disabled_weekdays().is_empty());
    }

    #[test]
    fn test_month_change_is_idempotent() {
        for target in [page(3, 2024), page(7, 2023)] {
            let mut view = mounted();
            view.on_month_change(target);
            let first = (view.disabled_weekdays(), view.is_month_correct());
            view.on_month_change(target);

            assert_eq!((view.disabled_weekdays(), view.is_month_correct()), first);
        }
    }

    #[test]
    fn test_rapid_month_changes_apply_in_order() {
        let mut view = mounted();
        let mut current = page(3, 2024);
        for _ in 0..14 {
            current = current.next();
            view.on_month_change(current);
            assert_flags_agree(&view);
        }
        for _ in 0..14 {
            current = current.prev();
            view.on_month_change(current);
            assert_flags_agree(&view);
        }

        assert_eq!(view.visible_month(), page(3, 2024));
        assert!(view.is_month_correct());
    }

    #[test]
    fn test_press_outside_visible_page_then_auto_page() {
        let mut view = mounted();

        assert_eq!(view.on_day_press(date("2024-05-20")), DayPress::Selected);
        assert!(view.is_month_correct());

        view.on_month_change(page(5, 2024));
        assert_eq!(view.selected(), date("2024-05-20"));
        assert!(!view.is_month_correct());
        assert!(view.marked_dates().is_marked(&date("2024-05-20")));
    }

    #[test]
    fn test_disabled_day_is_pressable_by_default() {
        let mut view = mounted();

        assert_eq!(view.on_day_press(date("2024-03-22")), DayPress::Selected);
        assert!(view.is_disabled(&date("2024-03-22")));
    }

    #[test]
    fn test_touch_policy_blocks_disabled_day_in_current_month() {
        let options = CalendarOptions {
            disable_all_touch_events_for_disabled_days: true,
            ..CalendarOptions::default()
        };
        let mut view = CalendarView::on_mount(date("2024-03-15"), &options);

        assert_eq!(view.on_day_press(date("2024-03-22")), DayPress::Ignored);
        assert_eq!(view.selected(), date("2024-03-15"));
        assert_eq!(view.on_day_press(date("2024-03-21")), DayPress::Selected);

        // Away from the current month the policy has nothing to block
        view.on_month_change(page(4, 2024));
        assert_eq!(view.on_day_press(date("2024-04-05")), DayPress::Selected);
    }

    #[test]
    fn test_render_inputs_serialize() {
        let view = mounted();
        let json = serde_json::to_value(view.render_inputs()).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "disabledDaysIndexes": [5],
                "markedDates": {
                    "2024-03-15": { "selected": true, "disableTouchEvent": false }
                }
            })
        );
    }
}
